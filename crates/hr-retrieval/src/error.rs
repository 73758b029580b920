/// Error types for catalog construction and caller-supplied arguments.
///
/// Ranking itself never fails: an empty catalog, a query with no keyword hits, or a
/// catalog smaller than the requested limit are all defined outcomes, not errors.

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("duplicate url in catalog: {0}")]
    DuplicateUrl(String),

    #[error("priority {priority} out of range 1..=5 for {url}")]
    PriorityOutOfRange { url: String, priority: u8 },

    #[error("document #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("limit must not be negative (got {0})")]
    InvalidLimit(i64),

    #[error("unknown category: '{given}'. Available categories: {available}")]
    UnknownCategory { given: String, available: String },
}
