use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, HintHit};
use crate::model::{Category, Document, ScoredDocument};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RankSourcesParams {
    /// Free-text HR question, e.g. "初めて雇用します".
    pub query: String,
    /// Maximum number of sources to return (default: 5, capped by server config). Must not be negative.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClassifyQueryParams {
    /// Free-text HR question to classify.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildContextParams {
    /// Free-text HR question the answer will address.
    pub query: String,
    /// Maximum number of reference links in the block (default: 5, capped by server config).
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCategoryParams {
    /// Category key such as "subsidy" or "hiring_onboarding".
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceResult {
    pub title: String,
    pub url: String,
    pub category: Category,
    pub category_label: String,
    pub priority: u8,
    pub score: u32,
}

impl From<ScoredDocument<'_>> for SourceResult {
    fn from(entry: ScoredDocument<'_>) -> Self {
        Self {
            title: entry.document.title.clone(),
            url: entry.document.url.clone(),
            category: entry.document.category,
            category_label: entry.document.category.label().to_string(),
            priority: entry.document.priority,
            score: entry.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RankSourcesResponse {
    /// Categories inferred from the query, in traversal order.
    pub categories: Vec<Category>,
    pub results: Vec<SourceResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HintHitInfo {
    pub category: Category,
    pub hits: usize,
}

impl From<HintHit> for HintHitInfo {
    fn from(hit: HintHit) -> Self {
        Self {
            category: hit.category,
            hits: hit.hits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassifyQueryResponse {
    pub categories: Vec<Category>,
    pub hits: Vec<HintHitInfo>,
    /// True when no keyword matched and the default categories were used.
    pub fallback: bool,
}

impl From<Classification> for ClassifyQueryResponse {
    fn from(classification: Classification) -> Self {
        Self {
            categories: classification.categories,
            hits: classification.hits.into_iter().map(HintHitInfo::from).collect(),
            fallback: classification.fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildContextResponse {
    /// Reference block to embed verbatim in the answer instructions.
    pub context: String,
    pub sources: Vec<SourceResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceSummary {
    pub title: String,
    pub url: String,
    pub priority: u8,
    pub tags: Vec<String>,
}

impl From<&Document> for SourceSummary {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
            priority: doc.priority,
            tags: doc.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: Category,
    pub display_name: String,
    pub document_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub category: CategoryInfo,
    pub sources: Vec<SourceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogInfoResponse {
    pub document_count: usize,
    /// Hex SHA-256 of the loaded catalog.
    pub fingerprint: String,
    pub categories: Vec<CategoryInfo>,
}
