/// Topic-aware ranking with round-robin diversification.
///
/// Every document is scored as `2 × tag hits + 6 × (category inferred) + priority`.
/// Selection then sweeps the categories (inferred ones first) taking the best unused
/// document from each, so a result set spans several topics instead of clustering on
/// the single highest-scoring one. Any remaining slots are topped up from the global
/// score order.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::classify::{normalize, Classification, Classifier};
use crate::error::RetrievalError;
use crate::model::{Category, Document, ScoredDocument};

const TAG_HIT_WEIGHT: u32 = 2;
const CATEGORY_MATCH_WEIGHT: u32 = 6;

/// Boundary check for caller-supplied limits.
///
/// Negative values are a caller bug and are rejected. Zero is a defined request for an
/// empty result, not an error.
pub fn validate_limit(raw: i64) -> Result<usize, RetrievalError> {
    usize::try_from(raw).map_err(|_| RetrievalError::InvalidLimit(raw))
}

/// Score every catalog document and sort descending by score. Equal scores keep
/// catalog order.
pub fn score_documents<'a>(
    catalog: &'a Catalog,
    query: &str,
    categories: &[Category],
) -> Vec<ScoredDocument<'a>> {
    let normalized = normalize(query);
    let mut scored: Vec<ScoredDocument<'a>> = catalog
        .documents()
        .iter()
        .map(|document| ScoredDocument {
            document,
            score: score(document, &normalized, categories),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn score(document: &Document, normalized_query: &str, categories: &[Category]) -> u32 {
    let tag_hits = document
        .tags
        .iter()
        .filter(|tag| normalized_query.contains(&normalize(tag)))
        .count() as u32;
    let category_score = if categories.contains(&document.category) {
        CATEGORY_MATCH_WEIGHT
    } else {
        0
    };
    TAG_HIT_WEIGHT * tag_hits + category_score + u32::from(document.priority)
}

/// Pick up to `limit` distinct documents from a score-sorted list.
///
/// Buckets are filled by walking `scored` in order, so each bucket is already
/// descending and the "other" categories are visited in the order their best document
/// appears.
pub fn select_diverse<'a>(
    scored: &[ScoredDocument<'a>],
    categories: &[Category],
    limit: usize,
) -> Vec<ScoredDocument<'a>> {
    if limit == 0 || scored.is_empty() {
        return Vec::new();
    }

    let mut buckets: HashMap<Category, Vec<ScoredDocument<'a>>> = HashMap::new();
    // HashMap iteration order is unspecified; discovery order lives here.
    let mut discovered: Vec<Category> = Vec::new();
    for entry in scored {
        let category = entry.document.category;
        buckets
            .entry(category)
            .or_insert_with(|| {
                discovered.push(category);
                Vec::new()
            })
            .push(*entry);
    }

    let mut traversal: Vec<Category> = categories.to_vec();
    traversal.extend(discovered.into_iter().filter(|c| !categories.contains(c)));

    let mut result: Vec<ScoredDocument<'a>> = Vec::with_capacity(limit);
    let mut used: HashSet<&'a str> = HashSet::new();

    'sweeps: while result.len() < limit {
        let mut progressed = false;
        for category in &traversal {
            let Some(bucket) = buckets.get(category) else {
                continue;
            };
            let Some(next) = bucket.iter().find(|e| !used.contains(e.document.url.as_str()))
            else {
                continue;
            };
            used.insert(next.document.url.as_str());
            result.push(*next);
            progressed = true;
            if result.len() >= limit {
                break 'sweeps;
            }
        }
        if !progressed {
            break;
        }
    }

    if result.len() < limit {
        for entry in scored {
            if result.len() >= limit {
                break;
            }
            if used.insert(entry.document.url.as_str()) {
                result.push(*entry);
            }
        }
    }

    result.truncate(limit);
    result
}

/// Classifier plus catalog, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct SourceRanker {
    catalog: Arc<Catalog>,
    classifier: Arc<Classifier>,
}

impl SourceRanker {
    pub fn new(catalog: Arc<Catalog>, classifier: Arc<Classifier>) -> Self {
        Self { catalog, classifier }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classify(&self, query: &str) -> Classification {
        self.classifier.classify_detailed(query)
    }

    pub fn rank(&self, query: &str, limit: usize) -> Vec<&Document> {
        self.rank_scored(query, limit)
            .into_iter()
            .map(|e| e.document)
            .collect()
    }

    pub fn rank_scored(&self, query: &str, limit: usize) -> Vec<ScoredDocument<'_>> {
        self.rank_with_classification(query, limit).1
    }

    /// Rank and also return the classification the ranking was biased by.
    pub fn rank_with_classification(
        &self,
        query: &str,
        limit: usize,
    ) -> (Classification, Vec<ScoredDocument<'_>>) {
        let classification = self.classifier.classify_detailed(query);
        let categories = &classification.categories;
        let scored = score_documents(&self.catalog, query, categories);
        let selected = select_diverse(&scored, categories, limit);
        debug!(
            ?categories,
            limit,
            candidates = scored.len(),
            selected = selected.len(),
            "sources ranked"
        );
        (classification, selected)
    }
}

impl Default for SourceRanker {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::builtin()), Arc::new(Classifier::builtin()))
    }
}
