use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::config::Config;
use hr_retrieval::catalog::Catalog;
use hr_retrieval::classify::Classifier;
use hr_retrieval::context::format_context;
use hr_retrieval::mcp_api::{
    BuildContextParams, BuildContextResponse, CatalogInfoResponse, CategoryInfo,
    CategoryListResponse, ClassifyQueryParams, ClassifyQueryResponse, ListCategoryParams,
    RankSourcesParams, RankSourcesResponse, SourceResult, SourceSummary,
};
use hr_retrieval::model::Category;
use hr_retrieval::rank::{validate_limit, SourceRanker};

#[derive(Clone)]
pub struct HrSourcesServer {
    ranker: SourceRanker,
    default_limit: usize,
    max_limit: usize,
    tool_router: ToolRouter<HrSourcesServer>,
}

impl HrSourcesServer {
    pub fn new(catalog: Arc<Catalog>, classifier: Arc<Classifier>, config: &Config) -> Self {
        Self {
            ranker: SourceRanker::new(catalog, classifier),
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            tool_router: Self::tool_router(),
        }
    }

    fn resolve_limit(&self, raw: Option<i64>) -> Result<usize, String> {
        match raw {
            None => Ok(self.default_limit),
            Some(n) => Ok(validate_limit(n).map_err(|e| e.to_string())?.min(self.max_limit)),
        }
    }

    fn category_info(&self, category: Category) -> CategoryInfo {
        CategoryInfo {
            key: category,
            display_name: category.label().to_string(),
            document_count: self.ranker.catalog().in_category(category).count(),
        }
    }
}

#[tool_router]
impl HrSourcesServer {
    #[tool(description = "Rank primary-source HR references for a question. Results are spread across the inferred topic categories rather than clustered on one.")]
    async fn rank_sources(
        &self,
        Parameters(params): Parameters<RankSourcesParams>,
    ) -> Result<Json<RankSourcesResponse>, String> {
        let limit = self.resolve_limit(params.limit)?;
        let query = params.query.trim();
        let (classification, selected) = self.ranker.rank_with_classification(query, limit);
        let results: Vec<SourceResult> = selected.into_iter().map(SourceResult::from).collect();
        info!(limit, returned = results.len(), "rank_sources");

        Ok(Json(RankSourcesResponse {
            categories: classification.categories,
            results,
        }))
    }

    #[tool(description = "Infer the HR topic categories of a question, with per-category keyword hit counts.")]
    async fn classify_query(
        &self,
        Parameters(params): Parameters<ClassifyQueryParams>,
    ) -> Result<Json<ClassifyQueryResponse>, String> {
        let classification = self.ranker.classify(params.query.trim());
        info!(
            categories = ?classification.categories,
            fallback = classification.fallback,
            "classify_query"
        );
        Ok(Json(classification.into()))
    }

    #[tool(description = "Build the reference-link block for a question: ranked sources rendered as numbered '- [n] title: url' lines under a fixed header.")]
    async fn build_context(
        &self,
        Parameters(params): Parameters<BuildContextParams>,
    ) -> Result<Json<BuildContextResponse>, String> {
        let limit = self.resolve_limit(params.limit)?;
        let selected = self.ranker.rank_scored(params.query.trim(), limit);
        let context = format_context(selected.iter().map(|e| e.document));
        info!(limit, sources = selected.len(), "build_context");

        Ok(Json(BuildContextResponse {
            context,
            sources: selected.into_iter().map(SourceResult::from).collect(),
        }))
    }

    #[tool(description = "List every catalog source in a category (e.g. 'subsidy', 'harassment').")]
    async fn list_category(
        &self,
        Parameters(params): Parameters<ListCategoryParams>,
    ) -> Result<Json<CategoryListResponse>, String> {
        let category_key = params.category.trim().to_string();
        if category_key.is_empty() {
            return Err("category must not be empty".to_string());
        }
        let category: Category = category_key.parse().map_err(|e| format!("{e}"))?;

        let sources: Vec<SourceSummary> = self
            .ranker
            .catalog()
            .in_category(category)
            .map(SourceSummary::from)
            .collect();

        Ok(Json(CategoryListResponse {
            category: self.category_info(category),
            sources,
        }))
    }

    #[tool(description = "Describe the loaded catalog: document count, per-category counts and content fingerprint.")]
    async fn catalog_info(&self) -> Result<Json<CatalogInfoResponse>, String> {
        let catalog = self.ranker.catalog();
        let categories = catalog
            .categories()
            .into_iter()
            .map(|c| self.category_info(c))
            .collect();

        Ok(Json(CatalogInfoResponse {
            document_count: catalog.len(),
            fingerprint: catalog.fingerprint(),
            categories,
        }))
    }
}

#[tool_handler]
impl ServerHandler for HrSourcesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "hr-sources".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Japanese HR primary-source reference server. Use rank_sources to pick diverse, \
                 relevant official references for a question, build_context to get them as a \
                 ready-to-embed link block, classify_query to see which topics a question \
                 touches, list_category to browse a topic, and catalog_info to inspect the \
                 loaded catalog."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn server() -> HrSourcesServer {
        HrSourcesServer::new(
            Arc::new(Catalog::builtin()),
            Arc::new(Classifier::builtin()),
            &Config::default(),
        )
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = HrSourcesServer::tool_router().list_all();
        for name in [
            "rank_sources",
            "classify_query",
            "build_context",
            "list_category",
            "catalog_info",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn rank_sources_uses_default_limit() {
        let Json(response) = server()
            .rank_sources(Parameters(RankSourcesParams {
                query: "初めて雇用します".to_string(),
                limit: None,
            }))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 5);
        assert_eq!(
            response.categories,
            vec![Category::HiringOnboarding, Category::Subsidy]
        );
        let urls: HashSet<&str> = response.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls.len(), 5);
    }

    #[tokio::test]
    async fn rank_sources_caps_and_rejects_limits() {
        let server = server();
        let Json(capped) = server
            .rank_sources(Parameters(RankSourcesParams {
                query: String::new(),
                limit: Some(1_000),
            }))
            .await
            .unwrap();
        assert_eq!(capped.results.len(), 20);

        let Json(empty) = server
            .rank_sources(Parameters(RankSourcesParams {
                query: "残業".to_string(),
                limit: Some(0),
            }))
            .await
            .unwrap();
        assert!(empty.results.is_empty());

        let err = server
            .rank_sources(Parameters(RankSourcesParams {
                query: "残業".to_string(),
                limit: Some(-3),
            }))
            .await
            .err()
            .expect("negative limit is rejected");
        assert!(err.contains("-3"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn build_context_renders_ranked_sources() {
        let Json(response) = server()
            .build_context(Parameters(BuildContextParams {
                query: "初めて雇用します".to_string(),
                limit: Some(3),
            }))
            .await
            .unwrap();
        assert_eq!(response.sources.len(), 3);
        let lines: Vec<&str> = response.context.lines().collect();
        assert_eq!(lines[0], "参照一次情報（リンク）:");
        assert_eq!(lines.len(), 4);
        for (i, source) in response.sources.iter().enumerate() {
            assert_eq!(
                lines[i + 1],
                format!("- [{}] {}: {}", i + 1, source.title, source.url)
            );
        }
    }

    #[tokio::test]
    async fn classify_query_reports_fallback() {
        let Json(response) = server()
            .classify_query(Parameters(ClassifyQueryParams {
                query: "  ".to_string(),
            }))
            .await
            .unwrap();
        assert!(response.fallback);
        assert_eq!(response.categories.len(), 4);
        assert!(response.hits.is_empty());
    }

    #[tokio::test]
    async fn list_category_filters_and_rejects_unknown() {
        let server = server();
        let Json(response) = server
            .list_category(Parameters(ListCategoryParams {
                category: "Subsidy".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(response.category.key, Category::Subsidy);
        assert_eq!(response.category.document_count, 2);
        assert_eq!(response.sources.len(), 2);

        let err = server
            .list_category(Parameters(ListCategoryParams {
                category: "payroll".to_string(),
            }))
            .await
            .err()
            .expect("unknown category is rejected");
        assert!(err.contains("Available categories"));
    }

    #[tokio::test]
    async fn catalog_info_counts_every_document() {
        let Json(info) = server().catalog_info().await.unwrap();
        assert_eq!(info.document_count, 23);
        assert_eq!(info.fingerprint.len(), 64);
        let total: usize = info.categories.iter().map(|c| c.document_count).sum();
        assert_eq!(total, info.document_count);
    }
}
