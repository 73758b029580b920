use std::path::Path;

use hr_retrieval::catalog::Catalog;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

/// Load the catalog once at startup: the configured JSON file, or the built-in table.
pub fn load_catalog(config: &Config) -> Result<Catalog, AppError> {
    match &config.catalog_path {
        Some(path) => load_catalog_file(path),
        None => {
            let catalog = Catalog::builtin();
            info!(documents = catalog.len(), "using built-in catalog");
            Ok(catalog)
        }
    }
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = Catalog::from_json(&content)?;
    info!(
        path = %path.display(),
        documents = catalog.len(),
        "loaded catalog from file"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use hr_retrieval::error::RetrievalError;

    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("hr-sources-{}-{name}", std::process::id()));
        std::fs::write(&path, content).expect("write temp catalog");
        path
    }

    #[test]
    fn builtin_when_no_path() {
        let catalog = load_catalog(&Config::default()).unwrap();
        assert_eq!(catalog.len(), Catalog::builtin().len());
    }

    #[test]
    fn loads_json_file() {
        let path = write_temp(
            "ok.json",
            r#"[{"title": "雇用関係助成金", "url": "https://a.jp/s", "category": "subsidy", "priority": 5, "tags": ["助成金"]}]"#,
        );
        let config = Config {
            catalog_path: Some(path.clone()),
            ..Config::default()
        };
        let catalog = load_catalog(&config).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("https://a.jp/s").is_some());
    }

    #[test]
    fn duplicate_urls_fail_to_load() {
        let path = write_temp(
            "dup.json",
            r#"[
                {"title": "a", "url": "https://a.jp/x", "category": "subsidy"},
                {"title": "b", "url": "https://a.jp/x", "category": "work_rules"}
            ]"#,
        );
        let err = load_catalog_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            err,
            AppError::Retrieval(RetrievalError::DuplicateUrl(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalog_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
