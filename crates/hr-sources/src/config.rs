use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_LIMIT: usize = 5;
const DEFAULT_MAX_LIMIT: usize = 20;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Limit used when a tool call omits `limit`.
    pub default_limit: usize,
    /// Upper bound applied to every requested limit.
    pub max_limit: usize,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `HR_SOURCES_CATALOG_PATH`: JSON array of documents (default: built-in catalog)
    /// - `HR_SOURCES_DEFAULT_LIMIT` (default: 5)
    /// - `HR_SOURCES_MAX_LIMIT` (default: 20)
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog_path = lookup("HR_SOURCES_CATALOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let default_limit = parse_limit(&lookup, "HR_SOURCES_DEFAULT_LIMIT", DEFAULT_LIMIT)?;
        let max_limit = parse_limit(&lookup, "HR_SOURCES_MAX_LIMIT", DEFAULT_MAX_LIMIT)?;
        if default_limit > max_limit {
            return Err(AppError::Config(format!(
                "HR_SOURCES_DEFAULT_LIMIT ({default_limit}) exceeds HR_SOURCES_MAX_LIMIT ({max_limit})"
            )));
        }

        if let Some(path) = &catalog_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "catalog file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            catalog_path,
            default_limit,
            max_limit,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR").filter(|s| !s.trim().is_empty()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            tcp_listen_addr: None,
        }
    }
}

fn parse_limit(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            AppError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))
        }),
    }
}
