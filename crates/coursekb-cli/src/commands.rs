//! Command implementations.

use std::path::{Path, PathBuf};

use coursekb::{
    CatalogError, ConfigError, CourseKbError, InMemoryCatalog, RawFilterInput, Recommendation,
    RecommenderConfig, Recommender,
};
use serde::Serialize;
use thiserror::Error;

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG: &str = "coursekb.toml";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error("filters: {0}")]
    Filters(#[from] CourseKbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads `path`, or the default configuration file when none is given.
///
/// An explicit file must load; a missing default file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<RecommenderConfig, CliError> {
    let config = match path {
        Some(path) => match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => RecommenderConfig::from_yaml_file(path)?,
            _ => RecommenderConfig::from_toml_file(path)?,
        },
        None => RecommenderConfig::load(DEFAULT_CONFIG).unwrap_or_default(),
    };
    Ok(config)
}

/// Parses `--filters`: inline JSON when it looks like an object, a file
/// path otherwise.
pub fn parse_filters(arg: &str) -> Result<RawFilterInput, CliError> {
    let trimmed = arg.trim();
    if trimmed.starts_with('{') {
        return Ok(RawFilterInput::from_json_str(trimmed)?);
    }
    let contents = std::fs::read_to_string(trimmed)?;
    Ok(RawFilterInput::from_json_str(&contents)?)
}

pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog, CliError> {
    InMemoryCatalog::from_json_file(path).map_err(|source| CliError::Catalog {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs one recommendation and renders the response as JSON.
pub fn recommend(
    catalog: &InMemoryCatalog,
    filters: &RawFilterInput,
    config: &RecommenderConfig,
    pretty: bool,
) -> Result<String, CliError> {
    let recommendation: Recommendation = Recommender::new(config).recommend(catalog, filters);
    let json = if pretty {
        serde_json::to_string_pretty(&recommendation)?
    } else {
        serde_json::to_string(&recommendation)?
    };
    Ok(json)
}

#[derive(Debug, Serialize)]
pub struct Status<'a> {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub top_n: usize,
    pub fallback_limit: usize,
    pub relaxation_order: Vec<&'a str>,
}

impl<'a> Status<'a> {
    pub fn new(config: &'a RecommenderConfig) -> Self {
        Self {
            message: "coursekb recommender - use `recommend` with filters",
            status: "active",
            version: env!("CARGO_PKG_VERSION"),
            top_n: config.ranking.top_n,
            fallback_limit: config.fallback.limit,
            relaxation_order: config.relaxation.order.iter().map(|k| k.name()).collect(),
        }
    }
}

pub fn status(config: &RecommenderConfig) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&Status::new(config))?)
}
