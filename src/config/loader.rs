//! Route table loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouteTableConfig;
use crate::config::validation::ValidationError;
use crate::routing::table::RouteTable;

/// Error type for route table construction.
///
/// Fatal at startup: a table that fails here is never handed to
/// navigation-time code.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the declaration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Semantic validation failed; every defect is listed.
    #[error("validation failed: {}", list_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn list_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, validate and compile a route table from a declaration file.
///
/// The format is picked by extension: `.json` is parsed as JSON, anything
/// else as TOML.
pub fn load_route_table(path: &Path) -> Result<RouteTable, ConfigError> {
    let content = fs::read_to_string(path)?;

    let config: RouteTableConfig = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    let table = RouteTable::compile(&config)?;
    tracing::info!(
        path = %path.display(),
        routes = table.len(),
        "Route table loaded"
    );
    Ok(table)
}
