// File: crates/harvest-core/src/error.rs
// Summary: Error type shared by loading, scene export and render-target checks.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV '{source_name}' has no '{column}' column")]
    MissingColumn { source_name: String, column: &'static str },
    #[error("render target not available: {}", .0.display())]
    MissingRenderTarget(PathBuf),
    #[error("failed to serialize scene: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
