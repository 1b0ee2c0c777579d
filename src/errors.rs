use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring a scan or writing its output.
///
/// A ray that misses the scene is not an error, and neither is a control request that does not
/// apply to the current state. Both of those simply do nothing.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("rays per axis must be at least 1, got {0}")]
    InvalidResolution(i64),

    #[error("scan range must be positive and finite, got {0}")]
    InvalidRange(f64),

    #[error("failed to export point cloud to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid scene geometry: {0}")]
    Mesh(String),
}
