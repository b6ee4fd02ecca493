use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    /// Text is not valid JSON, or does not fit the manifest shape
    #[error("Not a valid package.json file: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON whose structure cannot hold a manifest
    #[error("Not a valid package.json file: {0}")]
    InvalidShape(String),

    /// The operation needs a manifest file path and none is bound
    #[error("A package.json path must be set before {action}")]
    MissingFileTarget { action: &'static str },

    /// A file is bound but its contents have not been parsed
    #[error("{path} must be loaded before {action}")]
    NotLoaded { path: PathBuf, action: &'static str },

    #[error("Could not find {0}")]
    NotFound(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Whether the error means the text is not a usable manifest
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Json(_) | Self::InvalidShape(_))
    }
}
