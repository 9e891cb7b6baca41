use sqlstate_errors::{ConfigError, SqlStateError};
use std::path::PathBuf;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid diagnostic JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidCode(#[from] SqlStateError),

    #[error("No condition named or coded '{0}' in the registry")]
    NotFound(String),
}

impl InspectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
