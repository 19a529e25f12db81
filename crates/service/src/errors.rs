use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl ServiceError {
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io(format!("{}: {}", path.display(), err))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::Serialize(e.to_string()) }
}
