use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::warn;

use crate::errors::ServiceError;

/// A single JSON document kept in a file.
///
/// Holds no copy of the data: every `load` reads the whole file and every
/// `save` rewrites it. Read and parse failures are masked to `T::default()`
/// so a corrupt file degrades to an empty document instead of an error.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), _doc: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and write `T::default()` if the file is missing.
    pub async fn ensure_exists(&self) -> Result<(), ServiceError> {
        if fs::metadata(&self.path).await.is_ok() {
            return Ok(());
        }
        self.save(&T::default()).await
    }

    /// Read and parse the document.
    pub async fn load(&self) -> T {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "json file unreadable; using empty document");
                return T::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "json file corrupt; using empty document");
                T::default()
            }
        }
    }

    /// Pretty-print the document and replace the file contents.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::io(parent, e))?;
        }
        let data = serde_json::to_vec_pretty(doc)?;
        fs::write(&self.path, data)
            .await
            .map_err(|e| ServiceError::io(&self.path, e))?;
        Ok(())
    }
}
