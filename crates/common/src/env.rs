//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Warn when the static frontend is missing and make sure the directory that
/// will hold the todo data file exists.
///
/// `data_dir` is `None` for the in-memory backend, which touches no disk.
pub async fn ensure_env(frontend_dir: &Path, data_dir: Option<&Path>) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(frontend_dir = %frontend_dir.display(), "frontend directory not found; only the JSON API will be served");
    }
    if let Some(dir) = data_dir.filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
        info!(data_dir = %dir.display(), "data directory ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("todo_env_{}", uuid::Uuid::new_v4()));
        let data = root.join("nested").join("data");
        ensure_env(&root.join("no-frontend"), Some(&data)).await?;
        assert!(tokio::fs::metadata(&data).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn memory_backend_touches_nothing() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("todo_env_{}", uuid::Uuid::new_v4()));
        ensure_env(&root, None).await?;
        assert!(tokio::fs::metadata(&root).await.is_err());
        Ok(())
    }
}
