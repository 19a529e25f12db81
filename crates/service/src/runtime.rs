//! Runtime environment helpers
//!
//! Thin wrapper around `todo_common::env` so the server only has to know the
//! data file path, not which directory it lives in.

use std::path::Path;

/// Ensure the data file's directory exists; warn on a missing frontend.
pub async fn ensure_env(frontend_dir: &Path, data_file: Option<&Path>) -> anyhow::Result<()> {
    todo_common::env::ensure_env(frontend_dir, data_file.and_then(Path::parent)).await
}
