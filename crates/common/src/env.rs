//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
///
/// The frontend directory is optional (static assets simply 404 without
/// it); the data directory must exist before the store opens its backing
/// file.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

/// Resolve the backing-file path inside the data directory.
pub fn data_file_path(data_dir: &str, file_name: &str) -> std::path::PathBuf {
    Path::new(data_dir).join(file_name)
}
