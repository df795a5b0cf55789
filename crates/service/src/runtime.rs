//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can call
//! `service::runtime::ensure_env` without depending on `common` directly.

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}
