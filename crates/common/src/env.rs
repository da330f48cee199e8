//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static asset directory is missing and create the parent
/// directory of the SQLite file so `mode=rwc` can create the database.
pub async fn ensure_env(static_dir: &str, sqlite_file: Option<&str>) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; static routes will 404");
    }
    if let Some(parent) = sqlite_file.and_then(|f| Path::new(f).parent()) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_database_parent_dir() {
        let root = std::env::temp_dir().join(format!("cemetery-env-{}", std::process::id()));
        let db_file = root.join("nested").join("cemetery.db");
        let db_file = db_file.to_string_lossy().to_string();

        ensure_env("/nonexistent-static-dir", Some(&db_file)).await.unwrap();
        assert!(root.join("nested").is_dir());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn memory_database_needs_nothing() {
        ensure_env("/nonexistent-static-dir", None).await.unwrap();
    }
}
