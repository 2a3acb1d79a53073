//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::debug;

/// Strip the `sqlite:` scheme and query string, returning the file path.
/// `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

/// Ensure the directory holding a file-backed SQLite database exists.
pub async fn ensure_sqlite_dir(url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(url) else { return Ok(()) };
    let Some(parent) = Path::new(path).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    debug!(dir = %parent.display(), "sqlite directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_strips_scheme_and_query() {
        assert_eq!(sqlite_file_path("sqlite://app_bubble.db?mode=rwc"), Some("app_bubble.db"));
        assert_eq!(sqlite_file_path("sqlite:data/app.db"), Some("data/app.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn ensure_dir_creates_missing_parent() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("item_services_{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/nested/app.db?mode=rwc", dir.display());
        ensure_sqlite_dir(&url).await?;
        assert!(dir.join("nested").is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
