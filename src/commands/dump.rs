//! Dumps the raw storefront listing to a local file.

use crate::format::pretty::prettify;
use crate::steam::StoreFetch;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Fetches the listing page and writes it, pretty-printed, to `path`,
/// overwriting any existing file.
pub async fn dump_store_html(client: &impl StoreFetch, path: &Path) -> Result<()> {
    let html = client.listing().await?;

    std::fs::write(path, prettify(&html))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Dumped storefront listing to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticStore(&'static str);

    #[async_trait]
    impl StoreFetch for StaticStore {
        async fn listing(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        async fn page(&self, _url: &str) -> Result<String> {
            anyhow::bail!("unused")
        }

        fn base_url(&self) -> &str {
            "http://store.test"
        }
    }

    #[tokio::test]
    async fn test_dump_writes_pretty_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store_content.html");
        let store = StaticStore("<html><body><div>Deal</div></body></html>");

        dump_store_html(&store, &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<html>\n"));
        assert!(written.contains("  <div>\n   Deal\n  </div>\n"));
    }

    #[tokio::test]
    async fn test_dump_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store_content.html");
        std::fs::write(&path, "stale contents that are much longer than the new dump").unwrap();

        dump_store_html(&StaticStore("<p>x</p>"), &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("<p>"));
    }

    #[tokio::test]
    async fn test_dump_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("store_content.html");

        let err = dump_store_html(&StaticStore("<p>x</p>"), &path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
