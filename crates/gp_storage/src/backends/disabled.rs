use async_trait::async_trait;
use gp_core::{Article, ArticleStore, Result};

/// Stand-in used when no persisted store is configured. Reads are empty and
/// writes are dropped, so every load cycle goes to the generative source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

#[async_trait]
impl ArticleStore for DisabledStorage {
    fn is_configured(&self) -> bool {
        false
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(Vec::new())
    }

    async fn insert_articles(&self, _articles: &[Article]) -> Result<()> {
        Ok(())
    }
}
