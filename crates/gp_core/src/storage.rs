use async_trait::async_trait;

use crate::types::Article;
use crate::{Error, Result};

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Whether a backing store is wired up at all.
    fn is_configured(&self) -> bool;

    /// Fetch every stored article, newest batch first.
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Append a batch of articles.
    async fn insert_articles(&self, articles: &[Article]) -> Result<()>;

    /// Read for a load cycle. Failures are logged and reported as an empty
    /// list so the caller falls back to the generative source.
    async fn read(&self) -> Vec<Article> {
        if !self.is_configured() {
            return Vec::new();
        }
        match self.list_articles().await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("Error fetching from store: {}", e);
                Vec::new()
            }
        }
    }

    /// Sync a freshly fetched list. Any backend failure becomes [`Error::Sync`].
    async fn write(&self, articles: &[Article]) -> Result<()> {
        if !self.is_configured() {
            return Ok(());
        }
        self.insert_articles(articles).await.map_err(|e| {
            tracing::error!("Error syncing to store: {}", e);
            match e {
                Error::Sync(msg) => Error::Sync(msg),
                other => Error::Sync(other.to_string()),
            }
        })
    }
}
