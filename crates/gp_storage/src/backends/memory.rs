use async_trait::async_trait;
use chrono::Utc;
use gp_core::{Article, ArticleStore, Error, PersistedId, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{BackendConfig, StorageBackend};

pub struct MemoryStore {
    table: String,
    rows: Vec<Article>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new(table: String) -> Self {
        Self {
            table,
            rows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Appends a batch. The store owns row identity and stamps the whole batch
    /// with one creation time.
    pub fn insert_articles(&mut self, articles: &[Article]) {
        let created_at = Utc::now();
        for article in articles {
            let mut row = article.clone();
            row.id = Some(PersistedId::Number(self.next_id));
            row.created_at = Some(created_at);
            self.next_id += 1;
            self.rows.push(row);
        }
    }

    pub fn list_articles(&self) -> Vec<Article> {
        let mut rows = self.rows.clone();
        // Newest batch first, insertion order inside a batch.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| row_id(a).cmp(&row_id(b))));
        rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_id(article: &Article) -> i64 {
    match article.id {
        Some(PersistedId::Number(n)) => n,
        _ => i64::MAX,
    }
}

pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
    config: BackendConfig,
}

impl MemoryStorage {
    pub async fn new() -> Result<Self> {
        Self::open(BackendConfig::default()).await
    }

    /// A store pre-filled with one batch, handy for seeding demos and tests.
    pub async fn with_articles(articles: &[Article]) -> Result<Self> {
        let storage = Self::new().await?;
        storage.store.write().await.insert_articles(articles);
        Ok(storage)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn open(config: BackendConfig) -> Result<Self> {
        if let Some(url) = config.url.as_deref() {
            return Err(Error::InvalidValue(format!(
                "memory storage keeps nothing on disk, drop the backend url '{}'",
                url
            )));
        }
        let store = MemoryStore::new(config.table_name()?.to_string());
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            config,
        })
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    fn is_configured(&self) -> bool {
        true
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.list_articles())
    }

    async fn insert_articles(&self, articles: &[Article]) -> Result<()> {
        let mut store = self.store.write().await;
        store.insert_articles(articles);
        tracing::debug!("Stored {} articles in {}", articles.len(), store.table());
        Ok(())
    }
}
