use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gp_core::{Article, ArticleStore, Category, Error, PersistedId, Region, Result};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePool}, Row};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::{BackendConfig, StorageBackend};

const DEFAULT_DB_PATH: &str = "grind_pulse.db";

fn migrations(table: &str) -> [String; 2] {
    [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                date TEXT,
                category TEXT NOT NULL,
                region TEXT,
                title TEXT NOT NULL,
                summary TEXT NOT NULL,
                content TEXT NOT NULL,
                url TEXT NOT NULL,
                is_hero INTEGER NOT NULL DEFAULT 0,
                youtube_id TEXT,
                image_url TEXT
            )
            "#
        ),
        format!("CREATE INDEX IF NOT EXISTS {table}_created_at ON {table} (created_at)"),
    ]
}

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
    table: String,
    config: BackendConfig,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be available at the backend url (default ./grind_pulse.db)"
    }

    async fn open(config: BackendConfig) -> Result<Self> {
        let table = config.table_name()?.to_string();
        let db_path = PathBuf::from(
            config
                .url
                .as_deref()
                .map(|url| url.strip_prefix("sqlite:").unwrap_or(url))
                .unwrap_or(DEFAULT_DB_PATH),
        );
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in migrations(&table).iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path,
            table,
            config,
        })
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        Self::open(BackendConfig::default().with_url(db_path.display().to_string())).await
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
    let category: String = row.get("category");
    let region: Option<String> = row.get("region");
    let created_at: String = row.get("created_at");

    Ok(Article {
        id: Some(PersistedId::Number(row.get::<i64, _>("id"))),
        created_at: Some(
            DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Storage(format!("Failed to parse date: {}", e)))?
                .with_timezone(&Utc),
        ),
        published_date: row.get("date"),
        category: Category::from_str(&category)?,
        region: region.as_deref().map(Region::from_str).transpose()?,
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        source_url: row.get("url"),
        is_featured: row.get::<i64, _>("is_hero") != 0,
        video_ref: row.get("youtube_id"),
        image_ref: row.get("image_url"),
    })
}

#[async_trait]
impl ArticleStore for SQLiteStorage {
    fn is_configured(&self) -> bool {
        true
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(&format!(
            "SELECT * FROM {} ORDER BY created_at DESC, id ASC",
            self.table
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to list articles: {}", e)))?;

        // A row that no longer matches the article contract is skipped rather
        // than failing the whole read.
        Ok(rows
            .iter()
            .filter_map(|row| match row_to_article(row) {
                Ok(article) => Some(article),
                Err(e) => {
                    tracing::warn!("Skipping unreadable row: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn insert_articles(&self, articles: &[Article]) -> Result<()> {
        let created_at = Utc::now().to_rfc3339();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Sync(format!("Failed to open transaction: {}", e)))?;

        let insert = format!(
            "INSERT INTO {} \
             (created_at, date, category, region, title, summary, content, url, is_hero, youtube_id, image_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.table
        );
        for article in articles {
            sqlx::query(&insert)
                .bind(&created_at)
                .bind(article.published_date.as_deref())
                .bind(article.category.as_str())
                .bind(article.region.map(|r| r.as_str()))
                .bind(&article.title)
                .bind(&article.summary)
                .bind(&article.content)
                .bind(&article.source_url)
                .bind(article.is_featured as i64)
                .bind(article.video_ref.as_deref())
                .bind(article.image_ref.as_deref())
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::Sync(format!("Failed to store article: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Sync(format!("Failed to commit articles: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn article(title: &str, region: Option<Region>) -> Article {
        Article {
            id: Some(PersistedId::Text("slug".to_string())),
            created_at: None,
            published_date: Some("03/03/2025".to_string()),
            category: Category::BrandHistory,
            region,
            title: title.to_string(),
            summary: "Summary".to_string(),
            content: "The deck that changed street skating".to_string(),
            source_url: "https://example.com".to_string(),
            is_featured: true,
            video_ref: None,
            image_ref: Some("https://example.com/deck.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn test_sqlite_storage() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let storage = SQLiteStorage::new_with_path(&db_path).await.unwrap();
        assert!(storage.read().await.is_empty());

        storage
            .write(&[article("Powell Peralta", Some(Region::Usa)), article("Alien Workshop", None)])
            .await
            .unwrap();

        let rows = storage.read().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Powell Peralta");
        assert_eq!(rows[0].region, Some(Region::Usa));
        assert_eq!(rows[1].region, None);
        assert_eq!(rows[0].category, Category::BrandHistory);
        assert!(rows[0].is_featured);
        assert_eq!(rows[0].published_date.as_deref(), Some("03/03/2025"));
        // The store assigns its own ids.
        assert_eq!(rows[0].id, Some(PersistedId::Number(1)));
    }

    #[tokio::test]
    async fn test_sqlite_custom_table() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("archive.db");
        let config = BackendConfig::default()
            .with_url(format!("sqlite:{}", db_path.display()))
            .with_table("heritage_archive");

        let storage = SQLiteStorage::open(config).await.unwrap();
        assert_eq!(storage.get_db_path(), db_path.as_path());
        storage.write(&[article("Alva", None)]).await.unwrap();
        assert_eq!(storage.read().await.len(), 1);

        let table: (String,) = sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind("heritage_archive")
            .fetch_one(&*storage.pool)
            .await
            .unwrap();
        assert_eq!(table.0, "heritage_archive");

        // A second store on the default table of the same file sees nothing.
        let other = SQLiteStorage::new_with_path(&db_path).await.unwrap();
        assert!(other.read().await.is_empty());
    }
}
