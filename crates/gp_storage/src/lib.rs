use async_trait::async_trait;
use gp_core::{ArticleStore, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

pub const DEFAULT_TABLE: &str = "skate_news";

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn get_error_message() -> &'static str;
    async fn open(config: BackendConfig) -> Result<Self> where Self: Sized;
    fn config(&self) -> &BackendConfig;
}

/// Where a backend keeps its rows. `url` is backend specific (a file path for
/// SQLite); `table` names the article table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub table: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl BackendConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// The table name, checked to be a plain SQL identifier.
    pub fn table_name(&self) -> Result<&str> {
        let table = self.table.as_str();
        let mut chars = table.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(table)
        } else {
            Err(Error::InvalidValue(format!("invalid table name '{}'", table)))
        }
    }
}

/// Names accepted by [`create_storage`].
pub fn available_backends() -> Vec<&'static str> {
    let mut names = vec!["none", "memory"];
    if cfg!(feature = "sqlite") {
        names.push("sqlite");
    }
    names
}

/// Build the persisted store selected on the command line. `none` yields a
/// store that reports itself as unconfigured.
pub async fn create_storage(kind: &str, config: BackendConfig) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "none" => Ok(Arc::new(DisabledStorage)),
        "memory" => Ok(Arc::new(build::<MemoryStorage>(config).await?)),
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Arc::new(build::<SQLiteStorage>(config).await?)),
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available: {}",
            other,
            available_backends().join(", ")
        ))),
    }
}

async fn build<T: StorageBackend>(config: BackendConfig) -> Result<T> {
    T::open(config).await.map_err(|e| match e {
        Error::InvalidValue(_) => e,
        e => Error::Storage(format!("{} ({})", T::get_error_message(), e)),
    })
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, BackendConfig, StorageBackend};
}
