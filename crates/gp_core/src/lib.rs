pub mod error;
pub mod identity;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use identity::ArticleKey;
pub use models::{GeneratedFeed, GenerativeSource};
pub use storage::ArticleStore;
pub use types::{Article, Category, PersistedId, Region, SourceAttribution};

pub type Result<T> = std::result::Result<T, Error>;
