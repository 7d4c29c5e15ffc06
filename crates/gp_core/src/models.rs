use async_trait::async_trait;
use std::fmt;

use crate::types::{Article, SourceAttribution};
use crate::Result;

/// One answer from a generative source.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFeed {
    pub articles: Vec<Article>,
    pub attribution: Vec<SourceAttribution>,
}

#[async_trait]
pub trait GenerativeSource: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Produce a fresh article list.
    ///
    /// Fails with `Error::Uplink` when no credential is configured or the
    /// call fails, and with `Error::CorruptResponse` when the answer cannot
    /// be parsed even after repair.
    async fn fetch(&self) -> Result<GeneratedFeed>;
}
