use gp_core::identity::Keyed;
use gp_core::{Article, ArticleKey, SourceAttribution};
use serde::Serialize;
use std::sync::Arc;

/// An article together with the key it was given for this load cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub key: ArticleKey,
    #[serde(flatten)]
    pub article: Article,
}

impl Keyed for FeedEntry {
    fn key(&self) -> &ArticleKey {
        &self.key
    }
}

pub type SharedEntry = Arc<FeedEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrigin {
    Store,
    Generative,
}

/// The article list published by one load cycle. Never mutated after
/// construction; a new cycle publishes a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cycle: u64,
    pub origin: Option<FeedOrigin>,
    pub entries: Vec<SharedEntry>,
    pub attribution: Vec<SourceAttribution>,
}

impl Snapshot {
    /// Keys are assigned against the complete list, before any filtering, so
    /// positional keys stay valid while filters change within the cycle.
    pub fn new(
        cycle: u64,
        origin: FeedOrigin,
        articles: Vec<Article>,
        attribution: Vec<SourceAttribution>,
    ) -> Self {
        let entries = articles
            .into_iter()
            .enumerate()
            .map(|(index, article)| {
                Arc::new(FeedEntry {
                    key: ArticleKey::assign(&article, index),
                    article,
                })
            })
            .collect();

        // Provenance only accompanies generative fetches.
        let attribution = match origin {
            FeedOrigin::Generative => attribution,
            FeedOrigin::Store => Vec::new(),
        };

        Self {
            cycle,
            origin: Some(origin),
            entries,
            attribution,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.entries.iter().map(|e| &e.article)
    }
}
