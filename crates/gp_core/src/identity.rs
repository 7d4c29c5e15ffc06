//! Stable article identity.
//!
//! Rows coming from the persisted store carry their own key. Articles straight
//! from the generative source usually do not, so they get a positional key
//! derived from their ordinal in the full, unfiltered list of the load cycle
//! that produced them. Positional keys are only meaningful within that cycle.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::types::{Article, PersistedId};

const POSITIONAL_PREFIX: &str = "position-reference-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleKey {
    Persisted(PersistedId),
    Positional(usize),
}

impl ArticleKey {
    /// Assigns the key for the article at `index` of the unfiltered list.
    pub fn assign(article: &Article, index: usize) -> Self {
        match &article.id {
            Some(id) => ArticleKey::Persisted(id.clone()),
            None => ArticleKey::Positional(index),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, ArticleKey::Persisted(_))
    }

    /// The token handed to callers and accepted back by [`resolve`].
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleKey::Persisted(id) => write!(f, "{}", id),
            ArticleKey::Positional(index) => write!(f, "{}{}", POSITIONAL_PREFIX, index),
        }
    }
}

impl Serialize for ArticleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Anything that pairs an article with its assigned key.
pub trait Keyed {
    fn key(&self) -> &ArticleKey;
}

impl<T: Keyed + ?Sized> Keyed for std::sync::Arc<T> {
    fn key(&self) -> &ArticleKey {
        (**self).key()
    }
}

/// Finds the entry a token refers to. Persisted keys win over positional ones,
/// so a store id that happens to look like a positional token still resolves
/// to the stored row. A miss is `None`, never an error.
pub fn resolve<'a, T: Keyed>(entries: &'a [T], token: &str) -> Option<&'a T> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    entries
        .iter()
        .find(|e| matches!(e.key(), ArticleKey::Persisted(id) if id.to_string() == token))
        .or_else(|| {
            entries
                .iter()
                .find(|e| matches!(e.key(), ArticleKey::Positional(_)) && e.key().to_string() == token)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    struct Entry(ArticleKey);

    impl Keyed for Entry {
        fn key(&self) -> &ArticleKey {
            &self.0
        }
    }

    fn article(id: Option<PersistedId>) -> Article {
        Article {
            id,
            created_at: None,
            published_date: None,
            category: Category::Culture,
            region: None,
            title: "t".to_string(),
            summary: "s".to_string(),
            content: "c".to_string(),
            source_url: "https://example.com".to_string(),
            is_featured: false,
            video_ref: None,
            image_ref: None,
        }
    }

    #[test]
    fn test_assign_prefers_persisted_id() {
        let key = ArticleKey::assign(&article(Some(PersistedId::Number(12))), 3);
        assert_eq!(key, ArticleKey::Persisted(PersistedId::Number(12)));
        assert_eq!(key.token(), "12");

        let key = ArticleKey::assign(&article(None), 3);
        assert_eq!(key, ArticleKey::Positional(3));
        assert_eq!(key.token(), "position-reference-3");
    }

    #[test]
    fn test_resolve_persisted_before_positional() {
        let entries = vec![
            Entry(ArticleKey::Positional(0)),
            Entry(ArticleKey::Persisted(PersistedId::Text("position-reference-0".to_string()))),
        ];
        let hit = resolve(&entries, "position-reference-0").unwrap();
        assert!(hit.key().is_persisted());
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let entries = vec![
            Entry(ArticleKey::Persisted(PersistedId::Number(1))),
            Entry(ArticleKey::Positional(1)),
        ];
        assert!(resolve(&entries, "99").is_none());
        assert!(resolve(&entries, "position-reference-7").is_none());
        assert!(resolve(&entries, "").is_none());
        assert!(resolve::<Entry>(&[], "1").is_none());
        assert!(resolve(&entries, "1").is_some());
    }
}
