use gp_core::Article;

use crate::snapshot::SharedEntry;

/// Words that mark an article as on-topic.
pub const SKATE_KEYWORDS: &[&str] = &[
    "skate", "skating", "skater", "thrasher", "sls", "ollie", "contest",
    "deck", "trucks", "wheels", "berrics", "cph", "pushed", "grind",
    "kickflip", "heelflip", "vert", "bowl", "street", "session", "transworld", "copenhagen open",
];

/// Post-filter for generated feeds that drift off-topic.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(SKATE_KEYWORDS.iter().copied())
    }
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, article: &Article) -> bool {
        let text = format!("{} {} {}", article.title, article.summary, article.content).to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Keeps on-topic entries in their original order.
    pub fn apply(&self, entries: &[SharedEntry]) -> Vec<SharedEntry> {
        entries
            .iter()
            .filter(|e| self.matches(&e.article))
            .cloned()
            .collect()
    }
}
