//! Derived views over the on-topic article list.
//!
//! [`project`] is a pure function of `(cycle, region, query)`. [`Projector`]
//! remembers the last result and only recomputes when one of those inputs
//! changes, so page switches and article selection reuse the same projection.

use gp_core::Category;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::filter::KeywordFilter;
use crate::selection::RegionFilter;
use crate::snapshot::{SharedEntry, Snapshot};

pub const TICKER_PLACEHOLDER: &str = "SYNCHRONIZING GLOBAL INTELLIGENCE NODES... SIGNAL_STRENGTH_MAXIMIZED...";
const TICKER_SEPARATOR: &str = " • ";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionKey {
    pub cycle: u64,
    pub region: RegionFilter,
    pub query: String,
}

impl ProjectionKey {
    pub fn new(cycle: u64, region: RegionFilter, query: &str) -> Self {
        Self {
            cycle,
            region,
            query: normalize_query(query),
        }
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySlices {
    pub industry: Vec<SharedEntry>,
    pub videos: Vec<SharedEntry>,
    pub events_2025: Vec<SharedEntry>,
    pub events_2026: Vec<SharedEntry>,
    pub culture: Vec<SharedEntry>,
    /// Brand history, sorted by title.
    pub heritage: Vec<SharedEntry>,
}

impl CategorySlices {
    fn from_active(active: &[SharedEntry]) -> Self {
        let of = |category: Category| -> Vec<SharedEntry> {
            active
                .iter()
                .filter(|e| e.article.category == category)
                .cloned()
                .collect()
        };

        let mut heritage = of(Category::BrandHistory);
        heritage.sort_by(|a, b| locale_cmp(&a.article.title, &b.article.title));

        Self {
            industry: of(Category::Industry),
            videos: of(Category::VideoParts),
            events_2025: of(Category::Event2025Recap),
            events_2026: of(Category::Event2026Schedule),
            culture: of(Category::Culture),
            heritage,
        }
    }

    pub fn get(&self, category: Category) -> &[SharedEntry] {
        match category {
            Category::Industry => &self.industry,
            Category::VideoParts => &self.videos,
            Category::Event2025Recap => &self.events_2025,
            Category::Event2026Schedule => &self.events_2026,
            Category::Culture => &self.culture,
            Category::BrandHistory => &self.heritage,
        }
    }

    /// Recaps first, then the upcoming schedule.
    pub fn events(&self) -> Vec<SharedEntry> {
        self.events_2025.iter().chain(self.events_2026.iter()).cloned().collect()
    }
}

fn lowercase(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Base letters only: compatibility-decomposed, accents dropped, lowercased.
fn base_letters(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Title order for reading lists: base letters first, then accents, then
/// case with the lowercase spelling ahead.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| lowercase(a).cmp(&lowercase(b)))
        .then_with(|| b.cmp(a))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub key: ProjectionKey,
    pub active: Vec<SharedEntry>,
    pub headlines: Vec<String>,
    pub slices: CategorySlices,
    pub featured: Option<SharedEntry>,
}

impl Projection {
    /// The scrolling ticker: headlines run twice back to back so the loop is
    /// seamless. Falls back to a placeholder when there is nothing to show.
    pub fn ticker_text(&self) -> String {
        if self.headlines.is_empty() {
            return TICKER_PLACEHOLDER.to_string();
        }
        let run = self.headlines.join(TICKER_SEPARATOR);
        format!("{}{}{}", run, TICKER_SEPARATOR, run)
    }
}

fn matches_query(entry: &SharedEntry, query: &str) -> bool {
    let article = &entry.article;
    article.title.to_lowercase().contains(query)
        || article.summary.to_lowercase().contains(query)
        || article.content.to_lowercase().contains(query)
        || article.category.as_str().contains(query)
}

/// Derive every view from the on-topic list of one cycle.
pub fn project(cycle: u64, on_topic: &[SharedEntry], region: RegionFilter, query: &str) -> Projection {
    let key = ProjectionKey::new(cycle, region, query);

    let active: Vec<SharedEntry> = on_topic
        .iter()
        .filter(|e| region.admits(e.article.effective_region()))
        .filter(|e| key.query.is_empty() || matches_query(e, &key.query))
        .cloned()
        .collect();

    let headlines = active.iter().map(|e| e.article.title.clone()).collect();
    let slices = CategorySlices::from_active(&active);
    let featured = active
        .iter()
        .find(|e| e.article.is_featured)
        .or_else(|| active.first())
        .cloned();

    Projection {
        key,
        active,
        headlines,
        slices,
        featured,
    }
}

/// Memoizing front for [`project`] and the keyword filter.
#[derive(Debug, Default)]
pub struct Projector {
    filter: KeywordFilter,
    on_topic: Mutex<Option<(u64, Arc<Vec<SharedEntry>>)>>,
    last: Mutex<Option<Arc<Projection>>>,
    computations: AtomicUsize,
}

impl Projector {
    pub fn new(filter: KeywordFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &KeywordFilter {
        &self.filter
    }

    /// The keyword-filtered list for a snapshot, computed once per cycle.
    pub fn on_topic(&self, snapshot: &Snapshot) -> Arc<Vec<SharedEntry>> {
        let mut cached = self.on_topic.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cycle, entries)) = cached.as_ref() {
            if *cycle == snapshot.cycle {
                return entries.clone();
            }
        }
        let entries = Arc::new(self.filter.apply(&snapshot.entries));
        *cached = Some((snapshot.cycle, entries.clone()));
        entries
    }

    pub fn project(&self, snapshot: &Snapshot, region: RegionFilter, query: &str) -> Arc<Projection> {
        let key = ProjectionKey::new(snapshot.cycle, region, query);
        {
            let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(projection) = last.as_ref().filter(|p| p.key == key) {
                return projection.clone();
            }
        }

        let on_topic = self.on_topic(snapshot);
        let projection = Arc::new(project(snapshot.cycle, &on_topic, region, query));
        self.computations.fetch_add(1, AtomicOrdering::Relaxed);
        tracing::debug!(
            "Projected cycle {} (region {}, query {:?}): {} of {} articles",
            key.cycle,
            key.region,
            key.query,
            projection.active.len(),
            snapshot.len()
        );

        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(projection.clone());
        projection
    }

    /// How many projections were actually computed rather than reused.
    pub fn computations(&self) -> usize {
        self.computations.load(AtomicOrdering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FeedOrigin;
    use gp_core::{Article, Region};

    fn article(category: Category, region: Option<Region>, title: &str, featured: bool) -> Article {
        Article {
            id: None,
            created_at: None,
            published_date: None,
            category,
            region,
            title: title.to_string(),
            summary: "Skate news".to_string(),
            content: "Body".to_string(),
            source_url: "https://example.com".to_string(),
            is_featured: featured,
            video_ref: None,
            image_ref: None,
        }
    }

    fn snapshot(cycle: u64, articles: Vec<Article>) -> Snapshot {
        Snapshot::new(cycle, FeedOrigin::Generative, articles, vec![])
    }

    fn titles(entries: &[SharedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.article.title.as_str()).collect()
    }

    #[test]
    fn test_featured_prefers_flag_then_first() {
        let flagged = snapshot(1, vec![
            article(Category::Industry, None, "first", false),
            article(Category::Culture, None, "hero", true),
        ]);
        let p = project(1, &flagged.entries, RegionFilter::All, "");
        assert_eq!(p.featured.unwrap().article.title, "hero");

        let unflagged = snapshot(2, vec![
            article(Category::Industry, None, "first", false),
            article(Category::Culture, None, "second", false),
        ]);
        let p = project(2, &unflagged.entries, RegionFilter::All, "");
        assert_eq!(p.featured.as_ref(), p.active.first());
        assert!(!p.featured.unwrap().article.is_featured);

        assert!(project(3, &[], RegionFilter::All, "").featured.is_none());
    }

    #[test]
    fn test_region_filter_uses_effective_region() {
        let s = snapshot(1, vec![
            article(Category::Industry, Some(Region::Europe), "eu", false),
            article(Category::Industry, None, "untagged", false),
            article(Category::Industry, Some(Region::Global), "global", false),
        ]);
        let p = project(1, &s.entries, RegionFilter::Only(Region::Global), "");
        assert_eq!(titles(&p.active), vec!["untagged", "global"]);

        let p = project(1, &s.entries, RegionFilter::Only(Region::Europe), "");
        assert!(p.active.iter().all(|e| e.article.region == Some(Region::Europe)));
    }

    #[test]
    fn test_query_matches_category_name() {
        let s = snapshot(1, vec![
            article(Category::VideoParts, None, "a", false),
            article(Category::Industry, None, "b", false),
        ]);
        let p = project(1, &s.entries, RegionFilter::All, "  VIDEO ");
        assert_eq!(titles(&p.active), vec!["a"]);
        assert_eq!(p.key.query, "video");
    }

    #[test]
    fn test_heritage_sorted_for_any_input_order() {
        let names = ["zephyr", "Zoo York", "Alva", "Élan Skateboards", "blind", "Anti Hero", "alva", "Ålva"];
        let expected = vec![
            "alva",
            "Alva",
            "Ålva",
            "Anti Hero",
            "blind",
            "Élan Skateboards",
            "zephyr",
            "Zoo York",
        ];
        for rotation in 0..names.len() {
            let mut rotated = names.to_vec();
            rotated.rotate_left(rotation);
            let s = snapshot(1, rotated.iter().map(|n| article(Category::BrandHistory, None, n, false)).collect());
            let p = project(1, &s.entries, RegionFilter::All, "");
            assert_eq!(titles(&p.slices.heritage), expected);
        }
    }

    #[test]
    fn test_accented_titles_sort_by_base_letter() {
        assert_eq!(locale_cmp("Élan Skateboards", "Zoo York"), Ordering::Less);
        assert_eq!(locale_cmp("Alva", "Élan Skateboards"), Ordering::Less);
        assert_eq!(locale_cmp("elan", "élan"), Ordering::Less);
        assert_eq!(base_letters("ﬂip Über"), "flip uber");
    }

    #[test]
    fn test_other_slices_keep_source_order() {
        let s = snapshot(1, vec![
            article(Category::Culture, None, "z", false),
            article(Category::Industry, None, "i", false),
            article(Category::Culture, None, "a", false),
        ]);
        let p = project(1, &s.entries, RegionFilter::All, "");
        assert_eq!(titles(&p.slices.culture), vec!["z", "a"]);
        assert_eq!(titles(p.slices.get(Category::Industry)), vec!["i"]);
        assert!(p.slices.get(Category::VideoParts).is_empty());
    }

    #[test]
    fn test_ticker_text() {
        let s = snapshot(1, vec![
            article(Category::Culture, None, "One", false),
            article(Category::Culture, None, "Two", false),
        ]);
        let p = project(1, &s.entries, RegionFilter::All, "");
        assert_eq!(p.headlines, vec!["One", "Two"]);
        assert_eq!(p.ticker_text(), "One • Two • One • Two");
        assert_eq!(project(1, &[], RegionFilter::All, "").ticker_text(), TICKER_PLACEHOLDER);
    }

    #[test]
    fn test_projector_memoizes_on_inputs() {
        let projector = Projector::default();
        let first = snapshot(1, vec![
            article(Category::Culture, Some(Region::Usa), "Skate one", false),
            article(Category::Culture, Some(Region::Europe), "Skate two", false),
        ]);

        let a = projector.project(&first, RegionFilter::All, "");
        let b = projector.project(&first, RegionFilter::All, "  ");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(projector.computations(), 1);

        let c = projector.project(&first, RegionFilter::Only(Region::Usa), "");
        assert_eq!(c.active.len(), 1);
        assert_eq!(projector.computations(), 2);

        let second = snapshot(2, vec![article(Category::Culture, None, "Skate three", false)]);
        let d = projector.project(&second, RegionFilter::Only(Region::Usa), "");
        assert!(d.active.is_empty());
        assert_eq!(projector.computations(), 3);
    }

    #[test]
    fn test_projector_applies_keyword_filter() {
        let projector = Projector::new(KeywordFilter::new(["ollie"]));
        let s = snapshot(1, vec![
            article(Category::Culture, None, "Ollie clinic", false),
            article(Category::Culture, None, "Knitting", false),
        ]);
        let p = projector.project(&s, RegionFilter::All, "");
        assert_eq!(titles(&p.active), vec!["Ollie clinic"]);
        assert!(Arc::ptr_eq(&projector.on_topic(&s), &projector.on_topic(&s)));
    }
}
