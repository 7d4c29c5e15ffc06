//! Reader-side view state: which page is open, which filters are set and
//! which article is selected. Nothing here is persisted.

use gp_core::{ArticleKey, Error, Region};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::lookup::lookup;
use crate::projector::Projection;
use crate::reconciler::FeedStatus;
use crate::snapshot::SharedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Home,
    Events,
    Videos,
    Culture,
    Article,
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(ViewMode::Home),
            "events" => Ok(ViewMode::Events),
            "videos" => Ok(ViewMode::Videos),
            "culture" => Ok(ViewMode::Culture),
            "article" => Ok(ViewMode::Article),
            other => Err(Error::InvalidValue(format!("unknown view: {}", other))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Home => "home",
            ViewMode::Events => "events",
            ViewMode::Videos => "videos",
            ViewMode::Culture => "culture",
            ViewMode::Article => "article",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CultureSubView {
    #[default]
    Daily,
    Heritage,
}

impl FromStr for CultureSubView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(CultureSubView::Daily),
            "heritage" => Ok(CultureSubView::Heritage),
            other => Err(Error::InvalidValue(format!("unknown culture view: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn admits(&self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => *wanted == region,
        }
    }
}

impl FromStr for RegionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }
        Region::from_str(s).map(RegionFilter::Only)
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("ALL"),
            RegionFilter::Only(region) => write!(f, "{}", region),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub view: ViewMode,
    pub culture: CultureSubView,
    pub region: RegionFilter,
    pub query: String,
    pub selected: Option<String>,
}

impl ViewSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_article(&mut self, key: &ArticleKey) {
        self.selected = Some(key.token());
        self.view = ViewMode::Article;
    }

    /// Switching pages always drops the open article.
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        self.selected = None;
    }

    pub fn set_culture(&mut self, culture: CultureSubView) {
        self.culture = culture;
    }

    pub fn set_region(&mut self, region: RegionFilter) {
        self.region = region;
    }

    /// Typing a search while reading an article returns to the home page.
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.view == ViewMode::Article {
            self.set_view(ViewMode::Home);
        }
    }

    /// The entries listed on the current page.
    pub fn display_list(&self, projection: &Projection) -> Vec<SharedEntry> {
        let slices = &projection.slices;
        match self.view {
            ViewMode::Home => projection.active.clone(),
            ViewMode::Videos => slices.videos.clone(),
            ViewMode::Events => slices.events(),
            ViewMode::Culture => match self.culture {
                CultureSubView::Daily => slices.culture.clone(),
                CultureSubView::Heritage => slices.heritage.clone(),
            },
            ViewMode::Article => Vec::new(),
        }
    }

    pub fn active_article(&self, projection: &Projection) -> Option<SharedEntry> {
        self.selected
            .as_deref()
            .and_then(|token| lookup(projection, token))
    }
}

/// What the reader should see right now.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    /// Fatal load failure with nothing to show; offers a forced refresh.
    Failed { message: String },
    Article(SharedEntry),
    NotFound { token: String },
    Listing {
        entries: Vec<SharedEntry>,
        notice: Option<String>,
    },
}

pub fn resolve_screen(selection: &ViewSelection, projection: &Projection, status: &FeedStatus) -> Screen {
    if status.loading && projection.active.is_empty() && selection.query.trim().is_empty() {
        return Screen::Loading;
    }

    if let Some(message) = status.error.as_ref() {
        if projection.active.is_empty() {
            return Screen::Failed { message: message.clone() };
        }
    }

    if selection.view == ViewMode::Article {
        if let Some(token) = selection.selected.as_deref() {
            return match lookup(projection, token) {
                Some(entry) => Screen::Article(entry),
                None => Screen::NotFound { token: token.to_string() },
            };
        }
    }

    let entries = selection.display_list(projection);
    let notice = entries
        .is_empty()
        .then(|| format!("No sector intelligence found for \"{}\".", selection.region));
    Screen::Listing { entries, notice }
}
