use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::Error;

const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1547447134-cd3f5c716030?q=80&w=1000&auto=format&fit=crop";

/// The fixed set of sections an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Industry,
    Culture,
    VideoParts,
    #[serde(rename = "event_2025_recap")]
    Event2025Recap,
    #[serde(rename = "event_2026_schedule")]
    Event2026Schedule,
    BrandHistory,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Industry,
        Category::Culture,
        Category::VideoParts,
        Category::Event2025Recap,
        Category::Event2026Schedule,
        Category::BrandHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Industry => "industry",
            Category::Culture => "culture",
            Category::VideoParts => "video_parts",
            Category::Event2025Recap => "event_2025_recap",
            Category::Event2026Schedule => "event_2026_schedule",
            Category::BrandHistory => "brand_history",
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidValue(format!("unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Brazil,
    Europe,
    Usa,
    Global,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Brazil, Region::Europe, Region::Usa, Region::Global];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Brazil => "BRAZIL",
            Region::Europe => "EUROPE",
            Region::Usa => "USA",
            Region::Global => "GLOBAL",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| Error::InvalidValue(format!("unknown region: {}", s)))
    }
}

/// Key assigned by the persisted store. Rows may carry numeric or textual ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PersistedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistedId::Number(n) => write!(f, "{}", n),
            PersistedId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersistedId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Display date as supplied upstream, e.g. `DD/MM/YYYY`.
    #[serde(rename = "date", default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub title: String,
    pub summary: String,
    pub content: String,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(rename = "is_hero", default)]
    pub is_featured: bool,
    #[serde(rename = "youtube_id", default, skip_serializing_if = "Option::is_none")]
    pub video_ref: Option<String>,
    #[serde(rename = "image_url", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Article {
    pub fn effective_region(&self) -> Region {
        self.region.unwrap_or(Region::Global)
    }

    pub fn source_host(&self) -> Option<String> {
        Url::parse(&self.source_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Picks the image shown above the article body: an explicit image link,
    /// then the video thumbnail, then a stock picture.
    pub fn display_image(&self) -> String {
        if let Some(image) = self.image_ref.as_deref().filter(|i| i.starts_with("http")) {
            return image.to_string();
        }
        if let Some(video) = self.video_ref.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            return format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video);
        }
        FALLBACK_IMAGE.to_string()
    }
}

/// Grounding reference returned alongside a generative fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttribution {
    pub uri: String,
    pub title: String,
}
