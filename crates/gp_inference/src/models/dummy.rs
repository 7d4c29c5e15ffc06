use gp_core::{Article, Category, GeneratedFeed, GenerativeSource, Region, Result, SourceAttribution};
use std::fmt;

use super::Config;

/// Offline source with a fixed feed, used when no model credentials exist.
pub struct DummySource;

impl fmt::Debug for DummySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummySource").finish()
    }
}

impl DummySource {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

fn item(
    category: Category,
    region: Region,
    title: &str,
    summary: &str,
    content: &str,
    url: &str,
) -> Article {
    Article {
        id: None,
        created_at: None,
        published_date: None,
        category,
        region: Some(region),
        title: title.to_string(),
        summary: summary.to_string(),
        content: content.to_string(),
        source_url: url.to_string(),
        is_featured: false,
        video_ref: None,
        image_ref: None,
    }
}

#[async_trait::async_trait]
impl GenerativeSource for DummySource {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn fetch(&self) -> Result<GeneratedFeed> {
        let mut hero = item(
            Category::Event2025Recap,
            Region::Brazil,
            "STU Open closes the season in Rio",
            "Street finals under the lights.",
            "The STU Open wrapped with a street final where every run ended in a bowl-to-rail combo.",
            "https://www.cemporcentoskate.com.br/stu-open",
        );
        hero.is_featured = true;

        let mut video = item(
            Category::VideoParts,
            Region::Usa,
            "A full part filmed in one winter",
            "Cold ledges, warm reception.",
            "The new video part stacks heelflip lines on ledges nobody had skated before.",
            "https://www.thrashermagazine.com/articles/videos",
        );
        video.video_ref = Some("dQw4w9WgXcQ".to_string());

        let articles = vec![
            hero,
            video,
            item(
                Category::Event2026Schedule,
                Region::Europe,
                "Copenhagen Open dates announced",
                "CPH returns next summer.",
                "Organisers confirmed the copenhagen open will again take over the city for a week of street skating.",
                "https://www.cphopen.com",
            ),
            item(
                Category::Culture,
                Region::Global,
                "Why the local session still matters",
                "Community over contests.",
                "Every scene starts with a session at a spot that nobody else cares about.",
                "https://www.freeskatemag.com",
            ),
            item(
                Category::BrandHistory,
                Region::Usa,
                "Powell Peralta and the Bones Brigade",
                "The deck graphics that defined an era.",
                "From vert ramps to the first skate videos, the brand shaped what skateboarding looked like.",
                "https://www.powell-peralta.com",
            ),
            item(
                Category::Industry,
                Region::Global,
                "Maple shortage squeezes deck makers",
                "Wood prices keep climbing.",
                "Manufacturers warn that skateboard deck prices will rise again as maple supply tightens.",
                "https://www.transworld.net",
            ),
        ];

        Ok(GeneratedFeed {
            articles,
            attribution: vec![SourceAttribution {
                uri: "https://www.thrashermagazine.com".to_string(),
                title: "Thrasher Magazine".to_string(),
            }],
        })
    }
}
