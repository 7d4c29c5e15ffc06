use gp_feed::{Projection, Screen, SharedEntry};
use std::fmt::Write;

pub fn entry_line(entry: &SharedEntry) -> String {
    let article = &entry.article;
    let mut line = format!(
        "[{}] {} // {} :: {}",
        entry.key,
        article.effective_region(),
        article.category.label().to_uppercase(),
        article.title
    );
    if let Some(date) = article.published_date.as_deref() {
        let _ = write!(line, " ({})", date);
    }
    if article.video_ref.is_some() {
        line.push_str(" [video]");
    }
    line
}

pub fn article_detail(entry: &SharedEntry) -> String {
    let article = &entry.article;
    let mut out = String::new();
    let _ = writeln!(out, "{}", article.title.to_uppercase());
    let _ = writeln!(
        out,
        "{} // {} // {}",
        article.effective_region(),
        article.category.label(),
        article.published_date.as_deref().unwrap_or("SIGNAL_LIVE")
    );
    let _ = writeln!(
        out,
        "Verified source node: {} ({})",
        article.source_host().unwrap_or_else(|| "unknown".to_string()),
        article.source_url
    );
    let _ = writeln!(out, "Image: {}", article.display_image());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", article.summary);
    let _ = writeln!(out);
    for paragraph in article.content.lines().map(str::trim).filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "{}", paragraph);
        let _ = writeln!(out);
    }
    if let Some(video) = article.video_ref.as_deref() {
        let _ = writeln!(out, "Video: https://www.youtube.com/watch?v={}", video.trim());
    }
    let _ = write!(out, "Key: {}", entry.key);
    out
}

pub fn screen(screen: &Screen, projection: &Projection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", projection.ticker_text());
    let _ = writeln!(out);

    match screen {
        Screen::Loading => {
            let _ = write!(out, "Syncing global satellite feed...");
        }
        Screen::Failed { message } => {
            let _ = writeln!(out, "SIGNAL INTERRUPT");
            let _ = writeln!(out, "{}", message);
            let _ = write!(out, "Restart the uplink with --refresh.");
        }
        Screen::Article(entry) => {
            let _ = write!(out, "{}", article_detail(entry));
        }
        Screen::NotFound { token } => {
            let _ = write!(out, "No article with key \"{}\" in the current feed.", token);
        }
        Screen::Listing { entries, notice } => {
            if let Some(featured) = projection.featured.as_ref() {
                let _ = writeln!(out, "FEATURED: {}", entry_line(featured));
                let _ = writeln!(out);
            }
            for entry in entries {
                let _ = writeln!(out, "{}", entry_line(entry));
            }
            if let Some(notice) = notice {
                let _ = write!(out, "{}", notice);
            }
        }
    }
    out
}
