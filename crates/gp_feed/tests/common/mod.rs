// Shared fakes for the feed integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use gp_core::{
    Article, ArticleStore, Category, Error, GeneratedFeed, GenerativeSource, PersistedId, Region, Result,
    SourceAttribution,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn article(category: Category, region: Option<Region>, title: &str) -> Article {
    Article {
        id: None,
        created_at: None,
        published_date: Some("01/06/2025".to_string()),
        category,
        region,
        title: title.to_string(),
        summary: "Fresh from the skate scene".to_string(),
        content: "Lines, spots and the people who skate them.".to_string(),
        source_url: "https://www.thrashermagazine.com/articles".to_string(),
        is_featured: false,
        video_ref: None,
        image_ref: None,
    }
}

pub fn stored(id: i64, title: &str) -> Article {
    let mut a = article(Category::Industry, Some(Region::Usa), title);
    a.id = Some(PersistedId::Number(id));
    a
}

pub fn attribution() -> Vec<SourceAttribution> {
    vec![SourceAttribution {
        uri: "https://www.theberrics.com".to_string(),
        title: "The Berrics".to_string(),
    }]
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Feed(Vec<Article>),
    Uplink(String),
    Corrupt(String),
}

/// Generative source that replays scripted answers; the last one repeats.
#[derive(Debug)]
pub struct FakeSource {
    script: Mutex<VecDeque<Behavior>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(script: Vec<Behavior>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            gate: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn feed(articles: Vec<Article>) -> Self {
        Self::new(vec![Behavior::Feed(articles)])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Behavior::Uplink(message.to_string())])
    }

    /// The first fetch blocks until the returned sender fires.
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        (self, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Behavior {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or(Behavior::Feed(Vec::new()))
        }
    }
}

#[async_trait]
impl GenerativeSource for FakeSource {
    fn name(&self) -> &str {
        "Fake"
    }

    async fn fetch(&self) -> Result<GeneratedFeed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.next();
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match behavior {
            Behavior::Feed(articles) => Ok(GeneratedFeed { articles, attribution: attribution() }),
            Behavior::Uplink(msg) => Err(Error::Uplink(msg)),
            Behavior::Corrupt(msg) => Err(Error::CorruptResponse(msg)),
        }
    }
}

/// Persisted store that records every sync.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub configured: bool,
    pub rows: Vec<Article>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: AtomicUsize,
    pub writes: Mutex<Vec<Vec<Article>>>,
}

impl RecordingStore {
    pub fn with_rows(rows: Vec<Article>) -> Self {
        Self { configured: true, rows, ..Self::default() }
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<Vec<Article>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleStore for RecordingStore {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(Error::Storage("connection reset".to_string()));
        }
        Ok(self.rows.clone())
    }

    async fn insert_articles(&self, articles: &[Article]) -> Result<()> {
        self.writes.lock().unwrap().push(articles.to_vec());
        if self.fail_writes {
            return Err(Error::Storage("insert rejected".to_string()));
        }
        Ok(())
    }
}
