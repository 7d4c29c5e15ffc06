use gp_core::{Article, ArticleStore, Error, GenerativeSource, Result, SourceAttribution};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::logging::Logger;
use crate::snapshot::{FeedOrigin, Snapshot};

/// Observable state of the reconciler, as shown to the reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedStatus {
    /// Cycle that produced the published snapshot.
    pub cycle: u64,
    /// Most recently started cycle.
    pub latest_cycle: u64,
    pub loading: bool,
    /// User-facing message of the last fatal failure.
    pub error: Option<String>,
    /// Non-fatal problem of the last cycle, e.g. a failed store sync.
    pub warning: Option<String>,
    pub origin: Option<FeedOrigin>,
    pub article_count: usize,
    pub attribution: Vec<SourceAttribution>,
}

#[derive(Debug, Default)]
struct FeedState {
    snapshot: Arc<Snapshot>,
    loading: bool,
    error: Option<String>,
    warning: Option<String>,
}

/// Decides, per load cycle, whether the persisted store or the generative
/// source supplies the article list, and publishes the result.
pub struct FeedReconciler {
    source: Arc<dyn GenerativeSource>,
    store: Arc<dyn ArticleStore>,
    cycles: AtomicU64,
    state: RwLock<FeedState>,
    logger: Logger,
}

impl FeedReconciler {
    pub fn new(source: Arc<dyn GenerativeSource>, store: Arc<dyn ArticleStore>) -> Self {
        Self {
            source,
            store,
            cycles: AtomicU64::new(0),
            state: RwLock::new(FeedState::default()),
            logger: Logger::new(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn store_configured(&self) -> bool {
        self.store.is_configured()
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn status(&self) -> FeedStatus {
        let state = self.state.read().await;
        FeedStatus {
            cycle: state.snapshot.cycle,
            latest_cycle: self.cycles.load(Ordering::SeqCst),
            loading: state.loading,
            error: state.error.clone(),
            warning: state.warning.clone(),
            origin: state.snapshot.origin,
            article_count: state.snapshot.len(),
            attribution: state.snapshot.attribution.clone(),
        }
    }

    /// Run one load cycle.
    ///
    /// On a fatal source failure the previous snapshot stays published and
    /// the error is recorded for display. A failed store sync happens after
    /// the new snapshot is published, so the list stays usable while the
    /// `Error::Sync` still reaches the caller. A cycle overtaken by a newer
    /// one is discarded with `Error::Superseded`.
    pub async fn load(&self, force_refresh: bool) -> Result<Arc<Snapshot>> {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        let log = self.logger.with_prefix(format!("[cycle {}]", cycle));
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.warning = None;
        }

        let fetched = self.fetch(force_refresh, &log).await;
        let mut state = self.state.write().await;

        if !self.is_current(cycle) {
            log.warn("Discarding result of a superseded load cycle");
            return Err(Error::Superseded(cycle));
        }
        state.loading = false;

        let (origin, articles, attribution) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                log.error(&format!("Load failed: {}", e));
                state.error = Some(e.user_message());
                return Err(e);
            }
        };

        let to_sync = (origin == FeedOrigin::Generative && self.store.is_configured()).then(|| articles.clone());
        let snapshot = Arc::new(Snapshot::new(cycle, origin, articles, attribution));
        state.snapshot = snapshot.clone();
        drop(state);
        log.info(&format!("Published {} articles from {:?}", snapshot.len(), origin));

        if let Some(articles) = to_sync {
            let store_log = log.with_prefix("[store]");
            if let Err(e) = self.store.write(&articles).await {
                store_log.error(&format!("Sync failed, keeping fetched list: {}", e));
                let mut state = self.state.write().await;
                if self.is_current(cycle) {
                    state.warning = Some(e.user_message());
                }
                return Err(e);
            }
            store_log.info(&format!("Synced {} articles", articles.len()));
        }

        Ok(snapshot)
    }

    fn is_current(&self, cycle: u64) -> bool {
        self.cycles.load(Ordering::SeqCst) == cycle
    }

    async fn fetch(
        &self,
        force_refresh: bool,
        log: &Logger,
    ) -> Result<(FeedOrigin, Vec<Article>, Vec<SourceAttribution>)> {
        if !force_refresh {
            let stored = self.store.read().await;
            if !stored.is_empty() {
                log.with_prefix("[store]").info(&format!("Read {} articles", stored.len()));
                return Ok((FeedOrigin::Store, stored, Vec::new()));
            }
            if self.store.is_configured() {
                log.with_prefix("[store]").info("Store returned no articles, falling back to generative source");
            }
        }

        log.info(&format!("Requesting fresh feed from {}", self.source.name()));
        let feed = self.source.fetch().await?;
        Ok((FeedOrigin::Generative, feed.articles, feed.attribution))
    }
}

impl std::fmt::Debug for FeedReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedReconciler")
            .field("source", &self.source)
            .field("store_configured", &self.store.is_configured())
            .field("cycles", &self.cycles)
            .finish()
    }
}
