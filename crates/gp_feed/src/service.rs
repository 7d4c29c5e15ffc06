use gp_core::{ArticleStore, GenerativeSource, Result};
use std::sync::Arc;

use crate::filter::KeywordFilter;
use crate::lookup::lookup;
use crate::projector::{Projection, Projector};
use crate::reconciler::{FeedReconciler, FeedStatus};
use crate::selection::{resolve_screen, RegionFilter, Screen, ViewSelection};
use crate::snapshot::{SharedEntry, Snapshot};

/// Reconciler and projector wired together: the one object front-ends hold.
#[derive(Debug)]
pub struct FeedService {
    reconciler: FeedReconciler,
    projector: Projector,
}

impl FeedService {
    pub fn new(source: Arc<dyn GenerativeSource>, store: Arc<dyn ArticleStore>) -> Self {
        Self::with_filter(source, store, KeywordFilter::default())
    }

    pub fn with_filter(
        source: Arc<dyn GenerativeSource>,
        store: Arc<dyn ArticleStore>,
        filter: KeywordFilter,
    ) -> Self {
        Self {
            reconciler: FeedReconciler::new(source, store),
            projector: Projector::new(filter),
        }
    }

    pub fn reconciler(&self) -> &FeedReconciler {
        &self.reconciler
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub async fn load(&self, force_refresh: bool) -> Result<Arc<Snapshot>> {
        self.reconciler.load(force_refresh).await
    }

    pub async fn status(&self) -> FeedStatus {
        self.reconciler.status().await
    }

    pub async fn project(&self, region: RegionFilter, query: &str) -> Arc<Projection> {
        let snapshot = self.reconciler.snapshot().await;
        self.projector.project(&snapshot, region, query)
    }

    pub async fn projection_for(&self, selection: &ViewSelection) -> Arc<Projection> {
        self.project(selection.region, &selection.query).await
    }

    pub async fn lookup(&self, selection: &ViewSelection, token: &str) -> Option<SharedEntry> {
        let projection = self.projection_for(selection).await;
        lookup(&projection, token)
    }

    pub async fn screen(&self, selection: &ViewSelection) -> Screen {
        let projection = self.projection_for(selection).await;
        let status = self.status().await;
        resolve_screen(selection, &projection, &status)
    }
}
