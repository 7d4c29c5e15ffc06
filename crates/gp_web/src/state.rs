use gp_feed::FeedService;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
    reload_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(feed: Arc<FeedService>) -> Self {
        Self {
            feed,
            reload_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Claims the single reload slot, or `None` while another reload holds it.
    pub fn try_claim_reload(&self) -> Option<MutexGuard<'_, ()>> {
        self.reload_gate.try_lock().ok()
    }
}
