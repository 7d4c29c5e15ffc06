//! Reconciliation and view derivation for the skateboarding news feed.
//!
//! A load cycle ([`FeedReconciler::load`]) picks the authoritative article
//! list from the persisted store or the generative source and publishes it as
//! an immutable [`Snapshot`]. Views are derived from the snapshot by the
//! [`Projector`]: keyword filter, region and search filters, category slices
//! and the featured pick.

pub mod filter;
pub mod logging;
pub mod lookup;
pub mod projector;
pub mod reconciler;
pub mod selection;
pub mod service;
pub mod snapshot;

pub use filter::{KeywordFilter, SKATE_KEYWORDS};
pub use lookup::lookup;
pub use projector::{project, CategorySlices, Projection, Projector, TICKER_PLACEHOLDER};
pub use reconciler::{FeedReconciler, FeedStatus};
pub use selection::{resolve_screen, CultureSubView, RegionFilter, Screen, ViewMode, ViewSelection};
pub use service::FeedService;
pub use snapshot::{FeedEntry, FeedOrigin, SharedEntry, Snapshot};

pub mod prelude {
    pub use super::{FeedService, RegionFilter, Screen, ViewMode, ViewSelection};
    pub use gp_core::{Article, Error, Result};
}
