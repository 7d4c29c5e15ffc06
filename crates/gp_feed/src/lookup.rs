use gp_core::identity::resolve;

use crate::projector::Projection;
use crate::snapshot::SharedEntry;

/// Resolve a selected key against the active list of a projection.
/// A key that is not there, including one from an older cycle, yields `None`.
pub fn lookup(projection: &Projection, token: &str) -> Option<SharedEntry> {
    lookup_in(&projection.active, token)
}

pub fn lookup_in(entries: &[SharedEntry], token: &str) -> Option<SharedEntry> {
    resolve(entries, token).cloned()
}
