//! Resolution cache
//!
//! Maps `(entity_kind, lookup_value)` to the identity the catalog returned
//! for it. Failed resolutions are cached as well, so a descriptor with no
//! catalog row costs one query per cache epoch instead of one per sample.
//! Entries never expire individually; the whole map is cleared when the
//! change detector reports a catalog modification.

use super::kind::{EntityKind, ResolvedIdentity};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<(EntityKind, String), ResolvedIdentity>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached identity, resolving through `resolve` on a miss.
    ///
    /// An empty lookup value short-circuits to the sentinel without
    /// touching the cache or the catalog: there is nothing to key on.
    /// The internal lock is never held across the `resolve` await, so a
    /// slow catalog query cannot stall unrelated lookups.
    pub async fn get_or_resolve<F, Fut>(
        &self,
        kind: EntityKind,
        value: &str,
        resolve: F,
    ) -> ResolvedIdentity
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ResolvedIdentity>,
    {
        if value.is_empty() {
            warn!(kind = %kind, "missing lookup value, returning sentinel");
            return ResolvedIdentity::unknown_for(kind);
        }

        if let Some(hit) = self.get(kind, value) {
            debug!(kind = %kind, value, "resolution cache hit");
            return hit;
        }

        let resolved = resolve().await;
        self.insert(kind, value, resolved.clone());
        resolved
    }

    pub fn get(&self, kind: EntityKind, value: &str) -> Option<ResolvedIdentity> {
        self.lock().get(&(kind, value.to_string())).cloned()
    }

    pub fn insert(&self, kind: EntityKind, value: &str, identity: ResolvedIdentity) {
        self.lock().insert((kind, value.to_string()), identity);
    }

    /// Drop every entry. Called when the catalog's storage changes.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "resolution cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(EntityKind, String), ResolvedIdentity>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
