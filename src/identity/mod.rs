//! Hardware identity resolution
//!
//! Maps volatile platform descriptors (model strings, serial numbers,
//! interface names) to the durable identity UUIDs registered in the local
//! catalog. The resolver is the single entry point the collectors call; it
//! hides the cache, the staleness check, the snapshot rebuild, and the
//! catalog access behind one call that never fails — any degradation
//! surfaces as the `"unknown"` sentinel, so telemetry keeps flowing.

pub mod cache;
pub mod catalog;
pub mod kind;
pub mod snapshot;
pub mod staleness;

pub use catalog::{IdentityStore, SqliteCatalog};
pub use kind::{EntityKind, ResolvedIdentity, UNKNOWN_UUID};
pub use snapshot::HardwareSnapshot;

use crate::error::ConfigError;
use crate::hardware::HardwareProbe;
use cache::ResolutionCache;
use staleness::ChangeDetector;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::info;

/// The lookup column each entity kind is keyed by.
///
/// The catalog's revisions have not always agreed on which descriptor
/// keys which table, so the mapping is configuration rather than
/// hard-code; unlisted kinds fall back to the built-in defaults. Field
/// names are restricted to identifier characters since they are spliced
/// into validated query text.
#[derive(Debug, Clone, Default)]
pub struct LookupFields {
    overrides: HashMap<EntityKind, String>,
}

impl LookupFields {
    pub fn new(overrides: HashMap<EntityKind, String>) -> Result<Self, ConfigError> {
        for (kind, field) in &overrides {
            let valid = !field.is_empty()
                && field
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(ConfigError::InvalidValue {
                    key: format!("identity.lookup_fields.{kind}"),
                    value: field.clone(),
                    reason: "lookup fields must be [A-Za-z0-9_] identifiers".to_string(),
                });
            }
        }
        Ok(Self { overrides })
    }

    pub fn field(&self, kind: EntityKind) -> &str {
        self.overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_lookup_field())
    }
}

/// Façade over catalog, cache, change detector, and snapshot.
pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
    probe: Arc<dyn HardwareProbe>,
    fields: LookupFields,
    cache: ResolutionCache,
    detector: Mutex<ChangeDetector>,
    snapshot: RwLock<HardwareSnapshot>,
}

impl IdentityResolver {
    /// Build a resolver over `store`, capturing the initial hardware
    /// snapshot from `probe` and observing `catalog_path` for changes.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        probe: Arc<dyn HardwareProbe>,
        fields: LookupFields,
        catalog_path: &Path,
    ) -> Self {
        let snapshot = HardwareSnapshot::capture(probe.as_ref());
        Self {
            store,
            probe,
            fields,
            cache: ResolutionCache::new(),
            detector: Mutex::new(ChangeDetector::new(catalog_path)),
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Resolve a raw descriptor into a catalog identity.
    ///
    /// Checks the catalog's modification marker first; on change, the
    /// cache is cleared and the snapshot rebuilt before the lookup
    /// proceeds, so no entry resolved against a stale catalog survives.
    pub async fn resolve_identity(&self, kind: EntityKind, value: &str) -> ResolvedIdentity {
        if self.catalog_changed() {
            info!("catalog changed, clearing resolution cache and refreshing snapshot");
            self.cache.clear();
            self.snapshot
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .refresh(self.probe.as_ref());
        }

        let field = self.fields.field(kind);
        self.cache
            .get_or_resolve(kind, value, || self.store.resolve(kind, field, value))
            .await
    }

    /// Current hardware identifier snapshot.
    pub fn snapshot(&self) -> HardwareSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Catalog queries issued so far; cache hits do not count.
    pub fn queries_issued(&self) -> u64 {
        self.store.queries_issued()
    }

    /// Number of live cache entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn catalog_changed(&self) -> bool {
        self.detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .has_changed()
    }
}
