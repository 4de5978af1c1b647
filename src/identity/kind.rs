//! Entity kinds and resolved identity values
//!
//! Every lookup against the catalog targets exactly one entity kind, and
//! each kind is bound to one backing table. The binding is fixed at compile
//! time; only the column used as the lookup key is configurable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The sentinel identity returned for every resolution failure.
pub const UNKNOWN_UUID: &str = "unknown";

/// Category of hardware a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Memory,
    Cpu,
    Storage,
    Partition,
    NetworkPort,
    Device,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Memory,
        EntityKind::Cpu,
        EntityKind::Storage,
        EntityKind::Partition,
        EntityKind::NetworkPort,
        EntityKind::Device,
    ];

    /// The catalog table backing this kind.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Memory => "memory",
            EntityKind::Cpu => "cpu",
            EntityKind::Storage => "storage",
            EntityKind::Partition => "partition",
            EntityKind::NetworkPort => "port",
            EntityKind::Device => "device",
        }
    }

    /// The parent-identity column for kinds owned by another entity.
    ///
    /// Partitions belong to a storage device and network ports to a
    /// network adapter; for those kinds a resolution yields an identity
    /// pair instead of a single token.
    pub fn parent_column(&self) -> Option<&'static str> {
        match self {
            EntityKind::Partition => Some("storage_uuid"),
            EntityKind::NetworkPort => Some("nic_uuid"),
            _ => None,
        }
    }

    /// The lookup column used when the configuration does not override it.
    pub fn default_lookup_field(&self) -> &'static str {
        match self {
            EntityKind::Memory => "make",
            EntityKind::Cpu => "model",
            EntityKind::Storage => "serial_number",
            EntityKind::Partition => "serial_number",
            EntityKind::NetworkPort => "interface_name",
            EntityKind::Device => "model",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Memory => "memory",
            EntityKind::Cpu => "cpu",
            EntityKind::Storage => "storage",
            EntityKind::Partition => "partition",
            EntityKind::NetworkPort => "network_port",
            EntityKind::Device => "device",
        };
        f.write_str(name)
    }
}

/// Outcome of a catalog resolution.
///
/// Kinds without a parent resolve to a single token; partitions and
/// network ports resolve to a pair. A pair is all-or-nothing: if either
/// half is missing the whole result is the sentinel pair, so a dangling
/// parent reference can never propagate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedIdentity {
    Single(String),
    WithParent { uuid: String, parent_uuid: String },
}

impl ResolvedIdentity {
    /// The sentinel result with the arity matching `kind`.
    pub fn unknown_for(kind: EntityKind) -> Self {
        if kind.parent_column().is_some() {
            ResolvedIdentity::WithParent {
                uuid: UNKNOWN_UUID.to_string(),
                parent_uuid: UNKNOWN_UUID.to_string(),
            }
        } else {
            ResolvedIdentity::Single(UNKNOWN_UUID.to_string())
        }
    }

    /// The entity's own identity token.
    pub fn uuid(&self) -> &str {
        match self {
            ResolvedIdentity::Single(uuid) => uuid,
            ResolvedIdentity::WithParent { uuid, .. } => uuid,
        }
    }

    /// The owning entity's token, for composite kinds.
    pub fn parent_uuid(&self) -> Option<&str> {
        match self {
            ResolvedIdentity::Single(_) => None,
            ResolvedIdentity::WithParent { parent_uuid, .. } => Some(parent_uuid),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.uuid() == UNKNOWN_UUID
    }
}
