//! Memory sampling

use super::types::MemoryReport;
use crate::identity::{EntityKind, HardwareSnapshot, IdentityResolver};
use anyhow::Result;
use sysinfo::System;

/// Memory sampling handler
#[derive(Debug, Default)]
pub struct MemoryCollector;

impl MemoryCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn sample(
        &self,
        system: &System,
        snapshot: &HardwareSnapshot,
        resolver: &IdentityResolver,
    ) -> Result<MemoryReport> {
        let make = snapshot.memory_make.as_deref().unwrap_or("");
        let identity = resolver.resolve_identity(EntityKind::Memory, make).await;

        let total = system.total_memory();
        let available = system.available_memory();

        Ok(MemoryReport {
            memory_uuid: identity.uuid().to_string(),
            memory_used: total.saturating_sub(available),
            memory_available: available,
            total_memory: total,
        })
    }
}
