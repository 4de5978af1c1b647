//! Aggregate disk sampling

use super::types::DiskReport;
use crate::identity::{EntityKind, HardwareSnapshot, IdentityResolver};
use anyhow::Result;
use sysinfo::Disks;

/// Disk sampling handler
#[derive(Debug, Default)]
pub struct DiskCollector;

impl DiskCollector {
    pub fn new() -> Self {
        Self
    }

    /// Sample aggregate capacity and usage across all mounted volumes,
    /// correlated with the first enumerated physical disk's identity.
    pub async fn sample(
        &self,
        disks: &Disks,
        snapshot: &HardwareSnapshot,
        resolver: &IdentityResolver,
    ) -> Result<DiskReport> {
        let serial = snapshot.primary_disk_serial().unwrap_or("");
        let identity = resolver.resolve_identity(EntityKind::Storage, serial).await;

        let mut total = 0u64;
        let mut free = 0u64;
        for disk in disks {
            total += disk.total_space();
            free += disk.available_space();
        }

        Ok(DiskReport {
            disk_uuid: identity.uuid().to_string(),
            total_disk_size: total,
            total_disk_usage: total.saturating_sub(free),
            free_space: free,
        })
    }
}
