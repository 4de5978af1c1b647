//! Per-volume sampling

use super::types::PartitionReport;
use crate::identity::{EntityKind, HardwareSnapshot, IdentityResolver, UNKNOWN_UUID};
use anyhow::Result;
use sysinfo::Disks;

/// Partition sampling handler
#[derive(Debug, Default)]
pub struct PartitionCollector;

impl PartitionCollector {
    pub fn new() -> Self {
        Self
    }

    /// Sample every mounted volume. Each record resolves to a
    /// `(partition_uuid, storage_uuid)` pair; a volume whose serial is
    /// missing from the snapshot degrades to the sentinel pair and keeps
    /// its sampled values.
    pub async fn sample(
        &self,
        disks: &Disks,
        snapshot: &HardwareSnapshot,
        resolver: &IdentityResolver,
    ) -> Result<Vec<PartitionReport>> {
        let mut reports = Vec::new();

        for disk in disks {
            let mount_point = disk.mount_point().to_string_lossy().to_string();
            let serial = snapshot.volume_serial(&mount_point).unwrap_or("");
            let identity = resolver
                .resolve_identity(EntityKind::Partition, serial)
                .await;

            let total = disk.total_space();
            let free = disk.available_space();
            let used = total.saturating_sub(free);
            let used_percent = if total > 0 {
                (used as f32 / total as f32) * 100.0
            } else {
                0.0
            };

            reports.push(PartitionReport {
                partition_uuid: identity.uuid().to_string(),
                storage_uuid: identity.parent_uuid().unwrap_or(UNKNOWN_UUID).to_string(),
                mount_point,
                free_space: free,
                used_space: used,
                used_space_percent: used_percent,
            });
        }

        Ok(reports)
    }
}
