//! Checkpoint payload types
//!
//! The wire shape consumed by the downstream transport stage: one record
//! per metric category, each carrying resolved identity fields alongside
//! the sampled values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One full collection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringCheckpoint {
    pub event_type: String,
    pub description: String,
    pub date: String,
    pub time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_monitoring: Option<MemoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_monitoring: Option<CpuReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_monitoring: Option<DiskReport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub partition_monitoring: Vec<PartitionReport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub network_monitoring: Vec<NetworkPortReport>,
}

/// Memory utilization sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryReport {
    pub memory_uuid: String,
    pub memory_used: u64,
    pub memory_available: u64,
    pub total_memory: u64,
}

/// CPU utilization sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuReport {
    pub cpu_uuid: String,
    pub usage_percent: f32,
    pub physical_cores: usize,
    pub logical_cores: usize,
    pub frequency_mhz: u64,
    /// Per-logical-core usage, keyed `logical_core_1..n`.
    pub per_core_percent: BTreeMap<String, f32>,
}

/// Aggregate storage sample across all mounted volumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskReport {
    pub disk_uuid: String,
    pub total_disk_size: u64,
    pub total_disk_usage: u64,
    pub free_space: u64,
}

/// Per-volume sample. Partitions are owned by a storage device, so the
/// resolved identity is a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionReport {
    pub partition_uuid: String,
    pub storage_uuid: String,
    pub mount_point: String,
    pub free_space: u64,
    pub used_space: u64,
    pub used_space_percent: f32,
}

/// Per-interface sample. Ports are owned by a network adapter, so the
/// resolved identity is a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkPortReport {
    pub port_uuid: String,
    pub nic_uuid: String,
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub errors_in: u64,
    pub errors_out: u64,
}
