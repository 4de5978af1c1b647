//! Inventory payload types
//!
//! The device tree produced by a full scan: chassis identity with nested
//! sections per hardware class. String attributes the platform did not
//! report render as `"Unknown"`, sizes and counters as `0`.

use serde::{Deserialize, Serialize};

/// Top-level inventory payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInventory {
    pub device: DeviceDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDetails {
    pub make: String,
    pub model: String,
    pub serial_number: String,
    /// "physical" or "vm".
    pub dev_phy_vm: String,
    pub cpu: Vec<CpuDetails>,
    pub memory: Vec<MemoryModuleDetails>,
    pub storage: Vec<StorageDetails>,
    pub nic: Vec<NicDetails>,
    pub gpu: Vec<GpuDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuDetails {
    pub make: String,
    pub model: String,
    pub p_cores: usize,
    pub l_cores: usize,
    pub speed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryModuleDetails {
    pub make: String,
    pub model: String,
    pub speed: u64,
    pub size: u64,
    pub serial_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageDetails {
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub free_space: u64,
    pub total_disk_usage: u64,
    pub total_disk_size: u64,
    pub partition: Vec<PartitionDetails>,
    /// Catalog identity, present on targeted scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionDetails {
    pub name: String,
    pub serial_number: String,
    pub fs_type: String,
    pub free_space: u64,
    pub used_space: u64,
    pub total_size: u64,
    /// Catalog identity, present on targeted scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicDetails {
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub mac_address: String,
    pub number_of_ports: usize,
    pub max_speed: u64,
    pub port: Vec<PortDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDetails {
    pub interface_name: String,
    pub operating_speed: u64,
    pub is_physical_logical: String,
    pub logical_type: String,
    /// Catalog identity, present on targeted scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuDetails {
    pub make: String,
    pub model: String,
    pub serial_number: String,
    pub size: u64,
    pub driver: String,
}

/// Result of a targeted scan: exactly one populated section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<Vec<StorageDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<Vec<PartitionDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic: Option<Vec<NicDetails>>,
}
