//! Typed hardware descriptor records
//!
//! Every attribute the platform may or may not report is an explicit
//! `Option`. Defaults applied by consumers when a field is absent:
//! string attributes render as `"Unknown"`, counters and sizes as `0`.

/// Chassis / system enclosure identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChassisRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// True when the platform reports a virtualized enclosure.
    pub is_virtual: bool,
}

/// One processor package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    /// Platform processor identifier (e.g. CPUID-derived).
    pub processor_id: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: Option<usize>,
    pub max_clock_mhz: Option<u64>,
}

/// One physical memory module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryModuleRecord {
    pub make: Option<String>,
    pub part_number: Option<String>,
    pub serial_number: Option<String>,
    pub speed_mts: Option<u64>,
    pub capacity_bytes: Option<u64>,
}

/// One physical disk drive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskDriveRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Stable platform identifier when the serial is unavailable.
    pub unique_id: Option<String>,
    pub size_bytes: Option<u64>,
}

/// One mounted logical volume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeRecord {
    /// Mount point or drive letter ("C:", "/", "/data").
    pub mount_point: Option<String>,
    /// Volume serial number, the partition lookup key.
    pub serial_number: Option<String>,
    pub filesystem: Option<String>,
    pub total_bytes: Option<u64>,
    pub free_bytes: Option<u64>,
}

/// One network adapter, including the interface names it exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkAdapterRecord {
    /// Platform adapter identifier (GUID or device path).
    pub adapter_id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub interface_name: Option<String>,
    pub mac_address: Option<String>,
    pub max_speed_bps: Option<u64>,
}

/// One video adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoAdapterRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub device_id: Option<String>,
    pub vram_bytes: Option<u64>,
    pub driver_version: Option<String>,
}

/// Render an optional string attribute with the documented default.
pub fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "Unknown".to_string(),
    }
}
