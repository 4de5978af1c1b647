//! Default `HardwareProbe` backed by the `sysinfo` crate
//!
//! `sysinfo` covers processors, memory totals, mounted volumes, and network
//! interfaces on every supported platform. Classes it cannot enumerate
//! (chassis identity, per-module memory details, video adapters, disk
//! serials) come back empty or `None`; a platform-specific probe (e.g. one
//! backed by the Windows management interface) can be injected in their
//! place without touching any consumer.

use super::records::{
    ChassisRecord, DiskDriveRecord, MemoryModuleRecord, NetworkAdapterRecord, ProcessorRecord,
    VideoAdapterRecord, VolumeRecord,
};
use super::HardwareProbe;
use crate::error::HardwareError;
use sysinfo::{Disks, Networks, System};
use tracing::debug;

#[derive(Debug, Default)]
pub struct SysinfoProbe;

impl SysinfoProbe {
    pub fn new() -> Self {
        Self
    }
}

impl HardwareProbe for SysinfoProbe {
    fn chassis(&self) -> Result<Option<ChassisRecord>, HardwareError> {
        // sysinfo exposes no enclosure identity; tolerated absence.
        debug!("chassis identity not available from sysinfo");
        Ok(None)
    }

    fn processors(&self) -> Result<Vec<ProcessorRecord>, HardwareError> {
        let mut system = System::new();
        system.refresh_cpu();

        let Some(cpu) = system.cpus().first() else {
            return Ok(Vec::new());
        };

        Ok(vec![ProcessorRecord {
            make: non_empty(cpu.vendor_id()),
            model: non_empty(cpu.brand()),
            processor_id: None,
            physical_cores: system.physical_core_count(),
            logical_cores: Some(system.cpus().len()),
            max_clock_mhz: Some(cpu.frequency()),
        }])
    }

    fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, HardwareError> {
        let mut system = System::new();
        system.refresh_memory();

        if system.total_memory() == 0 {
            return Ok(Vec::new());
        }

        // Per-module details need a platform management interface; report
        // the installed total as a single module.
        Ok(vec![MemoryModuleRecord {
            capacity_bytes: Some(system.total_memory()),
            ..Default::default()
        }])
    }

    fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, HardwareError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|disk| DiskDriveRecord {
                model: non_empty(&disk.name().to_string_lossy()),
                size_bytes: Some(disk.total_space()),
                ..Default::default()
            })
            .collect())
    }

    fn volumes(&self) -> Result<Vec<VolumeRecord>, HardwareError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|disk| VolumeRecord {
                mount_point: non_empty(&disk.mount_point().to_string_lossy()),
                serial_number: None,
                filesystem: non_empty(&disk.file_system().to_string_lossy()),
                total_bytes: Some(disk.total_space()),
                free_bytes: Some(disk.available_space()),
            })
            .collect())
    }

    fn network_adapters(&self) -> Result<Vec<NetworkAdapterRecord>, HardwareError> {
        let networks = Networks::new_with_refreshed_list();
        Ok(networks
            .iter()
            .map(|(name, data)| NetworkAdapterRecord {
                interface_name: non_empty(name),
                mac_address: non_empty(&data.mac_address().to_string()),
                ..Default::default()
            })
            .collect())
    }

    fn video_adapters(&self) -> Result<Vec<VideoAdapterRecord>, HardwareError> {
        debug!("video adapters not available from sysinfo");
        Ok(Vec::new())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
