//! Device inventory scanning
//!
//! A full scan enumerates every hardware class through the probe and
//! assembles the device tree. Targeted scans re-enumerate one class and
//! annotate each record with its catalog identity through the resolver,
//! degrading to the sentinel exactly like the metric path.

pub mod types;

use crate::hardware::{records::or_unknown, HardwareProbe, NetworkAdapterRecord, VolumeRecord};
use crate::identity::{EntityKind, IdentityResolver, UNKNOWN_UUID};
use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

pub use types::*;

/// Category a targeted scan enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanCategory {
    Disk,
    Partition,
    Nic,
}

pub struct InventoryScanner {
    probe: Arc<dyn HardwareProbe>,
    resolver: Arc<IdentityResolver>,
}

impl InventoryScanner {
    pub fn new(probe: Arc<dyn HardwareProbe>, resolver: Arc<IdentityResolver>) -> Self {
        Self { probe, resolver }
    }

    /// Enumerate the whole device. Class failures are logged and leave
    /// their section empty; the scan itself always completes.
    pub fn scan_full(&self) -> Result<DeviceInventory> {
        let chassis = self.probe.chassis().unwrap_or_else(|e| {
            warn!(error = %e, "chassis enumeration failed");
            None
        });

        let (make, model, serial_number, is_virtual) = match &chassis {
            Some(c) => (
                or_unknown(c.make.as_deref()),
                or_unknown(c.model.as_deref()),
                or_unknown(c.serial_number.as_deref()),
                c.is_virtual,
            ),
            None => (
                "Unknown".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string(),
                false,
            ),
        };

        Ok(DeviceInventory {
            device: DeviceDetails {
                make,
                model,
                serial_number,
                dev_phy_vm: if is_virtual { "vm" } else { "physical" }.to_string(),
                cpu: self.cpu_details(),
                memory: self.memory_details(),
                storage: self.storage_details(),
                nic: self.nic_details(),
                gpu: self.gpu_details(),
            },
        })
    }

    /// Enumerate one category and annotate it with catalog identities.
    pub async fn scan(&self, category: ScanCategory) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        match category {
            ScanCategory::Disk => {
                let mut storage = self.storage_details();
                for disk in &mut storage {
                    let identity = self
                        .resolver
                        .resolve_identity(EntityKind::Storage, &lookup_value(&disk.serial_number))
                        .await;
                    disk.uuid = Some(identity.uuid().to_string());
                    self.annotate_partitions(&mut disk.partition).await;
                }
                report.disk = Some(storage);
            }
            ScanCategory::Partition => {
                let mut partitions: Vec<PartitionDetails> = self
                    .storage_details()
                    .into_iter()
                    .flat_map(|d| d.partition)
                    .collect();
                self.annotate_partitions(&mut partitions).await;
                report.partition = Some(partitions);
            }
            ScanCategory::Nic => {
                let mut nics = self.nic_details();
                for nic in &mut nics {
                    for port in &mut nic.port {
                        let identity = self
                            .resolver
                            .resolve_identity(
                                EntityKind::NetworkPort,
                                &lookup_value(&port.interface_name),
                            )
                            .await;
                        port.uuid = Some(identity.uuid().to_string());
                        port.nic_uuid =
                            Some(identity.parent_uuid().unwrap_or(UNKNOWN_UUID).to_string());
                    }
                }
                report.nic = Some(nics);
            }
        }
        Ok(report)
    }

    async fn annotate_partitions(&self, partitions: &mut [PartitionDetails]) {
        for partition in partitions.iter_mut() {
            let identity = self
                .resolver
                .resolve_identity(EntityKind::Partition, &lookup_value(&partition.serial_number))
                .await;
            partition.uuid = Some(identity.uuid().to_string());
            partition.storage_uuid =
                Some(identity.parent_uuid().unwrap_or(UNKNOWN_UUID).to_string());
        }
    }

    fn cpu_details(&self) -> Vec<CpuDetails> {
        match self.probe.processors() {
            Ok(processors) => processors
                .into_iter()
                .map(|p| CpuDetails {
                    make: or_unknown(p.make.as_deref()),
                    model: or_unknown(p.model.as_deref()),
                    p_cores: p.physical_cores.unwrap_or(0),
                    l_cores: p.logical_cores.unwrap_or(0),
                    speed: p.max_clock_mhz.unwrap_or(0),
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "processor enumeration failed");
                Vec::new()
            }
        }
    }

    fn memory_details(&self) -> Vec<MemoryModuleDetails> {
        match self.probe.memory_modules() {
            Ok(modules) => modules
                .into_iter()
                .map(|m| MemoryModuleDetails {
                    make: or_unknown(m.make.as_deref()),
                    model: or_unknown(m.part_number.as_deref()),
                    speed: m.speed_mts.unwrap_or(0),
                    size: m.capacity_bytes.unwrap_or(0),
                    serial_number: or_unknown(m.serial_number.as_deref()),
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "memory enumeration failed");
                Vec::new()
            }
        }
    }

    fn storage_details(&self) -> Vec<StorageDetails> {
        let drives = match self.probe.disk_drives() {
            Ok(drives) => drives,
            Err(e) => {
                warn!(error = %e, "disk enumeration failed");
                return Vec::new();
            }
        };
        let volumes = match self.probe.volumes() {
            Ok(volumes) => volumes,
            Err(e) => {
                warn!(error = %e, "volume enumeration failed");
                Vec::new()
            }
        };

        let partitions: Vec<PartitionDetails> =
            volumes.iter().map(partition_from_volume).collect();

        drives
            .into_iter()
            .enumerate()
            .map(|(i, drive)| {
                // Volume-to-disk association needs a platform management
                // interface the probe may not have; volumes attach to the
                // first enumerated drive.
                let parts = if i == 0 { partitions.clone() } else { Vec::new() };
                let free: u64 = parts.iter().map(|p| p.free_space).sum();
                let used: u64 = parts.iter().map(|p| p.used_space).sum();
                let total: u64 = parts.iter().map(|p| p.total_size).sum();

                StorageDetails {
                    make: or_unknown(drive.make.as_deref()),
                    model: or_unknown(drive.model.as_deref()),
                    serial_number: or_unknown(
                        drive
                            .serial_number
                            .as_deref()
                            .or(drive.unique_id.as_deref()),
                    ),
                    free_space: free,
                    total_disk_usage: used,
                    total_disk_size: if total > 0 {
                        total
                    } else {
                        drive.size_bytes.unwrap_or(0)
                    },
                    partition: parts,
                    uuid: None,
                }
            })
            .collect()
    }

    fn nic_details(&self) -> Vec<NicDetails> {
        match self.probe.network_adapters() {
            Ok(adapters) => adapters.iter().map(nic_from_adapter).collect(),
            Err(e) => {
                warn!(error = %e, "network adapter enumeration failed");
                Vec::new()
            }
        }
    }

    fn gpu_details(&self) -> Vec<GpuDetails> {
        match self.probe.video_adapters() {
            Ok(adapters) => adapters
                .into_iter()
                .map(|g| GpuDetails {
                    make: or_unknown(g.make.as_deref()),
                    model: or_unknown(g.model.as_deref()),
                    serial_number: or_unknown(g.device_id.as_deref()),
                    size: g.vram_bytes.unwrap_or(0),
                    driver: or_unknown(g.driver_version.as_deref()),
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "video adapter enumeration failed");
                Vec::new()
            }
        }
    }
}

fn partition_from_volume(volume: &VolumeRecord) -> PartitionDetails {
    let total = volume.total_bytes.unwrap_or(0);
    let free = volume.free_bytes.unwrap_or(0);
    PartitionDetails {
        name: or_unknown(volume.mount_point.as_deref()),
        serial_number: or_unknown(volume.serial_number.as_deref()),
        fs_type: or_unknown(volume.filesystem.as_deref()),
        free_space: free,
        used_space: total.saturating_sub(free),
        total_size: total,
        uuid: None,
        storage_uuid: None,
    }
}

fn nic_from_adapter(adapter: &NetworkAdapterRecord) -> NicDetails {
    let physical = adapter.adapter_id.is_some();
    NicDetails {
        make: or_unknown(adapter.make.as_deref()),
        model: or_unknown(adapter.model.as_deref()),
        serial_number: or_unknown(adapter.adapter_id.as_deref()),
        mac_address: or_unknown(adapter.mac_address.as_deref()),
        number_of_ports: 1,
        max_speed: adapter.max_speed_bps.unwrap_or(0),
        port: vec![PortDetails {
            interface_name: or_unknown(adapter.interface_name.as_deref()),
            operating_speed: adapter.max_speed_bps.unwrap_or(0),
            is_physical_logical: if physical { "physical" } else { "logical" }.to_string(),
            logical_type: if physical { "bridge" } else { "virtual" }.to_string(),
            uuid: None,
            nic_uuid: None,
        }],
    }
}

/// Lookup values use the raw descriptor; the "Unknown" render is an
/// output concern and must not become a catalog key.
fn lookup_value(rendered: &str) -> String {
    if rendered == "Unknown" {
        String::new()
    } else {
        rendered.to_string()
    }
}
