//! Hardware identifier snapshot
//!
//! The volatile descriptors used as catalog lookup keys, captured once at
//! startup and rebuilt whenever the change detector fires. Each slot
//! refreshes independently: a failed or empty enumeration keeps the slot's
//! previous value so one flaky hardware class cannot blank out the others.

use crate::hardware::HardwareProbe;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HardwareSnapshot {
    /// Chassis model string, the device lookup key.
    pub device_model: Option<String>,
    /// Manufacturer of the first enumerated memory module.
    pub memory_make: Option<String>,
    /// Processor model name.
    pub cpu_model: Option<String>,
    /// Serial numbers (or unique ids) of every physical disk, in
    /// enumeration order.
    pub disk_serial_numbers: Vec<String>,
    /// Volume serial per mount point / drive letter.
    pub partition_volume_serials: BTreeMap<String, String>,
}

impl HardwareSnapshot {
    /// Capture a fresh snapshot from `probe`.
    pub fn capture(probe: &dyn HardwareProbe) -> Self {
        let mut snapshot = Self::default();
        snapshot.refresh(probe);
        snapshot
    }

    /// Re-query every slot, keeping previous values on failure.
    pub fn refresh(&mut self, probe: &dyn HardwareProbe) {
        match probe.chassis() {
            Ok(Some(chassis)) => {
                if chassis.model.is_some() {
                    self.device_model = chassis.model;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to refresh device model"),
        }

        match probe.memory_modules() {
            Ok(modules) => {
                if let Some(make) = modules.iter().find_map(|m| m.make.clone()) {
                    self.memory_make = Some(make);
                }
            }
            Err(e) => warn!(error = %e, "failed to refresh memory manufacturer"),
        }

        match probe.processors() {
            Ok(processors) => {
                if let Some(model) = processors.iter().find_map(|p| p.model.clone()) {
                    self.cpu_model = Some(model);
                }
            }
            Err(e) => warn!(error = %e, "failed to refresh cpu model"),
        }

        match probe.disk_drives() {
            Ok(drives) => {
                let serials: Vec<String> = drives
                    .iter()
                    .filter_map(|d| d.serial_number.clone().or_else(|| d.unique_id.clone()))
                    .collect();
                if !serials.is_empty() {
                    self.disk_serial_numbers = serials;
                }
            }
            Err(e) => warn!(error = %e, "failed to refresh disk serial numbers"),
        }

        match probe.volumes() {
            Ok(volumes) => {
                let serials: BTreeMap<String, String> = volumes
                    .iter()
                    .filter_map(|v| {
                        let mount = v.mount_point.as_deref()?;
                        let serial = v.serial_number.clone()?;
                        Some((volume_key(mount), serial))
                    })
                    .collect();
                if !serials.is_empty() {
                    self.partition_volume_serials = serials;
                }
            }
            Err(e) => warn!(error = %e, "failed to refresh volume serial numbers"),
        }
    }

    /// Volume serial for a mount point, if the snapshot holds one.
    pub fn volume_serial(&self, mount_point: &str) -> Option<&str> {
        self.partition_volume_serials
            .get(&volume_key(mount_point))
            .map(String::as_str)
    }

    /// Serial of the first enumerated physical disk.
    pub fn primary_disk_serial(&self) -> Option<&str> {
        self.disk_serial_numbers.first().map(String::as_str)
    }
}

/// Normalize a mount point into a stable map key.
///
/// Windows-style drive specs collapse to an upper-case `X:`; other mount
/// points are used verbatim.
pub fn volume_key(mount_point: &str) -> String {
    let trimmed = mount_point.trim().trim_end_matches('\\');
    let stripped = trimmed.trim_end_matches(':');
    if stripped.len() == 1 && stripped.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}:", stripped.to_ascii_uppercase())
    } else {
        trimmed.to_string()
    }
}
