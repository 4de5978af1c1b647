//! Platform hardware boundary
//!
//! Hardware enumeration is an external collaborator: the agent consumes a
//! query capability returning zero-or-more records per hardware class, and
//! must tolerate both missing records and missing attributes. The
//! `HardwareProbe` trait is that boundary; `SysinfoProbe` is the default
//! implementation backed by the `sysinfo` crate.

pub mod probe;
pub mod records;

pub use probe::SysinfoProbe;
pub use records::*;

use crate::error::HardwareError;

/// Query capability over the platform's hardware classes.
///
/// Every method is independently fallible; a failure in one class must not
/// prevent callers from querying the others. Implementations return what
/// the platform exposes and leave the rest `None` — consumers apply the
/// documented defaults ("Unknown" for strings, 0 for numerics) at the
/// output boundary.
#[cfg_attr(test, mockall::automock)]
pub trait HardwareProbe: Send + Sync {
    /// Chassis/system identity (make, model, serial). At most one record.
    fn chassis(&self) -> Result<Option<ChassisRecord>, HardwareError>;

    /// Installed processors. Usually one record per socket.
    fn processors(&self) -> Result<Vec<ProcessorRecord>, HardwareError>;

    /// Physical memory modules. May be empty on virtualized hosts.
    fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, HardwareError>;

    /// Physical disk drives.
    fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, HardwareError>;

    /// Mounted logical volumes.
    fn volumes(&self) -> Result<Vec<VolumeRecord>, HardwareError>;

    /// Network adapters.
    fn network_adapters(&self) -> Result<Vec<NetworkAdapterRecord>, HardwareError>;

    /// Video adapters. Empty when the platform exposes none.
    fn video_adapters(&self) -> Result<Vec<VideoAdapterRecord>, HardwareError>;
}
