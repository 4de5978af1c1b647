//! CPU sampling

use super::types::CpuReport;
use crate::identity::{EntityKind, HardwareSnapshot, IdentityResolver};
use anyhow::Result;
use std::collections::BTreeMap;
use sysinfo::System;

/// CPU sampling handler
#[derive(Debug, Default)]
pub struct CpuCollector;

impl CpuCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn sample(
        &self,
        system: &System,
        snapshot: &HardwareSnapshot,
        resolver: &IdentityResolver,
    ) -> Result<CpuReport> {
        let model = snapshot.cpu_model.as_deref().unwrap_or("");
        let identity = resolver.resolve_identity(EntityKind::Cpu, model).await;

        let global = system.global_cpu_info();
        let per_core_percent: BTreeMap<String, f32> = system
            .cpus()
            .iter()
            .enumerate()
            .map(|(i, cpu)| (format!("logical_core_{}", i + 1), cpu.cpu_usage()))
            .collect();

        Ok(CpuReport {
            cpu_uuid: identity.uuid().to_string(),
            usage_percent: global.cpu_usage(),
            physical_cores: system.physical_core_count().unwrap_or(0),
            logical_cores: system.cpus().len(),
            frequency_mhz: global.frequency(),
            per_core_percent,
        })
    }
}
