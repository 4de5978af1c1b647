//! Metric collection
//!
//! One sampling handler per category (memory, CPU, disk, partition,
//! network). A collection pass assembles one `MonitoringCheckpoint` with
//! every sampled value correlated to its catalog identity through the
//! resolver. Categories are independent: a degraded resolution or a
//! failed sample in one never blocks the others.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod partition;
pub mod types;

use crate::config::CollectionConfig;
use crate::identity::IdentityResolver;
use crate::output::PayloadWriter;
use anyhow::Result;
use cpu::CpuCollector;
use disk::DiskCollector;
use memory::MemoryCollector;
use network::NetworkCollector;
use partition::PartitionCollector;
use std::sync::Arc;
use sysinfo::{Disks, Networks, System};
use tokio::time::interval;
use tracing::{error, info};

pub use types::*;

/// Periodic metric collection service.
pub struct MetricCollector {
    config: CollectionConfig,
    resolver: Arc<IdentityResolver>,
    system: System,
    networks: Networks,
    memory: MemoryCollector,
    cpu: CpuCollector,
    disk: DiskCollector,
    partition: PartitionCollector,
    network: NetworkCollector,
}

impl MetricCollector {
    pub fn new(config: CollectionConfig, resolver: Arc<IdentityResolver>) -> Self {
        let mut system = System::new_all();
        system.refresh_all();

        Self {
            config,
            resolver,
            system,
            networks: Networks::new_with_refreshed_list(),
            memory: MemoryCollector::new(),
            cpu: CpuCollector::new(),
            disk: DiskCollector::new(),
            partition: PartitionCollector::new(),
            network: NetworkCollector::new(),
        }
    }

    /// Run one full collection pass.
    pub async fn collect_checkpoint(&mut self) -> Result<MonitoringCheckpoint> {
        self.system.refresh_all();
        self.networks.refresh();
        let disks = Disks::new_with_refreshed_list();
        let snapshot = self.resolver.snapshot();

        let now = chrono::Local::now();

        let memory_monitoring = if self.config.enable_memory {
            Some(
                self.memory
                    .sample(&self.system, &snapshot, &self.resolver)
                    .await?,
            )
        } else {
            None
        };

        let cpu_monitoring = if self.config.enable_cpu {
            Some(
                self.cpu
                    .sample(&self.system, &snapshot, &self.resolver)
                    .await?,
            )
        } else {
            None
        };

        let disk_monitoring = if self.config.enable_disk {
            Some(self.disk.sample(&disks, &snapshot, &self.resolver).await?)
        } else {
            None
        };

        let partition_monitoring = if self.config.enable_partition {
            self.partition
                .sample(&disks, &snapshot, &self.resolver)
                .await?
        } else {
            Vec::new()
        };

        let network_monitoring = if self.config.enable_network {
            self.network.sample(&self.networks, &self.resolver).await?
        } else {
            Vec::new()
        };

        Ok(MonitoringCheckpoint {
            event_type: "MON_DATA".to_string(),
            description: "monitoring data".to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            memory_monitoring,
            cpu_monitoring,
            disk_monitoring,
            partition_monitoring,
            network_monitoring,
        })
    }

    /// Drive collection passes at the configured interval, writing each
    /// checkpoint to `writer`. A failed pass is logged and the loop keeps
    /// going.
    pub async fn run(&mut self, writer: &PayloadWriter) -> Result<()> {
        info!(
            "starting metric collection with interval: {}s",
            self.config.interval.as_secs()
        );

        let mut ticker = interval(self.config.interval);

        loop {
            ticker.tick().await;

            match self.collect_checkpoint().await {
                Ok(checkpoint) => {
                    if let Err(e) = writer.write(&checkpoint) {
                        error!("failed to write checkpoint: {e}");
                    }
                }
                Err(e) => error!("collection pass failed: {e}"),
            }
        }
    }
}
