//! hostscout library
//!
//! Host inventory and telemetry agent. Enumerates hardware, samples
//! runtime metrics on an interval, and correlates every record with the
//! durable identity UUID registered for that hardware in a local
//! read-only catalog.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod hardware;
pub mod identity;
pub mod inventory;
pub mod output;

pub use config::AgentConfig;

use anyhow::Result;
use collector::{MetricCollector, MonitoringCheckpoint};
use hardware::{HardwareProbe, SysinfoProbe};
use identity::{IdentityResolver, SqliteCatalog};
use inventory::{InventoryScanner, ScanCategory, ScanReport};
use output::PayloadWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Unique identifier for this agent instance, minted at startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully wired agent: probe, catalog, resolver, collectors, scanner.
pub struct AgentState {
    pub id: AgentId,
    pub config: AgentConfig,
    pub resolver: Arc<IdentityResolver>,
    collector: MetricCollector,
    scanner: InventoryScanner,
}

impl AgentState {
    /// Validate configuration, open the catalog, verify its schema, and
    /// wire up the collection pipeline. Fails fast on anything that would
    /// otherwise degrade every future lookup.
    pub async fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let id = AgentId::new();
        info!("initializing hostscout agent {id}");

        let probe: Arc<dyn HardwareProbe> = Arc::new(SysinfoProbe::new());
        let fields = config.identity.lookup_fields()?;

        let catalog = SqliteCatalog::connect(&config.catalog).await?;
        catalog.validate_schema(&fields).await?;

        let resolver = Arc::new(IdentityResolver::new(
            Arc::new(catalog),
            probe.clone(),
            fields,
            &config.catalog.path,
        ));

        let collector = MetricCollector::new(config.collection.clone(), resolver.clone());
        let scanner = InventoryScanner::new(probe, resolver.clone());

        Ok(Self {
            id,
            config,
            resolver,
            collector,
            scanner,
        })
    }

    /// Run one collection pass and confirm the pipeline is healthy.
    pub async fn health_check(&mut self) -> Result<()> {
        info!("running agent health check");
        let checkpoint = self.collector.collect_checkpoint().await?;
        info!(
            partitions = checkpoint.partition_monitoring.len(),
            interfaces = checkpoint.network_monitoring.len(),
            cached = self.resolver.cached_entries(),
            "agent health check passed"
        );
        Ok(())
    }

    /// Collect a single checkpoint.
    pub async fn collect_once(&mut self) -> Result<MonitoringCheckpoint> {
        self.collector.collect_checkpoint().await
    }

    /// Drive the collection loop until cancelled.
    pub async fn run(&mut self, writer: &PayloadWriter) -> Result<()> {
        self.collector.run(writer).await
    }

    /// Full hardware inventory.
    pub fn scan_full(&self) -> Result<inventory::DeviceInventory> {
        self.scanner.scan_full()
    }

    /// Targeted, identity-annotated scan of one category.
    pub async fn scan(&self, category: ScanCategory) -> Result<ScanReport> {
        self.scanner.scan(category).await
    }
}
