//! Per-interface network sampling

use super::types::NetworkPortReport;
use crate::identity::{EntityKind, IdentityResolver, UNKNOWN_UUID};
use anyhow::Result;
use sysinfo::Networks;

/// Network sampling handler
#[derive(Debug, Default)]
pub struct NetworkCollector;

impl NetworkCollector {
    pub fn new() -> Self {
        Self
    }

    /// Sample every interface that has moved traffic. The interface name
    /// is the lookup key; each record resolves to a
    /// `(port_uuid, nic_uuid)` pair.
    pub async fn sample(
        &self,
        networks: &Networks,
        resolver: &IdentityResolver,
    ) -> Result<Vec<NetworkPortReport>> {
        let mut reports = Vec::new();

        for (name, data) in networks {
            if data.total_transmitted() == 0 && data.total_received() == 0 {
                continue;
            }

            let identity = resolver
                .resolve_identity(EntityKind::NetworkPort, name)
                .await;

            reports.push(NetworkPortReport {
                port_uuid: identity.uuid().to_string(),
                nic_uuid: identity.parent_uuid().unwrap_or(UNKNOWN_UUID).to_string(),
                interface: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_received: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_received: data.total_packets_received(),
                errors_in: data.total_errors_on_received(),
                errors_out: data.total_errors_on_transmitted(),
            });
        }

        Ok(reports)
    }
}
