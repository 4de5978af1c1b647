//! Identity catalog gateway
//!
//! Read-only access to the SQLite catalog holding the authoritative
//! descriptor-to-UUID mapping. The schema each entity kind needs (table,
//! uuid column, configured lookup column, parent column) is validated once
//! at startup; after that, every resolution is a single parameterized
//! equality query, and every runtime failure degrades to the sentinel
//! instead of propagating.

use super::kind::{EntityKind, ResolvedIdentity};
use super::LookupFields;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

/// Read side of the identity catalog.
///
/// The trait seam lets the resolver run against an in-memory stand-in in
/// tests; `SqliteCatalog` is the production implementation.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolve `value` in the lookup column `field` of the table bound to
    /// `kind`. Never fails: any error collapses into the sentinel.
    async fn resolve(&self, kind: EntityKind, field: &str, value: &str) -> ResolvedIdentity;

    /// Number of catalog queries issued so far.
    fn queries_issued(&self) -> u64;
}

pub struct SqliteCatalog {
    pool: SqlitePool,
    queries: AtomicU64,
}

impl SqliteCatalog {
    /// Open the catalog read-only.
    ///
    /// The catalog is externally owned; a missing file is a deployment
    /// fault and surfaces immediately rather than on the first lookup.
    pub async fn connect(config: &CatalogConfig) -> Result<Self, CatalogError> {
        info!(path = %config.path.display(), "opening identity catalog");

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await
            .map_err(|source| CatalogError::Open {
                path: config.path.clone(),
                source,
            })?;

        Ok(Self {
            pool,
            queries: AtomicU64::new(0),
        })
    }

    /// Verify that every entity kind's table carries the columns the
    /// configured lookup mapping relies on. Runs once at startup; a
    /// mismatch fails fast instead of degrading every future lookup.
    pub async fn validate_schema(&self, fields: &LookupFields) -> Result<(), CatalogError> {
        for kind in EntityKind::ALL {
            let table = kind.table();
            let columns = self.table_columns(table).await?;
            if columns.is_empty() {
                return Err(CatalogError::MissingTable { table });
            }

            let mut required = vec!["uuid".to_string(), fields.field(kind).to_string()];
            if let Some(parent) = kind.parent_column() {
                required.push(parent.to_string());
            }
            for column in required {
                if !columns.contains(&column) {
                    return Err(CatalogError::MissingColumn { table, column });
                }
            }
        }
        info!("catalog schema validated for all entity kinds");
        Ok(())
    }

    async fn table_columns(&self, table: &'static str) -> Result<HashSet<String>, CatalogError> {
        // Table names are the static kind bindings, never user input.
        // Quoted because "partition" doubles as an SQL keyword.
        let rows = sqlx::query(&format!("PRAGMA table_info(\"{table}\")"))
            .fetch_all(&self.pool)
            .await
            .map_err(|source| CatalogError::Inspection { table, source })?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name")
                    .map_err(|source| CatalogError::Inspection { table, source })
            })
            .collect()
    }

    async fn fetch_identity(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> Result<ResolvedIdentity, sqlx::Error> {
        let table = kind.table();

        // `field` passed schema validation at startup and the identifier
        // charset check at config load; `value` is always bound.
        let resolved = match kind.parent_column() {
            Some(parent) => {
                let sql =
                    format!("SELECT uuid, {parent} FROM \"{table}\" WHERE {field} = ?1 LIMIT 1");
                let row = sqlx::query(&sql)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?;
                match row {
                    Some(row) => {
                        let uuid: Option<String> = row.try_get("uuid")?;
                        let parent_uuid: Option<String> = row.try_get(parent)?;
                        // Partial identity never escapes: both halves or
                        // neither.
                        match (non_empty(uuid), non_empty(parent_uuid)) {
                            (Some(uuid), Some(parent_uuid)) => {
                                ResolvedIdentity::WithParent { uuid, parent_uuid }
                            }
                            _ => ResolvedIdentity::unknown_for(kind),
                        }
                    }
                    None => ResolvedIdentity::unknown_for(kind),
                }
            }
            None => {
                let sql = format!("SELECT uuid FROM \"{table}\" WHERE {field} = ?1 LIMIT 1");
                let row = sqlx::query(&sql)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?;
                match row.map(|r| r.try_get::<Option<String>, _>("uuid")).transpose()? {
                    Some(uuid) => match non_empty(uuid) {
                        Some(uuid) => ResolvedIdentity::Single(uuid),
                        None => ResolvedIdentity::unknown_for(kind),
                    },
                    None => ResolvedIdentity::unknown_for(kind),
                }
            }
        };

        Ok(resolved)
    }
}

#[async_trait]
impl IdentityStore for SqliteCatalog {
    async fn resolve(&self, kind: EntityKind, field: &str, value: &str) -> ResolvedIdentity {
        self.queries.fetch_add(1, Ordering::Relaxed);
        match self.fetch_identity(kind, field, value).await {
            Ok(resolved) => {
                debug!(kind = %kind, field, value, uuid = resolved.uuid(), "catalog lookup");
                resolved
            }
            Err(e) => {
                error!(kind = %kind, field, value, error = %e, "catalog query failed");
                ResolvedIdentity::unknown_for(kind)
            }
        }
    }

    fn queries_issued(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
