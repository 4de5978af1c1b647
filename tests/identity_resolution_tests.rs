//! Identity resolution tests against a real SQLite catalog fixture

use hostscout::config::CatalogConfig;
use hostscout::error::{CatalogError, HardwareError};
use hostscout::hardware::{
    ChassisRecord, DiskDriveRecord, HardwareProbe, MemoryModuleRecord, NetworkAdapterRecord,
    ProcessorRecord, VideoAdapterRecord, VolumeRecord,
};
use hostscout::identity::{
    EntityKind, IdentityResolver, LookupFields, ResolvedIdentity, SqliteCatalog, UNKNOWN_UUID,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Probe that enumerates nothing; snapshots stay empty.
struct NullProbe;

impl HardwareProbe for NullProbe {
    fn chassis(&self) -> Result<Option<ChassisRecord>, HardwareError> {
        Ok(None)
    }
    fn processors(&self) -> Result<Vec<ProcessorRecord>, HardwareError> {
        Ok(Vec::new())
    }
    fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, HardwareError> {
        Ok(Vec::new())
    }
    fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, HardwareError> {
        Ok(Vec::new())
    }
    fn volumes(&self) -> Result<Vec<VolumeRecord>, HardwareError> {
        Ok(Vec::new())
    }
    fn network_adapters(&self) -> Result<Vec<NetworkAdapterRecord>, HardwareError> {
        Ok(Vec::new())
    }
    fn video_adapters(&self) -> Result<Vec<VideoAdapterRecord>, HardwareError> {
        Ok(Vec::new())
    }
}

async fn writer_pool(path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    SqlitePool::connect_with(options).await.unwrap()
}

/// Create a catalog with every entity-kind table and the standard rows:
/// one storage device `X1 → S-1`, one partition `X1 → (P-1, S-1)`, one
/// partition `ORPHAN` with a null parent, plus memory/cpu/port rows.
async fn create_catalog(path: &Path) -> SqlitePool {
    let pool = writer_pool(path).await;

    let ddl = [
        "CREATE TABLE memory (uuid TEXT, make TEXT, serial_number TEXT)",
        "CREATE TABLE cpu (uuid TEXT, make TEXT, model TEXT, os_uuid TEXT)",
        "CREATE TABLE storage (uuid TEXT, make TEXT, model TEXT, serial_number TEXT, os_uuid TEXT)",
        "CREATE TABLE partition (uuid TEXT, storage_uuid TEXT, name TEXT, serial_number TEXT, os_uuid TEXT)",
        "CREATE TABLE port (uuid TEXT, nic_uuid TEXT, interface_name TEXT, os_uuid TEXT)",
        "CREATE TABLE device (uuid TEXT, make TEXT, model TEXT, serial_number TEXT)",
    ];
    for statement in ddl {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    let rows = [
        "INSERT INTO memory (uuid, make, serial_number) VALUES ('M-1', 'Kingston', 'KS-77')",
        "INSERT INTO cpu (uuid, model) VALUES ('C-1', 'Ryzen 9 5950X')",
        "INSERT INTO storage (uuid, serial_number) VALUES ('S-1', 'X1')",
        "INSERT INTO partition (uuid, storage_uuid, serial_number) VALUES ('P-1', 'S-1', 'X1')",
        "INSERT INTO partition (uuid, storage_uuid, serial_number) VALUES ('P-2', NULL, 'ORPHAN')",
        "INSERT INTO port (uuid, nic_uuid, interface_name) VALUES ('PT-1', 'N-1', 'eth0')",
        "INSERT INTO device (uuid, model) VALUES ('D-1', 'ThinkPad X1')",
    ];
    for statement in rows {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }

    pool
}

async fn fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("catalog.sqlite");
    let pool = create_catalog(&path).await;
    pool.close().await;
    path
}

fn catalog_config(path: &Path) -> CatalogConfig {
    CatalogConfig {
        path: path.to_path_buf(),
        ..Default::default()
    }
}

async fn resolver_with_fields(path: &Path, fields: LookupFields) -> IdentityResolver {
    let catalog = SqliteCatalog::connect(&catalog_config(path)).await.unwrap();
    catalog.validate_schema(&fields).await.unwrap();
    IdentityResolver::new(Arc::new(catalog), Arc::new(NullProbe), fields, path)
}

async fn resolver(path: &Path) -> IdentityResolver {
    resolver_with_fields(path, LookupFields::default()).await
}

fn bump_mtime(path: &Path) {
    let file = OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(5))
        .unwrap();
}

#[tokio::test]
async fn test_idempotent_resolution_hits_catalog_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let first = resolver
        .resolve_identity(EntityKind::Cpu, "Ryzen 9 5950X")
        .await;
    assert_eq!(first, ResolvedIdentity::Single("C-1".to_string()));
    assert_eq!(resolver.queries_issued(), 1);

    let second = resolver
        .resolve_identity(EntityKind::Cpu, "Ryzen 9 5950X")
        .await;
    assert_eq!(second, first);
    assert_eq!(resolver.queries_issued(), 1, "second call must be a cache hit");
}

#[tokio::test]
async fn test_negative_result_is_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    for _ in 0..2 {
        let resolved = resolver
            .resolve_identity(EntityKind::Memory, "NoSuchMake")
            .await;
        assert!(resolved.is_unknown());
    }
    assert_eq!(resolver.queries_issued(), 1);
}

#[tokio::test]
async fn test_catalog_change_invalidates_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let first = resolver.resolve_identity(EntityKind::Storage, "X1").await;
    assert_eq!(first, ResolvedIdentity::Single("S-1".to_string()));
    assert_eq!(resolver.queries_issued(), 1);
    assert_eq!(resolver.cached_entries(), 1);

    bump_mtime(&path);

    let second = resolver.resolve_identity(EntityKind::Storage, "X1").await;
    assert_eq!(second, first);
    assert_eq!(
        resolver.queries_issued(),
        2,
        "a changed catalog must force a re-query even for a cached key"
    );
    assert_eq!(resolver.cached_entries(), 1);
}

#[tokio::test]
async fn test_catalog_update_is_visible_after_invalidation() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let stale = resolver.resolve_identity(EntityKind::Storage, "X2").await;
    assert!(stale.is_unknown());

    let pool = writer_pool(&path).await;
    sqlx::query("INSERT INTO storage (uuid, serial_number) VALUES ('S-2', 'X2')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;
    bump_mtime(&path);

    let fresh = resolver.resolve_identity(EntityKind::Storage, "X2").await;
    assert_eq!(fresh, ResolvedIdentity::Single("S-2".to_string()));
}

#[tokio::test]
async fn test_empty_key_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let resolved = resolver.resolve_identity(EntityKind::Memory, "").await;
    assert_eq!(resolved, ResolvedIdentity::Single(UNKNOWN_UUID.to_string()));
    assert_eq!(resolver.queries_issued(), 0, "no catalog query for an empty key");
    assert_eq!(resolver.cached_entries(), 0, "empty keys are not cached");
}

#[tokio::test]
async fn test_partition_resolves_to_identity_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let resolved = resolver.resolve_identity(EntityKind::Partition, "X1").await;
    assert_eq!(
        resolved,
        ResolvedIdentity::WithParent {
            uuid: "P-1".to_string(),
            parent_uuid: "S-1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_missing_partition_row_yields_sentinel_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let resolved = resolver.resolve_identity(EntityKind::Partition, "X9").await;
    assert_eq!(resolved, ResolvedIdentity::unknown_for(EntityKind::Partition));
    assert_eq!(resolved.uuid(), UNKNOWN_UUID);
    assert_eq!(resolved.parent_uuid(), Some(UNKNOWN_UUID));
}

#[tokio::test]
async fn test_null_parent_degrades_whole_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let resolved = resolver
        .resolve_identity(EntityKind::Partition, "ORPHAN")
        .await;
    assert_eq!(
        resolved,
        ResolvedIdentity::unknown_for(EntityKind::Partition),
        "a row with a null parent must not leak its own uuid"
    );
}

#[tokio::test]
async fn test_network_port_resolves_with_adapter_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;
    let resolver = resolver(&path).await;

    let resolved = resolver
        .resolve_identity(EntityKind::NetworkPort, "eth0")
        .await;
    assert_eq!(
        resolved,
        ResolvedIdentity::WithParent {
            uuid: "PT-1".to_string(),
            parent_uuid: "N-1".to_string(),
        }
    );
}

#[tokio::test]
async fn test_configured_lookup_field_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;

    let overrides = HashMap::from([(EntityKind::Memory, "serial_number".to_string())]);
    let fields = LookupFields::new(overrides).unwrap();
    let resolver = resolver_with_fields(&path, fields).await;

    let by_serial = resolver.resolve_identity(EntityKind::Memory, "KS-77").await;
    assert_eq!(by_serial, ResolvedIdentity::Single("M-1".to_string()));

    let by_make = resolver.resolve_identity(EntityKind::Memory, "Kingston").await;
    assert!(by_make.is_unknown(), "make is no longer the lookup column");
}

#[tokio::test]
async fn test_schema_validation_rejects_missing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incomplete.sqlite");
    let pool = writer_pool(&path).await;
    sqlx::query("CREATE TABLE memory (uuid TEXT, make TEXT)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let catalog = SqliteCatalog::connect(&catalog_config(&path)).await.unwrap();
    let err = catalog
        .validate_schema(&LookupFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingTable { .. }));
}

#[tokio::test]
async fn test_schema_validation_rejects_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir).await;

    let overrides = HashMap::from([(EntityKind::Cpu, "processor_id".to_string())]);
    let fields = LookupFields::new(overrides).unwrap();

    let catalog = SqliteCatalog::connect(&catalog_config(&path)).await.unwrap();
    let err = catalog.validate_schema(&fields).await.unwrap_err();
    match err {
        CatalogError::MissingColumn { table, column } => {
            assert_eq!(table, "cpu");
            assert_eq!(column, "processor_id");
        }
        other => panic!("expected MissingColumn, got {other}"),
    }
}

#[tokio::test]
async fn test_missing_catalog_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sqlite");
    let result = SqliteCatalog::connect(&catalog_config(&path)).await;
    assert!(matches!(result, Err(CatalogError::Open { .. })));
}
