//! Configuration loading and validation tests

use hostscout::config::{AgentConfig, SinkKind};
use hostscout::identity::EntityKind;
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = AgentConfig::default();

    assert_eq!(config.collection.interval, Duration::from_secs(30));
    assert!(config.collection.enable_memory);
    assert!(config.collection.enable_network);
    assert_eq!(config.catalog.max_connections, 2);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.output.sink, SinkKind::Stdout);
    assert!(config.identity.lookup_fields.is_empty());

    config.validate().unwrap();
}

#[test]
fn test_generated_config_round_trips() {
    let rendered = toml::to_string_pretty(&AgentConfig::default()).unwrap();
    let parsed: AgentConfig = toml::from_str(&rendered).unwrap();
    parsed.validate().unwrap();
    assert_eq!(parsed.collection.interval, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_load_from_file_overrides_defaults() {
    let toml_content = r#"
        [catalog]
        path = "/var/lib/hostscout/catalog.sqlite"

        [collection]
        enable_network = false

        [collection.interval]
        secs = 60
        nanos = 0

        [identity.lookup_fields]
        memory = "serial_number"

        [logging]
        level = "debug"
    "#;

    let mut temp_file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();

    let config = AgentConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(
        config.catalog.path.to_string_lossy(),
        "/var/lib/hostscout/catalog.sqlite"
    );
    assert_eq!(config.collection.interval, Duration::from_secs(60));
    assert!(!config.collection.enable_network);
    assert!(config.collection.enable_memory, "unset fields keep defaults");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.identity.lookup_fields.get(&EntityKind::Memory),
        Some(&"serial_number".to_string())
    );
    config.validate().unwrap();
}

#[test]
fn test_missing_required_file_is_an_error() {
    let result = AgentConfig::load_from_file(std::path::Path::new("/no/such/hostscout.toml"));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_overrides_file_and_defaults() {
    std::env::set_var("HOSTSCOUT_LOGGING__LEVEL", "trace");
    std::env::set_var("HOSTSCOUT_COLLECTION__ENABLE_DISK", "false");

    let mut temp_file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    temp_file.write_all(b"[logging]\nlevel = \"warn\"\n").unwrap();

    let config = AgentConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.logging.level, "trace");
    assert!(!config.collection.enable_disk);

    std::env::remove_var("HOSTSCOUT_LOGGING__LEVEL");
    std::env::remove_var("HOSTSCOUT_COLLECTION__ENABLE_DISK");
}

#[test]
#[serial]
fn test_invalid_lookup_field_fails_validation() {
    let toml_content = r#"
        [identity.lookup_fields]
        cpu = "model; DROP TABLE cpu"
    "#;

    let mut temp_file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();

    let config = AgentConfig::load_from_file(temp_file.path()).unwrap();
    assert!(config.validate().is_err());
}
