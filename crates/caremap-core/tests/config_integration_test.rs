//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use caremap_core::config::{
    CliConfigOverrides, ConfigSource, GeneratorSettings, LabLinkPolicy, LayeredConfig,
};
use caremap_core::CareMapError;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 8] = [
    "CAREMAP_SEED",
    "CAREMAP_BASE_LAT",
    "CAREMAP_BASE_LON",
    "CAREMAP_COORDINATORS",
    "CAREMAP_CUSTOMERS",
    "CAREMAP_LABS",
    "CAREMAP_ASSIGNMENT_RADIUS_KM",
    "CAREMAP_LAB_LINKS",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
seed = 2024
base_lat = 12.5
base_lon = 78.2
lab_count = 5
assignment_radius_km = 7.5
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.seed.value, Some(2024));
    assert_eq!(config.base_lat.value, 12.5);
    assert_eq!(config.base_lon.source, ConfigSource::File);
    assert_eq!(config.lab_count.value, 5);
    assert_eq!(config.assignment_radius_km.value, 7.5);
    assert_eq!(config.customer_count.source, ConfigSource::Default);
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "seed = \"not a number\"").unwrap();

    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_rejected() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/caremap.toml");
    match result {
        Err(CareMapError::ConfigMissing { key }) => assert!(key.contains("/nonexistent/caremap.toml")),
        other => panic!("Expected ConfigMissing, got {:?}", other),
    }
}

#[test]
fn test_base_near_pole_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
seed = 1
base_lat = 89.9
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
    assert_eq!(config.base_lat.value, 89.9);

    match config.to_settings() {
        Err(CareMapError::ConfigInvalid { key, .. }) => assert_eq!(key, "base"),
        other => panic!("Expected ConfigInvalid for base, got {:?}", other),
    }
}

#[test]
fn test_base_near_antimeridian_is_rejected() {
    let mut config = LayeredConfig::with_defaults();
    config.base_lat.update(0.0, ConfigSource::File);
    config.base_lon.update(-179.9, ConfigSource::File);
    assert!(config.to_settings().is_err());

    // A district well inside the range still resolves
    config.base_lon.update(-178.5, ConfigSource::Environment);
    let settings = config.to_settings().unwrap();
    assert_eq!(settings.base.lon, -178.5);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("CAREMAP_SEED", "99");
    env::set_var("CAREMAP_CUSTOMERS", "15");
    env::set_var("CAREMAP_LAB_LINKS", "per-assignment");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
seed = 1
customer_count = 400
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.seed.value, Some(99));
    assert_eq!(config.seed.source, ConfigSource::Environment);
    assert_eq!(config.customer_count.value, 15);
    assert_eq!(config.lab_link_policy.value, LabLinkPolicy::PerAssignment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("CAREMAP_SEED", "minus-one");
    env::set_var("CAREMAP_BASE_LAT", "NaN");
    env::set_var("CAREMAP_LAB_LINKS", "whenever");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.seed.value, None);
    assert_eq!(config.seed.source, ConfigSource::Default);
    assert_eq!(config.base_lat.source, ConfigSource::Default);
    assert_eq!(config.lab_link_policy.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var("CAREMAP_COORDINATORS", "3");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        coordinator_count: Some(11),
        ..Default::default()
    });

    assert_eq!(config.coordinator_count.value, 11);
    assert_eq!(config.coordinator_count.source, ConfigSource::Cli);

    let settings = config.to_settings().unwrap();
    assert_eq!(settings.coordinator_count, 11);
    assert_eq!(settings.worker_radius_km, GeneratorSettings::default().worker_radius_km);

    clear_env();
}
