//! Integration tests to validate the bundled sample data and config files.

use sensor_feeder::prelude::*;
use std::path::{Path, PathBuf};

/// Repository root, two levels above this crate
fn repo_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&manifest_dir)
        .parent()
        .and_then(Path::parent)
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_fake_sensor_data_directory_exists() {
    let data_dir = repo_root().join("fake_sensor_data");
    assert!(data_dir.is_dir(), "Sample data directory should exist at {:?}", data_dir);
}

#[tokio::test]
async fn test_every_sample_is_a_json_object() {
    let files = discover_sample_files(&repo_root().join("fake_sensor_data"), ".json").unwrap();
    assert!(files.len() >= 3, "Should ship at least 3 sample readings");

    for file in &files {
        let reading = SampleReading::load(file)
            .await
            .unwrap_or_else(|e| panic!("{:?} should load: {}", file, e));
        assert!(
            reading.get("temperature").is_some(),
            "{:?} should have a temperature",
            file
        );
        assert!(
            reading.get("soilMoisture").is_some(),
            "{:?} should have a soilMoisture",
            file
        );
        assert!(!reading.summary().contains("n/a"));
    }
}

#[test]
fn test_feeder_toml_matches_defaults() {
    let config = FeederConfig::from_file(&repo_root().join("config/feeder.toml"))
        .expect("feeder.toml should parse and validate");
    let defaults = FeederConfig::default();

    assert_eq!(config.backend_url, defaults.backend_url);
    assert_eq!(config.data_dir, defaults.data_dir);
    assert_eq!(config.send_interval_secs, defaults.send_interval_secs);
    assert_eq!(config.file_suffix, defaults.file_suffix);
    assert_eq!(config.log_level, defaults.log_level);
}
