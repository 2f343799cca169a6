//! File-level tests for the config and snapshot stores.

use assert_fs::prelude::*;
use predicates::prelude::*;

use fitlock::config::{self, AppConfig, EXAMPLE_CONFIG};
use fitlock::state::{self, Snapshot};

#[test]
fn example_config_loads_with_documented_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.yaml");
    file.write_str(EXAMPLE_CONFIG).unwrap();

    let config = config::load_config(file.path()).unwrap();

    // The example file spells out the defaults; loading it must agree with
    // an empty config.
    let defaults = AppConfig::default();
    assert_eq!(
        config.unlock.default_unlock_minutes,
        defaults.unlock.default_unlock_minutes
    );
    assert_eq!(config.unlock.extend_minutes, defaults.unlock.extend_minutes);
    assert_eq!(
        config.monitor.poll_interval_secs,
        defaults.monitor.poll_interval_secs
    );
    assert_eq!(
        config.rating.prompt_after_workouts,
        defaults.rating.prompt_after_workouts
    );
}

#[test]
fn saved_config_is_readable_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.yaml");

    let mut config = AppConfig::default();
    config.unlock.default_unlock_minutes = 25;
    config::save_config(file.path(), &config).unwrap();

    file.assert(predicate::path::exists());
    file.assert(predicate::str::contains("default_unlock_minutes: 25"));
    file.assert(predicate::str::contains("poll_interval_secs"));
}

#[test]
fn malformed_config_reports_the_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.yaml");
    file.write_str("unlock: [not, a, map]").unwrap();

    let err = config::load_config(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("config.yaml"));
}

#[test]
fn snapshot_file_carries_version_and_device() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("snapshot.json");

    let snapshot = Snapshot::new();
    state::save_snapshot(file.path(), &snapshot).unwrap();

    file.assert(predicate::path::exists());
    file.assert(predicate::str::contains("\"version\": \"1.0\""));
    file.assert(predicate::str::contains(snapshot.device_id.as_str()));

    let loaded = state::load_snapshot(file.path()).unwrap().unwrap();
    assert_eq!(loaded.device_id, snapshot.device_id);
}

#[test]
fn atomic_write_leaves_no_temp_file_behind() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("snapshot.json");

    state::save_snapshot(file.path(), &Snapshot::new()).unwrap();

    temp.child("snapshot.tmp").assert(predicate::path::missing());
}
