// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.snapshot_interval, 1000);
    assert_eq!(config.admission_timeout, Duration::from_secs(5));
    assert_eq!(config.log_filter, "warn");
    assert!(!config.machine_id.is_empty());
}

#[test]
fn partial_file_overrides_only_given_keys() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "machine_id = \"front-desk\"\nadmission_timeout = \"250ms\"\n",
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.machine_id, "front-desk");
    assert_eq!(config.admission_timeout, Duration::from_millis(250));
    assert_eq!(config.snapshot_interval, 1000);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::from_toml("capacity_slack = 3", "inline").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = Config::from_toml("admission_timeout = \"0s\"", "inline").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
