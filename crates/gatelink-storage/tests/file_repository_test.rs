//! Integration tests for settings persisted in a JSON file.
//!
//! Run with: cargo test --package gatelink-storage --test file_repository_test

use gatelink_core::{AccessControlMode, LatchTime, Password, Phone, Serial, SettingsState};
use gatelink_storage::{FileStore, KeyValueStore, SettingsRepository, StorageError, StoreConfig};
use std::fs;
use tempfile::TempDir;

fn open_repo(dir: &TempDir) -> SettingsRepository<FileStore> {
    let store = FileStore::open(StoreConfig::new(dir.path().join("gatelink.json"))).unwrap();
    SettingsRepository::new(store)
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let mut state = SettingsState::default();
    state.set_unit_number(Phone::parse("+32470000000").unwrap());
    state.set_password(Password::parse("6666").unwrap());
    state.set_access_control_mode(AccessControlMode::All);
    state.set_latch_time(LatchTime::new(30));
    state.upsert_user(Serial::new(1).unwrap(), Phone::parse("111").unwrap(), None);

    open_repo(&dir).save(&state).unwrap();

    let loaded = open_repo(&dir).load().unwrap();
    assert_eq!(loaded, state);
}

#[test]
fn test_per_key_save_leaves_other_keys() {
    let dir = TempDir::new().unwrap();

    let mut state = SettingsState::default();
    state.set_password(Password::parse("6666").unwrap());
    let mut repo = open_repo(&dir);
    repo.save(&state).unwrap();

    state.set_latch_time(LatchTime::new(999));
    state.set_password(Password::parse("7777").unwrap());
    repo.save_relay_settings(&state).unwrap();

    let loaded = open_repo(&dir).load().unwrap();
    assert!(loaded.latch_time().is_latched());
    assert_eq!(loaded.password().as_str(), "6666");
}

#[test]
fn test_reads_file_written_by_another_front_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gatelink.json");
    fs::write(
        &path,
        r#"{
  "unitNumber": "0470000000",
  "password": "4321",
  "relaySettings": "{\"accessControl\":\"ALL\",\"latchTime\":\"005\"}",
  "authorizedUsers": "[{\"serial\":\"016\",\"phone\":\"123456\",\"startTime\":\"2408050800\",\"endTime\":\"2409051000\"}]"
}"#,
    )
    .unwrap();

    let store = FileStore::open(StoreConfig::new(&path)).unwrap();
    assert_eq!(store.get("password").unwrap().as_deref(), Some("4321"));

    let state = SettingsRepository::new(store).load().unwrap();
    assert_eq!(state.unit_number().unwrap().as_str(), "0470000000");
    assert_eq!(state.access_control_mode(), AccessControlMode::All);
    assert_eq!(state.latch_time().as_secs(), 5);
    assert!(state.user(Serial::new(16).unwrap()).window.is_some());
}

#[test]
fn test_malformed_relay_settings_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);
    let mut store = repo.into_inner();
    store.set("relaySettings", "{oops").unwrap();
    repo = SettingsRepository::new(store);

    assert!(matches!(
        repo.load(),
        Err(StorageError::Serialization { .. })
    ));
}
