use crate::{
    error::{StorageError, StorageResult},
    records::{AuthorizedUserRecord, RelaySettingsRecord},
    store::KeyValueStore,
};
use gatelink_core::{
    AccessControlMode, AdminNumber, LatchTime, Password, Phone, Serial, SettingsState, TimeWindow,
    constants::LATCH_WIDTH,
};
use tracing::{info, warn};

pub const KEY_UNIT_NUMBER: &str = "unitNumber";
pub const KEY_PASSWORD: &str = "password";
pub const KEY_ADMIN_NUMBER: &str = "adminNumber";
pub const KEY_RELAY_SETTINGS: &str = "relaySettings";
pub const KEY_AUTHORIZED_USERS: &str = "authorizedUsers";

/// Reads and writes a [`SettingsState`] under the app's logical keys.
///
/// Loading is lenient: absent keys and bad scalar values fall back to
/// defaults. Only undecodable JSON fails.
#[derive(Debug)]
pub struct SettingsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Materialize the persisted settings.
    ///
    /// # Errors
    /// Returns `StorageError::Serialization` if `relaySettings` or
    /// `authorizedUsers` holds malformed JSON, or any error of the store.
    pub fn load(&self) -> StorageResult<SettingsState> {
        let mut state = SettingsState::default();

        if let Some(raw) = self.store.get(KEY_UNIT_NUMBER)?
            && !raw.trim().is_empty()
        {
            match Phone::parse(&raw) {
                Ok(unit) => state.set_unit_number(unit),
                Err(e) => warn!(key = KEY_UNIT_NUMBER, error = %e, "Ignoring stored unit number"),
            }
        }

        if let Some(raw) = self.store.get(KEY_PASSWORD)? {
            match Password::parse(&raw) {
                Ok(password) => state.set_password(password),
                Err(e) => warn!(key = KEY_PASSWORD, error = %e, "Stored password invalid, using default"),
            }
        }

        if let Some(raw) = self.store.get(KEY_ADMIN_NUMBER)?
            && !raw.trim().is_empty()
        {
            match AdminNumber::parse(&raw) {
                Ok(admin) => state.set_admin_number(admin),
                Err(e) => warn!(key = KEY_ADMIN_NUMBER, error = %e, "Ignoring stored admin number"),
            }
        }

        if let Some(raw) = self.store.get(KEY_RELAY_SETTINGS)? {
            let record: RelaySettingsRecord = serde_json::from_str(&raw)
                .map_err(|e| StorageError::serialization(KEY_RELAY_SETTINGS, e))?;
            apply_relay_settings(&record, &mut state);
        }

        if let Some(raw) = self.store.get(KEY_AUTHORIZED_USERS)? {
            let records: Vec<AuthorizedUserRecord> = serde_json::from_str(&raw)
                .map_err(|e| StorageError::serialization(KEY_AUTHORIZED_USERS, e))?;
            for record in &records {
                apply_user_record(record, &mut state);
            }
        }

        info!(users = state.occupied_users().count(), "Settings loaded");
        Ok(state)
    }

    /// Write every key.
    pub fn save(&mut self, state: &SettingsState) -> StorageResult<()> {
        self.save_unit_number(state)?;
        self.save_password(state)?;
        self.save_admin_number(state)?;
        self.save_relay_settings(state)?;
        self.save_authorized_users(state)?;
        info!("Settings saved");
        Ok(())
    }

    pub fn save_unit_number(&mut self, state: &SettingsState) -> StorageResult<()> {
        match state.unit_number() {
            Some(unit) => self.store.set(KEY_UNIT_NUMBER, unit.as_str()),
            None => self.store.remove(KEY_UNIT_NUMBER),
        }
    }

    pub fn save_password(&mut self, state: &SettingsState) -> StorageResult<()> {
        self.store.set(KEY_PASSWORD, state.password().as_str())
    }

    pub fn save_admin_number(&mut self, state: &SettingsState) -> StorageResult<()> {
        match state.admin_number() {
            Some(admin) => self.store.set(KEY_ADMIN_NUMBER, admin.as_str()),
            None => self.store.remove(KEY_ADMIN_NUMBER),
        }
    }

    pub fn save_relay_settings(&mut self, state: &SettingsState) -> StorageResult<()> {
        let json = serde_json::to_string(&RelaySettingsRecord::from(state))
            .map_err(|e| StorageError::serialization(KEY_RELAY_SETTINGS, e))?;
        self.store.set(KEY_RELAY_SETTINGS, &json)
    }

    /// Write the occupied slots only.
    pub fn save_authorized_users(&mut self, state: &SettingsState) -> StorageResult<()> {
        let records: Vec<AuthorizedUserRecord> = state
            .occupied_users()
            .map(AuthorizedUserRecord::from)
            .collect();
        let json = serde_json::to_string(&records)
            .map_err(|e| StorageError::serialization(KEY_AUTHORIZED_USERS, e))?;
        self.store.set(KEY_AUTHORIZED_USERS, &json)
    }
}

fn apply_relay_settings(record: &RelaySettingsRecord, state: &mut SettingsState) {
    match AccessControlMode::parse(&record.access_control) {
        Ok(mode) => state.set_access_control_mode(mode),
        Err(e) => warn!(key = KEY_RELAY_SETTINGS, error = %e, "Stored access mode invalid, using default"),
    }

    let stored = record.latch_time.trim();
    let latch_time = LatchTime::parse(stored);
    if !is_plain_latch_time(stored) {
        warn!(
            key = KEY_RELAY_SETTINGS,
            stored,
            latch_time = %latch_time,
            "Stored latch time is not a 1-3 digit value"
        );
    }
    state.set_latch_time(latch_time);
}

fn is_plain_latch_time(stored: &str) -> bool {
    (1..=LATCH_WIDTH).contains(&stored.len()) && stored.bytes().all(|b| b.is_ascii_digit())
}

fn apply_user_record(record: &AuthorizedUserRecord, state: &mut SettingsState) {
    let serial = match Serial::parse(&record.serial) {
        Ok(serial) => serial,
        Err(e) => {
            warn!(key = KEY_AUTHORIZED_USERS, error = %e, "Skipping stored user");
            return;
        }
    };

    if record.phone.trim().is_empty() {
        return;
    }
    let phone = match Phone::parse(&record.phone) {
        Ok(phone) => phone,
        Err(e) => {
            warn!(key = KEY_AUTHORIZED_USERS, serial = %serial, error = %e, "Skipping stored user");
            return;
        }
    };

    let window = match TimeWindow::from_parts(Some(&record.start_time), Some(&record.end_time)) {
        Ok(window) => window,
        Err(e) => {
            warn!(key = KEY_AUTHORIZED_USERS, serial = %serial, error = %e, "Dropping stored time window");
            None
        }
    };

    state.upsert_user(serial, phone, window);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rstest::rstest;

    fn repo_with(entries: &[(&str, &str)]) -> SettingsRepository<MemoryStore> {
        let mut store = MemoryStore::new();
        for (key, value) in entries {
            store.set(key, value).unwrap();
        }
        SettingsRepository::new(store)
    }

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let state = repo_with(&[]).load().unwrap();
        assert_eq!(state, SettingsState::default());
    }

    #[rstest]
    #[case("123")]
    #[case("12345")]
    #[case("")]
    fn test_load_invalid_password_uses_default(#[case] stored: &str) {
        let state = repo_with(&[(KEY_PASSWORD, stored)]).load().unwrap();
        assert_eq!(state.password().as_str(), "1234");
    }

    #[test]
    fn test_load_relay_settings() {
        let state = repo_with(&[(
            KEY_RELAY_SETTINGS,
            r#"{"accessControl":"ALL","latchTime":"030"}"#,
        )])
        .load()
        .unwrap();
        assert_eq!(state.access_control_mode(), AccessControlMode::All);
        assert_eq!(state.latch_time().as_secs(), 30);
    }

    #[test]
    fn test_load_invalid_mode_keeps_default() {
        let state = repo_with(&[(
            KEY_RELAY_SETTINGS,
            r#"{"accessControl":"any","latchTime":"2000"}"#,
        )])
        .load()
        .unwrap();
        assert_eq!(state.access_control_mode(), AccessControlMode::Authorized);
        assert!(state.latch_time().is_latched());
    }

    #[rstest]
    #[case("030", 30)]
    #[case(" 5 ", 5)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("-5", 0)]
    #[case("12s", 12)]
    #[case("2000", 999)]
    fn test_load_latch_time_leniently(#[case] stored: &str, #[case] secs: u16) {
        let json = format!(r#"{{"accessControl":"ALL","latchTime":"{stored}"}}"#);
        let state = repo_with(&[(KEY_RELAY_SETTINGS, &json)]).load().unwrap();
        assert_eq!(state.latch_time().as_secs(), secs);
    }

    #[rstest]
    #[case("030", true)]
    #[case("7", true)]
    #[case("999", true)]
    #[case("", false)]
    #[case("abc", false)]
    #[case("-5", false)]
    #[case("12s", false)]
    #[case("2000", false)]
    fn test_plain_latch_time(#[case] stored: &str, #[case] plain: bool) {
        assert_eq!(is_plain_latch_time(stored), plain);
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let err = repo_with(&[(KEY_AUTHORIZED_USERS, "not json")])
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Serialization { ref key, .. } if key == KEY_AUTHORIZED_USERS
        ));
    }

    #[test]
    fn test_load_users_skips_bad_records() {
        let users = r#"[
            {"serial":"001","phone":"111","startTime":"","endTime":""},
            {"serial":"000","phone":"222","startTime":"","endTime":""},
            {"serial":"003","phone":"","startTime":"","endTime":""},
            {"serial":"016","phone":"123456","startTime":"2408050800","endTime":""},
            {"serial":"020","phone":"789","startTime":"2408050800","endTime":"2409051000"}
        ]"#;
        let state = repo_with(&[(KEY_AUTHORIZED_USERS, users)]).load().unwrap();

        assert_eq!(state.occupied_users().count(), 3);
        assert!(state.user(Serial::new(3).unwrap()).is_empty());

        let partial = state.user(Serial::new(16).unwrap());
        assert_eq!(partial.phone.as_ref().unwrap().as_str(), "123456");
        assert!(partial.window.is_none());

        let windowed = state.user(Serial::new(20).unwrap());
        assert_eq!(windowed.window.as_ref().unwrap().end.as_str(), "2409051000");
    }

    #[test]
    fn test_save_then_load() {
        let mut state = SettingsState::default();
        state.set_unit_number(Phone::parse("+32470000000").unwrap());
        state.set_password(Password::parse("6666").unwrap());
        state.set_admin_number(AdminNumber::parse("0469843459").unwrap());
        state.set_access_control_mode(AccessControlMode::All);
        state.set_latch_time(LatchTime::new(999));
        state.upsert_user(
            Serial::new(16).unwrap(),
            Phone::parse("123456").unwrap(),
            TimeWindow::from_parts(Some("2408050800"), Some("2409051000")).unwrap(),
        );

        let mut repo = SettingsRepository::new(MemoryStore::new());
        repo.save(&state).unwrap();
        assert_eq!(repo.load().unwrap(), state);
    }

    #[test]
    fn test_save_writes_only_occupied_slots() {
        let mut state = SettingsState::default();
        state.upsert_user(Serial::new(2).unwrap(), Phone::parse("222").unwrap(), None);

        let mut repo = SettingsRepository::new(MemoryStore::new());
        repo.save_authorized_users(&state).unwrap();

        let raw = repo.store().get(KEY_AUTHORIZED_USERS).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"serial":"002","phone":"222","startTime":"","endTime":""}]"#
        );
    }

    #[test]
    fn test_save_removes_cleared_unit_number() {
        let mut repo = repo_with(&[(KEY_UNIT_NUMBER, "+32470000000")]);
        repo.save_unit_number(&SettingsState::default()).unwrap();
        assert_eq!(repo.store().get(KEY_UNIT_NUMBER).unwrap(), None);
    }
}
