//! On-disk shapes of the structured settings values.
//!
//! Fields are kept as plain strings so that one bad value can be replaced by
//! its default at load time instead of failing the whole record.

use gatelink_core::{AuthorizedUser, LatchTime, SettingsState};
use serde::{Deserialize, Serialize};

/// Value stored under `relaySettings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelaySettingsRecord {
    pub access_control: String,
    pub latch_time: String,
}

impl Default for RelaySettingsRecord {
    fn default() -> Self {
        RelaySettingsRecord {
            access_control: gatelink_core::AccessControlMode::default().as_str().to_string(),
            latch_time: LatchTime::default().to_string(),
        }
    }
}

impl From<&SettingsState> for RelaySettingsRecord {
    fn from(state: &SettingsState) -> Self {
        RelaySettingsRecord {
            access_control: state.access_control_mode().as_str().to_string(),
            latch_time: state.latch_time().to_string(),
        }
    }
}

/// One element of the `authorizedUsers` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorizedUserRecord {
    pub serial: String,
    pub phone: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&AuthorizedUser> for AuthorizedUserRecord {
    fn from(user: &AuthorizedUser) -> Self {
        let (start_time, end_time) = match &user.window {
            Some(window) => (window.start.to_string(), window.end.to_string()),
            None => (String::new(), String::new()),
        };

        AuthorizedUserRecord {
            serial: user.serial.to_string(),
            phone: user
                .phone
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
            start_time,
            end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatelink_core::{AccessControlMode, Phone, Serial, TimeWindow};

    #[test]
    fn test_relay_settings_json_shape() {
        let mut state = SettingsState::default();
        state.set_access_control_mode(AccessControlMode::All);
        state.set_latch_time(LatchTime::new(30));

        let json = serde_json::to_string(&RelaySettingsRecord::from(&state)).unwrap();
        assert_eq!(json, r#"{"accessControl":"ALL","latchTime":"030"}"#);
    }

    #[test]
    fn test_relay_settings_missing_fields_default() {
        let record: RelaySettingsRecord = serde_json::from_str(r#"{"latchTime":"5"}"#).unwrap();
        assert_eq!(record.access_control, "AUT");
        assert_eq!(record.latch_time, "5");
    }

    #[test]
    fn test_authorized_user_json_shape() {
        let mut user = AuthorizedUser::empty(Serial::new(16).unwrap());
        user.phone = Some(Phone::parse("123456").unwrap());
        user.window = TimeWindow::from_parts(Some("2408050800"), Some("2409051000")).unwrap();

        let json = serde_json::to_string(&AuthorizedUserRecord::from(&user)).unwrap();
        assert_eq!(
            json,
            r#"{"serial":"016","phone":"123456","startTime":"2408050800","endTime":"2409051000"}"#
        );
    }
}
