//! In-memory configuration of one relay unit.
//!
//! [`SettingsState`] is the single owned source of truth the front-end
//! mutates and the command builder reads. Mutations here are local
//! bookkeeping only: they do not mean the relay accepted anything.

use crate::types::{
    AccessControlMode, AdminNumber, AuthorizedUser, LatchTime, Password, Phone, Serial, TimeWindow,
};
use tracing::info;

/// Configuration of a relay unit plus its 200-slot authorized user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    unit_number: Option<Phone>,
    password: Password,
    admin_number: Option<AdminNumber>,
    access_mode: AccessControlMode,
    latch_time: LatchTime,
    users: Vec<AuthorizedUser>,
}

impl Default for SettingsState {
    fn default() -> Self {
        SettingsState {
            unit_number: None,
            password: Password::default(),
            admin_number: None,
            access_mode: AccessControlMode::default(),
            latch_time: LatchTime::default(),
            users: Serial::all().map(AuthorizedUser::empty).collect(),
        }
    }
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phone number of the relay's SIM card; destination of every command.
    pub fn unit_number(&self) -> Option<&Phone> {
        self.unit_number.as_ref()
    }

    /// Password used as the prefix of the next command.
    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn admin_number(&self) -> Option<&AdminNumber> {
        self.admin_number.as_ref()
    }

    pub fn access_control_mode(&self) -> AccessControlMode {
        self.access_mode
    }

    pub fn latch_time(&self) -> LatchTime {
        self.latch_time
    }

    /// Slot for `serial`. Always present, possibly empty.
    pub fn user(&self, serial: Serial) -> &AuthorizedUser {
        &self.users[serial.index()]
    }

    /// All 200 slots ordered by serial.
    pub fn users(&self) -> &[AuthorizedUser] {
        &self.users
    }

    /// Slots that currently hold a phone number.
    pub fn occupied_users(&self) -> impl Iterator<Item = &AuthorizedUser> {
        self.users.iter().filter(|user| !user.is_empty())
    }

    pub fn set_unit_number(&mut self, unit_number: Phone) {
        info!(unit_number = %unit_number, "Unit number updated");
        self.unit_number = Some(unit_number);
    }

    pub fn set_password(&mut self, password: Password) {
        info!("Password updated");
        self.password = password;
    }

    pub fn set_admin_number(&mut self, admin_number: AdminNumber) {
        info!(admin_number = %admin_number, "Admin number updated");
        self.admin_number = Some(admin_number);
    }

    pub fn set_access_control_mode(&mut self, mode: AccessControlMode) {
        info!(mode = %mode, "Access control mode updated");
        self.access_mode = mode;
    }

    pub fn set_latch_time(&mut self, latch_time: LatchTime) {
        info!(latch_time = %latch_time, "Latch time updated");
        self.latch_time = latch_time;
    }

    /// Store `phone` (and optionally a time window) in the slot for `serial`.
    pub fn upsert_user(&mut self, serial: Serial, phone: Phone, window: Option<TimeWindow>) {
        info!(serial = %serial, windowed = window.is_some(), "Authorized user stored");
        let slot = &mut self.users[serial.index()];
        slot.phone = Some(phone);
        slot.window = window;
    }

    /// Empty the slot for `serial`, keeping the slot itself.
    pub fn clear_user(&mut self, serial: Serial) {
        info!(serial = %serial, "Authorized user cleared");
        self.users[serial.index()].clear();
    }
}
