//! Local persistence for relay settings.
//!
//! Settings are kept under five string keys, the same ones the mobile app
//! used, so a store written by one front-end can be read by another:
//!
//! | Key | Value |
//! |-----|-------|
//! | `unitNumber` | plain string |
//! | `password` | plain string |
//! | `adminNumber` | plain string |
//! | `relaySettings` | `{"accessControl":"AUT","latchTime":"000"}` |
//! | `authorizedUsers` | `[{"serial":"001","phone":"","startTime":"","endTime":""}]` |
//!
//! # Examples
//!
//! ```no_run
//! use gatelink_storage::{FileStore, SettingsRepository, StoreConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open(StoreConfig::new("gatelink.json"))?;
//! let mut repo = SettingsRepository::new(store);
//!
//! let state = repo.load()?;
//! println!("Password prefix: {}", state.password());
//! repo.save(&state)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod records;
pub mod repository;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use records::{AuthorizedUserRecord, RelaySettingsRecord};
pub use repository::SettingsRepository;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreConfig};
