//! In-memory stores owning the session's records and settings.

mod record_store;
mod settings_store;

pub use record_store::RecordStore;
pub use settings_store::SettingsStore;
