//! Storage module: blob store, settings, schedule and scout history.

pub mod history;
pub mod schedule;
pub mod settings;
pub mod store;

pub use history::ScoutHistory;
pub use schedule::MatchSchedule;
pub use settings::ScoutSettings;
pub use store::{clear_all_records, record_key, BlobStore, FileStore, MemoryStore, StorageError};
