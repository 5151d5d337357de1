//! FieldScout - FRC Match Scouting Core
//!
//! Per-match performance records persisted as versioned CSV rows, with a
//! pregame/scoring/comparison lifecycle and QR-encoded handoff between
//! devices. There is no server: everything lives in a local key-addressed
//! blob store.

pub mod csv;
pub mod export;
pub mod lifecycle;
pub mod record;
pub mod storage;

// Re-export commonly used types
pub use export::ExportView;
pub use lifecycle::engine::MatchEngine;
pub use lifecycle::types::{ComparisonOutcome, Counter, PregameInput, Stage};
pub use record::schema::SchemaVersion;
pub use record::types::MatchRecord;
pub use storage::schedule::MatchSchedule;
pub use storage::settings::ScoutSettings;
pub use storage::store::{BlobStore, FileStore, MemoryStore};
