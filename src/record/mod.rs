//! Match record schema and row access.

pub mod schema;
pub mod types;

pub use schema::{Field, SchemaError, SchemaVersion};
pub use types::{MatchRecord, RecordError};
