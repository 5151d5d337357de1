//! CSV support for the persisted match-record format.

pub mod codec;

pub use codec::{escape_field, parse, ParseError};
