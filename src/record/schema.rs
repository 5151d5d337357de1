//! Positional field layout per schema version.
//!
//! Stored rows carry no version tag; the field count is the only version
//! signal. Version detection and the logical-name-to-index maps live here so
//! nothing else in the crate hardcodes a column position.

use thiserror::Error;

/// Column headers for the current (v2) layout, in storage order.
pub const V2_HEADERS: [&str; 12] = [
    "Team Number",
    "Match Number",
    "TMA Key",
    "Driver Station",
    "Alliance",
    "Scout Name",
    "Comments",
    "Auto Fuel Scored",
    "Auto Passes",
    "TeleOp Fuel Scored",
    "TeleOp Passes",
    "Questions/Clarifications",
];

/// Column headers for the legacy (v1) layout.
pub const V1_HEADERS: [&str; 10] = [
    "Team Number",
    "Match Number",
    "TMA Key",
    "Driver Station",
    "Alliance",
    "Scout Name",
    "Comments",
    "Auto Fuel Scored",
    "TeleOp Fuel Scored",
    "Questions/Clarifications",
];

/// Headers for the optional comparison suffix.
pub const COMPARISON_HEADERS: [&str; 3] = [
    "Comparison Current Team",
    "Comparison Previous Team",
    "Comparison Result",
];

/// Number of fields a pregame row carries.
pub const PREGAME_FIELD_COUNT: usize = 7;

/// Number of fields a full v2 scoring row carries.
pub const V2_FIELD_COUNT: usize = 12;

/// Number of fields once the comparison suffix is appended.
pub const COMPARED_FIELD_COUNT: usize = 15;

/// Schema errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field count matches no known layout
    #[error("unrecognized field count: {0}")]
    UnrecognizedFieldCount(usize),

    /// Logical field does not exist in the detected version
    #[error("field {0:?} is absent in this schema version")]
    FieldAbsent(Field),

    /// Comparison suffix can only extend a complete v2 row
    #[error("comparison requires a 12-field row, got {0}")]
    InvalidComparisonBase(usize),
}

/// Logical fields of a match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TeamNumber,
    MatchNumber,
    TmaKey,
    DriverStation,
    Alliance,
    ScoutName,
    Comment,
    AutoFuel,
    AutoPasses,
    TeleopFuel,
    TeleopPasses,
    Questions,
    ComparisonCurrentTeam,
    ComparisonPreviousTeam,
    ComparisonResult,
}

impl Field {
    /// Whether the field holds a non-negative counter.
    pub fn is_counter(self) -> bool {
        matches!(
            self,
            Field::AutoFuel | Field::AutoPasses | Field::TeleopFuel | Field::TeleopPasses
        )
    }

    /// Whether the field holds free text that must be escaped when written.
    pub fn is_text(self) -> bool {
        matches!(self, Field::Comment | Field::Questions)
    }
}

/// The positional layout a stored row follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Legacy layout: fuel counters only, questions at index 9
    V1,
    /// Current layout, with or without the scoring fields present
    V2,
    /// Current layout plus the three-field comparison suffix
    V2WithComparison,
}

impl SchemaVersion {
    /// Detect the version of a row from its field count.
    ///
    /// 7 fields is a pregame-only v2 row; 9 or 10 is legacy v1; 11 or 12 is
    /// v2; 15 and up carries the comparison suffix. Anything else is
    /// malformed.
    pub fn detect(field_count: usize) -> Result<Self, SchemaError> {
        match field_count {
            PREGAME_FIELD_COUNT => Ok(SchemaVersion::V2),
            9 | 10 => Ok(SchemaVersion::V1),
            11 | 12 => Ok(SchemaVersion::V2),
            n if n >= COMPARED_FIELD_COUNT => Ok(SchemaVersion::V2WithComparison),
            n => Err(SchemaError::UnrecognizedFieldCount(n)),
        }
    }

    /// Position of a logical field in this version, if it exists.
    pub fn index_of(self, field: Field) -> Option<usize> {
        match field {
            Field::TeamNumber => Some(0),
            Field::MatchNumber => Some(1),
            Field::TmaKey => Some(2),
            Field::DriverStation => Some(3),
            Field::Alliance => Some(4),
            Field::ScoutName => Some(5),
            Field::Comment => Some(6),
            Field::AutoFuel => Some(7),
            Field::AutoPasses => match self {
                SchemaVersion::V1 => None,
                _ => Some(8),
            },
            Field::TeleopFuel => match self {
                SchemaVersion::V1 => Some(8),
                _ => Some(9),
            },
            Field::TeleopPasses => match self {
                SchemaVersion::V1 => None,
                _ => Some(10),
            },
            Field::Questions => match self {
                SchemaVersion::V1 => Some(9),
                _ => Some(11),
            },
            Field::ComparisonCurrentTeam => match self {
                SchemaVersion::V2WithComparison => Some(12),
                _ => None,
            },
            Field::ComparisonPreviousTeam => match self {
                SchemaVersion::V2WithComparison => Some(13),
                _ => None,
            },
            Field::ComparisonResult => match self {
                SchemaVersion::V2WithComparison => Some(14),
                _ => None,
            },
        }
    }

    /// Display headers for this version, in storage order.
    pub fn headers(self) -> Vec<&'static str> {
        match self {
            SchemaVersion::V1 => V1_HEADERS.to_vec(),
            SchemaVersion::V2 => V2_HEADERS.to_vec(),
            SchemaVersion::V2WithComparison => {
                let mut headers = V2_HEADERS.to_vec();
                headers.extend_from_slice(&COMPARISON_HEADERS);
                headers
            }
        }
    }
}

/// Read a logical field, with a defined default when it is absent.
///
/// Text fields default to the empty string, counters to `"0"`. This is what
/// lets the current schema open rows written by older builds.
pub fn read_field(row: &[String], field: Field, version: SchemaVersion) -> String {
    version
        .index_of(field)
        .and_then(|i| row.get(i).cloned())
        .unwrap_or_else(|| {
            if field.is_counter() {
                "0".to_string()
            } else {
                String::new()
            }
        })
}

/// Read a counter field as an integer, defaulting to 0 when absent or
/// unparseable.
pub fn read_counter(row: &[String], field: Field, version: SchemaVersion) -> u32 {
    read_field(row, field, version).trim().parse().unwrap_or(0)
}

/// Overwrite a logical field in place. Never changes the row length.
pub fn write_field(
    row: &mut [String],
    field: Field,
    value: String,
    version: SchemaVersion,
) -> Result<(), SchemaError> {
    let index = version
        .index_of(field)
        .filter(|&i| i < row.len())
        .ok_or(SchemaError::FieldAbsent(field))?;
    row[index] = value;
    Ok(())
}

/// Extend a complete v2 row with the comparison suffix.
///
/// The only write that changes a row's length: exactly-12 fields become 15 by
/// concatenation, with the first 12 untouched.
pub fn append_comparison(
    row: &mut Vec<String>,
    current_team: &str,
    previous_team: &str,
    result: &str,
) -> Result<(), SchemaError> {
    if row.len() != V2_FIELD_COUNT {
        return Err(SchemaError::InvalidComparisonBase(row.len()));
    }
    row.push(current_team.to_string());
    row.push(previous_team.to_string());
    row.push(result.to_string());
    Ok(())
}
