//! The parsed match record and its wire form.

use thiserror::Error;

use crate::csv::codec::{escape_field, parse, ParseError};
use crate::record::schema::{self, Field, SchemaError, SchemaVersion};

/// Errors raised when a stored row cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The text does not match the record grammar
    #[error("malformed CSV row: {0}")]
    Parse(#[from] ParseError),

    /// The field count matches no known layout
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// One match record: the parsed field values plus the layout they follow.
///
/// Field values are held unescaped; [`MatchRecord::to_csv`] re-applies the
/// escaping convention to the free-text positions. Everything the app writes
/// into non-text positions is comma-free, so those round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Positional field values, unescaped
    pub fields: Vec<String>,
    /// The layout detected from the field count
    pub version: SchemaVersion,
}

impl MatchRecord {
    /// Parse a stored row and detect its schema version.
    pub fn from_csv(text: &str) -> Result<Self, RecordError> {
        let fields = parse(text)?;
        let version = SchemaVersion::detect(fields.len())?;
        Ok(Self { fields, version })
    }

    /// Serialize back to one CSV row.
    pub fn to_csv(&self) -> String {
        let comment_idx = self.version.index_of(Field::Comment);
        let questions_idx = self.version.index_of(Field::Questions);

        self.fields
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if Some(i) == comment_idx || Some(i) == questions_idx {
                    escape_field(Some(value))
                } else {
                    value.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Read a logical field, defaulting when absent in this version.
    pub fn get(&self, field: Field) -> String {
        schema::read_field(&self.fields, field, self.version)
    }

    /// Read a counter field, defaulting to 0.
    pub fn counter(&self, field: Field) -> u32 {
        schema::read_counter(&self.fields, field, self.version)
    }

    /// Overwrite a logical field with an unescaped value.
    pub fn set(&mut self, field: Field, value: String) -> Result<(), SchemaError> {
        schema::write_field(&mut self.fields, field, value, self.version)
    }

    /// Append the comparison suffix and switch to the compared layout.
    pub fn append_comparison(
        &mut self,
        current_team: &str,
        previous_team: &str,
        result: &str,
    ) -> Result<(), SchemaError> {
        schema::append_comparison(&mut self.fields, current_team, previous_team, result)?;
        self.version = SchemaVersion::V2WithComparison;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_detects_version() {
        let record = MatchRecord::from_csv("254,3,254-R3,R1,R,Ann,\"\"").unwrap();
        assert_eq!(record.version, SchemaVersion::V2);
        assert_eq!(record.fields.len(), 7);
        assert_eq!(record.get(Field::TmaKey), "254-R3");
    }

    #[test]
    fn test_from_csv_rejects_bad_count() {
        assert!(matches!(
            MatchRecord::from_csv("a,b,c"),
            Err(RecordError::Schema(SchemaError::UnrecognizedFieldCount(3)))
        ));
    }

    #[test]
    fn test_to_csv_escapes_text_positions() {
        let mut record = MatchRecord::from_csv("254,3,254-R3,R1,R,Ann,\"\"").unwrap();
        record.fields[6] = "slow, then fast".to_string();
        let row = record.to_csv();
        assert_eq!(row, "254,3,254-R3,R1,R,Ann,\"slow, then fast\"");
        // And it parses back to the same values.
        assert_eq!(MatchRecord::from_csv(&row).unwrap().fields, record.fields);
    }

    #[test]
    fn test_to_csv_is_idempotent() {
        let text = "254,3,254-R3,R1,R,Ann,\"\",2,0,5,1,\"\"";
        let record = MatchRecord::from_csv(text).unwrap();
        assert_eq!(record.to_csv(), text);
    }

    #[test]
    fn test_comparison_append_switches_version() {
        let mut record =
            MatchRecord::from_csv("254,3,254-R3,R1,R,Ann,\"\",2,0,5,1,\"\"").unwrap();
        record.append_comparison("254", "118", "1").unwrap();
        assert_eq!(record.version, SchemaVersion::V2WithComparison);
        assert!(record.to_csv().ends_with(",254,118,1"));
    }
}
