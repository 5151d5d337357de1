//! Human-readable expansion of a record for the handoff screen.

use crate::export::ExportError;
use crate::record::types::MatchRecord;

/// Pair each field of the row with its display header.
///
/// Headers follow the detected schema version. Absent or empty values show as
/// `-`.
pub fn record_table(csv: &str) -> Result<Vec<(String, String)>, ExportError> {
    let record =
        MatchRecord::from_csv(csv).map_err(|e| ExportError::MalformedRecord(e.to_string()))?;

    let table = record
        .version
        .headers()
        .into_iter()
        .enumerate()
        .map(|(i, header)| {
            let value = record
                .fields
                .get(i)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            (header.to_string(), value)
        })
        .collect();

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_for_full_v2_row() {
        let table = record_table("254,3,254-R3,R1,R,Ann,\"good auto\",2,0,5,1,\"\"").unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table[0], ("Team Number".to_string(), "254".to_string()));
        assert_eq!(table[6], ("Comments".to_string(), "good auto".to_string()));
        // Empty questions field shows a placeholder.
        assert_eq!(
            table[11],
            ("Questions/Clarifications".to_string(), "-".to_string())
        );
    }

    #[test]
    fn test_table_for_pregame_row_pads_missing_fields() {
        let table = record_table("254,3,254-R3,R1,R,Ann,\"\"").unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table[7], ("Auto Fuel Scored".to_string(), "-".to_string()));
    }

    #[test]
    fn test_table_for_compared_row() {
        let table =
            record_table("254,3,254-R3,R1,R,Ann,\"\",2,0,5,1,\"\",254,118,skipped").unwrap();
        assert_eq!(table.len(), 15);
        assert_eq!(
            table[14],
            ("Comparison Result".to_string(), "skipped".to_string())
        );
    }

    #[test]
    fn test_table_rejects_malformed_row() {
        assert!(record_table("a,b,c").is_err());
    }
}
