//! Externally supplied match schedule.
//!
//! The schedule blob arrives from a third-party source; this module only
//! parses it and answers "which team sits at this station in match N". The
//! entry count also defines the valid match-number range for the event.

use serde::{Deserialize, Serialize};

use crate::storage::store::{BlobStore, StorageError};

/// Storage key for the schedule blob.
pub const SCHEDULE_KEY: &str = "MatchSchedule.json";

/// One team's slot in a scheduled match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationAssignment {
    /// Station name in provider form, e.g. "Red1"
    pub station: String,
    /// Assigned team number
    pub team_number: u32,
}

/// One scheduled match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// Station assignments for the match
    #[serde(default)]
    pub teams: Vec<StationAssignment>,
}

/// The event's ordered match schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSchedule {
    #[serde(rename = "Schedule", default)]
    matches: Vec<ScheduledMatch>,
}

/// Map a station code ("R1".."B3") to the provider's station name.
pub fn api_station_name(code: &str) -> Option<&'static str> {
    match code {
        "R1" => Some("Red1"),
        "R2" => Some("Red2"),
        "R3" => Some("Red3"),
        "B1" => Some("Blue1"),
        "B2" => Some("Blue2"),
        "B3" => Some("Blue3"),
        _ => None,
    }
}

impl MatchSchedule {
    /// Load the schedule blob, `None` when missing or malformed.
    pub fn load<S: BlobStore>(store: &S) -> Option<Self> {
        let text = match store.read(SCHEDULE_KEY) {
            Ok(text) => text,
            Err(StorageError::NotFound(_)) => {
                tracing::info!("no match schedule saved");
                return None;
            }
            Err(e) => {
                tracing::warn!("failed to read match schedule: {e}");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(schedule) => Some(schedule),
            Err(e) => {
                tracing::warn!("match schedule is malformed: {e}");
                None
            }
        }
    }

    /// Number of scheduled matches; match numbers run `1..=len`.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the schedule has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Team assigned to a station in the given match, by station code.
    pub fn team_at(&self, match_number: u32, station_code: &str) -> Option<u32> {
        let station = api_station_name(station_code)?;
        let entry = self.matches.get(match_number.checked_sub(1)? as usize)?;
        entry
            .teams
            .iter()
            .find(|t| t.station == station)
            .map(|t| t.team_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    const SCHEDULE_JSON: &str = r#"{
        "Schedule": [
            {"teams": [
                {"station": "Red1", "teamNumber": 254},
                {"station": "Red2", "teamNumber": 118},
                {"station": "Blue1", "teamNumber": 1114}
            ]},
            {"teams": [
                {"station": "Red1", "teamNumber": 2056}
            ]}
        ]
    }"#;

    fn schedule() -> MatchSchedule {
        serde_json::from_str(SCHEDULE_JSON).unwrap()
    }

    #[test]
    fn test_len_defines_match_range() {
        assert_eq!(schedule().len(), 2);
    }

    #[test]
    fn test_team_at_maps_station_codes() {
        let s = schedule();
        assert_eq!(s.team_at(1, "R1"), Some(254));
        assert_eq!(s.team_at(1, "B1"), Some(1114));
        assert_eq!(s.team_at(2, "R1"), Some(2056));
    }

    #[test]
    fn test_team_at_missing_cases() {
        let s = schedule();
        // Station not assigned in the entry.
        assert_eq!(s.team_at(2, "B3"), None);
        // Match number out of range, including zero.
        assert_eq!(s.team_at(3, "R1"), None);
        assert_eq!(s.team_at(0, "R1"), None);
        // Unknown station code.
        assert_eq!(s.team_at(1, "X9"), None);
    }

    #[test]
    fn test_load_missing_or_malformed_is_none() {
        let mut store = MemoryStore::new();
        assert!(MatchSchedule::load(&store).is_none());
        store.write(SCHEDULE_KEY, "{broken").unwrap();
        assert!(MatchSchedule::load(&store).is_none());
        store.write(SCHEDULE_KEY, SCHEDULE_JSON).unwrap();
        assert_eq!(MatchSchedule::load(&store).unwrap().len(), 2);
    }
}
