//! Scout history blob, written when a comparison completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::store::{BlobStore, StorageError};

/// Storage key for the scout history blob.
pub const HISTORY_KEY: &str = "scoutHistory.json";

/// The most recent completed comparison, per device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutHistory {
    /// Scout who submitted the record
    pub scout_name: String,
    /// Team the record was about
    pub team_number: u32,
    /// When the comparison completed
    pub timestamp: DateTime<Utc>,
}

impl ScoutHistory {
    /// Build an entry stamped with the current time.
    pub fn new(scout_name: impl Into<String>, team_number: u32) -> Self {
        Self {
            scout_name: scout_name.into(),
            team_number,
            timestamp: Utc::now(),
        }
    }

    /// Persist the entry, replacing any previous one.
    pub fn save<S: BlobStore>(&self, store: &mut S) -> Result<(), StorageError> {
        let text = serde_json::to_string(self)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        store.write(HISTORY_KEY, &text)
    }

    /// Load the last entry, `None` when missing or malformed.
    pub fn load<S: BlobStore>(store: &S) -> Option<Self> {
        let text = store.read(HISTORY_KEY).ok()?;
        match serde_json::from_str(&text) {
            Ok(history) => Some(history),
            Err(e) => {
                tracing::warn!("scout history is malformed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        assert!(ScoutHistory::load(&store).is_none());

        let entry = ScoutHistory::new("Ann", 254);
        entry.save(&mut store).unwrap();

        let loaded = ScoutHistory::load(&store).unwrap();
        assert_eq!(loaded, entry);
    }
}
