//! Device settings blob.
//!
//! Stored as `ScoutingAppSettings.json` with the `{"Settings": {...}}` wrapper
//! already present in files written by earlier builds, so the wire shape is
//! kept as-is.

use serde::{Deserialize, Serialize};

use crate::storage::store::{BlobStore, StorageError};

/// Storage key for the settings blob.
pub const SETTINGS_KEY: &str = "ScoutingAppSettings.json";

/// Device-level scouting settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoutSettings {
    /// Name recorded into every row this device produces
    pub scout_name: String,
    /// Station code such as "R1" or "B3"
    pub driver_station: String,
    /// Practice mode: team number entered by hand, no schedule lookup
    pub is_practice_mode: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Settings", default)]
    settings: ScoutSettings,
}

impl ScoutSettings {
    /// Load settings, falling back to defaults when the blob is missing or
    /// unreadable.
    pub fn load<S: BlobStore>(store: &S) -> Self {
        let text = match store.read(SETTINGS_KEY) {
            Ok(text) => text,
            Err(StorageError::NotFound(_)) => {
                tracing::info!("no settings file saved");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("failed to read settings: {e}");
                return Self::default();
            }
        };

        match serde_json::from_str::<SettingsFile>(&text) {
            Ok(file) => file.settings,
            Err(e) => {
                tracing::warn!("settings file is malformed: {e}");
                Self::default()
            }
        }
    }

    /// Persist the settings as a whole object.
    pub fn save<S: BlobStore>(&self, store: &mut S) -> Result<(), StorageError> {
        let file = SettingsFile {
            settings: self.clone(),
        };
        let text = serde_json::to_string_pretty(&file)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        store.write(SETTINGS_KEY, &text)
    }

    /// The alliance character derived from the driver station.
    pub fn alliance(&self) -> Option<char> {
        self.driver_station.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_missing_blob_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(ScoutSettings::load(&store), ScoutSettings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MemoryStore::new();
        let settings = ScoutSettings {
            scout_name: "Ann".to_string(),
            driver_station: "R1".to_string(),
            is_practice_mode: true,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(ScoutSettings::load(&store), settings);
    }

    #[test]
    fn test_wire_shape_matches_existing_files() {
        let mut store = MemoryStore::new();
        store
            .write(
                SETTINGS_KEY,
                r#"{"Settings": {"scoutName": "Ann", "driverStation": "B2", "isPracticeMode": false}}"#,
            )
            .unwrap();
        let settings = ScoutSettings::load(&store);
        assert_eq!(settings.scout_name, "Ann");
        assert_eq!(settings.driver_station, "B2");
        assert_eq!(settings.alliance(), Some('B'));
    }

    #[test]
    fn test_malformed_blob_loads_defaults() {
        let mut store = MemoryStore::new();
        store.write(SETTINGS_KEY, "not json").unwrap();
        assert_eq!(ScoutSettings::load(&store), ScoutSettings::default());
    }
}
