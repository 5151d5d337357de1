//! Key-addressed blob store backing all persisted data.
//!
//! Per-match records are stored as `match{N}.csv` blobs alongside the
//! settings, schedule and history blobs. The trait keeps the lifecycle
//! testable against an in-memory map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No blob stored under the key
    #[error("no stored blob named {0}")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable data directory on this platform
    #[error("no usable data directory")]
    NoDataDir,

    /// Blob could not be serialized
    #[error("blob serialization failed: {0}")]
    Serialize(String),
}

/// A flat, key-addressed text blob store.
pub trait BlobStore {
    /// Whether a blob exists under the key.
    fn exists(&self, key: &str) -> bool;

    /// Read a blob, failing with [`StorageError::NotFound`] when absent.
    fn read(&self, key: &str) -> Result<String, StorageError>;

    /// Write (create or replace) a blob.
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError>;

    /// List the keys starting with the prefix.
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Delete a blob, failing with [`StorageError::NotFound`] when absent.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage key for a match record.
pub fn record_key(match_number: u32) -> String {
    format!("match{match_number}.csv")
}

/// Delete every stored match record, returning how many were removed.
pub fn clear_all_records<S: BlobStore>(store: &mut S) -> Result<usize, StorageError> {
    let keys = store.list("match")?;
    let mut removed = 0;

    for key in keys.into_iter().filter(|k| k.ends_with(".csv")) {
        store.delete(&key)?;
        removed += 1;
    }

    tracing::info!(removed, "cleared match records");
    Ok(removed)
}

/// Blob store over a flat directory of files.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "fieldscout", "FieldScout")
            .ok_or(StorageError::NoDataDir)?;
        Self::new(dirs.data_dir())
    }

    /// The directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl BlobStore for FileStore {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &str) -> Result<String, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), contents)?;
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory blob store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn exists(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    fn read(&self, key: &str) -> Result<String, StorageError> {
        self.blobs
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .blobs
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.blobs
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_format() {
        assert_eq!(record_key(3), "match3.csv");
        assert_eq!(record_key(42), "match42.csv");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(!store.exists("match1.csv"));
        assert!(matches!(
            store.read("match1.csv"),
            Err(StorageError::NotFound(_))
        ));

        store.write("match1.csv", "a,b,c").unwrap();
        assert!(store.exists("match1.csv"));
        assert_eq!(store.read("match1.csv").unwrap(), "a,b,c");

        store.delete("match1.csv").unwrap();
        assert!(!store.exists("match1.csv"));
    }

    #[test]
    fn test_clear_all_records_only_touches_match_csvs() {
        let mut store = MemoryStore::new();
        store.write("match1.csv", "x").unwrap();
        store.write("match2.csv", "y").unwrap();
        store.write("matchnotes.txt", "keep").unwrap();
        store.write("ScoutingAppSettings.json", "{}").unwrap();

        let removed = clear_all_records(&mut store).unwrap();
        assert_eq!(removed, 2);
        assert!(!store.exists("match1.csv"));
        assert!(store.exists("matchnotes.txt"));
        assert!(store.exists("ScoutingAppSettings.json"));
    }
}
