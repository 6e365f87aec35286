use crate::constants::{DAY_RECORDS_DIR, RECORD_EXTENSION};
use crate::error::{AppError, Result};
use crate::store::{LedgerStore, RecordKey};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON files under a data directory: `PetSave.json` at the root and one
/// `Date Records/<MM-DD-YYYY>.json` per day.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory layout if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let days = root.join(DAY_RECORDS_DIR);
        fs::create_dir_all(&days).map_err(|e| AppError::io(&days, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &RecordKey) -> PathBuf {
        let file_name = format!("{key}.{RECORD_EXTENSION}");
        match key {
            RecordKey::Pet => self.root.join(file_name),
            RecordKey::Day(_) => self.root.join(DAY_RECORDS_DIR).join(file_name),
        }
    }
}

impl LedgerStore for FileStore {
    fn exists(&self, key: &RecordKey) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &RecordKey) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        fs::read(&path).map_err(|e| AppError::io(path, e))
    }

    fn write(&self, key: &RecordKey, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| AppError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_layout() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Study Buddy Saves");

        let store = FileStore::open(&root).unwrap();

        assert!(root.join("Date Records").is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_paths_for_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert_eq!(store.path_for(&RecordKey::Pet), dir.path().join("PetSave.json"));
        assert_eq!(
            store.path_for(&RecordKey::Day(date)),
            dir.path().join("Date Records").join("10-19-2026.json")
        );
    }

    #[test]
    fn test_write_read_exists() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(!store.exists(&RecordKey::Pet));
        store.write(&RecordKey::Pet, b"{}").unwrap();

        assert!(store.exists(&RecordKey::Pet));
        assert_eq!(store.read(&RecordKey::Pet).unwrap(), b"{}".to_vec());
    }

    #[test]
    fn test_write_recreates_removed_directory() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::remove_dir_all(dir.path().join("Date Records")).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        store.write(&RecordKey::Day(date), b"{}").unwrap();
        assert!(store.exists(&RecordKey::Day(date)));
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let err = store.read(&RecordKey::Pet).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
