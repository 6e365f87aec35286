//! Durable key-value persistence for pet and day records.

pub mod file;

pub use file::FileStore;

use crate::constants::{DATE_KEY_FORMAT, PET_RECORD_KEY};
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Identifies one persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// The single pet/wallet record.
    Pet,
    /// The ledger entry for one calendar day.
    Day(NaiveDate),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Pet => f.write_str(PET_RECORD_KEY),
            RecordKey::Day(date) => write!(f, "{}", date.format(DATE_KEY_FORMAT)),
        }
    }
}

/// Storage boundary for records. Implementations own the namespace and
/// must create it on first use.
pub trait LedgerStore: Send + Sync {
    fn exists(&self, key: &RecordKey) -> bool;
    fn read(&self, key: &RecordKey) -> Result<Vec<u8>>;
    fn write(&self, key: &RecordKey, bytes: &[u8]) -> Result<()>;
}

/// Load a record, treating a missing or malformed one as absent.
pub fn load_record<T: DeserializeOwned>(store: &dyn LedgerStore, key: &RecordKey) -> Result<Option<T>> {
    if !store.exists(key) {
        return Ok(None);
    }

    let bytes = store.read(key)?;
    match serde_json::from_slice(&bytes) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!("Record '{key}' is malformed, treating as absent: {e}");
            Ok(None)
        }
    }
}

/// Serialize a record as pretty JSON and write it under `key`.
pub fn save_record<T: Serialize>(store: &dyn LedgerStore, key: &RecordKey, record: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(record).map_err(|source| AppError::Json {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &bytes)?;
    debug!("Saved record '{key}' ({} bytes)", bytes.len());
    Ok(())
}
