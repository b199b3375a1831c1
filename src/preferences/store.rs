//! Persists the last submitted form values so the next launch can pre-fill the form.

use crate::preferences::error::PreferenceError;
use crate::types::form::FormInput;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const PREFERENCES_DIR_NAME: &str = "tempcast";
const PREFERENCES_FILE_NAME: &str = "last_input.bin";
const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// The last submitted form values, stored as typed text.
///
/// The record is a flat snapshot: every save replaces the whole file. The
/// default (all fields empty) stands for "nothing saved yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub forecast_days: String,
    pub api_key: String,
}

impl From<&FormInput> for PreferenceRecord {
    fn from(input: &FormInput) -> Self {
        Self {
            city: input.city.clone(),
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
            forecast_days: input.forecast_days.clone(),
            api_key: input.api_key.clone(),
        }
    }
}

impl From<PreferenceRecord> for FormInput {
    fn from(record: PreferenceRecord) -> Self {
        Self {
            city: record.city,
            start_date: record.start_date,
            end_date: record.end_date,
            forecast_days: record.forecast_days,
            api_key: record.api_key,
        }
    }
}

/// Reads and writes a [`PreferenceRecord`] at a fixed path.
///
/// # Examples
///
/// ```no_run
/// use tempcast::{PreferenceRecord, PreferenceStore};
///
/// # fn main() -> Result<(), tempcast::PreferenceError> {
/// let store = PreferenceStore::open_default()?;
/// let mut record = store.load();
/// record.city = "Astana".to_string();
/// store.save(&record)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at `<config dir>/tempcast/last_input.bin`, e.g.
    /// `~/.config/tempcast/last_input.bin` on Linux.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ConfigDirResolution`] if the platform has no
    /// config directory.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let dir = dirs::config_dir().ok_or(PreferenceError::ConfigDirResolution)?;
        Ok(Self::new(
            dir.join(PREFERENCES_DIR_NAME).join(PREFERENCES_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with `record`.
    ///
    /// The bytes go to a temporary file next to the target which is then
    /// renamed over it, so readers see either the old or the new record.
    /// Missing parent directories are created.
    pub fn save(&self, record: &PreferenceRecord) -> Result<(), PreferenceError> {
        let bytes = bincode::serde::encode_to_vec(record, BINCODE_CONFIG)
            .map_err(|e| PreferenceError::Encode(Box::new(e)))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| PreferenceError::DirCreation(dir.to_path_buf(), e))?;

        let mut temp_file =
            NamedTempFile::new_in(dir).map_err(|e| PreferenceError::Write(self.path.clone(), e))?;
        temp_file
            .write_all(&bytes)
            .and_then(|_| temp_file.flush())
            .map_err(|e| PreferenceError::Write(self.path.clone(), e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| PreferenceError::Write(self.path.clone(), e.error))?;

        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    /// Same as [`save`](Self::save), run on the blocking thread pool.
    pub async fn save_async(&self, record: PreferenceRecord) -> Result<(), PreferenceError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(&record)).await?
    }

    /// Returns the saved record, or the empty default when nothing usable is stored.
    ///
    /// A missing file is the normal first-launch case. A file that cannot be
    /// read or decoded is logged and treated the same way.
    pub fn load(&self) -> PreferenceRecord {
        match self.try_load() {
            Ok(Some(record)) => record,
            Ok(None) => PreferenceRecord::default(),
            Err(e) => {
                warn!("Ignoring unusable preferences: {}", e);
                PreferenceRecord::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<PreferenceRecord>, PreferenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PreferenceError::Read(self.path.clone(), e)),
        };
        let (record, _) =
            bincode::serde::decode_from_slice::<PreferenceRecord, _>(&bytes, BINCODE_CONFIG)
                .map_err(|e| PreferenceError::Decode(self.path.clone(), Box::new(e)))?;
        Ok(Some(record))
    }
}
