//! Filesystem-backed platform stores.
//!
//! The hosting platform materializes job storage as plain directories when
//! running locally: named JSON records under `key_value_stores/<store>` and
//! zero-padded, append-only items under `datasets/<store>`. The runner
//! reads its input and publishes its results through this layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::RunError;

/// Store name the platform uses when none is assigned.
pub const DEFAULT_STORE: &str = "default";

/// Key-value record holding the job input.
pub const INPUT_KEY: &str = "INPUT";

/// Key-value record holding the run's primary output artifact.
pub const OUTPUT_KEY: &str = "OUTPUT";

/// Named JSON records for one store.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Open the default key-value store under `storage_root`.
    pub fn open_default(storage_root: &Path) -> Self {
        Self {
            dir: storage_root.join("key_value_stores").join(DEFAULT_STORE),
        }
    }

    /// Path of the record file for `key`.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Persist `value` under `key` as pretty-printed JSON, overwriting any
    /// previous record.
    pub fn set_value<T: Serialize>(&self, key: &str, value: &T) -> Result<(), RunError> {
        let path = self.record_path(key);
        fs::create_dir_all(&self.dir).map_err(|err| publish_error(&self.dir, err))?;
        let content = to_pretty_json(value, &path)?;
        fs::write(&path, content).map_err(|err| publish_error(&path, err))
    }
}

/// Append-only sequence of structured records for one store.
#[derive(Debug, Clone)]
pub struct Dataset {
    dir: PathBuf,
}

impl Dataset {
    /// Open the default dataset under `storage_root`.
    pub fn open_default(storage_root: &Path) -> Self {
        Self {
            dir: storage_root.join("datasets").join(DEFAULT_STORE),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append every item as its own numbered JSON file, continuing after
    /// whatever the dataset already holds.
    pub fn push_all<T: Serialize>(&self, items: &[T]) -> Result<(), RunError> {
        fs::create_dir_all(&self.dir).map_err(|err| publish_error(&self.dir, err))?;

        let mut index = self.next_index()?;
        for item in items {
            let path = self.dir.join(format!("{index:09}.json"));
            let content = to_pretty_json(item, &path)?;
            fs::write(&path, content).map_err(|err| publish_error(&path, err))?;
            index += 1;
        }
        Ok(())
    }

    /// 1-based index the next pushed item receives. Non-numeric file names
    /// in the dataset directory are ignored.
    fn next_index(&self) -> Result<u64, RunError> {
        let mut highest = 0u64;
        let entries = fs::read_dir(&self.dir).map_err(|err| publish_error(&self.dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| publish_error(&self.dir, err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(index) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                highest = highest.max(index);
            }
        }
        Ok(highest + 1)
    }
}

fn to_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<String, RunError> {
    let content = serde_json::to_string_pretty(value).map_err(|err| RunError::Publish {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Ok(format!("{content}\n"))
}

fn publish_error(path: &Path, source: io::Error) -> RunError {
    RunError::Publish {
        path: path.to_path_buf(),
        reason: source.to_string(),
    }
}
