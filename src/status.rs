//! Per-locale status records published to the platform dataset.
//!
//! Downstream consumers filter on the `key` and `status` wire values, so the
//! serialized names are part of the output contract and must stay stable.

use serde::{Deserialize, Serialize};

/// What happened to a locale file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKey {
    FileGenerated,
    FileError,
}

/// Coarse success flag for a status record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Success,
    Error,
}

/// One structured entry describing the outcome for a single locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub language: String,
    pub key: RecordKey,
    pub status: RecordStatus,
    pub message: String,
}

impl StatusRecord {
    /// Record for a locale whose translation file was collected.
    pub fn generated(language: impl Into<String>, key_count: usize) -> Self {
        Self {
            language: language.into(),
            key: RecordKey::FileGenerated,
            status: RecordStatus::Success,
            message: format!("Successfully generated {key_count} keys."),
        }
    }

    /// Record for a locale whose translation file was missing or unusable.
    pub fn error(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            key: RecordKey::FileError,
            status: RecordStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }
}
