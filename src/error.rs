//! Errors that abort a localization run.
//!
//! Only run-fatal conditions live here. Version-control problems degrade to
//! a [`crate::vcs::Preflight`] warning, and unusable per-locale translations
//! become error markers in the run output, so neither is represented as a
//! variant.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// No job input record exists at the resolved path.
    #[error("job input not found at {}", .path.display())]
    InputMissing { path: PathBuf },

    /// The input record exists but could not be read or parsed.
    #[error("failed to parse job input {}: {reason}", .path.display())]
    InputMalformed { path: PathBuf, reason: String },

    /// `uiStrings` carries no key-value pairs to localize.
    #[error("uiStrings is empty or missing; provide key-value pairs to localize")]
    EmptyStrings,

    /// `targetLanguages` names no locale to translate into.
    #[error("targetLanguages is empty; provide at least one target locale code")]
    EmptyTargets,

    /// A locale code is not usable as a locale file name.
    #[error("invalid locale code {code:?}; expected a code like \"en\" or \"zh-CN\"")]
    InvalidLocale { code: String },

    /// Writing a staged artifact failed.
    #[error("failed to stage {}: {source}", .path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The translation engine could not be launched at all.
    #[error("failed to launch translation engine `{program}`: {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The translation engine ran but exited unsuccessfully.
    #[error("translation engine failed with exit code {status}: {}", stderr_excerpt(.stderr))]
    EngineFailed {
        /// Exit code, or -1 when the engine was killed by a signal.
        status: i32,
        stdout: String,
        stderr: String,
    },

    /// Persisting a run artifact to the platform stores failed.
    #[error("failed to publish {}: {reason}", .path.display())]
    Publish { path: PathBuf, reason: String },
}

fn stderr_excerpt(stderr: &str) -> &str {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "(no output on stderr)"
    } else {
        trimmed
    }
}
