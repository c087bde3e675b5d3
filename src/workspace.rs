//! Scratch workspace staging for one run.
//!
//! Every artifact lives under an explicit run root; nothing is resolved
//! against the process working directory. The layout is what the engine
//! expects to find:
//!
//! ```text
//! <root>/temp_i18n/locales/<locale>.json   staged source, engine outputs
//! <root>/LINGO_CONTEXT.md                  context document for the translator
//! <root>/i18n.json                         engine run configuration
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::EngineConfig;
use crate::error::RunError;
use crate::input::JobInput;

/// Name of the scratch directory created under the run root.
pub const SCRATCH_DIR_NAME: &str = "temp_i18n";

/// File name of the generated context document.
pub const CONTEXT_FILE_NAME: &str = "LINGO_CONTEXT.md";

/// File name of the engine run configuration.
pub const CONFIG_FILE_NAME: &str = "i18n.json";

/// Scratch layout for one run, rooted at an explicit path.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root.join(SCRATCH_DIR_NAME)
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.scratch_dir().join("locales")
    }

    /// Path of the staged (or engine-produced) file for one locale.
    pub fn locale_file(&self, locale: &str) -> PathBuf {
        self.locales_dir().join(format!("{locale}.json"))
    }

    pub fn context_file(&self) -> PathBuf {
        self.root.join(CONTEXT_FILE_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Stage every input-derived artifact for one run.
    ///
    /// A scratch directory left over from an earlier run is removed first,
    /// so stale translations are never collected as fresh ones. Write
    /// failures are fatal.
    pub fn stage(&self, input: &JobInput) -> Result<(), RunError> {
        // Removal is best effort; a missing directory is the common case.
        let _ = fs::remove_dir_all(self.scratch_dir());

        fs::create_dir_all(self.locales_dir())
            .map_err(|err| staging_error(self.locales_dir(), err))?;

        write_pretty_json(&self.locale_file(&input.source_language), &input.ui_strings)?;
        write_text(&self.context_file(), &render_context(input))?;

        let config = EngineConfig::for_run(&input.source_language, &input.target_languages);
        write_pretty_json(&self.config_file(), &config)?;

        Ok(())
    }
}

/// Render the context document handed to the translator alongside the
/// strings. Tone and placeholder patterns come straight from the input.
pub fn render_context(input: &JobInput) -> String {
    format!(
        "# Localization Context\n\
         \n\
         The following UI strings are part of a product interface.\n\
         Please ensure the translation preserves the following guidelines:\n\
         \n\
         - **Tone**: {tone}\n\
         - **Variables**: Preserve all placeholders like {placeholders}.\n\
         - **Terminology**: Use consistent terminology suitable for a software interface.\n",
        tone = input.tone,
        placeholders = input.placeholders.join(", "),
    )
}

/// Serialize `value` as pretty-printed JSON with a trailing newline.
fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RunError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|err| staging_error(path.to_path_buf(), io::Error::other(err)))?;
    write_text(path, &format!("{content}\n"))
}

fn write_text(path: &Path, content: &str) -> Result<(), RunError> {
    fs::write(path, content).map_err(|err| staging_error(path.to_path_buf(), err))
}

fn staging_error(path: PathBuf, source: io::Error) -> RunError {
    RunError::Staging { path, source }
}
