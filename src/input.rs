//! Job input: the structured record that drives one localization run.
//!
//! The input is read from the platform key-value store (or an explicit path)
//! and validated before any staging happens. Locale codes double as file
//! names under the scratch directory, so they are checked against a
//! conservative BCP 47 shape up front.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RunError;

/// Literal credential placeholder shipped in input templates. A key that
/// still contains it was never filled in and must not reach the engine.
pub const CREDENTIAL_PLACEHOLDER: &str = "YOUR_LINGO_API_KEY";

/// Warning emitted when the run has to rely on ambient authentication.
pub const CREDENTIAL_WARNING: &str =
    "lingoApiKey is missing or invalid; attempting system authentication (local development only)";

// Language subtag plus optional alphanumeric subtags, eg "en", "pt-BR",
// "zh-Hans". Anything else could escape the locales directory when used as
// a file name.
static LOCALE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    /// UI strings to localize, key to source text. Insertion order is kept
    /// all the way through to the published output.
    #[serde(default)]
    pub ui_strings: Map<String, Value>,

    #[serde(default = "default_source_language")]
    pub source_language: String,

    #[serde(default)]
    pub target_languages: Vec<String>,

    /// Tone descriptor forwarded to the translator, eg "formal", "playful".
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Placeholder patterns the translations must keep verbatim,
    /// eg `{{username}}` or `{count}`.
    #[serde(default)]
    pub placeholders: Vec<String>,

    /// Lingo.dev API credential. Optional: without one the engine falls
    /// back to whatever authentication the host environment provides.
    #[serde(default)]
    pub lingo_api_key: Option<String>,
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_tone() -> String {
    "neutral".to_string()
}

/// How the API credential is treated downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A usable credential to inject into the engine environment.
    Provided(String),
    /// The template placeholder was left in place.
    Placeholder,
    /// No credential supplied at all.
    Absent,
}

impl Credential {
    /// Non-fatal warning to surface before the run continues, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Credential::Provided(_) => None,
            Credential::Placeholder | Credential::Absent => Some(CREDENTIAL_WARNING),
        }
    }
}

impl JobInput {
    /// Load the job input from `path`.
    pub fn load(path: &Path) -> Result<Self, RunError> {
        if !path.exists() {
            return Err(RunError::InputMissing {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|err| RunError::InputMalformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|err| RunError::InputMalformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Reject inputs that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.ui_strings.is_empty() {
            return Err(RunError::EmptyStrings);
        }
        if self.target_languages.is_empty() {
            return Err(RunError::EmptyTargets);
        }

        for code in std::iter::once(&self.source_language).chain(self.target_languages.iter()) {
            if !LOCALE_CODE.is_match(code) {
                return Err(RunError::InvalidLocale { code: code.clone() });
            }
        }

        Ok(())
    }

    /// Classify the API credential.
    ///
    /// An empty string counts as absent; a value still containing the
    /// template placeholder counts as never filled in.
    pub fn credential(&self) -> Credential {
        match self.lingo_api_key.as_deref() {
            None => Credential::Absent,
            Some("") => Credential::Absent,
            Some(key) if key.contains(CREDENTIAL_PLACEHOLDER) => Credential::Placeholder,
            Some(key) => Credential::Provided(key.to_string()),
        }
    }
}

/// Sample input written by `lingorun init`, mirroring the shape real jobs
/// send. The credential is left as the placeholder on purpose so local runs
/// exercise the ambient-authentication path.
pub fn sample() -> JobInput {
    let mut ui_strings = Map::new();
    for (key, text) in [
        ("auth.login.title", "Welcome back"),
        ("auth.login.button", "Sign in"),
        ("auth.login.error", "Invalid email or password"),
        ("profile.greeting", "Hello, {{username}}"),
        ("checkout.confirm", "Are you sure you want to proceed?"),
        ("notification.new_message", "You have {count} new messages"),
        ("settings.save", "Save changes"),
        ("error.generic", "Something went wrong. Please try again."),
    ] {
        ui_strings.insert(key.to_string(), Value::String(text.to_string()));
    }

    JobInput {
        ui_strings,
        source_language: "en".to_string(),
        target_languages: vec!["fr".to_string(), "de".to_string(), "es".to_string()],
        tone: "professional".to_string(),
        placeholders: vec!["{{username}}".to_string(), "{count}".to_string()],
        lingo_api_key: Some(CREDENTIAL_PLACEHOLDER.to_string()),
    }
}
