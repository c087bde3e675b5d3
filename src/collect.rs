//! Per-locale collection of engine outputs.
//!
//! Collection never aborts: a locale whose file is missing, unreadable or
//! not a JSON object gets an error marker and a failure record, and the
//! pass moves on to the next locale. Input order is preserved throughout.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::status::StatusRecord;
use crate::workspace::Workspace;

/// Error marker published under a locale whose translation is unusable.
pub const MISSING_MARKER: &str = "Translation missing";

/// Outcome for a single target locale.
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleResult {
    /// Parsed translation map, exactly as the engine produced it.
    Translated(Map<String, Value>),
    /// The locale file was absent, unreadable or not a JSON object.
    Missing,
}

impl LocaleResult {
    /// JSON value published under the locale key in the run output.
    pub fn to_value(&self) -> Value {
        match self {
            LocaleResult::Translated(map) => Value::Object(map.clone()),
            LocaleResult::Missing => {
                let mut marker = Map::new();
                marker.insert(
                    "error".to_string(),
                    Value::String(MISSING_MARKER.to_string()),
                );
                Value::Object(marker)
            }
        }
    }
}

/// One collected locale, in input order.
#[derive(Debug, Clone)]
pub struct CollectedLocale {
    pub locale: String,
    pub result: LocaleResult,
    pub record: StatusRecord,
}

/// Aggregate of one collection pass.
#[derive(Debug, Default)]
pub struct Collection {
    pub locales: Vec<CollectedLocale>,
    /// Non-fatal observations, currently key-count drift against the source.
    pub warnings: Vec<String>,
}

/// Read back every target locale from the workspace.
pub fn collect(workspace: &Workspace, targets: &[String], source_key_count: usize) -> Collection {
    let mut collection = Collection::default();

    for locale in targets {
        let path = workspace.locale_file(locale);
        match read_locale_map(&path) {
            Ok(map) => {
                let key_count = map.len();
                if key_count != source_key_count {
                    collection.warnings.push(format!(
                        "locale {locale} has {key_count} keys but the source has {source_key_count}"
                    ));
                }
                collection.locales.push(CollectedLocale {
                    locale: locale.clone(),
                    result: LocaleResult::Translated(map),
                    record: StatusRecord::generated(locale.as_str(), key_count),
                });
            }
            Err(message) => {
                collection.locales.push(CollectedLocale {
                    locale: locale.clone(),
                    result: LocaleResult::Missing,
                    record: StatusRecord::error(locale.as_str(), message),
                });
            }
        }
    }

    collection
}

/// Read one locale file into a key-value map.
fn read_locale_map(path: &Path) -> Result<Map<String, Value>, String> {
    let content = fs::read_to_string(path)
        .map_err(|err| format!("could not read {}: {err}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|err| format!("could not parse {}: {err}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(format!("{} is not a JSON object", path.display())),
    }
}
