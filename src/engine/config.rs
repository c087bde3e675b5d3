//! The `i18n.json` run configuration consumed by the Lingo.dev CLI.

use serde::{Deserialize, Serialize};

use crate::workspace::SCRATCH_DIR_NAME;

/// Schema URL pinned in generated configurations.
pub const CONFIG_SCHEMA: &str = "https://lingo.dev/schema/i18n.json";

/// Configuration format version the engine understands.
pub const CONFIG_VERSION: &str = "1.10";

/// The full configuration document describing one run to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub locale: LocaleSpec,
    pub buckets: Buckets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleSpec {
    pub source: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub json: BucketSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub include: Vec<String>,
}

/// Include pattern locating staged locale files. `[locale]` is the engine's
/// own substitution token, not a glob character class.
pub fn locale_include_pattern() -> String {
    format!("{SCRATCH_DIR_NAME}/locales/[locale].json")
}

impl EngineConfig {
    /// Build the configuration for one run.
    pub fn for_run(source: &str, targets: &[String]) -> Self {
        Self {
            schema: CONFIG_SCHEMA.to_string(),
            version: CONFIG_VERSION.to_string(),
            locale: LocaleSpec {
                source: source.to_string(),
                targets: targets.to_vec(),
            },
            buckets: Buckets {
                json: BucketSpec {
                    include: vec![locale_include_pattern()],
                },
            },
        }
    }
}
