//! Everything the external localization engine sees: the generated
//! `i18n.json` run configuration and the subprocess invocation itself.

pub mod config;
pub mod invoke;

pub use config::EngineConfig;
pub use invoke::{CREDENTIAL_ENV_VAR, DEFAULT_ENGINE, EngineCommand, EngineOutput};
