//! Lingorun - localization job runner for UI string batches
//!
//! Lingorun stages a batch of UI strings as a Lingo.dev project, runs the
//! Lingo.dev CLI to translate them into each requested locale, and publishes
//! the collected results to the hosting platform's storage. Per-locale
//! failures are isolated; the run itself only fails when it cannot produce
//! and publish an output at all.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface layer (arguments, dispatch, reporting)
//! - `collect`: per-locale result collection with isolated failures
//! - `engine`: engine run configuration and subprocess invocation
//! - `error`: run-aborting error taxonomy
//! - `input`: job input record, validation and credential handling
//! - `runner`: the linear run pipeline
//! - `status`: per-locale status records published to the dataset
//! - `storage`: filesystem-backed key-value store and dataset
//! - `vcs`: version-control preflight for the engine's diffing
//! - `workspace`: scratch directory staging

pub mod cli;
pub mod collect;
pub mod engine;
pub mod error;
pub mod input;
pub mod runner;
pub mod status;
pub mod storage;
pub mod vcs;
pub mod workspace;
