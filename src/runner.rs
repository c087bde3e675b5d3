//! The run pipeline: load, validate, stage, preflight, invoke, collect,
//! publish.
//!
//! Stages run strictly in order and progress is streamed as it happens, so
//! the job log reflects where a run stopped. Per-locale problems never
//! abort the pipeline; everything in [`RunError`] does.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::cli::report;
use crate::collect::{self, CollectedLocale};
use crate::engine::EngineCommand;
use crate::error::RunError;
use crate::input::JobInput;
use crate::status::StatusRecord;
use crate::storage::{Dataset, INPUT_KEY, KeyValueStore, OUTPUT_KEY};
use crate::vcs;
use crate::workspace::Workspace;

/// Everything one run needs, resolved by the CLI layer.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Run root; the scratch directory, context document and engine
    /// configuration are created here.
    pub workdir: PathBuf,
    /// Platform storage root holding key-value stores and datasets.
    pub storage_dir: PathBuf,
    /// Explicit input record path. Defaults to the INPUT key-value record.
    pub input: Option<PathBuf>,
    /// Engine command spec, whitespace-separated.
    pub engine: String,
}

/// Aggregate outcome of one completed run.
#[derive(Debug)]
pub struct RunReport {
    pub source_language: String,
    pub locales: Vec<CollectedLocale>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.locales
            .iter()
            .filter(|entry| entry.record.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.locales.len() - self.succeeded()
    }

    /// The OUTPUT artifact: locale to translations or error marker, in
    /// input order.
    pub fn output_value(&self) -> Value {
        let mut output = Map::new();
        for entry in &self.locales {
            output.insert(entry.locale.clone(), entry.result.to_value());
        }
        Value::Object(output)
    }

    /// Status records for the dataset, in input order.
    pub fn records(&self) -> Vec<StatusRecord> {
        self.locales.iter().map(|entry| entry.record.clone()).collect()
    }
}

/// Execute one localization run end to end.
pub fn execute(opts: &RunOptions) -> Result<RunReport, RunError> {
    let store = KeyValueStore::open_default(&opts.storage_dir);
    let input_path = opts
        .input
        .clone()
        .unwrap_or_else(|| store.record_path(INPUT_KEY));

    let input = JobInput::load(&input_path)?;
    input.validate()?;

    let credential = input.credential();
    if let Some(warning) = credential.warning() {
        report::warn(warning);
    }

    report::step(&format!(
        "Localizing from {} to [{}] (tone: {})",
        input.source_language,
        input.target_languages.join(", "),
        input.tone
    ));

    let workspace = Workspace::new(&opts.workdir);
    workspace.stage(&input)?;
    report::step(&format!(
        "Staged {} source strings at {}",
        input.ui_strings.len(),
        workspace.locale_file(&input.source_language).display()
    ));

    let preflight = vcs::preflight(&opts.workdir);
    if let Some(warning) = preflight.warning() {
        report::warn(&format!("version control preflight degraded: {warning}"));
    }

    let engine = EngineCommand::new(&opts.engine, &credential)?;
    report::step(&format!("Executing `{}`", engine.display_command()));
    let output = engine.run(&opts.workdir)?;
    report::engine_output(&output);

    let collection = collect::collect(&workspace, &input.target_languages, input.ui_strings.len());
    for warning in &collection.warnings {
        report::warn(warning);
    }

    let run_report = RunReport {
        source_language: input.source_language.clone(),
        locales: collection.locales,
    };

    store.set_value(OUTPUT_KEY, &run_report.output_value())?;
    Dataset::open_default(&opts.storage_dir).push_all(&run_report.records())?;
    report::step(&format!(
        "Saved localized strings to {}",
        store.record_path(OUTPUT_KEY).display()
    ));

    Ok(run_report)
}
