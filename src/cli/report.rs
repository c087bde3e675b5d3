//! Console reporting for runs.
//!
//! Progress is streamed while the pipeline executes so the job log shows
//! where a run stopped; the per-locale breakdown and summary are printed
//! once the run completes. Separate from the pipeline logic so output can
//! be captured in tests.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

use crate::collect::{CollectedLocale, LocaleResult};
use crate::engine::EngineOutput;
use crate::error::RunError;
use crate::runner::RunReport;
use crate::status::RecordStatus;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of translated values previewed per locale in verbose mode.
const MAX_PREVIEW_ENTRIES: usize = 3;

/// Print a progress step to stdout.
pub fn step(message: &str) {
    println!("{}", message);
}

/// Print a non-fatal warning to stderr.
pub fn warn(message: &str) {
    warn_to(message, &mut io::stderr().lock());
}

/// Print a warning to a custom writer.
pub fn warn_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), message);
}

/// Relay the engine's captured output verbatim.
pub fn engine_output(output: &EngineOutput) {
    if !output.stdout.trim().is_empty() {
        println!("{}", output.stdout.trim_end());
    }
    if !output.stderr.trim().is_empty() {
        eprintln!("{}", output.stderr.trim_end());
    }
}

/// Print the record created by `init`.
pub fn print_created(path: &std::path::Path) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", path.display()).green()
    );
}

/// Print the per-locale breakdown and summary for a completed run.
pub fn print(report: &RunReport, verbose: bool) {
    print_to(report, verbose, &mut io::stdout().lock());
}

/// Print a completed run to a custom writer.
pub fn print_to<W: Write>(report: &RunReport, verbose: bool, writer: &mut W) {
    for entry in &report.locales {
        print_locale(entry, writer);
        if verbose && let LocaleResult::Translated(map) = &entry.result {
            print_preview(map, writer);
        }
    }

    print_summary(report, writer);
}

/// Print a fatal run failure.
pub fn print_failure(err: &RunError) {
    print_failure_to(err, &mut io::stderr().lock());
}

/// Print a run failure to a custom writer.
pub fn print_failure_to<W: Write>(err: &RunError, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("Run failed: {}", err).red()
    );

    // The engine's stdout often names the locale or key it choked on.
    if let RunError::EngineFailed { stdout, .. } = err
        && !stdout.trim().is_empty()
    {
        let _ = writeln!(writer, "{}", stdout.trim_end());
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_locale<W: Write>(entry: &CollectedLocale, writer: &mut W) {
    let mark = match entry.record.status {
        RecordStatus::Success => SUCCESS_MARK.green(),
        RecordStatus::Error => FAILURE_MARK.red(),
    };

    let _ = writeln!(
        writer,
        "{} {}  {}",
        mark,
        entry.locale.bold(),
        entry.record.message
    );
}

fn print_preview<W: Write>(map: &Map<String, Value>, writer: &mut W) {
    let shown: Vec<(&String, &Value)> = map.iter().take(MAX_PREVIEW_ENTRIES).collect();

    // Keys can carry wide characters, so align on display width.
    let key_width = shown
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(key.as_str()))
        .max()
        .unwrap_or(0);

    for (key, value) in &shown {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let padding = key_width - UnicodeWidthStr::width(key.as_str());
        let _ = writeln!(
            writer,
            "    {}{:>padding$}  {}",
            key.dimmed(),
            "",
            text,
            padding = padding
        );
    }

    let remaining = map.len().saturating_sub(shown.len());
    if remaining > 0 {
        let _ = writeln!(
            writer,
            "    {}",
            format!("(and {} more)", remaining).dimmed()
        );
    }
}

fn print_summary<W: Write>(report: &RunReport, writer: &mut W) {
    let succeeded = report.succeeded();
    let failed = report.failed();
    let total = report.locales.len();

    if failed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Localized {} of {} {} from {}",
                succeeded,
                total,
                if total == 1 { "locale" } else { "locales" },
                report.source_language
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} Localized {} of {} {} from {} ({} {})",
            FAILURE_MARK.red(),
            succeeded,
            total,
            if total == 1 { "locale" } else { "locales" },
            report.source_language,
            failed,
            if failed == 1 { "failure" } else { "failures" }.red()
        );
    }
}

// ============================================================
// Tests
// ============================================================
