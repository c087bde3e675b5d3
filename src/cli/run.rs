//! Command dispatch for the lingorun CLI.
//!
//! `run` drives the whole pipeline and maps its outcome to an exit status;
//! `init` seeds the local key-value store with a sample input so a run can
//! be tried without the hosting platform.

use anyhow::Result;

use super::args::{Arguments, Command, InitCommand, RunCommand};
use super::exit_status::ExitStatus;
use super::report;
use crate::input;
use crate::runner::{self, RunOptions};
use crate::storage::{INPUT_KEY, KeyValueStore};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Run(cmd)) => run_pipeline(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn run_pipeline(cmd: RunCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let opts = RunOptions {
        workdir: cmd.common.workdir,
        storage_dir: cmd.common.storage_dir,
        input: cmd.input,
        engine: cmd.engine,
    };

    match runner::execute(&opts) {
        Ok(result) => {
            report::print(&result, verbose);
            Ok(ExitStatus::Success)
        }
        Err(err) => {
            report::print_failure(&err);
            Ok(ExitStatus::Failure)
        }
    }
}

fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let store = KeyValueStore::open_default(&cmd.common.storage_dir);
    let path = store.record_path(INPUT_KEY);

    if path.exists() && !cmd.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    store.set_value(INPUT_KEY, &input::sample())?;
    report::print_created(&path);
    Ok(ExitStatus::Success)
}
