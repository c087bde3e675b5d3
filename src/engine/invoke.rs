//! Subprocess invocation of the external localization engine.
//!
//! The engine is any CLI speaking the Lingo.dev interface. It runs to
//! completion inside the run root with stdout and stderr captured, and the
//! API credential is injected through the environment only when a real one
//! exists, so a placeholder never shadows ambient authentication.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::RunError;
use crate::input::Credential;

/// Environment variable the engine reads its API credential from.
pub const CREDENTIAL_ENV_VAR: &str = "LINGODOTDEV_API_KEY";

/// Default engine command. `npx` resolves the CLI without a local install.
pub const DEFAULT_ENGINE: &str = "npx -y lingo.dev";

/// Subcommand arguments appended to every invocation. `--force` requests a
/// full pass instead of an incremental diff.
const RUN_ARGS: [&str; 2] = ["run", "--force"];

/// A fully resolved engine invocation.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    program: String,
    args: Vec<String>,
    credential: Option<String>,
}

/// Captured output of an engine run that exited successfully.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub stdout: String,
    pub stderr: String,
}

impl EngineCommand {
    /// Build the invocation from a whitespace-separated command spec such as
    /// `npx -y lingo.dev` or a plain binary path.
    pub fn new(spec: &str, credential: &Credential) -> Result<Self, RunError> {
        let mut parts = spec.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            return Err(RunError::EngineSpawn {
                program: spec.to_string(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty engine command"),
            });
        };

        let mut args: Vec<String> = parts.collect();
        args.extend(RUN_ARGS.iter().map(|arg| arg.to_string()));

        let credential = match credential {
            Credential::Provided(key) => Some(key.clone()),
            Credential::Placeholder | Credential::Absent => None,
        };

        Ok(Self {
            program,
            args,
            credential,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether this invocation will inject a credential into the engine
    /// environment.
    pub fn injects_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// The full command line, for progress output.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run the engine to completion inside `dir`, capturing its output.
    ///
    /// The child inherits the parent environment; the credential variable is
    /// layered on top only when a real credential exists.
    pub fn run(&self, dir: &Path) -> Result<EngineOutput, RunError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(dir);
        if let Some(key) = &self.credential {
            command.env(CREDENTIAL_ENV_VAR, key);
        }

        let output = command.output().map_err(|err| RunError::EngineSpawn {
            program: self.program.clone(),
            source: err,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(RunError::EngineFailed {
                status: output.status.code().unwrap_or(-1),
                stdout,
                stderr,
            });
        }

        Ok(EngineOutput { stdout, stderr })
    }
}
