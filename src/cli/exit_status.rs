use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// Success is run-level, not locale-level: a run that completes with some
/// locales marked as failures still exits 0, because the output and status
/// records were published. A nonzero exit tells the platform the run itself
/// failed.
///
/// - `Success` (0): the run completed and its results were published
/// - `Failure` (1): the run aborted (invalid input, staging, engine, publish)
/// - `Error` (2): internal error (bad invocation, unexpected I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The run completed and its results were published.
    Success,
    /// The run aborted before results could be published.
    Failure,
    /// The command failed due to an internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
