use std::process::ExitCode;

/// Process exit status for patchloc commands.
///
/// - `Success` (0): the command finished; `apply` always ends here unless it aborts
/// - `Failure` (1): `check` found errors, or `init` refused to overwrite a config
/// - `Error` (2): the run aborted (missing manifest, malformed document, I/O failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` when any errors were reported, `Success` otherwise.
    pub fn from_error_count(errors: usize) -> Self {
        if errors > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
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
