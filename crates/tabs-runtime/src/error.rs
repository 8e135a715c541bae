use std::time::Duration;
use thiserror::Error;

/// Failure of an external collaborator (`gh`, `open`, `osascript`).
///
/// None of these are fatal to a run; the orchestrator logs them and degrades
/// the affected step.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to execute `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("`{program}` failed ({status}): {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },

    /// The program did not finish within its time budget and was killed.
    #[error("`{program}` timed out after {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    /// The program succeeded but its stdout was not the expected JSON.
    #[error("`{program}` returned malformed output: {source}")]
    MalformedOutput {
        program: String,
        #[source]
        source: serde_json::Error,
    },
}
