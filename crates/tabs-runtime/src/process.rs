//! Thin wrapper around `tokio::process` shared by every collaborator adapter.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

use crate::error::CommandError;

/// Run `program` with `args` to completion and return its captured output.
///
/// A non-zero exit becomes [`CommandError::ExitStatus`] carrying the trimmed
/// stderr. When `timeout` is set and elapses, the child is killed and
/// [`CommandError::Timeout`] is returned.
pub(crate) async fn run<I, S>(
    program: &str,
    args: I,
    timeout: Option<Duration>,
) -> Result<Output, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, cmd.output())
            .await
            .map_err(|_| CommandError::Timeout {
                program: program.to_string(),
                timeout: limit,
            })?,
        None => cmd.output().await,
    }
    .map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(CommandError::ExitStatus {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_success_captures_stdout() {
        let output = run("sh", ["-c", "printf hello"], None).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit() {
        let err = run("sh", ["-c", "echo boom >&2; exit 3"], None)
            .await
            .unwrap_err();
        match err {
            CommandError::ExitStatus { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = run("/nonexistent/review-tabs-helper", ["x"], None)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_run_timeout() {
        let err = run("sh", ["-c", "sleep 5"], Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }
}
