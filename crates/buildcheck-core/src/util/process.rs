//! Awaitable subprocess execution with captured output.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::{Error, Result};

/// Completed subprocess: exit code plus everything written to stdout/stderr.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl BuildOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `program args...` in `cwd` and wait for it to exit.
///
/// Stdin is closed and both output streams are piped into separate buffers;
/// nothing is echoed live. Returns once the child has terminated, so callers
/// observe every filesystem effect of the process.
///
/// With `timeout` set, a child still running when it elapses is killed and
/// [`Error::Timeout`] is returned. A program that cannot be started yields
/// [`Error::Process`] with no exit code. A non-zero exit is *not* an error
/// here; inspect [`BuildOutput::exit_code`].
pub async fn run_command(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<BuildOutput> {
    log::debug!("spawning `{} {}` in {}", program, args.join(" "), cwd.display());

    let child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::Process {
            code: None,
            stderr: format!("failed to start `{program}`: {e}"),
        })?;

    let waited = match timeout {
        // Dropping the wait future on expiry drops the child, which kills it.
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| Error::Timeout(limit))?,
        None => child.wait_with_output().await,
    };

    let output = waited.map_err(|e| Error::Process {
        code: None,
        stderr: format!("failed waiting for `{program}`: {e}"),
    })?;

    let result = BuildOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    log::debug!("`{program}` exited with {:?}", result.exit_code);
    Ok(result)
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_streams_separately() {
        let temp = TempDir::new().unwrap();
        let out = run_command("sh", &sh("echo out; echo err >&2"), temp.path(), None)
            .await
            .unwrap();

        assert!(out.success());
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported_not_raised() {
        let temp = TempDir::new().unwrap();
        let out = run_command("sh", &sh("echo boom >&2; exit 3"), temp.path(), None)
            .await
            .unwrap();

        assert!(!out.success());
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stderr.trim(), "boom");
    }

    #[tokio::test]
    async fn test_runs_in_cwd() {
        let temp = TempDir::new().unwrap();
        run_command("sh", &sh("mkdir dist"), temp.path(), None)
            .await
            .unwrap();
        assert!(temp.path().join("dist").is_dir());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let temp = TempDir::new().unwrap();
        let err = run_command("buildcheck-no-such-program", &[], temp.path(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Process { code: None, .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let temp = TempDir::new().unwrap();
        let err = run_command(
            "sh",
            &sh("sleep 5"),
            temp.path(),
            Some(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }
}
