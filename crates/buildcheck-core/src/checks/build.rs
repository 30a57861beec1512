//! Build runner: the project's build command succeeds and leaves its artifacts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::check::{Check, Project};
use crate::result::CheckResult;
use crate::util::files;
use crate::util::process::{BuildOutput, run_command};
use crate::{Error, Result};

/// Settings for [`BuildCheck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Program to launch.
    pub program: String,
    /// Arguments passed to `program`.
    pub args: Vec<String>,
    /// Project-relative directory the build must produce.
    pub artifact_dir: String,
    /// Seconds before a running build is killed. `0` waits indefinitely.
    pub timeout_secs: u64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["run".to_string(), "build".to_string()],
            artifact_dir: "dist".to_string(),
            timeout_secs: 300,
        }
    }
}

impl BuildSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// The command line as it would be typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs the build command and checks for the artifact directory.
#[derive(Clone, Debug, Default)]
pub struct BuildCheck {
    settings: BuildSettings,
}

impl BuildCheck {
    pub fn new(settings: BuildSettings) -> Self {
        Self { settings }
    }

    async fn judge(&self, project: &Project, output: BuildOutput) -> CheckResult {
        let command = self.settings.command_line();
        if !output.success() {
            let err = Error::Process {
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            };
            return CheckResult::fail("build", format!("`{command}` failed: {err}"));
        }

        let artifact = &self.settings.artifact_dir;
        match files::probe_dir(&project.resolve(artifact)).await {
            Ok(()) => CheckResult::pass(
                "build",
                format!("`{command}` succeeded and created {artifact}"),
            ),
            Err(err) => {
                log::debug!("artifact probe failed: {err}");
                CheckResult::fail(
                    "build",
                    format!("`{command}` exited 0 but artifact directory not created: {artifact}"),
                )
            }
        }
    }
}

#[async_trait]
impl Check for BuildCheck {
    fn name(&self) -> &str {
        "build"
    }

    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>> {
        let outcome = run_command(
            &self.settings.program,
            &self.settings.args,
            project.root(),
            self.settings.timeout(),
        )
        .await;

        let result = match outcome {
            Ok(output) => self.judge(project, output).await,
            Err(Error::Timeout(limit)) => CheckResult::fail(
                "build",
                format!(
                    "`{}` timed out after {}s and was killed",
                    self.settings.command_line(),
                    limit.as_secs()
                ),
            ),
            Err(err) => return Err(err),
        };
        Ok(vec![result])
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::result::ResultLog;
    use tempfile::TempDir;

    fn shell_build(script: &str) -> BuildSettings {
        BuildSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            artifact_dir: "dist".to_string(),
            timeout_secs: 30,
        }
    }

    async fn run_one(settings: BuildSettings, temp: &TempDir) -> CheckResult {
        let mut results = BuildCheck::new(settings)
            .evaluate(&Project::new(temp.path()))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[test]
    fn test_default_settings() {
        let settings = BuildSettings::default();
        assert_eq!(settings.command_line(), "npm run build");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(300)));
        assert_eq!(
            BuildSettings {
                timeout_secs: 0,
                ..Default::default()
            }
            .timeout(),
            None
        );
    }

    #[tokio::test]
    async fn test_success_with_artifact_passes() {
        let temp = TempDir::new().unwrap();
        let result = run_one(shell_build("mkdir -p dist && echo built"), &temp).await;
        assert!(result.passed(), "{}", result.message());
    }

    #[tokio::test]
    async fn test_success_without_artifact_fails() {
        let temp = TempDir::new().unwrap();
        let result = run_one(shell_build("true"), &temp).await;
        assert!(!result.passed());
        assert!(result.message().contains("artifact directory not created"));
        assert!(!result.message().contains("failed:"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let temp = TempDir::new().unwrap();
        let result = run_one(
            shell_build("mkdir -p dist; echo 'TS2304: Cannot find name' >&2; exit 2"),
            &temp,
        )
        .await;
        assert!(!result.passed());
        assert!(result.message().contains("TS2304: Cannot find name"));
        assert!(result.message().contains("exit code 2"));
        assert!(!result.message().contains("artifact directory not created"));
    }

    #[tokio::test]
    async fn test_timeout_fails_with_distinct_message() {
        let temp = TempDir::new().unwrap();
        let settings = BuildSettings {
            timeout_secs: 1,
            ..shell_build("sleep 10")
        };
        let result = run_one(settings, &temp).await;
        assert!(!result.passed());
        assert!(result.message().contains("timed out after 1s"));
    }

    #[tokio::test]
    async fn test_unspawnable_program_collapses_to_one_failure() {
        let temp = TempDir::new().unwrap();
        let settings = BuildSettings {
            program: "buildcheck-no-such-program".to_string(),
            ..Default::default()
        };
        let mut log = ResultLog::new();
        BuildCheck::new(settings)
            .run(&Project::new(temp.path()), &mut log)
            .await;

        assert_eq!(log.len(), 1);
        let only = log.iter().next().unwrap();
        assert!(!only.passed());
        assert!(only.message().contains("failed to start"));
    }
}
