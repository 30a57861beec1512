//! Application wiring: logging, command dispatch, and the verification run.

use crate::cli::{CliArgs, Command};
use crate::config::BuildcheckConfig;
use crate::config_handlers;
use buildcheck_core::{Error, Harness, Project, Result, report};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

// ============================================================================
// App
// ============================================================================

/// The buildcheck application.
pub struct App {
    name: String,
    config: BuildcheckConfig,
    version: String,
}

impl App {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = BuildcheckConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    pub fn new(name: impl Into<String>, config: BuildcheckConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Initialise tracing-based logging on stderr.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }

    /// Run the command in `args` and return the process exit code.
    pub async fn run(&self, args: CliArgs) -> Result<i32> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::config(format!("could not determine working directory: {e}")))?;
        let root = self.config.project_root(args.project.as_deref(), &cwd);

        match args.command {
            None => self.verify(&root, false, None).await,
            Some(Command::Run {
                skip_build,
                build_timeout,
            }) => self.verify(&root, skip_build, build_timeout).await,
            Some(Command::List) => {
                for name in self.harness(&root, false, None).check_names() {
                    println!("{name}");
                }
                Ok(0)
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
                    .map(|()| 0)
            }
        }
    }

    fn harness(&self, root: &Path, skip_build: bool, build_timeout: Option<u64>) -> Harness {
        let mut settings = self.config.harness_settings();
        if let Some(secs) = build_timeout {
            settings.build.timeout_secs = secs;
        }
        let harness = Harness::standard(Project::new(root), &settings);
        if skip_build {
            harness.skip("build")
        } else {
            harness
        }
    }

    /// Run every check, print the report, and return the reporter's exit code.
    async fn verify(
        &self,
        root: &Path,
        skip_build: bool,
        build_timeout: Option<u64>,
    ) -> Result<i32> {
        let harness = self.harness(root, skip_build, build_timeout);
        tracing::debug!(checks = ?harness.check_names(), "starting run");

        let mut out = io::stdout();
        let title = format!("{} {}: verifying {}", self.name, self.version, root.display());
        report::render_header(&mut out, &title).map_err(stdout_error)?;

        let log = harness.run().await;
        let summary = report::render(&mut out, &log).map_err(stdout_error)?;
        out.flush().map_err(stdout_error)?;

        tracing::info!(passed = summary.passed, total = summary.total, "run finished");
        Ok(summary.exit_code())
    }
}

fn stdout_error(e: io::Error) -> Error {
    Error::io_with_path(e, "<stdout>")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_project(root: &Path) {
        let config = BuildcheckConfig::default();
        for relative in &config.structure.required_files {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }
        std::fs::write(
            root.join("package.json"),
            r#"{"dependencies": {"@modelcontextprotocol/sdk": "1", "@google/genai": "1", "zod": "3"}}"#,
        )
        .unwrap();
        std::fs::write(
            root.join("src/index.ts"),
            "generate_image edit_image @google/genai gemini-2.5-flash-image-preview image/png",
        )
        .unwrap();
        std::fs::create_dir(root.join("node_modules")).unwrap();
    }

    fn shell_build(script: &str) -> BuildcheckConfig {
        let mut config = BuildcheckConfig::default();
        config.build.program = "sh".into();
        config.build.args = vec!["-c".into(), script.into()];
        config
    }

    #[test]
    fn test_app_new() {
        let app = App::new("buildcheck", BuildcheckConfig::default());
        assert_eq!(app.name, "buildcheck");
        assert_eq!(app.config.build.program, "npm");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        App::init_logging(false, false);
        App::init_logging(true, false);
        App::init_logging(false, true);
    }

    #[test]
    fn test_harness_skip_and_timeout() {
        let app = App::new("buildcheck", BuildcheckConfig::default());
        let harness = app.harness(Path::new("."), true, Some(5));
        assert!(!harness.check_names().contains(&"build"));
        assert_eq!(harness.check_names().len(), 4);
    }

    #[tokio::test]
    async fn test_list_command_exits_zero() {
        let app = App::new("buildcheck", BuildcheckConfig::default());
        let args = CliArgs::parse_from(["buildcheck", "list"]);
        assert_eq!(app.run(args).await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_valid_project_exits_zero() {
        let dir = tempfile::TempDir::new().unwrap();
        valid_project(dir.path());

        let app = App::new("buildcheck", shell_build("mkdir -p dist"));
        let args = CliArgs::parse_from([
            "buildcheck",
            "--project",
            dir.path().to_str().unwrap(),
            "run",
        ]);
        assert_eq!(app.run(args).await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_artifact_exits_one() {
        let dir = tempfile::TempDir::new().unwrap();
        valid_project(dir.path());

        let app = App::new("buildcheck", shell_build("true"));
        let args = CliArgs::parse_from([
            "buildcheck",
            "--project",
            dir.path().to_str().unwrap(),
        ]);
        assert_eq!(app.run(args).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_skip_build_on_valid_project() {
        let dir = tempfile::TempDir::new().unwrap();
        valid_project(dir.path());

        let app = App::new("buildcheck", BuildcheckConfig::default());
        let args = CliArgs::parse_from([
            "buildcheck",
            "--project",
            dir.path().to_str().unwrap(),
            "run",
            "--skip-build",
        ]);
        assert_eq!(app.run(args).await.unwrap(), 0);
    }
}
