//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Credential-free build and health verification for a server project.
#[derive(Parser, Debug)]
#[command(name = "buildcheck", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "BUILDCHECK_CONFIG")]
    pub config: Option<String>,

    /// Project directory to verify (defaults to the configured root).
    #[arg(short, long)]
    pub project: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every check and exit non-zero if any failed.
    Run {
        /// Skip the build check.
        #[arg(long)]
        skip_build: bool,

        /// Build timeout in seconds (0 disables the timeout).
        #[arg(long)]
        build_timeout: Option<u64>,
    },

    /// List the checks in run order.
    List,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to ./buildcheck.toml).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML.
    Show,
}

// ============================================================================
// Tests
// ============================================================================
