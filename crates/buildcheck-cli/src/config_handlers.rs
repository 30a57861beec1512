//! Handler functions for config CLI commands.
//!
//! Implements `buildcheck config {path,init,show}`.

use crate::cli::ConfigAction;
use crate::config::{BuildcheckConfig, LOCAL_CONFIG_FILE};
use buildcheck_core::{Error, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { file, force } => {
            let path = file.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), PathBuf::from);
            cmd_config_init(&path, force)
        }
        ConfigAction::Show => {
            let config = BuildcheckConfig::load(config_path)?;
            println!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match BuildcheckConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist — run `buildcheck config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Write a default configuration file.
fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = BuildcheckConfig::default().to_toml_string()?;
    std::fs::write(path, &toml_str).map_err(|e| Error::io_with_path(e, path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
