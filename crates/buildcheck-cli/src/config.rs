//! Configuration for the buildcheck CLI.
//!
//! Provides the [`BuildcheckConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `BUILDCHECK_CONFIG` environment variable
//! 3. `./buildcheck.toml` in the working directory
//! 4. XDG default: `~/.config/buildcheck/config.toml`
//! 5. Built-in defaults

use buildcheck_core::checks::{
    BuildSettings, ManifestSettings, RoundTripSettings, SchemaSettings, StructureSettings,
};
use buildcheck_core::util::paths::find_dir_with_marker;
use buildcheck_core::{Error, HarnessSettings, Result};
use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "buildcheck.toml";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the buildcheck CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildcheckConfig {
    /// Project location.
    pub project: ProjectConfig,

    /// Required files.
    pub structure: StructureSettings,

    /// Dependency manifest expectations.
    pub manifest: ManifestSettings,

    /// Build command and artifact directory.
    pub build: BuildSettings,

    /// Scratch config round-trip.
    pub roundtrip: RoundTripSettings,

    /// Source identifiers to look for.
    pub schema: SchemaSettings,
}

/// Project location configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project root. When unset, the nearest ancestor of the working
    /// directory holding the manifest is used.
    pub root: Option<String>,
}

// ============================================================================
// Config loading
// ============================================================================

impl BuildcheckConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                tracing::debug!("loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("BUILDCHECK");
        env_opts.add_section("project");
        env_opts.add_section("structure");
        env_opts.add_section("manifest");
        env_opts.add_section("build");
        env_opts.add_section("roundtrip");
        env_opts.add_section("schema");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, local file, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        // 1. Explicit --config flag
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        // 2. BUILDCHECK_CONFIG env var
        if let Ok(path) = std::env::var("BUILDCHECK_CONFIG") {
            return Some(PathBuf::from(path));
        }

        // 3. Working directory
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        // 4. XDG default
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("buildcheck").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Settings for every check, as the harness consumes them.
    pub fn harness_settings(&self) -> HarnessSettings {
        HarnessSettings {
            structure: self.structure.clone(),
            manifest: self.manifest.clone(),
            build: self.build.clone(),
            roundtrip: self.roundtrip.clone(),
            schema: self.schema.clone(),
        }
    }

    /// Decide which directory to verify.
    ///
    /// An explicit `--project` wins, then `project.root`, then the nearest
    /// ancestor of `cwd` containing the manifest, then `cwd` itself.
    pub fn project_root(&self, explicit: Option<&str>, cwd: &Path) -> PathBuf {
        if let Some(root) = explicit.or(self.project.root.as_deref()) {
            return cwd.join(root);
        }
        find_dir_with_marker(cwd, &self.manifest.path).unwrap_or_else(|| cwd.to_path_buf())
    }
}

// ============================================================================
// Tests
// ============================================================================
