//! Config round-trip: a synthetic config survives a write and a re-read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::check::{Check, Project};
use crate::result::CheckResult;
use crate::util::files;
use crate::{Error, Result};

/// The throwaway configuration written to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticConfig {
    pub api_key: String,
}

/// Settings for [`ConfigRoundTripCheck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTripSettings {
    /// Project-relative path of the scratch file.
    pub path: String,
    /// Value written into `apiKey`.
    pub api_key: String,
}

impl Default for RoundTripSettings {
    fn default() -> Self {
        Self {
            path: "test-config.json".to_string(),
            api_key: "test-api-key-12345".to_string(),
        }
    }
}

// ============================================================================
// ScratchFile
// ============================================================================

/// A file that is removed when the guard goes away.
///
/// [`remove`](ScratchFile::remove) deletes it and reports the outcome; if
/// the guard is dropped first (an early `?` return), the drop handler
/// deletes it best-effort.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    armed: bool,
}

impl ScratchFile {
    /// Write `value` as JSON to `path` and take ownership of the file.
    ///
    /// The guard is armed before the write, so a partially written file is
    /// also cleaned up.
    pub async fn create<T: Serialize>(path: PathBuf, value: &T) -> Result<Self> {
        let guard = Self { path, armed: true };
        files::write_json(&guard.path, value).await?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file, surfacing any error.
    pub async fn remove(mut self) -> Result<()> {
        self.armed = false;
        files::remove_file(&self.path).await
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Blocking removal; runs only on early-return paths.
        if self.armed {
            if let Err(err) = std::fs::remove_file(&self.path) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("could not remove {}: {err}", self.path.display());
                }
            }
        }
    }
}

// ============================================================================
// ConfigRoundTripCheck
// ============================================================================

/// Writes, re-reads, compares, and deletes a synthetic config.
///
/// Emits three results (write, compare, cleanup). Any file-system or decode
/// fault fails the whole check instead.
#[derive(Clone, Debug, Default)]
pub struct ConfigRoundTripCheck {
    settings: RoundTripSettings,
}

impl ConfigRoundTripCheck {
    pub fn new(settings: RoundTripSettings) -> Self {
        Self { settings }
    }
}

/// Compare the round-tripped key with what was written.
pub fn compare_api_key(written: &SyntheticConfig, read: &SyntheticConfig) -> Result<()> {
    if written.api_key == read.api_key {
        Ok(())
    } else {
        Err(Error::ValueMismatch {
            field: "apiKey".to_string(),
            expected: written.api_key.clone(),
            actual: read.api_key.clone(),
        })
    }
}

#[async_trait]
impl Check for ConfigRoundTripCheck {
    fn name(&self) -> &str {
        "config"
    }

    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>> {
        self.round_trip(project, |path| async move { files::read_json(&path).await }).await
    }
}

impl ConfigRoundTripCheck {
    /// Write the scratch file, read it back through `read_back`, compare, clean up.
    async fn round_trip<F, Fut>(
        &self,
        project: &Project,
        read_back: F,
    ) -> Result<Vec<CheckResult>>
    where
        F: FnOnce(PathBuf) -> Fut + Send,
        Fut: Future<Output = Result<SyntheticConfig>> + Send,
    {
        let written = SyntheticConfig {
            api_key: self.settings.api_key.clone(),
        };
        let path = project.resolve(&self.settings.path);
        let display = &self.settings.path;

        let scratch = ScratchFile::create(path, &written).await?;
        let mut results = vec![CheckResult::pass("config:write", format!("wrote {display}"))];

        let read = read_back(scratch.path().to_path_buf()).await?;
        results.push(match compare_api_key(&written, &read) {
            Ok(()) => CheckResult::pass("config:read", format!("read back {display} unchanged")),
            Err(err) => CheckResult::fail("config:read", format!("{display} round-trip: {err}")),
        });

        scratch.remove().await?;
        results.push(CheckResult::pass("config:cleanup", format!("removed {display}")));

        Ok(results)
    }
}
