//! Manifest validator: required dependencies are declared and installed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::check::{Check, Project};
use crate::result::CheckResult;
use crate::util::files;
use crate::Result;

/// The parts of a `package.json` the validator reads.
///
/// `dependencies` is mandatory: a manifest without it fails to decode.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Read and decode a manifest file.
    pub async fn load(path: &Path) -> Result<Self> {
        files::read_json(path).await
    }

    /// Whether `name` is declared under `dependencies`.
    pub fn declares(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }
}

/// Settings for [`ManifestCheck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSettings {
    /// Project-relative manifest path.
    pub path: String,
    /// Package names that must appear under `dependencies`.
    pub required_dependencies: Vec<String>,
    /// Directory whose presence means the install step has run.
    pub installed_dir: String,
    /// Command suggested when `installed_dir` is absent.
    pub install_hint: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            path: "package.json".to_string(),
            required_dependencies: ["@modelcontextprotocol/sdk", "@google/genai", "zod"]
                .into_iter()
                .map(String::from)
                .collect(),
            installed_dir: "node_modules".to_string(),
            install_hint: "npm install".to_string(),
        }
    }
}

/// Emits one result per required dependency plus one for the install directory.
#[derive(Clone, Debug, Default)]
pub struct ManifestCheck {
    settings: ManifestSettings,
}

impl ManifestCheck {
    pub fn new(settings: ManifestSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Check for ManifestCheck {
    fn name(&self) -> &str {
        "dependencies"
    }

    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>> {
        // An unreadable manifest is one root cause; fail the whole check.
        let manifest = PackageManifest::load(&project.resolve(&self.settings.path)).await?;

        let mut results = Vec::with_capacity(self.settings.required_dependencies.len() + 1);
        for dep in &self.settings.required_dependencies {
            results.push(CheckResult::from_condition(
                format!("dependency:{dep}"),
                manifest.declares(dep),
                format!("dependency {dep} is declared"),
                format!("dependency {dep} is missing from {}", self.settings.path),
            ));
        }

        let installed = files::probe_dir(&project.resolve(&self.settings.installed_dir))
            .await
            .is_ok();
        results.push(CheckResult::from_condition(
            "dependencies:installed",
            installed,
            format!("{} is present", self.settings.installed_dir),
            format!(
                "{} not found; run `{}` first",
                self.settings.installed_dir, self.settings.install_hint
            ),
        ));

        Ok(results)
    }
}
