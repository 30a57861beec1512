//! Filesystem probe: every required project file must be present.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::check::{Check, Project};
use crate::result::CheckResult;
use crate::util::files;
use crate::Result;

/// Settings for [`StructureCheck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureSettings {
    /// Project-relative paths that must exist, probed in this order.
    pub required_files: Vec<String>,
}

impl Default for StructureSettings {
    fn default() -> Self {
        Self {
            required_files: [
                "package.json",
                "tsconfig.json",
                "src/index.ts",
                "README.md",
                ".gitignore",
                ".eslintrc.json",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Emits one result per required file.
#[derive(Clone, Debug, Default)]
pub struct StructureCheck {
    settings: StructureSettings,
}

impl StructureCheck {
    pub fn new(settings: StructureSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Check for StructureCheck {
    fn name(&self) -> &str {
        "structure"
    }

    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>> {
        let mut results = Vec::with_capacity(self.settings.required_files.len());
        for relative in &self.settings.required_files {
            let name = format!("file:{relative}");
            let result = match files::probe(&project.resolve(relative)).await {
                Ok(_) => CheckResult::pass(name, format!("{relative} exists")),
                Err(err) => {
                    log::debug!("probe failed: {err}");
                    CheckResult::fail(name, format!("{relative} is missing"))
                }
            };
            results.push(result);
        }
        Ok(results)
    }
}
