//! The orchestrator: runs checks one after another into a single log.

use serde::{Deserialize, Serialize};

use crate::check::{Check, Project};
use crate::checks::{
    BuildCheck, BuildSettings, ConfigRoundTripCheck, ManifestCheck, ManifestSettings,
    RoundTripSettings, SchemaCheck, SchemaSettings, StructureCheck, StructureSettings,
};
use crate::result::ResultLog;

/// Settings for every built-in check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    pub structure: StructureSettings,
    pub manifest: ManifestSettings,
    pub build: BuildSettings,
    pub roundtrip: RoundTripSettings,
    pub schema: SchemaSettings,
}

/// Sequential check runner.
///
/// Checks run strictly in insertion order; each one finishes (including any
/// subprocess it starts) before the next begins.
pub struct Harness {
    project: Project,
    checks: Vec<Box<dyn Check>>,
}

impl Harness {
    /// A harness with no checks.
    pub fn new(project: Project) -> Self {
        Self {
            project,
            checks: Vec::new(),
        }
    }

    /// The five built-in checks: structure, dependencies, build, config, schema.
    pub fn standard(project: Project, settings: &HarnessSettings) -> Self {
        Self::new(project)
            .with_check(StructureCheck::new(settings.structure.clone()))
            .with_check(ManifestCheck::new(settings.manifest.clone()))
            .with_check(BuildCheck::new(settings.build.clone()))
            .with_check(ConfigRoundTripCheck::new(settings.roundtrip.clone()))
            .with_check(SchemaCheck::new(settings.schema.clone()))
    }

    /// Append a check to the run order.
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Drop the check called `name`, if present.
    pub fn skip(mut self, name: &str) -> Self {
        self.checks.retain(|c| c.name() != name);
        self
    }

    /// Check names in run order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check and return the filled log.
    pub async fn run(&self) -> ResultLog {
        let mut log = ResultLog::new();
        for check in &self.checks {
            check.run(&self.project, &mut log).await;
        }
        log::info!("{} of {} results passed", log.passed_count(), log.len());
        log
    }
}
