//! The [`Check`] trait and the [`Project`] every check inspects.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::result::{CheckResult, ResultLog};
use crate::Result;

/// The project under verification.
///
/// Every relative path a check is configured with resolves against `root`.
#[derive(Clone, Debug)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// One independent verification unit.
///
/// Implementors describe their work in [`evaluate`](Check::evaluate): the
/// `Ok` vector holds every per-item result (passing or failing), while an
/// `Err` means the check as a whole could not produce its normal results.
/// [`run`](Check::run) is the boundary that keeps such a fault from leaving
/// the check.
#[async_trait]
pub trait Check: Send + Sync {
    /// Short, stable identifier, also used for the aggregate failure result.
    fn name(&self) -> &str;

    /// Produce this check's results for `project`.
    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>>;

    /// Evaluate and append to `log`.
    ///
    /// An `Err` from `evaluate` becomes exactly one failing result carrying
    /// the error text.
    async fn run(&self, project: &Project, log: &mut ResultLog) {
        log::info!("running {} check", self.name());
        match self.evaluate(project).await {
            Ok(results) => log.extend(results),
            Err(err) => {
                log::warn!("{} check failed: {err}", self.name());
                log.push(CheckResult::fail(
                    self.name(),
                    format!("{} check failed: {err}", self.name()),
                ));
            }
        }
    }
}
