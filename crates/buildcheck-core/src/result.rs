//! Check outcomes and the append-only log that collects them.

use serde::Serialize;

/// Glyph prefixed to the message of a passing result.
pub const PASS_GLYPH: &str = "✅";

/// Glyph prefixed to the message of a failing result.
pub const FAIL_GLYPH: &str = "❌";

// ============================================================================
// CheckResult
// ============================================================================

/// Outcome of a single assertion made by a check.
///
/// Names are unique within the check that produced them, not across the
/// whole run. The message always starts with a status glyph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    name: String,
    passed: bool,
    message: String,
}

impl CheckResult {
    /// Create a passing result.
    pub fn pass(name: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: format!("{PASS_GLYPH} {}", message.as_ref()),
        }
    }

    /// Create a failing result.
    pub fn fail(name: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: format!("{FAIL_GLYPH} {}", message.as_ref()),
        }
    }

    /// Create a passing or failing result from a condition.
    pub fn from_condition(
        name: impl Into<String>,
        passed: bool,
        on_pass: impl AsRef<str>,
        on_fail: impl AsRef<str>,
    ) -> Self {
        if passed {
            Self::pass(name, on_pass)
        } else {
            Self::fail(name, on_fail)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// ResultLog
// ============================================================================

/// Insertion-ordered record of every result produced during one run.
///
/// Results can only be appended; nothing is ever removed or rewritten.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResultLog {
    results: Vec<CheckResult>,
}

impl ResultLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one result.
    pub fn push(&mut self, result: CheckResult) {
        log::debug!(
            "{} {}",
            if result.passed { "pass" } else { "fail" },
            result.name
        );
        self.results.push(result);
    }

    /// Append results in order.
    pub fn extend(&mut self, results: impl IntoIterator<Item = CheckResult>) {
        for result in results {
            self.push(result);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of passing results.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// True only when every result passed. An empty log counts as passing.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Failing results, in order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

impl<'a> IntoIterator for &'a ResultLog {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_and_fail_carry_glyphs() {
        let ok = CheckResult::pass("file:README.md", "README.md exists");
        assert!(ok.passed());
        assert_eq!(ok.message(), "✅ README.md exists");

        let bad = CheckResult::fail("file:README.md", "README.md missing");
        assert!(!bad.passed());
        assert_eq!(bad.message(), "❌ README.md missing");
        assert_eq!(bad.name(), "file:README.md");
    }

    #[test]
    fn test_from_condition() {
        assert!(CheckResult::from_condition("x", true, "yes", "no").passed());
        let r = CheckResult::from_condition("x", false, "yes", "no");
        assert!(!r.passed());
        assert!(r.message().ends_with("no"));
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut log = ResultLog::new();
        log.push(CheckResult::pass("a", "a"));
        log.extend(vec![CheckResult::fail("b", "b"), CheckResult::pass("c", "c")]);

        let names: Vec<_> = log.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.passed_count(), 2);
        assert!(!log.all_passed());
        assert_eq!(log.failures().next().unwrap().name(), "b");
    }

    #[test]
    fn test_empty_log() {
        let log = ResultLog::new();
        assert!(log.is_empty());
        assert!(log.all_passed());
        assert_eq!(log.passed_count(), 0);
    }
}
