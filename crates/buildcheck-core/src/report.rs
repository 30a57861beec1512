//! Console report and the run's exit-code decision.

use std::io::{self, Write};

use crate::result::ResultLog;

/// Width of the separator rules.
const RULE_WIDTH: usize = 50;

/// Next steps printed after a fully passing run.
pub const USAGE_GUIDE: [&str; 4] = [
    "1. Set your provider API key in the environment (e.g. GEMINI_API_KEY)",
    "2. Build the server: npm run build",
    "3. Register the server in your MCP client configuration",
    "4. Start the server: npm start",
];

/// Pass/total counts for a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_log(log: &ResultLog) -> Self {
        Self {
            passed: log.passed_count(),
            total: log.len(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// `0` when every result passed, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() { 0 } else { 1 }
    }
}

/// Print the report header.
pub fn render_header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "🧪 {title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Print every result, the summary line, and the closing banner.
pub fn render(out: &mut impl Write, log: &ResultLog) -> io::Result<Summary> {
    for result in log {
        writeln!(out, "{}", result.message())?;
    }

    let summary = Summary::from_log(log);
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "📊 {}/{} tests passed", summary.passed, summary.total)?;

    if summary.all_passed() {
        writeln!(out)?;
        writeln!(out, "🎉 All checks passed! The server is ready to use.")?;
        writeln!(out)?;
        writeln!(out, "Next steps:")?;
        for step in USAGE_GUIDE {
            writeln!(out, "  {step}")?;
        }
    } else {
        writeln!(out)?;
        writeln!(
            out,
            "⚠️  {} check(s) failed. Fix the issues above before using the server.",
            summary.total - summary.passed
        )?;
    }

    Ok(summary)
}
