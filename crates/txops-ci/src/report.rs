//! Run summary rendering and the optional JSON report.

use crate::error::CiError;
use crate::gate::CiGate;
use crate::pipeline::PipelineResult;
use crate::runner::rule;
use std::fmt::Write as _;
use std::path::Path;

/// Render the end-of-run summary: one line per recorded check followed by
/// next-step guidance.
pub fn render_summary(result: &PipelineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "📊 LOCAL CI SUMMARY");
    let _ = writeln!(out, "{}", rule());

    for check in result.checks.iter() {
        let status = if check.passed { "✅ PASS" } else { "❌ FAIL" };
        let _ = writeln!(out, "{} - {}", status, check.name);
    }
    for name in &result.skipped {
        let _ = writeln!(out, "⚠️  SKIP - {}", name);
    }

    if result.success() {
        let _ = writeln!(out, "\n🎉 All checks passed! Ready to push to GitHub.");
        let _ = writeln!(out, "\n💡 Next steps:");
        let _ = writeln!(out, "   git add .");
        let _ = writeln!(out, "   git commit -m \"<message>\"");
        let _ = writeln!(out, "   git push");
    } else {
        let verdict = CiGate::evaluate(&result.checks);
        for violation in &verdict.violations {
            let _ = writeln!(out, "   {}", violation);
        }
        let _ = writeln!(out, "\n❌ Some checks failed. Please fix issues before pushing.");
    }
    out
}

/// Write `result` as pretty-printed JSON to `path`.
pub fn write_json_report(result: &PipelineResult, path: &Path) -> Result<(), CiError> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).map_err(|source| CiError::Report {
        path: path.to_path_buf(),
        source,
    })
}
