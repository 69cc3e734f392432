//! Human-readable rendering of diagnostic results.

use crate::condition::ConditionStatus;
use crate::result::{DiagnosticResult, ResultStatus};

/// Trait for rendering results into formatted output strings.
pub trait ResultRenderer {
    /// Renders a single result into a formatted string.
    fn render(&self, result: &DiagnosticResult) -> String;
}

/// Renders results as compact terminal blocks.
///
/// Produces output like:
/// ```text
/// [FAIL] components/modelmesh/removal (critical, blocking)
///   - Compatible=False (VersionIncompatible): ModelMesh serving is managed
///     remediation: set modelmeshserving.managementState to Removed
///   impacted: DataScienceCluster/default-dsc
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn status_tag(&self, status: ResultStatus) -> String {
        let tag = format!("[{status}]");
        match status {
            ResultStatus::Pass => self.paint(&tag, "32"),
            ResultStatus::Fail => self.paint(&tag, "31"),
            ResultStatus::Error => self.paint(&tag, "33"),
        }
    }
}

impl ResultRenderer for TerminalRenderer {
    fn render(&self, result: &DiagnosticResult) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} {}/{}/{}",
            self.status_tag(result.status()),
            result.group,
            result.kind,
            result.name
        ));
        if let (Some(severity), Some(impact)) = (result.severity(), result.impact()) {
            if result.is_failing() {
                out.push_str(&format!(" ({severity}, {impact})"));
            }
        }
        out.push('\n');

        for cond in &result.conditions {
            out.push_str(&format!(
                "  - {}={} ({})",
                cond.condition_type, cond.status, cond.reason
            ));
            if !cond.message.is_empty() {
                out.push_str(&format!(": {}", cond.message));
            }
            out.push('\n');
            if cond.status != ConditionStatus::True {
                if let Some(remediation) = &cond.remediation {
                    out.push_str(&format!("    remediation: {remediation}\n"));
                }
            }
        }

        for object in &result.impacted_objects {
            out.push_str(&format!("  impacted: {object}\n"));
        }

        out
    }
}
