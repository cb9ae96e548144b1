use crate::error::AnnotateError;
use crate::parser::{ParsedReport, Violation};
use async_trait::async_trait;
use tracing::{error, info};

/// Destination for per-violation review comments. The pull-request
/// coordinates and credentials are bound into the implementation; the
/// orchestrator only supplies the comment body.
#[async_trait]
pub trait Annotate {
    async fn annotate(&self, body: &str) -> Result<(), AnnotateError>;
}

/// Final verdict of a gate run. Maps 1:1 to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No violations at all.
    Clean,
    /// Violations were reported, but none crossed the critical threshold.
    NonCritical { reported: usize },
    /// At least one critical violation; the surrounding workflow must fail.
    Critical { reported: usize },
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Critical { .. })
    }
}

/// Comment body for a single violation. Field order is fixed (rule, file,
/// line, comment) so reruns produce identical comments; absent line and
/// comment fields are simply omitted.
pub fn format_message(violation: &Violation) -> String {
    let mut lines = vec![
        format!("⚠️ Policy violation detected for rule {}.", violation.rule),
        format!("File: {}", violation.file),
    ];

    if let Some(line) = violation.line {
        lines.push(format!("Line: {line}"));
    }
    if let Some(comment) = violation.comment.as_deref() {
        if !comment.is_empty() {
            lines.push(format!("Details: {comment}"));
        }
    }

    lines.join("\n")
}

/// Report every violation and decide the run's outcome.
///
/// Violations are posted strictly one at a time, each `annotate` call
/// awaited before the next is issued. This keeps comments in report order
/// and avoids bursting a rate-limited endpoint. A failed post aborts the
/// remaining loop; there is no retry. With no annotator the formatted
/// messages are logged locally instead (dry-run mode).
pub async fn report(
    parsed: &ParsedReport,
    annotator: Option<&dyn Annotate>,
) -> Result<Outcome, AnnotateError> {
    if parsed.violations.is_empty() {
        info!("No policy violations detected.");
        return Ok(Outcome::Clean);
    }

    for violation in &parsed.violations {
        let body = format_message(violation);
        match annotator {
            Some(annotator) => {
                annotator.annotate(&body).await?;
                info!(
                    "Commented on PR for rule {} in {}.",
                    violation.rule, violation.file
                );
            }
            None => info!("[dry-run] {body}"),
        }
    }

    let reported = parsed.violations.len();
    if parsed.has_critical_violation() {
        error!("Critical policy violations detected. Failing workflow.");
        Ok(Outcome::Critical { reported })
    } else {
        info!("Policy violations detected but none were critical.");
        Ok(Outcome::NonCritical { reported })
    }
}
