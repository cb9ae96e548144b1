mod extract;
mod violation;

pub use extract::{extract_fence, extract_first_json_object, find_matching_close, locate_json_start};
pub use violation::{ParsedReport, RuleId, Strategy, Violation};

use crate::error::ParserError;
use serde_json::Value;
use tracing::{debug, warn};

/// Parse a reviewer verdict out of arbitrary text.
///
/// Strategies are tried in order until one yields syntactically valid
/// JSON: the raw text as-is, the first fenced code block, the first
/// bracket-delimited substring, and finally the trimmed raw text. The
/// winning document's `violations` field becomes the report; a missing
/// or non-list field means zero violations. Fails with
/// [`ParserError::NoJson`] when no strategy produces valid JSON.
pub fn parse_result(raw: &str) -> Result<ParsedReport, ParserError> {
    let (value, strategy) = extract_value(raw).ok_or_else(|| ParserError::NoJson {
        raw: raw.to_string(),
    })?;

    if strategy != Strategy::Direct {
        warn!(
            "reviewer output was not plain JSON; payload recovered via {:?} strategy",
            strategy
        );
    }

    let violations = coerce_violations(value)?;
    Ok(ParsedReport {
        violations,
        strategy,
    })
}

fn extract_value(raw: &str) -> Option<(Value, Strategy)> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some((value, Strategy::Direct));
    }

    if let Some(inner) = extract_fence(raw) {
        if let Ok(value) = serde_json::from_str(inner) {
            return Some((value, Strategy::Fenced));
        }
    }

    if let Some(candidate) = extract_first_json_object(raw) {
        if let Ok(value) = serde_json::from_str(candidate) {
            return Some((value, Strategy::Delimited));
        }
    }

    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Some((value, Strategy::Trimmed));
    }

    None
}

fn coerce_violations(mut value: Value) -> Result<Vec<Violation>, ParserError> {
    match value.get_mut("violations").map(Value::take) {
        Some(list @ Value::Array(_)) => {
            serde_json::from_value(list).map_err(ParserError::InvalidViolation)
        }
        _ => {
            debug!("payload has no violations array; treating as zero violations");
            Ok(Vec::new())
        }
    }
}
