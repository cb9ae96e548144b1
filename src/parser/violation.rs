use serde::Deserialize;
use std::fmt;

/// Rule identifier as emitted by the reviewer. Semantically numeric, but
/// the reviewer may send it as a JSON number or as a string, so both
/// representations are kept and coerced on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleId {
    Numeric(f64),
    Textual(String),
}

impl RuleId {
    /// Numeric value of the rule id, if it has one. Textual ids that do
    /// not parse as a number yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleId::Numeric(n) => Some(*n),
            RuleId::Textual(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::Numeric(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            RuleId::Numeric(n) => write!(f, "{n}"),
            RuleId::Textual(s) => f.write_str(s),
        }
    }
}

/// A single policy violation reported by the reviewer. `rule` and `file`
/// are required; `line` and `comment` may be absent and their absence
/// must not break message formatting.
#[derive(Debug, Clone, Deserialize)]
pub struct Violation {
    pub rule: RuleId,

    pub file: String,

    #[serde(default)]
    pub line: Option<u32>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl Violation {
    /// A violation is critical when its coerced rule id is a valid number
    /// less than or equal to 2. Non-numeric rule ids are never critical.
    pub fn is_critical(&self) -> bool {
        self.rule.as_number().is_some_and(|n| n <= 2.0)
    }
}

/// Which step of the extraction cascade recovered the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The raw text parsed as JSON directly.
    Direct,
    /// The payload was inside a fenced code block.
    Fenced,
    /// The payload was the first bracket-delimited substring.
    Delimited,
    /// The raw text parsed after trimming surrounding whitespace.
    Trimmed,
}

/// Parsed reviewer verdict. Violations keep the insertion order of the
/// source payload; nothing downstream re-sorts them.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub violations: Vec<Violation>,
    pub strategy: Strategy,
}

impl ParsedReport {
    pub fn has_critical_violation(&self) -> bool {
        self.violations.iter().any(Violation::is_critical)
    }
}
