//! # Evaluation Results
//!
//! [`Violation`], [`Status`] and [`EvaluationResult`], plus the rule for
//! writing a result back onto the input object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One human-readable record of a failed policy check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violation {
    /// The message, always prefixed `"Violation: "`.
    pub message: String,
}

impl Violation {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Aggregate verdict for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// All checks passed.
    Accepted,
    /// At least one check failed.
    Rejected,
    /// Evaluation stopped before the tier-scoped checks ran.
    Indeterminate,
}

impl Status {
    /// The `status` field written to output, or `None` when the field is
    /// omitted.
    pub fn output_label(&self) -> Option<&'static str> {
        match self {
            Self::Accepted => Some("Accepted"),
            Self::Rejected => Some("Rejected"),
            Self::Indeterminate => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.output_label().unwrap_or("Indeterminate"))
    }
}

/// Violations in check order plus the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Violations in the order the checks ran. Not deduplicated.
    pub violations: Vec<Violation>,
    /// The verdict.
    pub status: Status,
}

impl EvaluationResult {
    /// Result of a full check battery: `Accepted` iff no violations.
    pub fn checked(violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            Status::Accepted
        } else {
            Status::Rejected
        };
        Self { violations, status }
    }

    /// Result of an evaluation that stopped early with a single violation.
    pub fn short_circuit(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
            status: Status::Indeterminate,
        }
    }

    /// Whether the receipt was accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }

    /// Write `violations` and `status` onto `record`.
    ///
    /// Previous values of both fields are replaced; `status` is removed when
    /// the result is indeterminate.
    pub fn annotate(&self, record: &mut Map<String, Value>) {
        let violations = self
            .violations
            .iter()
            .map(|v| Value::String(v.message.clone()))
            .collect();
        record.insert("violations".to_string(), Value::Array(violations));
        match self.status.output_label() {
            Some(label) => {
                record.insert("status".to_string(), Value::String(label.to_string()));
            }
            None => {
                record.remove("status");
            }
        }
    }
}
