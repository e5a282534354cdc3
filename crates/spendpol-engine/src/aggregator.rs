//! # Violation Aggregator
//!
//! Runs the evaluation pipeline for one receipt:
//!
//! ```text
//! raw object ─► MissingBill? ─► MissingTotalAmount? ─► normalize ─► UnknownTier?
//!                                                      (unparsable, or absent from catalog)
//!                   │                  │                                 │
//!                   └──────────────────┴──── single violation, no status ┘
//!                                                                        │
//!                                                                        ▼
//!                          date staleness ─► check battery ─► Accepted / Rejected
//! ```
//!
//! Steps before the check battery short-circuit with one violation and an
//! [`Status::Indeterminate`] result. Once the battery starts, every check
//! runs; none suppresses another.

use std::sync::Arc;

use serde_json::{Map, Value};

use spendpol_core::{PolicyCatalog, Timestamp};

use crate::checks::CHECKS;
use crate::config::{EngineConfig, DEFAULT_MAX_BILL_AGE_DAYS};
use crate::limits;
use crate::normalizer::{normalize_against, RecordDefect};
use crate::receipt::Receipt;
use crate::result::{EvaluationResult, Status, Violation};

/// Clock and tunables for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// The instant bill dates are measured against.
    pub now: Timestamp,
    /// Bills strictly older than this are stale.
    pub max_bill_age: chrono::Duration,
}

impl EvaluationContext {
    /// Context at `now` with the configured staleness window.
    pub fn at(now: Timestamp, config: &EngineConfig) -> Self {
        Self {
            now,
            max_bill_age: config.max_bill_age(),
        }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::at(Timestamp::now(), &EngineConfig::default())
    }
}

/// Evaluate a raw receipt object against `catalog` with the default
/// configuration and the current time.
///
/// Total over JSON values: a non-object is reported as a missing bill.
pub fn evaluate(record: &Value, catalog: &PolicyCatalog) -> EvaluationResult {
    let ctx = EvaluationContext::default();
    match record.as_object() {
        Some(map) => evaluate_record(map, catalog, &ctx),
        None => evaluate_record(&Map::new(), catalog, &ctx),
    }
}

/// Evaluate a raw receipt object (steps 1–6).
pub fn evaluate_record(
    record: &Map<String, Value>,
    catalog: &PolicyCatalog,
    ctx: &EvaluationContext,
) -> EvaluationResult {
    match normalize_against(record, catalog) {
        Ok(receipt) => evaluate_receipt(&receipt, catalog, ctx),
        Err(defect) => {
            tracing::debug!(%defect, "receipt short-circuited");
            EvaluationResult::short_circuit(defect.violation())
        }
    }
}

/// Run the date check and the check battery against a normalized receipt.
///
/// A receipt whose tier the catalog does not define short-circuits as an
/// unknown tier.
pub fn evaluate_receipt(
    receipt: &Receipt,
    catalog: &PolicyCatalog,
    ctx: &EvaluationContext,
) -> EvaluationResult {
    if !catalog.contains_tier(receipt.tier()) {
        let defect = RecordDefect::UnknownTier(receipt.tier().label().to_string());
        tracing::debug!(%defect, "receipt short-circuited");
        return EvaluationResult::short_circuit(defect.violation());
    }

    let mut violations = Vec::new();

    if let Some(violation) = check_bill_date(receipt.bill_date(), ctx) {
        violations.push(violation);
    }

    let amount = receipt.total_amount();
    for def in CHECKS.iter().filter(|def| def.trigger.fires(receipt)) {
        let limit = catalog.lookup(receipt.tier(), def.subcategory);
        if let Some(breach) = limits::check(amount, limit, def.mode) {
            violations.push(def.violation(&breach));
        }
    }

    let result = EvaluationResult::checked(violations);
    tracing::debug!(
        tier = %receipt.tier(),
        total_amount = amount,
        tags = receipt.tags().len(),
        violations = result.violations.len(),
        status = %result.status,
        "receipt evaluated"
    );
    result
}

fn check_bill_date(bill_date: Option<Timestamp>, ctx: &EvaluationContext) -> Option<Violation> {
    let Some(date) = bill_date else {
        return Some(Violation::new(
            "Violation: Missing or malformed 'date' in bill data.",
        ));
    };
    if ctx.now.since(&date) <= ctx.max_bill_age {
        return None;
    }
    let window = if ctx.max_bill_age.num_days() == i64::from(DEFAULT_MAX_BILL_AGE_DAYS) {
        "one month".to_string()
    } else {
        format!("{} days", ctx.max_bill_age.num_days())
    };
    Some(Violation::new(format!(
        "Violation: Bill date {} is older than {window}.",
        date.date_string()
    )))
}

// ---------------------------------------------------------------------------
// PolicyEngine
// ---------------------------------------------------------------------------

/// A catalog and configuration bundled for repeated evaluation.
///
/// Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    catalog: Arc<PolicyCatalog>,
    config: EngineConfig,
}

impl PolicyEngine {
    /// Build an engine over a shared catalog.
    pub fn new(catalog: Arc<PolicyCatalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// An engine over the built-in catalog with default configuration.
    pub fn standard() -> Self {
        Self::new(Arc::new(PolicyCatalog::standard()), EngineConfig::default())
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluation context at `now` under this engine's configuration.
    pub fn context_at(&self, now: Timestamp) -> EvaluationContext {
        EvaluationContext::at(now, &self.config)
    }

    /// Evaluate a raw receipt object at the current time.
    pub fn evaluate(&self, record: &Map<String, Value>) -> EvaluationResult {
        self.evaluate_at(record, Timestamp::now())
    }

    /// Evaluate a raw receipt object at `now`.
    pub fn evaluate_at(&self, record: &Map<String, Value>, now: Timestamp) -> EvaluationResult {
        evaluate_record(record, &self.catalog, &self.context_at(now))
    }

    /// Evaluate `record` at `now` and write the result onto it.
    pub fn annotate_at(&self, record: &mut Map<String, Value>, now: Timestamp) -> Status {
        let result = self.evaluate_at(record, now);
        result.annotate(record);
        result.status
    }
}
