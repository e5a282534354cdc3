//! # Batch Evaluation
//!
//! The top-level entry point: accepts either a single receipt object or an
//! array of receipt objects, annotates each with `violations` and `status`,
//! and returns the same shape it was given.
//!
//! Records are independent. The parallel path splits the array into
//! contiguous chunks, one scoped thread per chunk, and reassembles results
//! in input order, so its output is identical to the sequential path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use spendpol_core::Timestamp;

use crate::aggregator::PolicyEngine;
use crate::error::EngineError;
use crate::result::{EvaluationResult, Status};

/// Counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Records evaluated.
    pub total: usize,
    /// Records with status `Accepted`.
    pub accepted: usize,
    /// Records with status `Rejected`.
    pub rejected: usize,
    /// Records that short-circuited before the check battery.
    pub indeterminate: usize,
    /// Violations across all records.
    pub violations: usize,
}

impl BatchSummary {
    /// Tally `results`.
    pub fn from_results(results: &[EvaluationResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            summary.violations += result.violations.len();
            match result.status {
                Status::Accepted => summary.accepted += 1,
                Status::Rejected => summary.rejected += 1,
                Status::Indeterminate => summary.indeterminate += 1,
            }
            summary
        })
    }

    /// Whether every record was accepted.
    pub fn all_accepted(&self) -> bool {
        self.accepted == self.total
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} receipt(s): {} accepted, {} rejected, {} indeterminate ({} violation(s))",
            self.total, self.accepted, self.rejected, self.indeterminate, self.violations
        )
    }
}

/// Annotated output plus per-record results.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// The input with `violations` and `status` written onto every record.
    pub output: Value,
    /// Results in input order.
    pub results: Vec<EvaluationResult>,
    /// Tally of `results`.
    pub summary: BatchSummary,
}

enum Shape {
    Single,
    Sequence,
}

impl PolicyEngine {
    /// Evaluate a receipt or array of receipts at the current time.
    ///
    /// # Errors
    ///
    /// [`EngineError::TypeMismatch`] when `input` is neither an object nor
    /// an array of objects.
    pub fn evaluate_all(&self, input: Value) -> Result<Value, EngineError> {
        Ok(self.evaluate_batch_at(input, Timestamp::now(), false)?.output)
    }

    /// [`evaluate_all`](Self::evaluate_all) with records spread over worker
    /// threads.
    pub fn evaluate_all_parallel(&self, input: Value) -> Result<Value, EngineError> {
        Ok(self.evaluate_batch_at(input, Timestamp::now(), true)?.output)
    }

    /// Evaluate a receipt or array of receipts at `now`.
    pub fn evaluate_batch_at(
        &self,
        input: Value,
        now: Timestamp,
        parallel: bool,
    ) -> Result<BatchReport, EngineError> {
        let (shape, mut records) = split_input(input)?;

        let workers = if parallel {
            self.config().worker_count(records.len())
        } else {
            1
        };
        let results = if workers > 1 {
            self.annotate_parallel(&mut records, now, workers)
        } else {
            records
                .iter_mut()
                .map(|record| self.annotate_record(record, now))
                .collect()
        };

        let summary = BatchSummary::from_results(&results);
        tracing::info!(
            total = summary.total,
            accepted = summary.accepted,
            rejected = summary.rejected,
            indeterminate = summary.indeterminate,
            workers,
            "batch evaluated"
        );

        let output = match shape {
            Shape::Single => records
                .pop()
                .map(Value::Object)
                .unwrap_or_else(|| Value::Object(Map::new())),
            Shape::Sequence => Value::Array(records.into_iter().map(Value::Object).collect()),
        };
        Ok(BatchReport {
            output,
            results,
            summary,
        })
    }

    fn annotate_record(&self, record: &mut Map<String, Value>, now: Timestamp) -> EvaluationResult {
        let result = self.evaluate_at(record, now);
        result.annotate(record);
        result
    }

    fn annotate_parallel(
        &self,
        records: &mut [Map<String, Value>],
        now: Timestamp,
        workers: usize,
    ) -> Vec<EvaluationResult> {
        let chunk_size = records.len().div_ceil(workers).max(1);
        std::thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks_mut(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter_mut()
                            .map(|record| self.annotate_record(record, now))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }
}

fn split_input(input: Value) -> Result<(Shape, Vec<Map<String, Value>>), EngineError> {
    match input {
        Value::Object(record) => Ok((Shape::Single, vec![record])),
        Value::Array(items) => {
            let records = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(EngineError::TypeMismatch(format!(
                        "element {index} is {}, expected an object",
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((Shape::Sequence, records))
        }
        other => Err(EngineError::TypeMismatch(format!(
            "input is {}, expected an object or an array of objects",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
