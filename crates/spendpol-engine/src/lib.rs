//! # spendpol-engine: Policy Compliance Rule Engine
//!
//! Evaluates expense receipts against a [`PolicyCatalog`] and produces an
//! ordered list of violations plus an accept/reject verdict.
//!
//! - **Normalizer** (`normalizer.rs`): unwraps extended-JSON envelopes and
//!   resolves the tier against the catalog, turning a loose JSON object into
//!   a [`Receipt`] or a short-circuit [`RecordDefect`].
//!
//! - **Classifier** (`classifier.rs`): derives [`Tag`]s from line-item names
//!   by case-insensitive substring match.
//!
//! - **Limits** (`limits.rs`): compares one amount against one
//!   [`LimitDescriptor`](spendpol_core::LimitDescriptor).
//!
//! - **Checks** (`checks.rs`): the fixed, ordered battery of policy checks.
//!
//! - **Aggregator** (`aggregator.rs`): runs the pipeline and computes
//!   [`Status`].
//!
//! - **Batch** (`batch.rs`): single-or-sequence entry point with a parallel
//!   variant and a [`BatchSummary`].
//!
//! ## Purity
//!
//! Evaluation performs no I/O and never blocks. The catalog is read-only
//! and shared through an `Arc`, so a [`PolicyEngine`] can be used from many
//! threads at once.

pub mod aggregator;
pub mod batch;
pub mod checks;
pub mod classifier;
pub mod config;
pub mod error;
pub mod limits;
pub mod normalizer;
pub mod receipt;
pub mod result;

pub use aggregator::{evaluate, evaluate_receipt, EvaluationContext, PolicyEngine};
pub use batch::{BatchReport, BatchSummary};
pub use classifier::{classify, Tag, TagSet};
pub use config::EngineConfig;
pub use error::EngineError;
pub use normalizer::{normalize, normalize_against, RecordDefect};
pub use receipt::{LineItem, Receipt};
pub use result::{EvaluationResult, Status, Violation};

pub use spendpol_core::PolicyCatalog;
