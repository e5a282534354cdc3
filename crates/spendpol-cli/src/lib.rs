//! # spendpol-cli: Expense Policy Command-Line Interface
//!
//! Thin driver over `spendpol-engine`: reads receipt JSON from a file or
//! stdin, writes the annotated JSON, and reports the verdict through the
//! exit code.
//!
//! ## Subcommands
//!
//! - `evaluate`: Evaluate one receipt or an array of receipts
//! - `catalog`: Show or validate a policy catalog
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success; every receipt accepted |
//! | 1 | Fatal error (unreadable input, bad catalog, wrong input shape) |
//! | 2 | At least one receipt rejected or indeterminate; catalog check failed |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the binary; handlers live here and return
//!   `anyhow::Result<u8>`.
//! - No policy logic here. Handlers delegate to the engine.
//! - stdout carries data only. Diagnostics go to stderr through `tracing`.

use std::path::Path;

use anyhow::Context;

use spendpol_core::PolicyCatalog;
use spendpol_engine::EngineConfig;

pub mod catalog;
pub mod evaluate;

/// Exit code for a run where some record was not accepted.
pub const EXIT_NOT_ACCEPTED: u8 = 2;

/// Load the catalog named by `flag`, falling back to the configuration's
/// catalog and then to the built-in one.
pub fn resolve_catalog(flag: Option<&Path>, config: &EngineConfig) -> anyhow::Result<PolicyCatalog> {
    match flag {
        Some(path) => PolicyCatalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => config.load_catalog().context("failed to load configured catalog"),
    }
}

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}
