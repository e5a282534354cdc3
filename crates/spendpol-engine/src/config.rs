//! # Engine Configuration
//!
//! Tunables that are not part of the policy itself. Read from YAML (or
//! JSON) by the CLI's `--config` flag; every field has a default so an
//! empty document is a valid configuration.
//!
//! ```yaml
//! max_bill_age_days: 30
//! max_parallel: 8
//! catalog_path: policy/catalog.yaml
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use spendpol_core::PolicyCatalog;

use crate::error::EngineError;

/// Default staleness window for bill dates.
pub const DEFAULT_MAX_BILL_AGE_DAYS: u32 = 30;

/// Upper bound on batch worker threads.
const MAX_WORKERS: usize = 64;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Bills older than this many days are stale.
    pub max_bill_age_days: u32,
    /// Worker threads for parallel batch evaluation. `None` uses the
    /// machine's available parallelism.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
    /// Policy catalog file. `None` uses the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_bill_age_days: DEFAULT_MAX_BILL_AGE_DAYS,
            max_parallel: None,
            catalog_path: None,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration document.
    pub fn from_yaml_str(document: &str) -> Result<Self, EngineError> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(document).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    ///
    /// A relative `catalog_path` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let document = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&document)?;
        if let (Some(catalog), Some(dir)) = (&config.catalog_path, path.parent()) {
            if catalog.is_relative() {
                config.catalog_path = Some(dir.join(catalog));
            }
        }
        Ok(config)
    }

    /// The staleness window as a duration.
    pub fn max_bill_age(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.max_bill_age_days))
    }

    /// Worker threads to use for a batch of `len` records.
    pub fn worker_count(&self, len: usize) -> usize {
        let configured = self.max_parallel.map(|n| n.max(1)).unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(4, |n| n.get())
        });
        configured.min(MAX_WORKERS).min(len.max(1))
    }

    /// The catalog this configuration names, or the built-in one.
    pub fn load_catalog(&self) -> Result<PolicyCatalog, EngineError> {
        match &self.catalog_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading policy catalog");
                Ok(PolicyCatalog::load(path)?)
            }
            None => Ok(PolicyCatalog::standard()),
        }
    }
}
