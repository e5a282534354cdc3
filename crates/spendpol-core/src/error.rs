//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types raised by the foundational crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Catalog errors are raised only while a catalog is being built or
//!   loaded. Once a [`PolicyCatalog`](crate::PolicyCatalog) exists, lookups
//!   are infallible.
//! - Data-quality problems in receipts are not errors at this layer; the
//!   engine reports them as violations.

use thiserror::Error;

/// Top-level error type for the foundational crate.
#[derive(Error, Debug)]
pub enum SpendpolError {
    /// Policy catalog construction failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Employee level string did not name a known tier.
    #[error("unknown tier: {0:?}")]
    UnknownTier(String),

    /// Subcategory identifier did not name a known subcategory.
    #[error("unknown subcategory: {0:?}")]
    UnknownSubcategory(String),

    /// Timestamp could not be constructed from the given input.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error while building or loading a policy catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A range limit built in code had its lower bound above its upper
    /// bound. Documents report the same defect as [`CatalogError::Parse`].
    #[error("invalid range: min {min} exceeds max {max}")]
    InvalidRange {
        /// Declared lower bound.
        min: u64,
        /// Declared upper bound.
        max: u64,
    },

    /// The catalog document could not be parsed, including unknown tier or
    /// subcategory keys.
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// The catalog could not be rendered.
    #[error("failed to render catalog: {0}")]
    Render(String),
}
