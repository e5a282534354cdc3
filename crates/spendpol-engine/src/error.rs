//! # Engine Errors
//!
//! Only two things can fail in the engine: the batch boundary receiving a
//! shape it does not accept, and loading configuration or catalogs from
//! disk. Everything wrong with an individual receipt is a violation, not an
//! error.

use thiserror::Error;

use spendpol_core::SpendpolError;

/// Error raised at the engine's boundaries.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Batch input was neither an object nor an array of objects.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Engine configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from the foundational crate (catalog loading, IO).
    #[error(transparent)]
    Core(#[from] SpendpolError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
