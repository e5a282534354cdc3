//! # spendpol-core: Foundational Types for the Spending-Policy Engine
//!
//! This crate defines the vocabulary every other crate in the workspace
//! speaks: who is spending ([`Tier`]), what they are spending on
//! ([`Subcategory`] within an [`ExpenseCategory`]), how much they may spend
//! ([`LimitDescriptor`]), and the table tying the three together
//! ([`PolicyCatalog`]).
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for policy axes.** Tiers and subcategories are fixed
//!    enums with exhaustive `match` everywhere. Adding a subcategory forces
//!    every check table and label function to handle it.
//!
//! 2. **Validated limits.** A `LimitDescriptor::Range` can only be built
//!    through [`Bounds::new`], which rejects `min > max`. Deserialized
//!    catalogs go through the same constructor.
//!
//! 3. **Immutable catalog.** [`PolicyCatalog`] has no `&mut self` API. Build
//!    it once, wrap it in an `Arc`, share it across evaluations.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] wraps `DateTime<Utc>`; epoch
//!    milliseconds from upstream extractors convert through it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `spendpol-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod category;
pub mod error;
pub mod limit;
pub mod temporal;
pub mod tier;

// Re-export primary types for ergonomic imports.
pub use catalog::PolicyCatalog;
pub use category::{ExpenseCategory, Subcategory, SUBCATEGORY_COUNT};
pub use error::{CatalogError, SpendpolError};
pub use limit::{Bounds, LimitDescriptor};
pub use temporal::Timestamp;
pub use tier::Tier;
