//! # Limit Evaluator
//!
//! Compares one amount against one [`LimitDescriptor`] under a
//! [`BoundMode`] and reports a [`Breach`] when the amount is not allowed.
//!
//! | Descriptor | `Range` mode | `UpperBound` mode | `Coverage` mode |
//! |------------|--------------|-------------------|-----------------|
//! | `Range{min,max}` | `a < min \|\| a > max` | `a > max` | always |
//! | `FullyCovered` | never | never | never |
//! | `Unlimited` | never | never | always |
//! | `NotCovered` | always | always | always |
//!
//! Coverage mode ignores the amount: any descriptor other than
//! `FullyCovered` means the expense is restricted, `Unlimited` included.

use spendpol_core::LimitDescriptor;

/// How a check compares the amount against a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundMode {
    /// Both bounds enforced.
    Range,
    /// Only the upper bound enforced.
    UpperBound,
    /// Amount ignored; only full coverage passes.
    Coverage,
}

/// Why an amount was not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breach {
    /// Amount below `min` or above `max`.
    OutOfRange {
        /// Offending amount.
        amount: u64,
        /// Lower bound.
        min: u64,
        /// Upper bound.
        max: u64,
    },
    /// Amount above `max`.
    AboveMax {
        /// Offending amount.
        amount: u64,
        /// Upper bound.
        max: u64,
    },
    /// The expense is not fully covered for this tier.
    NotFullyCovered,
    /// The expense is not reimbursable at all.
    NotCovered {
        /// Offending amount.
        amount: u64,
    },
}

/// Check `amount` against `limit`.
pub fn check(amount: u64, limit: LimitDescriptor, mode: BoundMode) -> Option<Breach> {
    match (mode, limit) {
        (BoundMode::Coverage, limit) => {
            (!limit.is_fully_covered()).then_some(Breach::NotFullyCovered)
        }
        (_, LimitDescriptor::FullyCovered | LimitDescriptor::Unlimited) => None,
        (_, LimitDescriptor::NotCovered) => Some(Breach::NotCovered { amount }),
        (BoundMode::Range, LimitDescriptor::Range(bounds)) => {
            (!bounds.contains(amount)).then_some(Breach::OutOfRange {
                amount,
                min: bounds.min(),
                max: bounds.max(),
            })
        }
        (BoundMode::UpperBound, LimitDescriptor::Range(bounds)) => {
            (amount > bounds.max()).then_some(Breach::AboveMax {
                amount,
                max: bounds.max(),
            })
        }
    }
}
