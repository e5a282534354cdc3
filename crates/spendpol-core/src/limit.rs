//! # Limit Descriptors
//!
//! A [`LimitDescriptor`] is the shape of one policy bound: a numeric range,
//! "fully covered", "unlimited", or "not covered". Amounts are non-negative
//! integers in minor currency units.
//!
//! ## Invariant
//!
//! `Range` carries a [`Bounds`] whose fields are private. The only ways to
//! obtain one are [`Bounds::new`] (rejects `min > max`), [`Bounds::up_to`]
//! (lower bound zero), and deserialization, which routes through
//! `Bounds::new`. A catalog therefore never holds an inverted range.
//!
//! ## Wire Form
//!
//! ```yaml
//! Travel.BusinessTrips: { min: 0, max: 160000 }
//! Travel.MileageReimbursement: { max: 10000 }   # min defaults to 0
//! Travel.ParkingTolls: fully_covered
//! OfficeSupplies.WorkTools: unlimited
//! Communication.MobileInternet: not_covered
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Inclusive `[min, max]` amount bounds with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: u64,
    max: u64,
}

impl Bounds {
    /// Zero-width bounds. Any positive amount falls outside them.
    pub const ZERO: Bounds = Bounds { min: 0, max: 0 };

    /// Build bounds, rejecting `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, CatalogError> {
        if min > max {
            return Err(CatalogError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds `[0, max]`. Always valid.
    pub const fn up_to(max: u64) -> Self {
        Self { min: 0, max }
    }

    /// Lower bound.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Whether `amount` lies within `[min, max]`.
    pub fn contains(&self, amount: u64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// The policy bound attached to one (tier, subcategory) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLimit", into = "RawLimit")]
pub enum LimitDescriptor {
    /// Amount must fall within the bounds.
    Range(Bounds),
    /// Expense is reimbursed in full; no amount limit.
    FullyCovered,
    /// No amount limit.
    Unlimited,
    /// Expense is not reimbursable at any amount.
    NotCovered,
}

impl LimitDescriptor {
    /// The deny-by-default descriptor returned for cells a catalog leaves
    /// undefined.
    pub const ZERO_RANGE: LimitDescriptor = LimitDescriptor::Range(Bounds::ZERO);

    /// A validated range descriptor.
    pub fn range(min: u64, max: u64) -> Result<Self, CatalogError> {
        Bounds::new(min, max).map(Self::Range)
    }

    /// A `[0, max]` range descriptor.
    pub const fn up_to(max: u64) -> Self {
        Self::Range(Bounds::up_to(max))
    }

    /// The bounds, if this is a range.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Range(bounds) => Some(*bounds),
            Self::FullyCovered | Self::Unlimited | Self::NotCovered => None,
        }
    }

    /// Whether this descriptor is `FullyCovered`.
    pub fn is_fully_covered(&self) -> bool {
        matches!(self, Self::FullyCovered)
    }
}

impl std::fmt::Display for LimitDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range(bounds) => write!(f, "{bounds}"),
            Self::FullyCovered => f.write_str("fully covered"),
            Self::Unlimited => f.write_str("unlimited"),
            Self::NotCovered => f.write_str("not covered"),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde representation
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Bounds {
        #[serde(default)]
        min: u64,
        max: u64,
    },
    Keyword(LimitKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LimitKeyword {
    FullyCovered,
    Unlimited,
    NotCovered,
}

impl TryFrom<RawLimit> for LimitDescriptor {
    type Error = CatalogError;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        match raw {
            RawLimit::Bounds { min, max } => LimitDescriptor::range(min, max),
            RawLimit::Keyword(LimitKeyword::FullyCovered) => Ok(Self::FullyCovered),
            RawLimit::Keyword(LimitKeyword::Unlimited) => Ok(Self::Unlimited),
            RawLimit::Keyword(LimitKeyword::NotCovered) => Ok(Self::NotCovered),
        }
    }
}

impl From<LimitDescriptor> for RawLimit {
    fn from(limit: LimitDescriptor) -> Self {
        match limit {
            LimitDescriptor::Range(bounds) => RawLimit::Bounds {
                min: bounds.min,
                max: bounds.max,
            },
            LimitDescriptor::FullyCovered => RawLimit::Keyword(LimitKeyword::FullyCovered),
            LimitDescriptor::Unlimited => RawLimit::Keyword(LimitKeyword::Unlimited),
            LimitDescriptor::NotCovered => RawLimit::Keyword(LimitKeyword::NotCovered),
        }
    }
}
