//! # Canonical Receipt
//!
//! The typed record the checks run against. A [`Receipt`] is built once per
//! evaluation, either by the normalizer from raw JSON or directly by callers
//! that already hold typed data, and is never mutated afterwards.

use serde::{Deserialize, Serialize};

use spendpol_core::{Tier, Timestamp};

use crate::classifier::{classify, TagSet};

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text item description.
    pub name: String,
    /// Line total. Advisory only; checks compare the bill total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl LineItem {
    /// A line item with no total.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: None,
        }
    }
}

/// A normalized receipt with its derived tag set.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    tier: Tier,
    total_amount: u64,
    bill_date: Option<Timestamp>,
    vendor_category: String,
    items: Vec<LineItem>,
    tags: TagSet,
}

impl Receipt {
    /// Build a receipt. Tags are derived from `items` here so they always
    /// agree with the item list.
    ///
    /// `bill_date` is `None` when the source date was missing or malformed.
    pub fn new(
        tier: Tier,
        total_amount: u64,
        bill_date: Option<Timestamp>,
        vendor_category: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        let tags = classify(&items);
        Self {
            tier,
            total_amount,
            bill_date,
            vendor_category: vendor_category.into(),
            items,
            tags,
        }
    }

    /// The resolved employee tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Bill total in minor currency units.
    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    /// Bill date, if present and well-formed.
    pub fn bill_date(&self) -> Option<Timestamp> {
        self.bill_date
    }

    /// Vendor category as supplied (not case-folded).
    pub fn vendor_category(&self) -> &str {
        &self.vendor_category
    }

    /// Line items in receipt order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Tags derived from the line items.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}
