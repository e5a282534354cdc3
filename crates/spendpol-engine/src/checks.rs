//! # Policy Check Battery
//!
//! The fixed, ordered list of amount checks run for every receipt that
//! passes normalization. Order here is the order violations appear in.
//!
//! Each [`CheckDef`] names the subcategory it reads from the catalog, the
//! [`Trigger`] that decides whether it applies to a receipt, the
//! [`BoundMode`] used for the comparison, and the wording of its message.
//!
//! `Business Trips` is [`Trigger::Always`]: every receipt's total is held
//! against the tier's business-trip bounds whether or not anything on it
//! looks like travel.

use spendpol_core::{Subcategory, SUBCATEGORY_COUNT};

use crate::classifier::Tag;
use crate::limits::{BoundMode, Breach};
use crate::receipt::Receipt;
use crate::result::Violation;

/// When a check applies to a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Every receipt.
    Always,
    /// Receipts carrying the tag.
    Tagged(Tag),
    /// Receipts whose vendor category equals the string (ASCII
    /// case-insensitive), or that carry the tag.
    VendorOrTagged(&'static str, Tag),
}

impl Trigger {
    /// Whether the trigger fires for `receipt`.
    pub fn fires(&self, receipt: &Receipt) -> bool {
        match self {
            Self::Always => true,
            Self::Tagged(tag) => receipt.tags().contains(*tag),
            Self::VendorOrTagged(vendor, tag) => {
                receipt.vendor_category().eq_ignore_ascii_case(vendor)
                    || receipt.tags().contains(*tag)
            }
        }
    }
}

/// One entry in the check battery.
#[derive(Debug, Clone, Copy)]
pub struct CheckDef {
    /// Subcategory looked up in the catalog.
    pub subcategory: Subcategory,
    /// Applicability.
    pub trigger: Trigger,
    /// Comparison mode.
    pub mode: BoundMode,
    /// What the message calls the expense ("Hotel stay expense").
    pub subject: &'static str,
    /// Policy name inserted before "policy limits" in range messages.
    pub scope: &'static str,
    /// Period appended to upper-bound messages (" per month").
    pub period: &'static str,
}

impl CheckDef {
    const fn new(
        subcategory: Subcategory,
        trigger: Trigger,
        mode: BoundMode,
        subject: &'static str,
    ) -> Self {
        Self {
            subcategory,
            trigger,
            mode,
            subject,
            scope: "",
            period: "",
        }
    }

    const fn scoped(mut self, scope: &'static str) -> Self {
        self.scope = scope;
        self
    }

    const fn per(mut self, period: &'static str) -> Self {
        self.period = period;
        self
    }

    /// Render the violation for `breach`.
    pub fn violation(&self, breach: &Breach) -> Violation {
        let message = match breach {
            Breach::OutOfRange { amount, min, max } => format!(
                "Violation: {} {amount} exceeds {}policy limits ({min} - {max}).",
                self.subject, self.scope
            ),
            Breach::AboveMax { amount, max } => format!(
                "Violation: {} {amount} exceeds policy limit of {max}{}.",
                self.subject, self.period
            ),
            Breach::NotFullyCovered => format!(
                "Violation: {} are not fully covered under policy.",
                self.subject
            ),
            Breach::NotCovered { amount } => format!(
                "Violation: {} {amount} is not covered under policy.",
                self.subject
            ),
        };
        Violation::new(message)
    }
}

/// The battery, in execution order. One check per subcategory.
pub const CHECKS: [CheckDef; SUBCATEGORY_COUNT] = [
    CheckDef::new(
        Subcategory::BusinessTrips,
        Trigger::Always,
        BoundMode::Range,
        "Total amount",
    )
    .scoped("Business Trips "),
    CheckDef::new(
        Subcategory::LocalTransportation,
        Trigger::Tagged(Tag::Transport),
        BoundMode::Range,
        "Local transportation expense",
    ),
    CheckDef::new(
        Subcategory::MileageReimbursement,
        Trigger::Tagged(Tag::Mileage),
        BoundMode::UpperBound,
        "Mileage reimbursement",
    ),
    CheckDef::new(
        Subcategory::ParkingTolls,
        Trigger::VendorOrTagged("parking", Tag::ParkingTolls),
        BoundMode::Coverage,
        "Parking fees or tolls",
    ),
    CheckDef::new(
        Subcategory::HotelStays,
        Trigger::Tagged(Tag::Hotel),
        BoundMode::Range,
        "Hotel stay expense",
    ),
    CheckDef::new(
        Subcategory::RentalAllowance,
        Trigger::Tagged(Tag::Rental),
        BoundMode::Range,
        "Rental allowance",
    ),
    CheckDef::new(
        Subcategory::MealsDuringTravel,
        Trigger::Tagged(Tag::MealsDuringTravel),
        BoundMode::Range,
        "Meals during travel expense",
    ),
    CheckDef::new(
        Subcategory::WorkTools,
        Trigger::Tagged(Tag::Tools),
        BoundMode::UpperBound,
        "Work tools expense",
    )
    .per(" per year"),
    CheckDef::new(
        Subcategory::HomeOfficeSetup,
        Trigger::Tagged(Tag::HomeOffice),
        BoundMode::UpperBound,
        "Home office setup expense",
    ),
    CheckDef::new(
        Subcategory::MobileInternet,
        Trigger::Tagged(Tag::MobileInternet),
        BoundMode::Coverage,
        "Mobile/Internet bills",
    ),
    CheckDef::new(
        Subcategory::ClientMeetings,
        Trigger::Tagged(Tag::ClientMeeting),
        BoundMode::UpperBound,
        "Client meeting expense",
    )
    .per(" per month"),
    CheckDef::new(
        Subcategory::TeamOutings,
        Trigger::Tagged(Tag::TeamOuting),
        BoundMode::UpperBound,
        "Team outing expense",
    )
    .per(" per month"),
    CheckDef::new(
        Subcategory::DailyMealAllowance,
        Trigger::Tagged(Tag::DailyMeal),
        BoundMode::Range,
        "Daily meal allowance",
    ),
];
