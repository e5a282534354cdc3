//! # Expense Categories: Policy Taxonomy
//!
//! Defines the five expense categories and the thirteen subcategories that
//! carry individual limits in the policy catalog.
//!
//! Subcategory identifiers are dotted `"<Category>.<Name>"` strings
//! (`"Travel.BusinessTrips"`). They are the serde form and the keys used in
//! catalog files. Labels (`"Business Trips"`) are for humans.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SpendpolError;

/// A top-level expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Travel expenses.
    Travel,
    /// Accommodation.
    Accommodation,
    /// Office supplies and equipment.
    OfficeSupplies,
    /// Communication expenses.
    Communication,
    /// Meals and entertainment.
    MealsAndEntertainment,
}

impl ExpenseCategory {
    /// Returns all five categories in policy order.
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Travel,
            Self::Accommodation,
            Self::OfficeSupplies,
            Self::Communication,
            Self::MealsAndEntertainment,
        ]
    }

    /// Identifier prefix used in subcategory identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::Accommodation => "Accommodation",
            Self::OfficeSupplies => "OfficeSupplies",
            Self::Communication => "Communication",
            Self::MealsAndEntertainment => "MealsAndEntertainment",
        }
    }

    /// Human-readable category heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Travel => "Travel Expenses",
            Self::Accommodation => "Accommodation",
            Self::OfficeSupplies => "Office Supplies and Equipment",
            Self::Communication => "Communication Expenses",
            Self::MealsAndEntertainment => "Meals and Entertainment",
        }
    }

    /// Subcategories belonging to this category.
    pub fn subcategories(&self) -> impl Iterator<Item = Subcategory> + '_ {
        Subcategory::all()
            .iter()
            .copied()
            .filter(move |sub| sub.category() == *self)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A policy line: one subcategory within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    /// Business trips.
    #[serde(rename = "Travel.BusinessTrips")]
    BusinessTrips,
    /// Local transportation.
    #[serde(rename = "Travel.LocalTransportation")]
    LocalTransportation,
    /// Mileage reimbursement.
    #[serde(rename = "Travel.MileageReimbursement")]
    MileageReimbursement,
    /// Parking fees and tolls.
    #[serde(rename = "Travel.ParkingTolls")]
    ParkingTolls,
    /// Hotel stays.
    #[serde(rename = "Accommodation.HotelStays")]
    HotelStays,
    /// Rental allowance.
    #[serde(rename = "Accommodation.RentalAllowance")]
    RentalAllowance,
    /// Meals during travel.
    #[serde(rename = "Accommodation.MealsDuringTravel")]
    MealsDuringTravel,
    /// Work tools.
    #[serde(rename = "OfficeSupplies.WorkTools")]
    WorkTools,
    /// Home office setup.
    #[serde(rename = "OfficeSupplies.HomeOfficeSetup")]
    HomeOfficeSetup,
    /// Mobile and internet bills.
    #[serde(rename = "Communication.MobileInternet")]
    MobileInternet,
    /// Client meetings.
    #[serde(rename = "MealsAndEntertainment.ClientMeetings")]
    ClientMeetings,
    /// Team outings.
    #[serde(rename = "MealsAndEntertainment.TeamOutings")]
    TeamOutings,
    /// Daily meal allowance.
    #[serde(rename = "MealsAndEntertainment.DailyMealAllowance")]
    DailyMealAllowance,
}

/// Total number of subcategories across all categories.
pub const SUBCATEGORY_COUNT: usize = 13;

impl Subcategory {
    /// Returns all subcategories in policy order.
    pub fn all() -> &'static [Subcategory] {
        &[
            Self::BusinessTrips,
            Self::LocalTransportation,
            Self::MileageReimbursement,
            Self::ParkingTolls,
            Self::HotelStays,
            Self::RentalAllowance,
            Self::MealsDuringTravel,
            Self::WorkTools,
            Self::HomeOfficeSetup,
            Self::MobileInternet,
            Self::ClientMeetings,
            Self::TeamOutings,
            Self::DailyMealAllowance,
        ]
    }

    /// The category this subcategory belongs to.
    pub fn category(&self) -> ExpenseCategory {
        match self {
            Self::BusinessTrips
            | Self::LocalTransportation
            | Self::MileageReimbursement
            | Self::ParkingTolls => ExpenseCategory::Travel,
            Self::HotelStays | Self::RentalAllowance | Self::MealsDuringTravel => {
                ExpenseCategory::Accommodation
            }
            Self::WorkTools | Self::HomeOfficeSetup => ExpenseCategory::OfficeSupplies,
            Self::MobileInternet => ExpenseCategory::Communication,
            Self::ClientMeetings | Self::TeamOutings | Self::DailyMealAllowance => {
                ExpenseCategory::MealsAndEntertainment
            }
        }
    }

    /// Dotted identifier, e.g. `"Travel.BusinessTrips"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessTrips => "Travel.BusinessTrips",
            Self::LocalTransportation => "Travel.LocalTransportation",
            Self::MileageReimbursement => "Travel.MileageReimbursement",
            Self::ParkingTolls => "Travel.ParkingTolls",
            Self::HotelStays => "Accommodation.HotelStays",
            Self::RentalAllowance => "Accommodation.RentalAllowance",
            Self::MealsDuringTravel => "Accommodation.MealsDuringTravel",
            Self::WorkTools => "OfficeSupplies.WorkTools",
            Self::HomeOfficeSetup => "OfficeSupplies.HomeOfficeSetup",
            Self::MobileInternet => "Communication.MobileInternet",
            Self::ClientMeetings => "MealsAndEntertainment.ClientMeetings",
            Self::TeamOutings => "MealsAndEntertainment.TeamOutings",
            Self::DailyMealAllowance => "MealsAndEntertainment.DailyMealAllowance",
        }
    }

    /// Human-readable policy line name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessTrips => "Business Trips",
            Self::LocalTransportation => "Local Transportation",
            Self::MileageReimbursement => "Mileage Reimbursement",
            Self::ParkingTolls => "Parking Fees & Tolls",
            Self::HotelStays => "Hotel Stays",
            Self::RentalAllowance => "Rental Allowance",
            Self::MealsDuringTravel => "Meals During Travel",
            Self::WorkTools => "Work Tools",
            Self::HomeOfficeSetup => "Home Office Setup",
            Self::MobileInternet => "Mobile/Internet Bills",
            Self::ClientMeetings => "Client Meetings",
            Self::TeamOutings => "Team Outings",
            Self::DailyMealAllowance => "Daily Meal Allowance",
        }
    }
}

impl std::fmt::Display for Subcategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subcategory {
    type Err = SpendpolError;

    /// Parse a subcategory from its dotted identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcategory::all()
            .iter()
            .copied()
            .find(|sub| sub.as_str() == s)
            .ok_or_else(|| SpendpolError::UnknownSubcategory(s.to_string()))
    }
}
