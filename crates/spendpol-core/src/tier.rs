//! # Employee Tier: Policy Bracket
//!
//! Defines the `Tier` enum: the six employee brackets that select which
//! column of the policy catalog applies to a receipt.
//!
//! Each tier has two spellings:
//!
//! - a **label** (`"Team Leads & Supervisors"`): the form upstream
//!   extractors write into `employeeLevel`, and the serde form;
//! - an **identifier** (`"team_lead"`): a stable snake_case key accepted
//!   wherever a label is.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SpendpolError;

/// An employee's policy bracket.
///
/// Ordered from most to least senior. `Staff` is the default applied when a
/// receipt carries no employee level at all.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// C-suite and executive leadership.
    #[serde(rename = "Executive Level", alias = "executive")]
    Executive,
    /// Senior management.
    #[serde(rename = "Senior Management", alias = "senior_management")]
    SeniorManagement,
    /// Middle management.
    #[serde(rename = "Middle Management", alias = "middle_management")]
    MiddleManagement,
    /// Lower management.
    #[serde(rename = "Lower Management", alias = "lower_management")]
    LowerManagement,
    /// Team leads and supervisors.
    #[serde(rename = "Team Leads & Supervisors", alias = "team_lead")]
    TeamLead,
    /// Staff and employees.
    #[default]
    #[serde(rename = "Staff & Employees", alias = "staff")]
    Staff,
}

impl Tier {
    /// Returns all tiers, most senior first.
    pub fn all() -> &'static [Tier] {
        &[
            Self::Executive,
            Self::SeniorManagement,
            Self::MiddleManagement,
            Self::LowerManagement,
            Self::TeamLead,
            Self::Staff,
        ]
    }

    /// The policy label, as written in receipt `employeeLevel` fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Executive => "Executive Level",
            Self::SeniorManagement => "Senior Management",
            Self::MiddleManagement => "Middle Management",
            Self::LowerManagement => "Lower Management",
            Self::TeamLead => "Team Leads & Supervisors",
            Self::Staff => "Staff & Employees",
        }
    }

    /// The snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::SeniorManagement => "senior_management",
            Self::MiddleManagement => "middle_management",
            Self::LowerManagement => "lower_management",
            Self::TeamLead => "team_lead",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = SpendpolError;

    /// Parse a tier from its label or its identifier. Matching is exact and
    /// case-sensitive; `"executive level"` is not a tier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::all()
            .iter()
            .copied()
            .find(|tier| tier.label() == s || tier.as_str() == s)
            .ok_or_else(|| SpendpolError::UnknownTier(s.to_string()))
    }
}
