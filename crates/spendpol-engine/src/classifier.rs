//! # Item Classifier
//!
//! Derives expense tags from free-text line-item names.
//!
//! All item names are lower-cased and joined with a single space into one
//! search string. A tag is present iff any of its keywords occurs in that
//! string as a substring. Matching is exact after case folding: no stemming,
//! no fuzzy matching, and item order does not matter for which tags fire.
//!
//! Keywords overlap on purpose: `"meals"` contains `"meal"`, so an item
//! named "Team meals" raises both [`Tag::MealsDuringTravel`] and
//! [`Tag::DailyMeal`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::receipt::LineItem;

/// A category label inferred from line-item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// Local transportation.
    Transport,
    /// Mileage reimbursement.
    Mileage,
    /// Parking fees and tolls.
    ParkingTolls,
    /// Hotel stays.
    Hotel,
    /// Rental allowance.
    Rental,
    /// Meals during travel.
    MealsDuringTravel,
    /// Work tools.
    Tools,
    /// Home office setup.
    HomeOffice,
    /// Mobile and internet bills.
    MobileInternet,
    /// Client meetings.
    ClientMeeting,
    /// Team outings.
    TeamOuting,
    /// Daily meal allowance.
    DailyMeal,
}

impl Tag {
    /// Returns all tags in check order.
    pub fn all() -> &'static [Tag] {
        &[
            Self::Transport,
            Self::Mileage,
            Self::ParkingTolls,
            Self::Hotel,
            Self::Rental,
            Self::MealsDuringTravel,
            Self::Tools,
            Self::HomeOffice,
            Self::MobileInternet,
            Self::ClientMeeting,
            Self::TeamOuting,
            Self::DailyMeal,
        ]
    }

    /// Lower-case keywords whose presence raises this tag.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Transport => &["transport"],
            Self::Mileage => &["mileage"],
            Self::ParkingTolls => &["tolls"],
            Self::Hotel => &["hotel"],
            Self::Rental => &["rental"],
            Self::MealsDuringTravel => &["meals"],
            Self::Tools => &["tools"],
            Self::HomeOffice => &["home office"],
            Self::MobileInternet => &["mobile", "internet"],
            Self::ClientMeeting => &["client meeting"],
            Self::TeamOuting => &["team outing"],
            Self::DailyMeal => &["meal"],
        }
    }

    /// camelCase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Mileage => "mileage",
            Self::ParkingTolls => "parkingTolls",
            Self::Hotel => "hotel",
            Self::Rental => "rental",
            Self::MealsDuringTravel => "mealsDuringTravel",
            Self::Tools => "tools",
            Self::HomeOffice => "homeOffice",
            Self::MobileInternet => "mobileInternet",
            Self::ClientMeeting => "clientMeeting",
            Self::TeamOuting => "teamOuting",
            Self::DailyMeal => "dailyMeal",
        }
    }

    fn matches(&self, haystack: &str) -> bool {
        self.keywords().iter().any(|kw| haystack.contains(kw))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of tags raised by a receipt's items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Whether `tag` is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    /// Tags in check order.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.iter().copied()
    }

    /// Number of tags present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tag is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The lower-cased, space-joined search string for a list of items.
pub fn search_text(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|item| item.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify a receipt's items.
pub fn classify(items: &[LineItem]) -> TagSet {
    let haystack = search_text(items);
    Tag::all()
        .iter()
        .copied()
        .filter(|tag| tag.matches(&haystack))
        .collect()
}
