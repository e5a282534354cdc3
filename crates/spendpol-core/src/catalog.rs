//! # Policy Catalog
//!
//! The immutable table `Tier × Subcategory → LimitDescriptor` that every
//! evaluation reads from.
//!
//! ## Construction
//!
//! - [`PolicyCatalog::standard()`]: the built-in corporate policy.
//! - [`PolicyCatalog::from_yaml_str()`] / [`PolicyCatalog::load()`]: a
//!   catalog document (YAML or JSON) keyed by tier label or identifier,
//!   then by subcategory identifier.
//! - [`PolicyCatalog::new()`] + [`PolicyCatalog::with_limit()`]: by hand,
//!   mainly for synthetic policies in tests.
//!
//! There is no `&mut self` method. Once built, a catalog is shared by
//! reference or `Arc` and never changes.
//!
//! ## Deny-by-Default
//!
//! [`PolicyCatalog::lookup()`] returns `Range{0,0}` for a cell the catalog
//! does not define. A keyword-tagged expense in an undefined subcategory
//! therefore always violates. To exempt a subcategory for a tier, write an
//! explicit `unlimited` or `fully_covered` entry; leaving it out does the
//! opposite. Parking/Tolls and Mobile/Internet are exempt only with
//! `fully_covered`.
//!
//! A tier with no column at all is different: evaluation never reaches
//! `lookup` for it and reports the receipt's employee level as unknown.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Subcategory;
use crate::error::{CatalogError, SpendpolError};
use crate::limit::LimitDescriptor;
use crate::tier::Tier;

/// Limits for a single tier.
pub type TierPolicy = BTreeMap<Subcategory, LimitDescriptor>;

/// Immutable mapping from tier and subcategory to a limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyCatalog {
    tiers: BTreeMap<Tier, TierPolicy>,
}

impl PolicyCatalog {
    /// An empty catalog. Every lookup against it is deny-by-default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this catalog with one cell set.
    pub fn with_limit(mut self, tier: Tier, subcategory: Subcategory, limit: LimitDescriptor) -> Self {
        self.tiers.entry(tier).or_default().insert(subcategory, limit);
        self
    }

    /// The built-in corporate spending policy.
    ///
    /// Amounts are whole currency units. Subcategories missing from a tier's
    /// column are intentionally absent and resolve to `Range{0,0}`.
    pub fn standard() -> Self {
        use LimitDescriptor::{FullyCovered, Unlimited};
        use Subcategory::*;

        let up_to = LimitDescriptor::up_to;
        let columns: [(Tier, Vec<(Subcategory, LimitDescriptor)>); 6] = [
            (
                Tier::Executive,
                vec![
                    (BusinessTrips, up_to(1_600_000)),
                    (LocalTransportation, up_to(60_000)),
                    (MileageReimbursement, up_to(45_000)),
                    (ParkingTolls, FullyCovered),
                    (HotelStays, up_to(125_000)),
                    (RentalAllowance, up_to(600_000)),
                    (MealsDuringTravel, up_to(40_000)),
                    (WorkTools, Unlimited),
                    (HomeOfficeSetup, up_to(800_000)),
                    (MobileInternet, FullyCovered),
                    (ClientMeetings, up_to(4_000_000)),
                    (TeamOutings, up_to(1_600_000)),
                    (DailyMealAllowance, up_to(24_000)),
                ],
            ),
            (
                Tier::SeniorManagement,
                vec![
                    (BusinessTrips, up_to(400_000)),
                    (LocalTransportation, up_to(25_000)),
                    (MileageReimbursement, up_to(30_000)),
                    (ParkingTolls, up_to(10_000)),
                    (HotelStays, up_to(80_000)),
                    (RentalAllowance, up_to(150_000)),
                    (MealsDuringTravel, up_to(24_000)),
                    (WorkTools, up_to(400_000)),
                    (HomeOfficeSetup, up_to(400_000)),
                    (ClientMeetings, up_to(2_400_000)),
                    (TeamOutings, up_to(1_200_000)),
                ],
            ),
            (
                Tier::MiddleManagement,
                vec![
                    (BusinessTrips, up_to(560_000)),
                    (LocalTransportation, up_to(20_000)),
                    (MileageReimbursement, up_to(25_000)),
                    (RentalAllowance, up_to(90_000)),
                    (WorkTools, up_to(24_000)),
                    (HomeOfficeSetup, up_to(24_000)),
                    (ClientMeetings, up_to(1_600_000)),
                ],
            ),
            (
                Tier::LowerManagement,
                vec![
                    (BusinessTrips, up_to(400_000)),
                    (LocalTransportation, up_to(15_000)),
                    (MileageReimbursement, up_to(20_000)),
                    (RentalAllowance, up_to(50_000)),
                    (WorkTools, up_to(160_000)),
                    (MobileInternet, FullyCovered),
                ],
            ),
            (
                Tier::TeamLead,
                vec![
                    (BusinessTrips, up_to(240_000)),
                    (LocalTransportation, up_to(10_000)),
                    (MileageReimbursement, up_to(20_000)),
                    (RentalAllowance, up_to(40_000)),
                    (ClientMeetings, up_to(800_000)),
                    (MobileInternet, FullyCovered),
                ],
            ),
            (
                Tier::Staff,
                vec![
                    (BusinessTrips, up_to(160_000)),
                    (LocalTransportation, up_to(5_000)),
                    (MileageReimbursement, up_to(10_000)),
                    (RentalAllowance, up_to(30_000)),
                    (WorkTools, up_to(80_000)),
                    (MobileInternet, FullyCovered),
                ],
            ),
        ];

        let tiers = columns
            .into_iter()
            .map(|(tier, cells)| (tier, cells.into_iter().collect()))
            .collect();
        Self { tiers }
    }

    /// Parse a catalog document. YAML is a superset of JSON, so this accepts
    /// both.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for every document defect: malformed
    /// syntax, unknown tier or subcategory keys (named in the message),
    /// unknown limit keywords, and inverted ranges.
    pub fn from_yaml_str(document: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(document).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Read and parse a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, SpendpolError> {
        let document = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&document)?)
    }

    /// Render this catalog as a YAML document that [`Self::from_yaml_str`]
    /// reads back.
    pub fn to_yaml_string(&self) -> Result<String, CatalogError> {
        serde_yaml::to_string(self).map_err(|e| CatalogError::Render(e.to_string()))
    }

    /// Resolve the limit for a cell.
    ///
    /// Returns `Range{0,0}` when the tier is absent or the tier does not
    /// define the subcategory. See the module docs: omission denies.
    /// Check [`Self::contains_tier`] first to tell the two apart.
    pub fn lookup(&self, tier: Tier, subcategory: Subcategory) -> LimitDescriptor {
        self.get(tier, subcategory)
            .unwrap_or(LimitDescriptor::ZERO_RANGE)
    }

    /// The explicitly configured limit for a cell, if any.
    pub fn get(&self, tier: Tier, subcategory: Subcategory) -> Option<LimitDescriptor> {
        self.tiers
            .get(&tier)
            .and_then(|cells| cells.get(&subcategory))
            .copied()
    }

    /// Whether the catalog has a column for `tier`.
    pub fn contains_tier(&self, tier: Tier) -> bool {
        self.tiers.contains_key(&tier)
    }

    /// Tiers defined by this catalog, most senior first.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.tiers.keys().copied()
    }

    /// The explicit cells of one tier's column.
    pub fn tier_policy(&self, tier: Tier) -> Option<&TierPolicy> {
        self.tiers.get(&tier)
    }

    /// A catalog holding only `tier`'s column.
    pub fn restricted_to(&self, tier: Tier) -> Self {
        let tiers = self
            .tiers
            .get(&tier)
            .map(|cells| BTreeMap::from([(tier, cells.clone())]))
            .unwrap_or_default();
        Self { tiers }
    }
}
