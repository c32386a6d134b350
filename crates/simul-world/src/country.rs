//! Countries: tax-collecting owners of regions.
//!
//! Membership and diplomatic relations are symmetric across two entities,
//! so the fields that hold them are private here and only [`World`]
//! mutates them, always on both sides at once.
//!
//! [`World`]: crate::World

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use simul_types::{CountryId, RegionId};

use crate::region::non_negative;

/// Default agriculture tax rate.
pub const DEFAULT_TAX_AGRICULTURE_RATE: f64 = 0.1;

/// Default manufacture tax rate.
pub const DEFAULT_TAX_MANUFACTURE_RATE: f64 = 0.2;

/// A country and its treasury.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    id: CountryId,
    name: String,

    /// Share of agriculture produce collected as tax.
    pub tax_agriculture_rate: f64,
    /// Share of manufacture produce collected as tax.
    pub tax_manufacture_rate: f64,
    /// Treasury.
    pub gold: f64,

    regions: Vec<RegionId>,
    at_war_with: BTreeSet<CountryId>,
    allied_with: BTreeSet<CountryId>,
}

impl Country {
    /// Create a country with default tax rates, no regions and no relations.
    pub const fn new(id: CountryId, name: String) -> Self {
        Self {
            id,
            name,
            tax_agriculture_rate: DEFAULT_TAX_AGRICULTURE_RATE,
            tax_manufacture_rate: DEFAULT_TAX_MANUFACTURE_RATE,
            gold: 0.0,
            regions: Vec::new(),
            at_war_with: BTreeSet::new(),
            allied_with: BTreeSet::new(),
        }
    }

    /// Return the country id.
    pub const fn id(&self) -> CountryId {
        self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regions owned by this country, in acquisition order.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Countries at war with this one.
    pub const fn at_war_with(&self) -> &BTreeSet<CountryId> {
        &self.at_war_with
    }

    /// Countries allied with this one.
    pub const fn allied_with(&self) -> &BTreeSet<CountryId> {
        &self.allied_with
    }

    /// Whether this country is at war with `other`.
    pub fn is_at_war_with(&self, other: CountryId) -> bool {
        self.at_war_with.contains(&other)
    }

    /// Whether this country is allied with `other`.
    pub fn is_allied_with(&self, other: CountryId) -> bool {
        self.allied_with.contains(&other)
    }

    /// Force the treasury back to `>= 0`.
    pub fn clamp_non_negative(&mut self) {
        self.gold = non_negative(self.gold);
    }

    pub(crate) fn push_region(&mut self, region: RegionId) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub(crate) fn drop_region(&mut self, region: RegionId) {
        self.regions.retain(|r| *r != region);
    }

    pub(crate) fn relations_mut(&mut self, kind: Relation) -> &mut BTreeSet<CountryId> {
        match kind {
            Relation::War => &mut self.at_war_with,
            Relation::Alliance => &mut self.allied_with,
        }
    }
}

/// The two symmetric relation sets a country holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relation {
    War,
    Alliance,
}
