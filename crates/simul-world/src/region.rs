//! Regions: the productive land units of the simulation.
//!
//! A [`Region`] carries its productivity coefficients and the working
//! stocks that the rule catalog moves around each tick. Ownership is an
//! index back to the owning country and can only be changed through
//! [`World::add_region`] and [`World::remove_region`].
//!
//! [`World::add_region`]: crate::World::add_region
//! [`World::remove_region`]: crate::World::remove_region

use serde::{Deserialize, Serialize};
use simul_types::{CountryId, RegionId};

/// Default maximum sustainable agriculture output.
pub const DEFAULT_AGRICULTURE_CAPACITY: f64 = 100.0;

/// Default food produced per agricultural worker.
pub const DEFAULT_AGRICULTURE_PER_POPULATION: f64 = 1.2;

/// Default share of labor working agriculture.
pub const DEFAULT_AGRICULTURE_RATIO: f64 = 0.9;

/// Default goods produced per manufacturing worker.
pub const DEFAULT_MANUFACTURE_PER_POPULATION: f64 = 1.3;

/// A region and its economic state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    id: RegionId,
    name: String,
    country: Option<CountryId>,

    /// Maximum sustainable agriculture output.
    pub agriculture_capacity: f64,
    /// Food produced per agricultural worker.
    pub agriculture_per_population: f64,
    /// Goods produced per manufacturing worker.
    pub manufacture_per_population: f64,
    /// Share of labor working agriculture, conventionally `0.0..=1.0`.
    pub agriculture_ratio: f64,
    /// Current population.
    pub population: f64,

    /// Food harvested this tick, before tax.
    pub agriculture_produce: f64,
    /// Food carried over between ticks.
    pub agriculture_storage: f64,
    /// Goods manufactured this tick, before tax.
    pub manufacture_produce: f64,
    /// Gold held by the inhabitants.
    pub gold: f64,
    /// Luxury goods per capita.
    pub luxury: f64,
}

impl Region {
    /// Create an unowned, unpopulated region with default coefficients.
    pub const fn new(id: RegionId, name: String) -> Self {
        Self {
            id,
            name,
            country: None,
            agriculture_capacity: DEFAULT_AGRICULTURE_CAPACITY,
            agriculture_per_population: DEFAULT_AGRICULTURE_PER_POPULATION,
            manufacture_per_population: DEFAULT_MANUFACTURE_PER_POPULATION,
            agriculture_ratio: DEFAULT_AGRICULTURE_RATIO,
            population: 0.0,
            agriculture_produce: 0.0,
            agriculture_storage: 0.0,
            manufacture_produce: 0.0,
            gold: 0.0,
            luxury: 0.0,
        }
    }

    /// Builder-style population setter.
    #[must_use]
    pub fn with_population(mut self, population: f64) -> Self {
        self.population = population;
        self
    }

    /// Builder-style capacity setter.
    #[must_use]
    pub fn with_agriculture_capacity(mut self, capacity: f64) -> Self {
        self.agriculture_capacity = capacity;
        self
    }

    /// Return the region id.
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the owning country, if any.
    pub const fn country(&self) -> Option<CountryId> {
        self.country
    }

    /// Whether `country` owns this region.
    pub fn is_owned_by(&self, country: CountryId) -> bool {
        self.country == Some(country)
    }

    /// Share of labor working manufacture.
    pub fn manufacture_ratio(&self) -> f64 {
        1.0 - self.agriculture_ratio
    }

    /// Force every stock and per-tick field back to `>= 0`.
    ///
    /// `NaN` collapses to zero as well, so one bad division can never
    /// poison later ticks.
    pub fn clamp_non_negative(&mut self) {
        self.population = non_negative(self.population);
        self.agriculture_produce = non_negative(self.agriculture_produce);
        self.agriculture_storage = non_negative(self.agriculture_storage);
        self.manufacture_produce = non_negative(self.manufacture_produce);
        self.gold = non_negative(self.gold);
        self.luxury = non_negative(self.luxury);
    }

    pub(crate) fn set_country(&mut self, country: Option<CountryId>) {
        self.country = country;
    }
}

/// Clamp to `>= 0`, mapping `NaN` to `0`.
pub(crate) const fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}
