//! Immutable read-model snapshots of the simulated world.
//!
//! Views are detached copies: holding one never borrows the world, and
//! mutating the world after a snapshot has no effect on it. They are the
//! payloads the network service and the desktop UI consume.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geometry::Polygon;
use crate::ids::{CountryId, RegionId};

/// Snapshot of one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CountryView {
    /// Country identifier.
    pub id: CountryId,
    /// Display name.
    pub name: String,
    /// Share of agriculture produce taken as tax.
    pub tax_agriculture_rate: f64,
    /// Share of manufacture produce taken as tax.
    pub tax_manufacture_rate: f64,
    /// Treasury.
    pub gold: f64,
    /// Regions owned by the country, in acquisition order.
    pub regions: Vec<RegionId>,
    /// Countries currently at war with this one, ascending by id.
    pub at_war_with: Vec<CountryId>,
    /// Countries currently allied with this one, ascending by id.
    pub allied_with: Vec<CountryId>,
}

/// Snapshot of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionView {
    /// Region identifier.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Owning country, if any.
    pub country: Option<CountryId>,
    /// Maximum sustainable agriculture output.
    pub agriculture_capacity: f64,
    /// Share of labor working agriculture.
    pub agriculture_ratio: f64,
    /// Current population.
    pub population: f64,
    /// Stored food carried over between ticks.
    pub agriculture_storage: f64,
    /// Gold held by the region's inhabitants.
    pub gold: f64,
    /// Luxury goods per capita.
    pub luxury: f64,
    /// Neighbouring regions.
    pub neighbors: Vec<RegionId>,
    /// Map outline, if one was assigned.
    pub polygon: Option<Polygon>,
}

/// Snapshot of the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationView {
    /// Number of ticks executed so far.
    pub ticks: u64,
}

/// Snapshot of the whole world at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Ticks executed when the snapshot was taken.
    pub ticks: u64,
    /// All countries, in id order.
    pub countries: Vec<CountryView>,
    /// All regions, in id order.
    pub regions: Vec<RegionView>,
}
