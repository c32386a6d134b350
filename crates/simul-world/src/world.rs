//! The entity store: countries, regions, geography, and pending actions.
//!
//! [`World`] is the aggregate root of the simulation. Countries and regions
//! are held in arenas indexed by their sequential ids; relationships are
//! stored as ids on both sides and every mutation that touches a
//! relationship updates both sides in one call.
//!
//! Region geography (neighbour edges and map outlines) is kept beside the
//! arenas, keyed by region id, since the economic rules never read it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use simul_types::{
    Action, CountryId, CountryView, Polygon, RegionId, RegionView, WorldSnapshot,
};
use tracing::debug;

use crate::action_queue::ActionQueue;
use crate::country::{Country, Relation};
use crate::error::WorldError;
use crate::region::Region;

/// The aggregate root owning every entity of a simulated world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Countries indexed by `CountryId`.
    countries: Vec<Country>,
    /// Regions indexed by `RegionId`.
    regions: Vec<Region>,
    /// Directed neighbour edges: region -> regions reachable from it.
    connections: BTreeMap<RegionId, Vec<RegionId>>,
    /// Map outlines per region.
    polygons: BTreeMap<RegionId, Polygon>,
    /// Actions submitted for the next tick.
    actions: ActionQueue,
}

impl World {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            countries: Vec::new(),
            regions: Vec::new(),
            connections: BTreeMap::new(),
            polygons: BTreeMap::new(),
            actions: ActionQueue::new(),
        }
    }

    // -------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------

    /// Create an unowned region and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdSpaceExhausted`] once `u32::MAX` regions exist.
    pub fn create_region(&mut self, name: &str) -> Result<RegionId, WorldError> {
        let raw = u32::try_from(self.regions.len())
            .map_err(|_overflow| WorldError::IdSpaceExhausted { kind: "region" })?;
        let id = RegionId::new(raw);
        self.regions.push(Region::new(id, name.to_owned()));
        debug!(region = %id, name, "Region created");
        Ok(id)
    }

    /// Create a country and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdSpaceExhausted`] once `u32::MAX` countries exist.
    pub fn create_country(&mut self, name: &str) -> Result<CountryId, WorldError> {
        let raw = u32::try_from(self.countries.len())
            .map_err(|_overflow| WorldError::IdSpaceExhausted { kind: "country" })?;
        let id = CountryId::new(raw);
        self.countries.push(Country::new(id, name.to_owned()));
        debug!(country = %id, name, "Country created");
        Ok(id)
    }

    // -------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------

    /// Look up a country.
    pub fn country(&self, id: CountryId) -> Result<&Country, WorldError> {
        self.countries
            .get(id.index())
            .ok_or(WorldError::CountryNotFound(id))
    }

    /// Look up a country mutably.
    pub fn country_mut(&mut self, id: CountryId) -> Result<&mut Country, WorldError> {
        self.countries
            .get_mut(id.index())
            .ok_or(WorldError::CountryNotFound(id))
    }

    /// Look up a region.
    pub fn region(&self, id: RegionId) -> Result<&Region, WorldError> {
        self.regions
            .get(id.index())
            .ok_or(WorldError::RegionNotFound(id))
    }

    /// Look up a region mutably.
    pub fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, WorldError> {
        self.regions
            .get_mut(id.index())
            .ok_or(WorldError::RegionNotFound(id))
    }

    /// All countries in id order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// All regions in id order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions owned by `country`, in acquisition order.
    pub fn country_regions(&self, country: CountryId) -> Result<Vec<&Region>, WorldError> {
        self.country(country)?
            .regions()
            .iter()
            .map(|id| self.region(*id))
            .collect()
    }

    /// Both arenas as mutable slices.
    ///
    /// Slices can be mutated in place but never grown or shrunk, so a rule
    /// pass holding them cannot add or remove entities mid-iteration.
    pub fn entities_mut(&mut self) -> (&mut [Country], &mut [Region]) {
        (self.countries.as_mut_slice(), self.regions.as_mut_slice())
    }

    // -------------------------------------------------------------------
    // Ownership
    // -------------------------------------------------------------------

    /// Make `region` a member of `country`.
    ///
    /// A region owned by another country is detached from it first. Adding
    /// a region to its current owner is a no-op.
    pub fn add_region(&mut self, country: CountryId, region: RegionId) -> Result<(), WorldError> {
        self.country(country)?;
        let previous = self.region(region)?.country();
        if previous == Some(country) {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.country_mut(previous)?.drop_region(region);
        }
        self.country_mut(country)?.push_region(region);
        self.region_mut(region)?.set_country(Some(country));
        debug!(%country, %region, ?previous, "Region added to country");
        Ok(())
    }

    /// Detach `region` from `country`, leaving it unowned.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotOwned`] if `country` does not own it.
    pub fn remove_region(&mut self, country: CountryId, region: RegionId) -> Result<(), WorldError> {
        self.country(country)?;
        if !self.region(region)?.is_owned_by(country) {
            return Err(WorldError::RegionNotOwned { region, country });
        }
        self.country_mut(country)?.drop_region(region);
        self.region_mut(region)?.set_country(None);
        debug!(%country, %region, "Region removed from country");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Relations
    // -------------------------------------------------------------------

    /// Put `a` and `b` at war with each other. Idempotent.
    pub fn declare_war(&mut self, a: CountryId, b: CountryId) -> Result<(), WorldError> {
        self.set_relation(a, b, Relation::War, true)
    }

    /// End the war between `a` and `b`. Idempotent.
    pub fn make_peace(&mut self, a: CountryId, b: CountryId) -> Result<(), WorldError> {
        self.set_relation(a, b, Relation::War, false)
    }

    /// Ally `a` and `b`. Idempotent.
    pub fn form_alliance(&mut self, a: CountryId, b: CountryId) -> Result<(), WorldError> {
        self.set_relation(a, b, Relation::Alliance, true)
    }

    /// Dissolve the alliance between `a` and `b`. Idempotent.
    pub fn dissolve_alliance(&mut self, a: CountryId, b: CountryId) -> Result<(), WorldError> {
        self.set_relation(a, b, Relation::Alliance, false)
    }

    /// Insert or remove a symmetric relation, validating both ends first.
    fn set_relation(
        &mut self,
        a: CountryId,
        b: CountryId,
        kind: Relation,
        present: bool,
    ) -> Result<(), WorldError> {
        if a == b {
            return Err(WorldError::SelfRelation(a));
        }
        self.country(a)?;
        self.country(b)?;
        for (this, that) in [(a, b), (b, a)] {
            let relations = self.country_mut(this)?.relations_mut(kind);
            if present {
                relations.insert(that);
            } else {
                relations.remove(&that);
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Geography
    // -------------------------------------------------------------------

    /// Record a directed neighbour edge from `from` to `to`. Duplicate
    /// edges are ignored.
    pub fn connect_regions(&mut self, from: RegionId, to: RegionId) -> Result<(), WorldError> {
        self.region(from)?;
        self.region(to)?;
        let edges = self.connections.entry(from).or_default();
        if !edges.contains(&to) {
            edges.push(to);
        }
        Ok(())
    }

    /// Regions reachable from `region` in one step.
    pub fn neighbors(&self, region: RegionId) -> &[RegionId] {
        self.connections.get(&region).map(Vec::as_slice).unwrap_or_default()
    }

    /// Assign the map outline of a region, replacing any previous one.
    pub fn set_region_polygon(&mut self, region: RegionId, polygon: Polygon) -> Result<(), WorldError> {
        self.region(region)?;
        self.polygons.insert(region, polygon);
        Ok(())
    }

    /// Map outline of a region, if one was assigned.
    pub fn region_polygon(&self, region: RegionId) -> Option<&Polygon> {
        self.polygons.get(&region)
    }

    // -------------------------------------------------------------------
    // Action queue
    // -------------------------------------------------------------------

    /// Queue an action for the next tick.
    pub fn enqueue(&mut self, action: Action) {
        debug!(action = action.name(), "Action queued");
        self.actions.push(action);
    }

    /// Take all queued actions, leaving the queue empty.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        self.actions.drain_all()
    }

    /// Actions queued for the next tick.
    pub fn pending_actions(&self) -> &[Action] {
        self.actions.pending()
    }

    // -------------------------------------------------------------------
    // Read model
    // -------------------------------------------------------------------

    /// Snapshot a country.
    pub fn country_view(&self, id: CountryId) -> Result<CountryView, WorldError> {
        let country = self.country(id)?;
        Ok(CountryView {
            id,
            name: country.name().to_owned(),
            tax_agriculture_rate: country.tax_agriculture_rate,
            tax_manufacture_rate: country.tax_manufacture_rate,
            gold: country.gold,
            regions: country.regions().to_vec(),
            at_war_with: country.at_war_with().iter().copied().collect(),
            allied_with: country.allied_with().iter().copied().collect(),
        })
    }

    /// Snapshot a region.
    pub fn region_view(&self, id: RegionId) -> Result<RegionView, WorldError> {
        let region = self.region(id)?;
        Ok(RegionView {
            id,
            name: region.name().to_owned(),
            country: region.country(),
            agriculture_capacity: region.agriculture_capacity,
            agriculture_ratio: region.agriculture_ratio,
            population: region.population,
            agriculture_storage: region.agriculture_storage,
            gold: region.gold,
            luxury: region.luxury,
            neighbors: self.neighbors(id).to_vec(),
            polygon: self.region_polygon(id).cloned(),
        })
    }

    /// Snapshot every country and region.
    pub fn snapshot(&self, ticks: u64) -> Result<WorldSnapshot, WorldError> {
        let countries = self
            .countries
            .iter()
            .map(|c| self.country_view(c.id()))
            .collect::<Result<Vec<_>, _>>()?;
        let regions = self
            .regions
            .iter()
            .map(|r| self.region_view(r.id()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WorldSnapshot {
            ticks,
            countries,
            regions,
        })
    }
}
