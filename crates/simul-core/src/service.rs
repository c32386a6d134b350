//! Facade over one world and its simulator.
//!
//! [`WorldService`] is the single surface a front end talks to: read-model
//! queries return detached views, [`WorldService::submit`] validates and
//! queues an action for the next tick, and [`WorldService::simulate`]
//! advances the clock.

use simul_types::{Action, CountryId, CountryView, RegionId, RegionView, SimulationView, WorldSnapshot};
use simul_world::{World, WorldError, create_starting_world};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, load_simulator};
use crate::config::SimulationConfig;
use crate::simulator::{SimulationError, Simulator, TickSummary};

/// Errors surfaced by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A query or action referenced an invalid entity.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// A tick failed.
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// The simulator could not be assembled.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A world paired with the simulator that advances it.
#[derive(Debug)]
pub struct WorldService {
    world: World,
    simulator: Simulator,
}

impl WorldService {
    /// Wrap an existing world and simulator.
    pub const fn new(world: World, simulator: Simulator) -> Self {
        Self { world, simulator }
    }

    /// Build the starting world and a simulator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Catalog`] if the ruleset is invalid.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ServiceError> {
        let (world, _ids) = create_starting_world()?;
        let simulator = load_simulator(config)?;
        info!(
            name = %config.world.name,
            countries = world.countries().len(),
            regions = world.regions().len(),
            "World assembled"
        );
        Ok(Self::new(world, simulator))
    }

    /// Every country, ascending by id.
    pub fn all_countries(&self) -> Result<Vec<CountryView>, ServiceError> {
        self.world
            .countries()
            .iter()
            .map(|c| self.country(c.id()))
            .collect()
    }

    /// One country.
    pub fn country(&self, id: CountryId) -> Result<CountryView, ServiceError> {
        Ok(self.world.country_view(id)?)
    }

    /// The regions owned by `id`, in acquisition order.
    pub fn country_regions(&self, id: CountryId) -> Result<Vec<RegionView>, ServiceError> {
        self.world
            .country_regions(id)?
            .into_iter()
            .map(|r| self.region(r.id()))
            .collect()
    }

    /// Every region, ascending by id.
    pub fn all_regions(&self) -> Result<Vec<RegionView>, ServiceError> {
        self.world
            .regions()
            .iter()
            .map(|r| self.region(r.id()))
            .collect()
    }

    /// One region.
    pub fn region(&self, id: RegionId) -> Result<RegionView, ServiceError> {
        Ok(self.world.region_view(id)?)
    }

    /// Validate `action` and queue it for the next tick.
    ///
    /// Every referenced entity must exist and diplomacy must name two
    /// distinct countries. Rates and ratios outside `[0, 1]` are accepted
    /// as given and logged.
    pub fn submit(&mut self, action: Action) -> Result<(), ServiceError> {
        for country in action.countries() {
            self.world.country(country)?;
        }
        if let Some(region) = action.region() {
            self.world.region(region)?;
        }

        match action {
            Action::DeclareWar { actor, other }
            | Action::ProposePeace { actor, other }
            | Action::AcceptPeace { actor, other }
                if actor == other =>
            {
                return Err(WorldError::SelfRelation(actor).into());
            }
            Action::SetTaxAgriculture { rate: value, .. }
            | Action::SetTaxManufacture { rate: value, .. }
            | Action::SetAgricultureRatio { ratio: value, .. }
                if !(0.0..=1.0).contains(&value) =>
            {
                warn!(action = action.name(), value, "Value outside [0, 1] accepted as given");
            }
            _ => {}
        }

        debug!(action = action.name(), "Action queued");
        self.world.enqueue(action);
        Ok(())
    }

    /// Run one tick.
    pub fn simulate(&mut self) -> Result<SimulationView, ServiceError> {
        self.step()?;
        Ok(SimulationView {
            ticks: self.ticks(),
        })
    }

    /// Run one tick and return its summary.
    pub fn step(&mut self) -> Result<TickSummary, ServiceError> {
        Ok(self.simulator.simulate(&mut self.world)?)
    }

    /// Number of ticks executed so far.
    pub const fn ticks(&self) -> u64 {
        self.simulator.ticks()
    }

    /// Every country and region at the current tick.
    pub fn snapshot(&self) -> Result<WorldSnapshot, ServiceError> {
        Ok(self.world.snapshot(self.ticks())?)
    }

    /// The underlying world.
    pub const fn world(&self) -> &World {
        &self.world
    }
}
