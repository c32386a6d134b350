//! Default starting world for the Simul simulation.
//!
//! Two countries on the Iberian peninsula, each owning two regions:
//!
//! | Country  | Region  | Population | Agriculture capacity |
//! |----------|---------|------------|----------------------|
//! | Castile  | Toledo  | 10         | 20                   |
//! | Castile  | Sevilla | 10         | 30                   |
//! | Portugal | Lisbon  | 10         | 30                   |
//! | Portugal | Algarve | 10         | 20                   |
//!
//! Both countries tax agriculture at 10%. The regions form a chain of
//! bidirectional neighbour edges: Toledo - Sevilla - Algarve - Lisbon.

use simul_types::{CountryId, RegionId};

use crate::error::WorldError;
use crate::world::World;

/// Agriculture tax rate of both starting countries.
const STARTING_TAX_AGRICULTURE_RATE: f64 = 0.1;

/// Population of every starting region.
const STARTING_POPULATION: f64 = 10.0;

/// Identifiers for all starting entities, returned alongside the world so
/// that callers can reference specific countries and regions.
#[derive(Debug, Clone, Copy)]
pub struct StartingIds {
    /// Castile.
    pub castile: CountryId,
    /// Portugal.
    pub portugal: CountryId,
    /// Toledo (Castile, capacity 20).
    pub toledo: RegionId,
    /// Sevilla (Castile, capacity 30).
    pub sevilla: RegionId,
    /// Lisbon (Portugal, capacity 30).
    pub lisbon: RegionId,
    /// Algarve (Portugal, capacity 20).
    pub algarve: RegionId,
}

/// Build the default starting world.
pub fn create_starting_world() -> Result<(World, StartingIds), WorldError> {
    let mut world = World::new();

    let castile = world.create_country("Castile")?;
    let toledo = seed_region(&mut world, castile, "Toledo", 20.0)?;
    let sevilla = seed_region(&mut world, castile, "Sevilla", 30.0)?;
    world.country_mut(castile)?.tax_agriculture_rate = STARTING_TAX_AGRICULTURE_RATE;

    let portugal = world.create_country("Portugal")?;
    let lisbon = seed_region(&mut world, portugal, "Lisbon", 30.0)?;
    let algarve = seed_region(&mut world, portugal, "Algarve", 20.0)?;
    world.country_mut(portugal)?.tax_agriculture_rate = STARTING_TAX_AGRICULTURE_RATE;

    for (a, b) in [(toledo, sevilla), (sevilla, algarve), (algarve, lisbon)] {
        world.connect_regions(a, b)?;
        world.connect_regions(b, a)?;
    }

    Ok((
        world,
        StartingIds {
            castile,
            portugal,
            toledo,
            sevilla,
            lisbon,
            algarve,
        },
    ))
}

/// Create a populated region owned by `country`.
fn seed_region(
    world: &mut World,
    country: CountryId,
    name: &str,
    agriculture_capacity: f64,
) -> Result<RegionId, WorldError> {
    let id = world.create_region(name)?;
    let region = world.region_mut(id)?;
    region.population = STARTING_POPULATION;
    region.agriculture_capacity = agriculture_capacity;
    world.add_region(country, id)?;
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_shape() {
        let (world, ids) = create_starting_world().unwrap();
        assert_eq!(world.countries().len(), 2);
        assert_eq!(world.regions().len(), 4);
        assert_eq!(
            world.country(ids.castile).unwrap().regions(),
            &[ids.toledo, ids.sevilla]
        );
        assert_eq!(world.region(ids.algarve).unwrap().country(), Some(ids.portugal));
    }

    #[test]
    fn toledo_matches_table() {
        let (world, ids) = create_starting_world().unwrap();
        let toledo = world.region(ids.toledo).unwrap();
        assert!((toledo.population - 10.0).abs() < f64::EPSILON);
        assert!((toledo.agriculture_capacity - 20.0).abs() < f64::EPSILON);
        assert!((toledo.agriculture_ratio - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn regions_form_a_chain() {
        let (world, ids) = create_starting_world().unwrap();
        assert_eq!(world.neighbors(ids.toledo), &[ids.sevilla]);
        assert_eq!(world.neighbors(ids.sevilla), &[ids.toledo, ids.algarve]);
        assert_eq!(world.neighbors(ids.lisbon), &[ids.algarve]);
    }

    #[test]
    fn no_country_starts_at_war() {
        let (world, _) = create_starting_world().unwrap();
        assert!(world.countries().iter().all(|c| c.at_war_with().is_empty()));
    }
}
