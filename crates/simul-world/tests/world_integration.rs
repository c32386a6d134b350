//! Integration tests for the `simul-world` entity store.
//!
//! Exercise the public API the way the engine and the read-model layers
//! use it: building a world, reshuffling ownership, queueing actions, and
//! exporting snapshots.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use simul_types::{Action, CountryId, RegionId};
use simul_world::{World, WorldError, create_starting_world};

/// Every region's owner lists it, and every listed region points back.
fn assert_ownership_consistent(world: &World) {
    for region in world.regions() {
        if let Some(owner) = region.country() {
            assert!(
                world.country(owner).unwrap().regions().contains(&region.id()),
                "region {} claims owner {owner} which does not list it",
                region.id()
            );
        }
    }
    for country in world.countries() {
        for region in country.regions() {
            assert_eq!(world.region(*region).unwrap().country(), Some(country.id()));
        }
    }
}

#[test]
fn ownership_stays_consistent_through_transfers() {
    let (mut world, ids) = create_starting_world().unwrap();
    assert_ownership_consistent(&world);

    world.add_region(ids.portugal, ids.toledo).unwrap();
    assert_ownership_consistent(&world);
    assert_eq!(world.country(ids.castile).unwrap().regions(), &[ids.sevilla]);

    world.remove_region(ids.portugal, ids.lisbon).unwrap();
    assert_ownership_consistent(&world);
    assert!(world.region(ids.lisbon).unwrap().country().is_none());

    world.add_region(ids.castile, ids.lisbon).unwrap();
    assert_ownership_consistent(&world);
    assert_eq!(
        world.country(ids.portugal).unwrap().regions(),
        &[ids.algarve, ids.toledo]
    );
}

#[test]
fn each_region_has_at_most_one_owner() {
    let (mut world, ids) = create_starting_world().unwrap();
    world.add_region(ids.portugal, ids.sevilla).unwrap();
    let owners = world
        .countries()
        .iter()
        .filter(|c| c.regions().contains(&ids.sevilla))
        .count();
    assert_eq!(owners, 1);
}

#[test]
fn entities_mut_exposes_fixed_size_arenas() {
    let (mut world, _) = create_starting_world().unwrap();
    let (countries, regions) = world.entities_mut();
    assert_eq!(countries.len(), 2);
    assert_eq!(regions.len(), 4);
    for region in regions.iter_mut() {
        region.gold += 1.0;
    }
    assert!(world.regions().iter().all(|r| (r.gold - 1.0).abs() < f64::EPSILON));
}

#[test]
fn snapshot_serializes_to_json() {
    let (mut world, ids) = create_starting_world().unwrap();
    world.declare_war(ids.castile, ids.portugal).unwrap();

    let snapshot = world.snapshot(0).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["countries"][0]["name"], "Castile");
    assert_eq!(json["countries"][0]["at_war_with"][0], 1);
    assert_eq!(json["regions"][0]["country"], 0);
    assert_eq!(json["regions"].as_array().map(Vec::len), Some(4));
}

#[test]
fn queued_actions_survive_until_drained() {
    let (mut world, ids) = create_starting_world().unwrap();
    world.enqueue(Action::SetTaxAgriculture {
        country: ids.castile,
        rate: 0.3,
    });
    world.enqueue(Action::SetAgricultureRatio {
        region: ids.toledo,
        ratio: 0.5,
    });

    // Queueing never mutates the entities directly.
    assert!((world.country(ids.castile).unwrap().tax_agriculture_rate - 0.1).abs() < 1e-12);
    assert_eq!(world.pending_actions().len(), 2);
    assert_eq!(world.drain_actions().len(), 2);
    assert!(world.drain_actions().is_empty());
}

#[test]
fn lookups_fail_for_ids_never_created() {
    let (world, _) = create_starting_world().unwrap();
    assert_eq!(
        world.country_view(CountryId::new(2)).err(),
        Some(WorldError::CountryNotFound(CountryId::new(2)))
    );
    assert_eq!(
        world.region_view(RegionId::new(4)).err(),
        Some(WorldError::RegionNotFound(RegionId::new(4)))
    );
}
