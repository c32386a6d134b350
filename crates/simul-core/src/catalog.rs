//! The economic rule catalog and simulator assembly.
//!
//! [`build_rules`] turns a validated [`RulesetConfig`] into the six rules of
//! one tick, in this order:
//!
//! 1. `agriculture_production` (region)
//! 2. `agriculture_tax` (country-region, owned pairs only)
//! 3. `population_growth` (region)
//! 4. `storage_spoilage` (region)
//! 5. `manufacture_production` (region)
//! 6. `manufacture_tax` (country-region, owned pairs only)
//!
//! The order matters: food is taxed before people eat it, and people are
//! counted after growth when manufacturing.

use tracing::info;

use crate::config::{RandomizerMode, RulesetConfig, SimulationConfig};
use crate::growth::{clamp_min, limited_growth};
use crate::randomizer::{GaussianRandomizer, PassThroughRandomizer, Randomizer};
use crate::rule::Rule;
use crate::simulator::Simulator;

/// Upper bound of the population growth factor.
const MAX_GROWTH_FACTOR: f64 = 2.0;

/// Errors raised while assembling the catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A ruleset coefficient is outside its admissible range.
    #[error("invalid ruleset coefficient {name} = {value}: {reason}")]
    InvalidCoefficient {
        /// Config key of the coefficient.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Check every coefficient of `ruleset` against its admissible range.
///
/// All values must be finite and non-negative. Decay and share
/// coefficients must not exceed 1, the shrink factor must not exceed 1,
/// and the growth factor must not exceed 2.
pub fn validate(ruleset: &RulesetConfig) -> Result<(), CatalogError> {
    let unbounded = [
        ("agriculture_to_gold", ruleset.agriculture_to_gold),
        ("manufacture_to_gold", ruleset.manufacture_to_gold),
        ("production_std_deviation", ruleset.production_std_deviation),
    ];
    let fractions = [
        ("agriculture_storage_decay", ruleset.agriculture_storage_decay),
        ("gold_to_luxury", ruleset.gold_to_luxury),
        ("luxury_decay", ruleset.luxury_decay),
        ("population_shrink_factor", ruleset.population_shrink_factor),
    ];
    let growth = [("population_growth_factor", ruleset.population_growth_factor)];

    for (name, value) in unbounded {
        check(name, value, f64::INFINITY, "must be finite and non-negative")?;
    }
    for (name, value) in fractions {
        check(name, value, 1.0, "must be within [0, 1]")?;
    }
    for (name, value) in growth {
        check(name, value, MAX_GROWTH_FACTOR, "must be within [0, 2]")?;
    }
    Ok(())
}

fn check(name: &'static str, value: f64, max: f64, reason: &'static str) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 && value <= max {
        Ok(())
    } else {
        Err(CatalogError::InvalidCoefficient {
            name,
            value,
            reason,
        })
    }
}

/// Build the ordered rule list for one tick.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidCoefficient`] if the ruleset fails
/// [`validate`].
pub fn build_rules(ruleset: &RulesetConfig) -> Result<Vec<Rule>, CatalogError> {
    validate(ruleset)?;

    let std_deviation = ruleset.production_std_deviation;
    let agriculture_to_gold = ruleset.agriculture_to_gold;
    let manufacture_to_gold = ruleset.manufacture_to_gold;
    let shrink = ruleset.population_shrink_factor;
    let grow = ruleset.population_growth_factor;
    let storage_decay = ruleset.agriculture_storage_decay;
    let gold_to_luxury = ruleset.gold_to_luxury;
    let luxury_decay = ruleset.luxury_decay;

    Ok(vec![
        Rule::region("agriculture_production", move |region, ctx| {
            let base = region.population.min(region.agriculture_capacity)
                * region.agriculture_ratio
                * region.agriculture_per_population;
            region.agriculture_produce = ctx
                .randomizer
                .clamped_gaussian_default(base, std_deviation);
        }),
        Rule::country_region("agriculture_tax", move |country, region, _ctx| {
            if !region.is_owned_by(country.id()) {
                return;
            }
            let tax = region.agriculture_produce * country.tax_agriculture_rate;
            country.gold += tax * agriculture_to_gold;
            region.agriculture_storage += region.agriculture_produce - tax;
            region.agriculture_produce = 0.0;
        }),
        Rule::region("population_growth", move |region, _ctx| {
            region.population = clamp_min(
                limited_growth(
                    region.population,
                    region.agriculture_storage,
                    region.agriculture_capacity,
                    shrink,
                    grow,
                ),
                0.0,
            );
            region.agriculture_storage =
                clamp_min(region.agriculture_storage - region.population, 0.0);
        }),
        Rule::region("storage_spoilage", move |region, ctx| {
            let spoiled = ctx
                .randomizer
                .clamped_gaussian(storage_decay, std_deviation, 0.0, 1.0);
            region.agriculture_storage *= 1.0 - spoiled;
        }),
        Rule::region("manufacture_production", |region, _ctx| {
            region.manufacture_produce = clamp_min(
                region.population * region.manufacture_ratio() * region.manufacture_per_population,
                0.0,
            );
        }),
        Rule::country_region("manufacture_tax", move |country, region, _ctx| {
            if !region.is_owned_by(country.id()) {
                return;
            }
            let tax = region.manufacture_produce * country.tax_manufacture_rate;
            country.gold += tax * manufacture_to_gold;
            region.gold += (region.manufacture_produce - tax) * manufacture_to_gold;
            region.manufacture_produce = 0.0;

            if region.population > 0.0 {
                let spent = region.gold * gold_to_luxury;
                region.gold -= spent;
                region.luxury += spent / region.population;
            }
            region.luxury *= 1.0 - luxury_decay;
        }),
    ])
}

/// Build the noise source selected by `mode`.
///
/// A gaussian randomizer without a seed is seeded from the OS.
pub fn build_randomizer(mode: RandomizerMode, seed: Option<u64>) -> Box<dyn Randomizer> {
    match (mode, seed) {
        (RandomizerMode::PassThrough, _) => Box::new(PassThroughRandomizer::new()),
        (RandomizerMode::Gaussian, Some(seed)) => Box::new(GaussianRandomizer::seeded(seed)),
        (RandomizerMode::Gaussian, None) => Box::new(GaussianRandomizer::from_entropy()),
    }
}

/// Assemble a [`Simulator`] from configuration.
///
/// # Errors
///
/// Returns [`CatalogError`] if the ruleset is invalid.
pub fn load_simulator(config: &SimulationConfig) -> Result<Simulator, CatalogError> {
    let rules = build_rules(&config.ruleset)?;
    let randomizer = build_randomizer(config.world.randomizer, config.world.seed);
    info!(
        rules = rules.len(),
        randomizer = ?config.world.randomizer,
        seed = ?config.world.seed,
        "Simulator assembled"
    );
    Ok(Simulator::new(rules, randomizer))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use simul_world::create_starting_world;

    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn pass_through_simulator() -> Simulator {
        Simulator::new(
            build_rules(&RulesetConfig::default()).unwrap(),
            Box::new(PassThroughRandomizer::new()),
        )
    }

    #[test]
    fn catalog_order_is_fixed() {
        let rules = build_rules(&RulesetConfig::default()).unwrap();
        let names: Vec<_> = rules.iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "agriculture_production",
                "agriculture_tax",
                "population_growth",
                "storage_spoilage",
                "manufacture_production",
                "manufacture_tax",
            ]
        );
    }

    #[test]
    fn negative_coefficient_is_rejected() {
        let ruleset = RulesetConfig {
            agriculture_to_gold: -1.0,
            ..RulesetConfig::default()
        };
        let err = build_rules(&ruleset).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidCoefficient {
                name: "agriculture_to_gold",
                ..
            }
        ));
    }

    #[test]
    fn decay_above_one_is_rejected() {
        let ruleset = RulesetConfig {
            luxury_decay: 1.5,
            ..RulesetConfig::default()
        };
        assert!(validate(&ruleset).is_err());
    }

    #[test]
    fn growth_factor_bounds() {
        let ok = RulesetConfig {
            population_growth_factor: 2.0,
            ..RulesetConfig::default()
        };
        assert!(validate(&ok).is_ok());
        let too_big = RulesetConfig {
            population_growth_factor: 2.5,
            ..RulesetConfig::default()
        };
        assert!(validate(&too_big).is_err());
    }

    #[test]
    fn non_finite_coefficient_is_rejected() {
        let ruleset = RulesetConfig {
            production_std_deviation: f64::NAN,
            ..RulesetConfig::default()
        };
        assert!(validate(&ruleset).is_err());
    }

    #[test]
    fn toledo_first_tick_matches_hand_computation() {
        let (mut world, ids) = create_starting_world().unwrap();
        let mut sim = pass_through_simulator();
        sim.simulate(&mut world).unwrap();

        let toledo = world.region(ids.toledo).unwrap();
        // produce 10.8, tax 1.08, storage 9.72, population 10 -> 9.776
        assert_close(toledo.population, 9.776);
        assert_close(toledo.agriculture_storage, 0.0);
        assert_close(toledo.agriculture_produce, 0.0);
        assert_close(toledo.manufacture_produce, 0.0);
        // manufacture 1.27088, tax 0.254176, gold 1.016704, 20% to luxury
        assert_close(toledo.gold, 0.813_363_2);
        assert_close(toledo.luxury, 0.018_72);

        // Sevilla sees the same numbers; Castile taxes both.
        let castile = world.country(ids.castile).unwrap();
        assert_close(castile.gold, 2.668_352);
    }

    #[test]
    fn surplus_food_grows_population_and_spoils() {
        let (mut world, ids) = create_starting_world().unwrap();
        world.region_mut(ids.toledo).unwrap().agriculture_storage = 20.0;
        let mut sim = pass_through_simulator();
        sim.simulate(&mut world).unwrap();

        // storage 29.72, growth = min(19.72, 10) = 10 -> 10 + 10 * 0.8 * 5 / 10
        let toledo = world.region(ids.toledo).unwrap();
        assert_close(toledo.population, 14.0);
        // (29.72 - 14) * 0.9
        assert_close(toledo.agriculture_storage, 14.148);
    }

    #[test]
    fn unowned_region_is_never_taxed() {
        let mut world = simul_world::World::new();
        let country = world.create_country("Nobody").unwrap();
        let region = world.create_region("Wilds").unwrap();
        world.region_mut(region).unwrap().population = 10.0;
        let mut sim = pass_through_simulator();
        sim.simulate(&mut world).unwrap();

        assert!(world.country(country).unwrap().gold.abs() < EPS);
        let wilds = world.region(region).unwrap();
        assert_close(wilds.agriculture_produce, 10.8);
        assert!(wilds.gold.abs() < EPS);
    }

    #[test]
    fn empty_region_gets_no_luxury_and_stays_finite() {
        let (mut world, ids) = create_starting_world().unwrap();
        world.region_mut(ids.algarve).unwrap().population = 0.0;
        world.region_mut(ids.algarve).unwrap().gold = 5.0;
        let mut sim = pass_through_simulator();
        sim.simulate(&mut world).unwrap();

        let algarve = world.region(ids.algarve).unwrap();
        assert!(algarve.luxury.is_finite());
        assert!(algarve.luxury.abs() < EPS);
        assert_close(algarve.gold, 5.0);
    }

    #[test]
    fn load_simulator_honours_randomizer_mode() {
        let mut config = SimulationConfig::default();
        config.world.randomizer = RandomizerMode::PassThrough;
        let sim = load_simulator(&config).unwrap();
        assert_eq!(sim.rules().len(), 6);
        assert_eq!(sim.ticks(), 0);

        config.ruleset.gold_to_luxury = -0.1;
        assert!(load_simulator(&config).is_err());
    }
}
