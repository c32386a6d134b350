//! The rule engine that advances a [`World`] one tick at a time.
//!
//! Each call to [`Simulator::simulate`] runs three steps:
//!
//! 1. **Clock** -- increment the tick counter.
//! 2. **Rule pass** -- apply every rule, in catalog order, to the entities
//!    matching its shape. Stocks are clamped to `>= 0` after every single
//!    application.
//! 3. **Action drain** -- capture the queued actions, clear the queue,
//!    and execute the captured batch in submission order. Actions queued
//!    while the batch executes (an accepted peace proposal) wait for the
//!    next tick.
//!
//! The call is synchronous and holds `&mut World` for its whole duration,
//! so no other mutation can interleave with a tick.

use simul_types::Action;
use simul_world::{World, WorldError};
use tracing::{debug, error, info};

use crate::randomizer::Randomizer;
use crate::rule::{Rule, RuleContext};

/// Errors that can occur during a tick.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// One or more queued actions named entities that do not exist, or
    /// were otherwise invalid. The rest of the batch was still executed.
    #[error("{} action(s) rejected during tick {tick}", .rejected.len())]
    RejectedActions {
        /// The tick whose action drain rejected them.
        tick: u64,
        /// Each rejected action with the reason it was rejected.
        rejected: Vec<RejectedAction>,
    },
}

/// An action that could not be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedAction {
    /// The action as it was queued.
    pub action: Action,
    /// Why it was rejected.
    pub error: WorldError,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Number of rules applied.
    pub rules_applied: usize,
    /// Number of queued actions executed.
    pub actions_executed: usize,
    /// Number of actions queued for the next tick by the executed ones.
    pub actions_deferred: usize,
}

/// Ordered rule list plus the tick counter and noise source that drive it.
#[derive(Debug)]
pub struct Simulator {
    rules: Vec<Rule>,
    randomizer: Box<dyn Randomizer>,
    ticks: u64,
}

impl Simulator {
    /// Create a simulator at tick 0.
    pub fn new(rules: Vec<Rule>, randomizer: Box<dyn Randomizer>) -> Self {
        Self {
            rules,
            randomizer,
            ticks: 0,
        }
    }

    /// Number of ticks executed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run one tick over `world`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::TickOverflow`] without touching the world
    /// if the counter is exhausted, and [`SimulationError::RejectedActions`]
    /// after a completed tick if any queued action was invalid.
    pub fn simulate(&mut self, world: &mut World) -> Result<TickSummary, SimulationError> {
        self.ticks = self
            .ticks
            .checked_add(1)
            .ok_or(SimulationError::TickOverflow)?;
        let tick = self.ticks;
        info!(tick, rules = self.rules.len(), "Tick started");

        self.apply_rules(world, tick);

        let batch = world.drain_actions();
        let actions_executed = batch.len();
        let mut rejected = Vec::new();
        for action in batch {
            debug!(tick, action = action.name(), "Executing action");
            if let Err(e) = execute_action(world, action) {
                error!(tick, action = action.name(), error = %e, "Action rejected");
                rejected.push(RejectedAction { action, error: e });
            }
        }
        let actions_deferred = world.pending_actions().len();

        info!(
            tick,
            actions_executed,
            actions_rejected = rejected.len(),
            actions_deferred,
            "Tick finished"
        );

        if !rejected.is_empty() {
            return Err(SimulationError::RejectedActions { tick, rejected });
        }

        Ok(TickSummary {
            tick,
            rules_applied: self.rules.len(),
            actions_executed,
            actions_deferred,
        })
    }

    /// Apply every rule in order to the entities matching its shape.
    fn apply_rules(&mut self, world: &mut World, tick: u64) {
        let mut ctx = RuleContext {
            tick,
            randomizer: self.randomizer.as_mut(),
        };
        let (countries, regions) = world.entities_mut();

        for rule in &self.rules {
            debug!(tick, rule = rule.name(), kind = rule.kind(), "Applying rule");
            match rule {
                Rule::Region { apply, .. } => {
                    for region in regions.iter_mut() {
                        apply(region, &mut ctx);
                        region.clamp_non_negative();
                    }
                }
                Rule::Country { apply, .. } => {
                    for country in countries.iter_mut() {
                        apply(country, &mut ctx);
                        country.clamp_non_negative();
                    }
                }
                Rule::CountryRegion { apply, .. } => {
                    for country in countries.iter_mut() {
                        for region in regions.iter_mut() {
                            apply(country, region, &mut ctx);
                            country.clamp_non_negative();
                            region.clamp_non_negative();
                        }
                    }
                }
            }
        }
    }
}

/// Apply one action to the world immediately.
///
/// [`Action::ProposePeace`] does not change any relation; it queues the
/// matching [`Action::AcceptPeace`], which the simulator executes on the
/// following tick.
///
/// # Errors
///
/// Returns [`WorldError`] if the action names an unknown country or region,
/// or pairs a country with itself. The world is left unchanged.
pub fn execute_action(world: &mut World, action: Action) -> Result<(), WorldError> {
    match action {
        Action::DeclareWar { actor, other } => world.declare_war(actor, other),
        Action::ProposePeace { actor, other } => {
            if actor == other {
                return Err(WorldError::SelfRelation(actor));
            }
            world.country(actor)?;
            world.country(other)?;
            world.enqueue(Action::AcceptPeace {
                actor: other,
                other: actor,
            });
            Ok(())
        }
        Action::AcceptPeace { actor, other } => world.make_peace(actor, other),
        Action::SetTaxAgriculture { country, rate } => {
            world.country_mut(country)?.tax_agriculture_rate = rate;
            Ok(())
        }
        Action::SetTaxManufacture { country, rate } => {
            world.country_mut(country)?.tax_manufacture_rate = rate;
            Ok(())
        }
        Action::SetAgricultureRatio { region, ratio } => {
            world.region_mut(region)?.agriculture_ratio = ratio;
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use simul_types::{CountryId, RegionId};

    use super::*;
    use crate::randomizer::PassThroughRandomizer;

    fn simulator(rules: Vec<Rule>) -> Simulator {
        Simulator::new(rules, Box::new(PassThroughRandomizer::new()))
    }

    fn two_by_two() -> World {
        let mut world = World::new();
        let a = world.create_country("A").unwrap();
        let b = world.create_country("B").unwrap();
        let r0 = world.create_region("r0").unwrap();
        let r1 = world.create_region("r1").unwrap();
        world.add_region(a, r0).unwrap();
        world.add_region(b, r1).unwrap();
        world
    }

    #[test]
    fn tick_counter_starts_at_zero_and_increments_once() {
        let mut sim = simulator(Vec::new());
        let mut world = World::new();
        assert_eq!(sim.ticks(), 0);
        let summary = sim.simulate(&mut world).unwrap();
        assert_eq!(summary.tick, 1);
        sim.simulate(&mut world).unwrap();
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn rules_see_the_incremented_tick() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let mut sim = simulator(vec![Rule::country("tick", move |_, ctx| {
            log.lock().unwrap().push(ctx.tick);
        })]);
        let mut world = two_by_two();
        sim.simulate(&mut world).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
    }

    #[test]
    fn rules_run_in_order_and_cross_product_is_countries_outer() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let (t1, t2, t3) = (Arc::clone(&trace), Arc::clone(&trace), Arc::clone(&trace));
        let mut sim = simulator(vec![
            Rule::region("first", move |r, _| {
                t1.lock().unwrap().push(format!("region {}", r.id()));
            }),
            Rule::country_region("second", move |c, r, _| {
                t2.lock().unwrap().push(format!("pair {} {}", c.id(), r.id()));
            }),
            Rule::country("third", move |c, _| {
                t3.lock().unwrap().push(format!("country {}", c.id()));
            }),
        ]);
        let mut world = two_by_two();
        sim.simulate(&mut world).unwrap();

        let expected = [
            "region 0", "region 1", "pair 0 0", "pair 0 1", "pair 1 0", "pair 1 1", "country 0",
            "country 1",
        ];
        assert_eq!(*trace.lock().unwrap(), expected);
    }

    #[test]
    fn stocks_are_clamped_after_each_application() {
        let mut sim = simulator(vec![
            Rule::region("drain", |r, _| r.gold = -5.0),
            Rule::region("check", |r, _| assert!(r.gold >= 0.0)),
            Rule::country("overspend", |c, _| c.gold -= 100.0),
        ]);
        let mut world = two_by_two();
        sim.simulate(&mut world).unwrap();
        assert!(world.regions().iter().all(|r| r.gold.abs() < f64::EPSILON));
        assert!(world.countries().iter().all(|c| c.gold.abs() < f64::EPSILON));
    }

    #[test]
    fn actions_run_after_rules() {
        let mut sim = simulator(vec![Rule::country_region("tax", |c, r, _| {
            if r.is_owned_by(c.id()) {
                c.gold += c.tax_agriculture_rate;
            }
        })]);
        let mut world = two_by_two();
        world.enqueue(Action::SetTaxAgriculture {
            country: CountryId::new(0),
            rate: 0.5,
        });
        sim.simulate(&mut world).unwrap();
        // The rule saw the old rate; the action applied afterwards.
        let a = world.country(CountryId::new(0)).unwrap();
        assert!((a.gold - 0.1).abs() < 1e-12);
        assert!((a.tax_agriculture_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn manufacture_tax_action_sets_manufacture_rate_only() {
        let mut world = two_by_two();
        execute_action(
            &mut world,
            Action::SetTaxManufacture {
                country: CountryId::new(1),
                rate: 0.35,
            },
        )
        .unwrap();
        let b = world.country(CountryId::new(1)).unwrap();
        assert!((b.tax_manufacture_rate - 0.35).abs() < 1e-12);
        assert!((b.tax_agriculture_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_values_are_accepted_as_is() {
        let mut world = two_by_two();
        execute_action(
            &mut world,
            Action::SetAgricultureRatio {
                region: RegionId::new(0),
                ratio: 1.7,
            },
        )
        .unwrap();
        assert!((world.region(RegionId::new(0)).unwrap().agriculture_ratio - 1.7).abs() < 1e-12);
    }

    #[test]
    fn propose_peace_defers_acceptance_one_tick() {
        let mut sim = simulator(Vec::new());
        let mut world = two_by_two();
        let (a, b) = (CountryId::new(0), CountryId::new(1));
        world.declare_war(a, b).unwrap();

        world.enqueue(Action::ProposePeace { actor: a, other: b });
        let summary = sim.simulate(&mut world).unwrap();
        assert_eq!(summary.actions_executed, 1);
        assert_eq!(summary.actions_deferred, 1);
        assert!(world.country(a).unwrap().is_at_war_with(b));
        assert_eq!(
            world.pending_actions(),
            &[Action::AcceptPeace { actor: b, other: a }]
        );

        sim.simulate(&mut world).unwrap();
        assert!(!world.country(a).unwrap().is_at_war_with(b));
        assert!(!world.country(b).unwrap().is_at_war_with(a));
        assert!(world.pending_actions().is_empty());
    }

    #[test]
    fn unknown_ids_are_rejected_loudly_without_blocking_the_batch() {
        let mut sim = simulator(Vec::new());
        let mut world = two_by_two();
        let bad = Action::SetTaxAgriculture {
            country: CountryId::new(9),
            rate: 0.3,
        };
        world.enqueue(bad);
        world.enqueue(Action::SetTaxAgriculture {
            country: CountryId::new(0),
            rate: 0.3,
        });

        let err = sim.simulate(&mut world).unwrap_err();
        assert!(matches!(
            &err,
            SimulationError::RejectedActions { tick: 1, rejected }
                if rejected == &[RejectedAction {
                    action: bad,
                    error: WorldError::CountryNotFound(CountryId::new(9)),
                }]
        ));
        assert_eq!(err.to_string(), "1 action(s) rejected during tick 1");
        assert!((world.country(CountryId::new(0)).unwrap().tax_agriculture_rate - 0.3).abs() < 1e-12);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn propose_peace_to_unknown_country_queues_nothing() {
        let mut world = two_by_two();
        let result = execute_action(
            &mut world,
            Action::ProposePeace {
                actor: CountryId::new(0),
                other: CountryId::new(5),
            },
        );
        assert!(result.is_err());
        assert!(world.pending_actions().is_empty());
    }
}
