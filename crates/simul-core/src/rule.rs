//! Rule shapes dispatched by the simulator.
//!
//! A [`Rule`] is a named mutation applied during the rule pass of a tick.
//! The set of shapes is closed: a rule touches one region, one country, or
//! one country-region pair at a time. The simulator decides which entities
//! a rule is applied to; the rule decides what to do with them.

use simul_world::{Country, Region};

use crate::randomizer::Randomizer;

/// Per-application context handed to every rule.
#[derive(Debug)]
pub struct RuleContext<'a> {
    /// The tick being executed.
    pub tick: u64,
    /// Noise source for stochastic rules.
    pub randomizer: &'a mut dyn Randomizer,
}

/// Mutation of a single region.
pub type RegionRuleFn = Box<dyn Fn(&mut Region, &mut RuleContext<'_>) + Send + Sync>;

/// Mutation of a single country.
pub type CountryRuleFn = Box<dyn Fn(&mut Country, &mut RuleContext<'_>) + Send + Sync>;

/// Mutation of one country paired with one region.
pub type CountryRegionRuleFn =
    Box<dyn Fn(&mut Country, &mut Region, &mut RuleContext<'_>) + Send + Sync>;

/// A named rule of one of the three shapes.
pub enum Rule {
    /// Applied to every region, in region id order.
    Region {
        /// Name used in logs.
        name: &'static str,
        /// The mutation.
        apply: RegionRuleFn,
    },
    /// Applied to every country, in country id order.
    Country {
        /// Name used in logs.
        name: &'static str,
        /// The mutation.
        apply: CountryRuleFn,
    },
    /// Applied to every country-region pair, countries outer, regions inner.
    ///
    /// The pairs are not filtered: a rule that should only touch owned
    /// regions checks [`Region::is_owned_by`] itself.
    CountryRegion {
        /// Name used in logs.
        name: &'static str,
        /// The mutation.
        apply: CountryRegionRuleFn,
    },
}

impl Rule {
    /// Build a region rule.
    pub fn region<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut Region, &mut RuleContext<'_>) + Send + Sync + 'static,
    {
        Self::Region {
            name,
            apply: Box::new(apply),
        }
    }

    /// Build a country rule.
    pub fn country<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut Country, &mut RuleContext<'_>) + Send + Sync + 'static,
    {
        Self::Country {
            name,
            apply: Box::new(apply),
        }
    }

    /// Build a country-region rule.
    pub fn country_region<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut Country, &mut Region, &mut RuleContext<'_>) + Send + Sync + 'static,
    {
        Self::CountryRegion {
            name,
            apply: Box::new(apply),
        }
    }

    /// Name of the rule.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Region { name, .. }
            | Self::Country { name, .. }
            | Self::CountryRegion { name, .. } => *name,
        }
    }

    /// Short label of the rule shape, used in log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Region { .. } => "region",
            Self::Country { .. } => "country",
            Self::CountryRegion { .. } => "country_region",
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
