//! Bounded stochastic sampling for production and spoilage rules.
//!
//! The [`Randomizer`] trait has two implementations:
//!
//! - [`PassThroughRandomizer`] returns its input unchanged, making every
//!   rule deterministic. Tests use it to hand-compute expected values.
//! - [`GaussianRandomizer`] perturbs its input with normally distributed
//!   noise proportional to the input, drawn from a seeded `SmallRng`.
//!
//! Rules only ever see `&mut dyn Randomizer`, so swapping the variant never
//! touches rule code.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::growth::clamp;

/// Default relative standard deviation of a draw.
pub const DEFAULT_STD_DEVIATION: f64 = 0.1;

/// A source of noisy samples around a central value.
pub trait Randomizer: Send + std::fmt::Debug {
    /// Sample around `value` with standard deviation `std_deviation * value`.
    fn gaussian(&mut self, value: f64, std_deviation: f64) -> f64;

    /// Sample around `value`, then clamp into `[min_value, max_value]`.
    fn clamped_gaussian(
        &mut self,
        value: f64,
        std_deviation: f64,
        min_value: f64,
        max_value: f64,
    ) -> f64 {
        clamp(self.gaussian(value, std_deviation), min_value, max_value)
    }

    /// Sample around `value`, clamped into `[0, 2 * value]`.
    ///
    /// One unlucky draw can neither make production negative nor more than
    /// double it.
    fn clamped_gaussian_default(&mut self, value: f64, std_deviation: f64) -> f64 {
        self.clamped_gaussian(value, std_deviation, 0.0, 2.0 * value)
    }
}

/// Deterministic randomizer: every sample is exactly the input value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughRandomizer;

impl PassThroughRandomizer {
    /// Create a pass-through randomizer.
    pub const fn new() -> Self {
        Self
    }
}

impl Randomizer for PassThroughRandomizer {
    fn gaussian(&mut self, value: f64, _std_deviation: f64) -> f64 {
        value
    }
}

/// Normal-distribution sampler backed by a seeded PRNG.
///
/// Standard normal draws use the Box-Muller transform over two uniform
/// samples. The same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct GaussianRandomizer {
    rng: SmallRng,
}

impl GaussianRandomizer {
    /// Create a sampler with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Draw one sample from `N(0, 1)`.
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = self.rng.random::<f64>().max(f64::MIN_POSITIVE);
        let u2: f64 = self.rng.random::<f64>();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

impl Randomizer for GaussianRandomizer {
    fn gaussian(&mut self, value: f64, std_deviation: f64) -> f64 {
        self.standard_normal().mul_add(std_deviation * value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_returns_input() {
        let mut randomizer = PassThroughRandomizer::new();
        assert!((randomizer.gaussian(12.5, 0.3) - 12.5).abs() < f64::EPSILON);
        assert!((randomizer.clamped_gaussian_default(4.0, 0.1) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pass_through_still_clamps() {
        let mut randomizer = PassThroughRandomizer::new();
        assert!((randomizer.clamped_gaussian(3.0, 0.1, 0.0, 1.0) - 1.0).abs() < f64::EPSILON);
        assert!(randomizer.clamped_gaussian(-3.0, 0.1, 0.0, 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GaussianRandomizer::seeded(42);
        let mut b = GaussianRandomizer::seeded(42);
        for _ in 0..100 {
            assert!(a.gaussian(10.0, 0.1).to_bits() == b.gaussian(10.0, 0.1).to_bits());
        }
    }

    #[test]
    fn clamped_default_stays_within_bounds() {
        let mut randomizer = GaussianRandomizer::seeded(7);
        for _ in 0..10_000 {
            // A huge deviation forces plenty of out-of-range raw draws.
            let sample = randomizer.clamped_gaussian_default(5.0, 5.0);
            assert!((0.0..=10.0).contains(&sample), "sample {sample} out of bounds");
        }
    }

    #[test]
    fn gaussian_is_centered_on_value() {
        let mut randomizer = GaussianRandomizer::seeded(1);
        let n = 20_000_u32;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += randomizer.gaussian(100.0, 0.1);
        }
        let mean = sum / f64::from(n);
        // Standard error of the mean is 10 / sqrt(20000), about 0.07.
        assert!((mean - 100.0).abs() < 0.5, "mean {mean} too far from 100");
    }

    #[test]
    fn zero_value_has_zero_spread() {
        let mut randomizer = GaussianRandomizer::seeded(3);
        assert!(randomizer.gaussian(0.0, 0.1).abs() < f64::EPSILON);
    }
}
