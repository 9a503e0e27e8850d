// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Sigmoidal rule
//!
//! ## Model Dynamics
//!
//! The weighted input `x = input + bias + noise` is squashed into the open
//! interval `(lower, upper)`:
//!
//! - midpoint at `x = 0` is `(lower + upper) / 2`
//! - derivative at the midpoint equals `slope`
//! - the curve saturates toward `lower` and `upper` at the tails
//!
//! Three interchangeable squash shapes are provided; they agree on midpoint
//! and midpoint slope and differ only in tail behavior (atan approaches its
//! asymptotes polynomially, the other two exponentially).

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::noise_term;
use crate::error::{require_positive, require_range, Result};
use crate::noise::NoiseSource;

/// Shape of the squashing nonlinearity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquashFunction {
    Logistic,
    Tanh,
    Atan,
}

impl SquashFunction {
    /// Maps `x` into `(lower, upper)` with derivative `slope` at zero.
    #[inline]
    pub fn squash(&self, x: f64, lower: f64, upper: f64, slope: f64) -> f64 {
        let diff = upper - lower;
        let mid = (upper + lower) / 2.0;
        match self {
            SquashFunction::Logistic => {
                let z = 4.0 * slope * x / diff;
                lower + diff / (1.0 + (-z).exp())
            }
            SquashFunction::Tanh => mid + (diff / 2.0) * (2.0 * slope * x / diff).tanh(),
            SquashFunction::Atan => {
                mid + (diff / std::f64::consts::PI)
                    * (std::f64::consts::PI * slope * x / diff).atan()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidalRule {
    pub squash: SquashFunction,
    pub lower: f64,
    pub upper: f64,
    pub slope: f64,
    pub noise: Option<NoiseSource>,
}

impl Default for SigmoidalRule {
    fn default() -> Self {
        SigmoidalRule {
            squash: SquashFunction::Logistic,
            lower: -1.0,
            upper: 1.0,
            slope: 1.0,
            noise: None,
        }
    }
}

impl SigmoidalRule {
    pub fn new(squash: SquashFunction, lower: f64, upper: f64, slope: f64) -> Self {
        SigmoidalRule {
            squash,
            lower,
            upper,
            slope,
            noise: None,
        }
    }

    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_range("sigmoid asymptotes", self.lower, self.upper)?;
        require_positive("sigmoid slope", self.slope)?;
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn compute(&self, input: f64, bias: f64, rng: &mut StdRng) -> f64 {
        let x = input + bias + noise_term(&self.noise, rng);
        self.squash.squash(x, self.lower, self.upper, self.slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SHAPES: [SquashFunction; 3] = [
        SquashFunction::Logistic,
        SquashFunction::Tanh,
        SquashFunction::Atan,
    ];

    #[test]
    fn midpoint_at_zero_input() {
        for squash in SHAPES {
            assert!((squash.squash(0.0, -1.0, 1.0, 1.0)).abs() < 1e-12);
            assert!((squash.squash(0.0, 0.0, 4.0, 1.0) - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn midpoint_slope_matches_parameter() {
        let h = 1e-6;
        for squash in SHAPES {
            for slope in [0.5, 1.0, 3.0] {
                let d = (squash.squash(h, -1.0, 1.0, slope)
                    - squash.squash(-h, -1.0, 1.0, slope))
                    / (2.0 * h);
                assert!(
                    (d - slope).abs() < 1e-4,
                    "{squash:?} slope {slope}: got {d}"
                );
            }
        }
    }

    #[test]
    fn output_stays_inside_asymptotes() {
        for squash in SHAPES {
            for x in [-1e6, -3.0, -0.1, 0.2, 5.0, 1e6] {
                let y = squash.squash(x, 0.0, 1.0, 2.0);
                assert!((0.0..=1.0).contains(&y), "{squash:?}({x}) = {y}");
            }
        }
    }

    #[test]
    fn saturates_toward_asymptotes() {
        for squash in SHAPES {
            assert!(squash.squash(1e9, -1.0, 1.0, 1.0) > 0.999);
            assert!(squash.squash(-1e9, -1.0, 1.0, 1.0) < -0.999);
        }
    }

    #[test]
    fn monotone_increasing() {
        for squash in SHAPES {
            let mut prev = f64::NEG_INFINITY;
            for i in -100..=100 {
                let y = squash.squash(i as f64 / 10.0, -2.0, 3.0, 1.5);
                assert!(y > prev);
                prev = y;
            }
        }
    }

    #[test]
    fn bias_shifts_the_curve() {
        let rule = SigmoidalRule::default();
        let mut rng = StdRng::seed_from_u64(0);
        let centered = rule.compute(0.0, 0.0, &mut rng);
        let shifted = rule.compute(0.0, 1.0, &mut rng);
        assert!((centered).abs() < 1e-12);
        assert!(shifted > centered);
    }

    #[test]
    fn rejects_inverted_asymptotes_and_flat_slope() {
        let mut rule = SigmoidalRule::default();
        rule.lower = 2.0;
        rule.upper = -2.0;
        assert!(rule.validate().is_err());

        let mut rule = SigmoidalRule::default();
        rule.slope = 0.0;
        assert!(rule.validate().is_err());
    }
}
