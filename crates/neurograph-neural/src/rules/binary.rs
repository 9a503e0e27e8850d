// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Binary threshold rule

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::noise_term;
use crate::error::{require_finite, require_range, Result};
use crate::noise::NoiseSource;

/// Two-state rule: `ceiling` when `input + bias + noise` exceeds the
/// threshold, `floor` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinaryRule {
    pub threshold: f64,
    pub ceiling: f64,
    pub floor: f64,
    pub noise: Option<NoiseSource>,
}

impl Default for BinaryRule {
    fn default() -> Self {
        BinaryRule {
            threshold: 0.5,
            ceiling: 1.0,
            floor: -1.0,
            noise: None,
        }
    }
}

impl BinaryRule {
    pub fn new(threshold: f64, floor: f64, ceiling: f64) -> Self {
        BinaryRule {
            threshold,
            ceiling,
            floor,
            noise: None,
        }
    }

    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("binary threshold", self.threshold)?;
        require_range("binary output levels", self.floor, self.ceiling)?;
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn compute(&self, input: f64, bias: f64, rng: &mut StdRng) -> f64 {
        let x = input + bias + noise_term(&self.noise, rng);
        if x > self.threshold {
            self.ceiling
        } else {
            self.floor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn switches_strictly_above_threshold() {
        let rule = BinaryRule::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rule.compute(0.51, 0.0, &mut rng), 1.0);
        assert_eq!(rule.compute(0.5, 0.0, &mut rng), -1.0);
        assert_eq!(rule.compute(0.0, 0.0, &mut rng), -1.0);
    }

    #[test]
    fn bias_counts_toward_the_threshold() {
        let rule = BinaryRule::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rule.compute(0.3, 0.3, &mut rng), 1.0);
    }

    #[test]
    fn rejects_collapsed_levels() {
        assert!(BinaryRule::new(0.0, 1.0, 1.0).validate().is_err());
        assert!(BinaryRule::new(0.0, 2.0, -2.0).validate().is_err());
    }
}
