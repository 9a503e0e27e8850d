// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Spiking threshold rule
//!
//! The simplest spiking rule: fire whenever the accumulated input reaches
//! the threshold. Activation mirrors the spike flag (1 on a spike step, 0
//! otherwise) so graded links attached to a spiking node still see a pulse
//! train. Bias does not enter the comparison; persistent drive belongs in
//! the input, where responders and clamped sources put it.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::noise_term;
use crate::error::{require_finite, Result};
use crate::noise::NoiseSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikingThresholdRule {
    pub threshold: f64,
    pub noise: Option<NoiseSource>,
}

impl Default for SpikingThresholdRule {
    fn default() -> Self {
        SpikingThresholdRule {
            threshold: 0.5,
            noise: None,
        }
    }
}

impl SpikingThresholdRule {
    pub fn new(threshold: f64) -> Self {
        SpikingThresholdRule {
            threshold,
            noise: None,
        }
    }

    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("spike threshold", self.threshold)?;
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    /// Returns `(activation, spiked)`.
    #[inline]
    pub fn compute(&self, input: f64, rng: &mut StdRng) -> (f64, bool) {
        let spiked = input + noise_term(&self.noise, rng) >= self.threshold;
        (if spiked { 1.0 } else { 0.0 }, spiked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn fires_at_and_above_threshold() {
        let rule = SpikingThresholdRule::new(0.5);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(rule.compute(0.5, &mut rng), (1.0, true));
        assert_eq!(rule.compute(0.7, &mut rng), (1.0, true));
        assert_eq!(rule.compute(0.49, &mut rng), (0.0, false));
    }

    #[test]
    fn noise_can_push_over_threshold() {
        let rule =
            SpikingThresholdRule::new(0.5).with_noise(NoiseSource::uniform_symmetric(0.2));
        let mut rng = StdRng::seed_from_u64(11);
        let fired = (0..500).filter(|_| rule.compute(0.45, &mut rng).1).count();
        assert!(fired > 0, "sub-threshold input never fired despite noise");
        assert!(fired < 500, "noise made firing certain");
    }
}
