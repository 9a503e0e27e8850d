// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Sinusoidal activity generator
//!
//! Ignores input entirely and oscillates with network time, which makes it
//! a convenient rhythmic driver for everything downstream:
//!
//! ```text
//! a(t) = (upper - lower) / 2 * sin(frequency * t + phase) + (upper + lower) / 2
//! ```

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::noise_term;
use crate::error::{require_finite, require_range, Result};
use crate::noise::NoiseSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinusoidalRule {
    /// Angular step per network update, in radians.
    pub frequency: f64,
    pub phase: f64,
    pub lower: f64,
    pub upper: f64,
    pub noise: Option<NoiseSource>,
}

impl Default for SinusoidalRule {
    fn default() -> Self {
        SinusoidalRule {
            frequency: 0.1,
            phase: 0.0,
            lower: -1.0,
            upper: 1.0,
            noise: None,
        }
    }
}

impl SinusoidalRule {
    pub fn new(frequency: f64, phase: f64) -> Self {
        SinusoidalRule {
            frequency,
            phase,
            ..SinusoidalRule::default()
        }
    }

    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("oscillator frequency", self.frequency)?;
        require_finite("oscillator phase", self.phase)?;
        require_range("oscillator range", self.lower, self.upper)?;
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn compute(&self, time: u64, rng: &mut StdRng) -> f64 {
        let amplitude = (self.upper - self.lower) / 2.0;
        let midpoint = (self.upper + self.lower) / 2.0;
        amplitude * (self.frequency * time as f64 + self.phase).sin()
            + midpoint
            + noise_term(&self.noise, rng)
    }
}
