// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Linear (identity) rule

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::noise_term;
use crate::error::Result;
use crate::noise::NoiseSource;

/// Passes the accumulated input through unchanged: `a = input + bias + noise`.
///
/// The engine clips the result to the node's activation bounds, which is
/// what keeps a pure relay node from drifting off to infinity in recurrent
/// loops.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearRule {
    pub noise: Option<NoiseSource>,
}

impl LinearRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn compute(&self, input: f64, bias: f64, rng: &mut StdRng) -> f64 {
        input + bias + noise_term(&self.noise, rng)
    }
}
