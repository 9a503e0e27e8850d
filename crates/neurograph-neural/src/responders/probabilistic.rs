// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Probabilistic responder

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{require_probability, Result};

/// Unreliable synapse: each incoming spike is delivered with probability
/// `probability`, as a one-step pulse of weight times the source value, and
/// dropped otherwise. No response persists between steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticResponder {
    pub probability: f64,
}

impl Default for ProbabilisticResponder {
    fn default() -> Self {
        ProbabilisticResponder { probability: 0.5 }
    }
}

impl ProbabilisticResponder {
    pub fn new(probability: f64) -> Self {
        ProbabilisticResponder { probability }
    }

    pub fn validate(&self) -> Result<()> {
        require_probability("delivery probability", self.probability)
    }

    #[inline]
    pub(crate) fn element(&self, weight: f64, value: f64, spiked: bool, rng: &mut StdRng) -> f64 {
        if spiked && rng.gen_bool(self.probability) {
            weight * value
        } else {
            0.0
        }
    }
}
