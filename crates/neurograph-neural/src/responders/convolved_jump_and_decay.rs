// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Convolved jump-and-decay responder
//!
//! Like jump-and-decay, but spikes add instead of reset: the running value
//! decays every step and each spike deposits another `jump_height` on top.
//! The response is therefore the spike train convolved with an exponential
//! kernel, and closely spaced spikes pile up.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, Result};
use crate::util::{decay_toward, signum_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvolvedJumpAndDecayResponder {
    pub jump_height: f64,
    pub baseline: f64,
    pub time_constant: f64,
}

impl Default for ConvolvedJumpAndDecayResponder {
    fn default() -> Self {
        ConvolvedJumpAndDecayResponder {
            jump_height: 1.0,
            baseline: 0.0,
            time_constant: 1.0,
        }
    }
}

impl ConvolvedJumpAndDecayResponder {
    pub fn new(jump_height: f64, time_constant: f64) -> Self {
        ConvolvedJumpAndDecayResponder {
            jump_height,
            baseline: 0.0,
            time_constant,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("jump height", self.jump_height)?;
        require_finite("baseline", self.baseline)?;
        require_positive("decay time constant", self.time_constant)
    }

    #[inline]
    pub(crate) fn element(&self, weight: f64, spiked: bool, value: &mut f64) -> f64 {
        *value = decay_toward(*value, self.baseline, self.time_constant);
        if spiked {
            *value += self.jump_height;
        }
        *value * signum_or_zero(weight)
    }
}
