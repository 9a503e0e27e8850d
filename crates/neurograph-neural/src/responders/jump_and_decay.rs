// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Jump-and-decay responder
//!
//! On a spike step the response is set to exactly `jump_height`; on every
//! other step it relaxes exponentially toward `baseline`. The jump replaces
//! the relaxation for that step, so the peak is always observable no matter
//! how the time constant is tuned. Responses are scaled by the sign of the
//! weight; magnitude lives in the jump height.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, Result};
use crate::util::{decay_toward, signum_or_zero};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpAndDecayResponder {
    pub jump_height: f64,
    pub baseline: f64,
    pub time_constant: f64,
}

impl Default for JumpAndDecayResponder {
    fn default() -> Self {
        JumpAndDecayResponder {
            jump_height: 1.0,
            baseline: 0.0,
            time_constant: 1.0,
        }
    }
}

impl JumpAndDecayResponder {
    pub fn new(jump_height: f64, baseline: f64, time_constant: f64) -> Self {
        JumpAndDecayResponder {
            jump_height,
            baseline,
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
        if spiked {
            *value = self.jump_height;
        } else {
            *value = decay_toward(*value, self.baseline, self.time_constant);
        }
        *value * signum_or_zero(weight)
    }
}
