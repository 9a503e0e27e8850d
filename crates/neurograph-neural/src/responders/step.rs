// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Step responder

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, Result};
use crate::util::signum_or_zero;
use crate::ParameterError;

/// Rectangular pulse: a spike opens a window of `duration` steps during
/// which the response is `height`, scaled by the sign of the weight. A spike
/// landing inside an open window restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResponder {
    pub height: f64,
    pub duration: u32,
}

impl Default for StepResponder {
    fn default() -> Self {
        StepResponder {
            height: 1.0,
            duration: 1,
        }
    }
}

impl StepResponder {
    pub fn new(height: f64, duration: u32) -> Self {
        StepResponder { height, duration }
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("step height", self.height)?;
        if self.duration == 0 {
            return Err(ParameterError::NotPositive {
                name: "step duration",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// One element step. The countdown is refreshed on a spike and ticks
    /// down on the steps after it, so a single spike yields exactly
    /// `duration` response steps starting with the spike step.
    #[inline]
    pub(crate) fn element(&self, weight: f64, spiked: bool, countdown: &mut u32) -> f64 {
        if spiked {
            *countdown = self.duration;
        } else if *countdown > 0 {
            *countdown -= 1;
        }
        if *countdown > 0 {
            self.height * signum_or_zero(weight)
        } else {
            0.0
        }
    }
}
