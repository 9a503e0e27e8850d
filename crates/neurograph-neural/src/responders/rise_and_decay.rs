// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Rise-and-decay responder
//!
//! A smooth post-synaptic potential: each spike launches a rise toward
//! `peak`, and once the response is within 1% of the peak it rolls over
//! into an exponential decay back to zero. A spike during either phase
//! restarts the rise from the current value, so responses are continuous.
//! The contribution is the response value times the full weight.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result};
use crate::util::decay_toward;

/// Where an element is in its response trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RisePhase {
    Quiet,
    Rising,
    Decaying,
}

/// Rise is considered complete within this fraction of the peak.
const RISE_COMPLETION: f64 = 0.99;
/// Below this fraction of the peak a decaying response snaps to quiet.
const QUIET_FLOOR: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseAndDecayResponder {
    pub peak: f64,
    pub rise_constant: f64,
    pub decay_constant: f64,
}

impl Default for RiseAndDecayResponder {
    fn default() -> Self {
        RiseAndDecayResponder {
            peak: 1.0,
            rise_constant: 1.0,
            decay_constant: 3.0,
        }
    }
}

impl RiseAndDecayResponder {
    pub fn new(peak: f64, rise_constant: f64, decay_constant: f64) -> Self {
        RiseAndDecayResponder {
            peak,
            rise_constant,
            decay_constant,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("response peak", self.peak)?;
        require_positive("rise time constant", self.rise_constant)?;
        require_positive("decay time constant", self.decay_constant)
    }

    #[inline]
    pub(crate) fn element(
        &self,
        weight: f64,
        spiked: bool,
        phase: &mut RisePhase,
        value: &mut f64,
    ) -> f64 {
        if spiked {
            *phase = RisePhase::Rising;
        }
        match phase {
            RisePhase::Quiet => {}
            RisePhase::Rising => {
                *value = decay_toward(*value, self.peak, self.rise_constant);
                if *value >= RISE_COMPLETION * self.peak {
                    *phase = RisePhase::Decaying;
                }
            }
            RisePhase::Decaying => {
                *value = decay_toward(*value, 0.0, self.decay_constant);
                if *value <= QUIET_FLOOR * self.peak {
                    *value = 0.0;
                    *phase = RisePhase::Quiet;
                }
            }
        }
        *value * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(responder: &RiseAndDecayResponder, spikes: &[bool]) -> Vec<f64> {
        let mut phase = RisePhase::Quiet;
        let mut value = 0.0;
        spikes
            .iter()
            .map(|&s| responder.element(1.0, s, &mut phase, &mut value))
            .collect()
    }

    #[test]
    fn rises_then_decays_then_goes_quiet() {
        let responder = RiseAndDecayResponder::new(1.0, 0.5, 3.0);
        let mut spikes = vec![false; 120];
        spikes[0] = true;
        let out = run(&responder, &spikes);

        // Rising segment is monotone increasing toward the peak.
        assert!(out[0] > 0.0);
        assert!(out[1] > out[0]);
        let peak_step = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!(out[peak_step] <= 1.0);
        assert!(out[peak_step] > 0.98);

        // After the peak the response is monotone decreasing.
        for w in out[peak_step..].windows(2) {
            assert!(w[1] <= w[0]);
        }

        // Eventually the response is exactly zero, not just small.
        assert_eq!(*out.last().unwrap(), 0.0);
    }

    #[test]
    fn quiet_element_stays_quiet() {
        let responder = RiseAndDecayResponder::default();
        assert!(run(&responder, &[false; 10]).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn respike_during_decay_restarts_the_rise() {
        let responder = RiseAndDecayResponder::new(1.0, 0.5, 3.0);
        let mut phase = RisePhase::Quiet;
        let mut value = 0.0;
        // Drive to the decay phase.
        responder.element(1.0, true, &mut phase, &mut value);
        for _ in 0..6 {
            responder.element(1.0, false, &mut phase, &mut value);
        }
        assert_eq!(phase, RisePhase::Decaying);
        let before = value;
        responder.element(1.0, true, &mut phase, &mut value);
        assert!(value > before, "respike should climb from {before}");
    }

    #[test]
    fn weight_scales_the_response() {
        let responder = RiseAndDecayResponder::new(2.0, 0.5, 3.0);
        let mut phase = RisePhase::Quiet;
        let mut value = 0.0;
        let out = responder.element(-0.5, true, &mut phase, &mut value);
        assert_eq!(out, value * -0.5);
        assert!(out < 0.0);
    }
}
