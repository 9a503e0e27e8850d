// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Use/depression/facilitation responder
//!
//! ## Model Dynamics
//!
//! Short-term synaptic plasticity with two coupled element variables, after
//! Tsodyks and Markram: `utilization` (u, the fraction of resources a spike
//! commits) and `resources` (x, what is left to release).
//!
//! On a spike step, with the pre-spike values:
//!
//! ```text
//! released = u * x
//! contribution = weight * released
//! u += baseline_utilization * (1 - u)     (facilitation)
//! x -= released                           (depression)
//! ```
//!
//! Between spikes both relax toward rest, u to `baseline_utilization` with
//! the facilitation time constant and x to 1 with the recovery time
//! constant, and the contribution is zero. With both variables in [0, 1]
//! the released fraction can never exceed the remaining resources.
//!
//! Low baseline utilization makes a synapse facilitating (u grows faster
//! than x drains), high baseline makes it depressing.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, require_probability, Result};
use crate::util::decay_toward;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UdfResponder {
    /// Resting utilization fraction, in [0, 1].
    pub baseline_utilization: f64,
    /// Steps for utilization to relax back to baseline.
    pub facilitation_constant: f64,
    /// Steps for resources to recover toward full.
    pub recovery_constant: f64,
}

impl Default for UdfResponder {
    fn default() -> Self {
        UdfResponder {
            baseline_utilization: 0.5,
            facilitation_constant: 50.0,
            recovery_constant: 1100.0,
        }
    }
}

impl UdfResponder {
    pub fn new(
        baseline_utilization: f64,
        facilitation_constant: f64,
        recovery_constant: f64,
    ) -> Self {
        UdfResponder {
            baseline_utilization,
            facilitation_constant,
            recovery_constant,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_probability("baseline utilization", self.baseline_utilization)?;
        require_positive("facilitation time constant", self.facilitation_constant)?;
        require_positive("recovery time constant", self.recovery_constant)
    }

    #[inline]
    pub(crate) fn element(
        &self,
        weight: f64,
        spiked: bool,
        utilization: &mut f64,
        resources: &mut f64,
    ) -> f64 {
        if spiked {
            let released = *utilization * *resources;
            *utilization += self.baseline_utilization * (1.0 - *utilization);
            *resources -= released;
            weight * released
        } else {
            *utilization = decay_toward(
                *utilization,
                self.baseline_utilization,
                self.facilitation_constant,
            );
            *resources = decay_toward(*resources, 1.0, self.recovery_constant);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(responder: &UdfResponder) -> (f64, f64) {
        (responder.baseline_utilization, 1.0)
    }

    #[test]
    fn first_release_is_baseline_fraction() {
        let responder = UdfResponder::default();
        let (mut u, mut x) = fresh(&responder);
        assert_eq!(responder.element(1.0, true, &mut u, &mut x), 0.5);
        assert_eq!(u, 0.75);
        assert_eq!(x, 0.5);
    }

    #[test]
    fn back_to_back_spikes_depress_at_high_baseline() {
        let responder = UdfResponder::default();
        let (mut u, mut x) = fresh(&responder);
        let first = responder.element(1.0, true, &mut u, &mut x);
        let second = responder.element(1.0, true, &mut u, &mut x);
        assert_eq!(first, 0.5);
        assert_eq!(second, 0.375);
        assert!(second < first);
    }

    #[test]
    fn back_to_back_spikes_facilitate_at_low_baseline() {
        let responder = UdfResponder::new(0.1, 50.0, 1100.0);
        let (mut u, mut x) = fresh(&responder);
        let first = responder.element(1.0, true, &mut u, &mut x);
        let second = responder.element(1.0, true, &mut u, &mut x);
        assert!((first - 0.1).abs() < 1e-12);
        assert!((second - 0.19 * 0.9).abs() < 1e-12);
        assert!(second > first);
    }

    #[test]
    fn variables_stay_in_unit_interval_under_any_train() {
        let responder = UdfResponder::new(0.7, 10.0, 20.0);
        let (mut u, mut x) = fresh(&responder);
        for step in 0..10_000 {
            // Irregular but deterministic spike pattern.
            let spiked = step % 7 == 0 || step % 11 == 3;
            responder.element(1.0, spiked, &mut u, &mut x);
            assert!((0.0..=1.0).contains(&u), "u left [0,1]: {u}");
            assert!((0.0..=1.0).contains(&x), "x left [0,1]: {x}");
        }
    }

    #[test]
    fn long_silence_restores_the_first_response() {
        let responder = UdfResponder::new(0.5, 50.0, 200.0);
        let (mut u, mut x) = fresh(&responder);
        let rested = responder.element(1.0, true, &mut u, &mut x);
        // Deplete with a burst.
        for _ in 0..20 {
            responder.element(1.0, true, &mut u, &mut x);
        }
        // Relax for many multiples of both time constants.
        for _ in 0..5000 {
            responder.element(1.0, false, &mut u, &mut x);
        }
        let recovered = responder.element(1.0, true, &mut u, &mut x);
        assert!((recovered - rested).abs() < 1e-3);
    }

    #[test]
    fn quiet_steps_contribute_nothing() {
        let responder = UdfResponder::default();
        let (mut u, mut x) = fresh(&responder);
        responder.element(1.0, true, &mut u, &mut x);
        assert_eq!(responder.element(1.0, false, &mut u, &mut x), 0.0);
    }
}
