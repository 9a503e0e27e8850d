// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Leaky integrate-and-fire rule
//!
//! ## Model Dynamics
//!
//! The membrane potential `v` integrates the accumulated input as a leaky
//! first-order system, one unit step per network update:
//!
//! ```text
//! v += (resting_potential - v + resistance * (input + bias)) / time_constant + noise
//! ```
//!
//! When `v` reaches `threshold` (and the refractory window has passed) the
//! node spikes and `v` drops to `reset_potential`. The activation reported
//! to the rest of the network is the membrane potential itself, so voltage
//! traces can be recorded from the normal activation accessors.
//!
//! Defaults follow the usual textbook millivolt ranges. Attach wide
//! activation bounds to nodes using this rule; the engine clips activations
//! into the node's bounds after every update.

use serde::{Deserialize, Serialize};

use super::{
    noise_term, ScalarRuleCtx, ScalarRuleOutput, ScalarRuleState, VectorRuleCtx, VectorRuleState,
};
use crate::error::{require_finite, require_positive, Result};
use crate::noise::NoiseSource;
use crate::ParameterError;
use ndarray::Array1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrateAndFireRule {
    pub resting_potential: f64,
    pub reset_potential: f64,
    pub threshold: f64,
    pub resistance: f64,
    pub time_constant: f64,
    /// Number of updates after a spike during which the node cannot fire.
    /// The membrane keeps integrating; only the spike is suppressed.
    pub refractory_steps: u32,
    pub noise: Option<NoiseSource>,
}

impl Default for IntegrateAndFireRule {
    fn default() -> Self {
        IntegrateAndFireRule {
            resting_potential: -70.0,
            reset_potential: -55.0,
            threshold: -50.0,
            resistance: 1.0,
            time_constant: 30.0,
            refractory_steps: 3,
            noise: None,
        }
    }
}

impl IntegrateAndFireRule {
    pub fn with_noise(mut self, noise: NoiseSource) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("resting potential", self.resting_potential)?;
        require_finite("reset potential", self.reset_potential)?;
        require_finite("spike threshold", self.threshold)?;
        require_finite("membrane resistance", self.resistance)?;
        require_positive("membrane time constant", self.time_constant)?;
        if self.threshold <= self.reset_potential {
            return Err(ParameterError::EmptyRange {
                name: "reset/threshold potentials",
                lower: self.reset_potential,
                upper: self.threshold,
            });
        }
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        Ok(())
    }

    pub(crate) fn fresh_scalar_state(&self) -> ScalarRuleState {
        ScalarRuleState::IntegrateAndFire {
            potential: self.resting_potential,
            steps_since_spike: u64::MAX,
        }
    }

    pub(crate) fn fresh_vector_state(&self, len: usize) -> VectorRuleState {
        VectorRuleState::IntegrateAndFire {
            potentials: Array1::from_elem(len, self.resting_potential),
            steps_since_spike: vec![u64::MAX; len],
        }
    }

    /// One membrane step for one element. Returns `(activation, spiked)`.
    #[inline]
    fn advance(
        &self,
        input: f64,
        bias: f64,
        noise: f64,
        potential: &mut f64,
        steps_since_spike: &mut u64,
    ) -> (f64, bool) {
        let drive = self.resting_potential - *potential + self.resistance * (input + bias);
        *potential += drive / self.time_constant + noise;
        *steps_since_spike = steps_since_spike.saturating_add(1);
        if *steps_since_spike > u64::from(self.refractory_steps) && *potential >= self.threshold {
            *potential = self.reset_potential;
            *steps_since_spike = 0;
            (self.reset_potential, true)
        } else {
            (*potential, false)
        }
    }

    pub(crate) fn step_scalar(
        &self,
        ctx: ScalarRuleCtx<'_>,
        state: &mut ScalarRuleState,
    ) -> ScalarRuleOutput {
        if !matches!(state, ScalarRuleState::IntegrateAndFire { .. }) {
            *state = self.fresh_scalar_state();
        }
        let ScalarRuleState::IntegrateAndFire {
            potential,
            steps_since_spike,
        } = state
        else {
            unreachable!()
        };
        let noise = noise_term(&self.noise, ctx.rng);
        let (activation, spiked) =
            self.advance(ctx.input, ctx.bias, noise, potential, steps_since_spike);
        ScalarRuleOutput { activation, spiked }
    }

    pub(crate) fn step_vector(
        &self,
        ctx: &mut VectorRuleCtx<'_>,
        state: &mut VectorRuleState,
        activations: &mut Array1<f64>,
        spikes: &mut [bool],
    ) {
        let len = activations.len();
        let needs_fresh = match state {
            VectorRuleState::IntegrateAndFire { potentials, .. } => potentials.len() != len,
            _ => true,
        };
        if needs_fresh {
            *state = self.fresh_vector_state(len);
        }
        let VectorRuleState::IntegrateAndFire {
            potentials,
            steps_since_spike,
        } = state
        else {
            unreachable!()
        };
        for i in 0..len {
            let noise = noise_term(&self.noise, ctx.rng);
            let (activation, spiked) = self.advance(
                ctx.inputs[i],
                ctx.biases[i],
                noise,
                &mut potentials[i],
                &mut steps_since_spike[i],
            );
            activations[i] = activation;
            spikes[i] = spiked;
        }
    }
}
