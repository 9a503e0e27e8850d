// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Activation update rules
//!
//! An [`UpdateRule`] maps a node's accumulated input to its next activation,
//! and for spiking rules to a spike flag. Rules are pure parameter sets; any
//! per-node evolving quantities (membrane potential, refractory counters)
//! live in a [`ScalarRuleState`] / [`VectorRuleState`] owned by the node, so
//! one rule value can be shared or cloned freely across nodes.
//!
//! The closed enum is deliberate: the rule set is fixed, dispatch is a match,
//! and every variant is serializable for genome and scenario files.

use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::noise::NoiseSource;

mod binary;
mod integrate_and_fire;
mod linear;
mod sigmoidal;
mod sinusoidal;
mod spiking_threshold;

pub use binary::BinaryRule;
pub use integrate_and_fire::IntegrateAndFireRule;
pub use linear::LinearRule;
pub use sigmoidal::{SigmoidalRule, SquashFunction};
pub use sinusoidal::SinusoidalRule;
pub use spiking_threshold::SpikingThresholdRule;

/// Inputs a rule sees when updating one scalar node.
///
/// `input` is the buffered sum staged during the first update phase; `time`
/// is the step count before this update is applied.
pub struct ScalarRuleCtx<'a> {
    pub input: f64,
    pub bias: f64,
    pub time: u64,
    pub rng: &'a mut StdRng,
}

/// Result of one scalar rule application, before bound clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarRuleOutput {
    pub activation: f64,
    pub spiked: bool,
}

impl ScalarRuleOutput {
    /// Output of a graded (non-spiking) rule.
    #[inline]
    pub fn graded(activation: f64) -> Self {
        ScalarRuleOutput {
            activation,
            spiked: false,
        }
    }
}

/// Inputs a rule sees when updating one vector node, element-wise.
pub struct VectorRuleCtx<'a> {
    pub inputs: ArrayView1<'a, f64>,
    pub biases: ArrayView1<'a, f64>,
    pub time: u64,
    pub rng: &'a mut StdRng,
}

/// Evolving per-node quantities for a scalar node.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarRuleState {
    /// The rule derives everything from the current context.
    Stateless,
    /// Membrane potential and refractory bookkeeping.
    ///
    /// `steps_since_spike` starts saturated so the refractory window never
    /// blocks the first spike.
    IntegrateAndFire {
        potential: f64,
        steps_since_spike: u64,
    },
}

/// Evolving per-node quantities for a vector node, one slot per element.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorRuleState {
    Stateless,
    IntegrateAndFire {
        potentials: Array1<f64>,
        steps_since_spike: Vec<u64>,
    },
}

/// The closed set of activation update rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdateRule {
    Linear(LinearRule),
    Sigmoidal(SigmoidalRule),
    Binary(BinaryRule),
    SpikingThreshold(SpikingThresholdRule),
    IntegrateAndFire(IntegrateAndFireRule),
    Sinusoidal(SinusoidalRule),
}

impl Default for UpdateRule {
    fn default() -> Self {
        UpdateRule::Linear(LinearRule::default())
    }
}

impl UpdateRule {
    pub fn linear() -> Self {
        UpdateRule::Linear(LinearRule::default())
    }

    pub fn sigmoidal() -> Self {
        UpdateRule::Sigmoidal(SigmoidalRule::default())
    }

    pub fn binary() -> Self {
        UpdateRule::Binary(BinaryRule::default())
    }

    pub fn spiking_threshold(threshold: f64) -> Self {
        UpdateRule::SpikingThreshold(SpikingThresholdRule::new(threshold))
    }

    pub fn integrate_and_fire() -> Self {
        UpdateRule::IntegrateAndFire(IntegrateAndFireRule::default())
    }

    pub fn sinusoidal() -> Self {
        UpdateRule::Sinusoidal(SinusoidalRule::default())
    }

    /// Short rule name for logs and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            UpdateRule::Linear(_) => "linear",
            UpdateRule::Sigmoidal(_) => "sigmoidal",
            UpdateRule::Binary(_) => "binary",
            UpdateRule::SpikingThreshold(_) => "spiking threshold",
            UpdateRule::IntegrateAndFire(_) => "integrate and fire",
            UpdateRule::Sinusoidal(_) => "sinusoidal",
        }
    }

    /// Whether this rule produces spike events (and so drives responders).
    pub fn is_spiking(&self) -> bool {
        matches!(
            self,
            UpdateRule::SpikingThreshold(_) | UpdateRule::IntegrateAndFire(_)
        )
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            UpdateRule::Linear(r) => r.validate(),
            UpdateRule::Sigmoidal(r) => r.validate(),
            UpdateRule::Binary(r) => r.validate(),
            UpdateRule::SpikingThreshold(r) => r.validate(),
            UpdateRule::IntegrateAndFire(r) => r.validate(),
            UpdateRule::Sinusoidal(r) => r.validate(),
        }
    }

    /// Fresh state for a scalar node governed by this rule.
    pub fn create_scalar_state(&self) -> ScalarRuleState {
        match self {
            UpdateRule::IntegrateAndFire(r) => r.fresh_scalar_state(),
            _ => ScalarRuleState::Stateless,
        }
    }

    /// Fresh state for a vector node of `len` elements.
    pub fn create_vector_state(&self, len: usize) -> VectorRuleState {
        match self {
            UpdateRule::IntegrateAndFire(r) => r.fresh_vector_state(len),
            _ => VectorRuleState::Stateless,
        }
    }

    /// Applies the rule to one scalar node. Bound clipping happens in the
    /// engine, after this returns.
    pub fn apply_scalar(
        &self,
        ctx: ScalarRuleCtx<'_>,
        state: &mut ScalarRuleState,
    ) -> ScalarRuleOutput {
        match self {
            UpdateRule::Linear(r) => {
                ScalarRuleOutput::graded(r.compute(ctx.input, ctx.bias, ctx.rng))
            }
            UpdateRule::Sigmoidal(r) => {
                ScalarRuleOutput::graded(r.compute(ctx.input, ctx.bias, ctx.rng))
            }
            UpdateRule::Binary(r) => {
                ScalarRuleOutput::graded(r.compute(ctx.input, ctx.bias, ctx.rng))
            }
            UpdateRule::Sinusoidal(r) => ScalarRuleOutput::graded(r.compute(ctx.time, ctx.rng)),
            UpdateRule::SpikingThreshold(r) => {
                let (activation, spiked) = r.compute(ctx.input, ctx.rng);
                ScalarRuleOutput { activation, spiked }
            }
            UpdateRule::IntegrateAndFire(r) => r.step_scalar(ctx, state),
        }
    }

    /// Applies the rule element-wise to one vector node.
    ///
    /// Noise draws are taken element by element from the node's stream, in
    /// index order, so vector results are reproducible like scalar ones.
    pub fn apply_vector(
        &self,
        mut ctx: VectorRuleCtx<'_>,
        state: &mut VectorRuleState,
        activations: &mut Array1<f64>,
        spikes: &mut [bool],
    ) {
        match self {
            UpdateRule::Linear(r) => {
                for i in 0..activations.len() {
                    activations[i] = r.compute(ctx.inputs[i], ctx.biases[i], ctx.rng);
                    spikes[i] = false;
                }
            }
            UpdateRule::Sigmoidal(r) => {
                for i in 0..activations.len() {
                    activations[i] = r.compute(ctx.inputs[i], ctx.biases[i], ctx.rng);
                    spikes[i] = false;
                }
            }
            UpdateRule::Binary(r) => {
                for i in 0..activations.len() {
                    activations[i] = r.compute(ctx.inputs[i], ctx.biases[i], ctx.rng);
                    spikes[i] = false;
                }
            }
            UpdateRule::Sinusoidal(r) => {
                for i in 0..activations.len() {
                    activations[i] = r.compute(ctx.time, ctx.rng);
                    spikes[i] = false;
                }
            }
            UpdateRule::SpikingThreshold(r) => {
                for i in 0..activations.len() {
                    let (activation, spiked) = r.compute(ctx.inputs[i], ctx.rng);
                    activations[i] = activation;
                    spikes[i] = spiked;
                }
            }
            UpdateRule::IntegrateAndFire(r) => {
                r.step_vector(&mut ctx, state, activations, spikes)
            }
        }
    }
}

/// Additive noise term, zero when no source is configured.
#[inline]
pub(crate) fn noise_term(noise: &Option<NoiseSource>, rng: &mut StdRng) -> f64 {
    match noise {
        Some(source) => source.sample(rng),
        None => 0.0,
    }
}
