// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Scalar neuron

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;
use neurograph_neural::error::{require_finite, require_range};
use neurograph_neural::{clip, ScalarRuleCtx, ScalarRuleState, UpdateRule};

/// A single scalar unit: one activation, one buffered input, one spike flag.
///
/// Built standalone and handed to [`crate::Network::add_node`], which
/// validates it and wires it into the graph.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) rule: UpdateRule,
    pub(crate) state: ScalarRuleState,
    pub(crate) activation: f64,
    pub(crate) input: f64,
    pub(crate) bias: f64,
    pub(crate) spiked: bool,
    pub(crate) lower_bound: f64,
    pub(crate) upper_bound: f64,
}

impl Default for Neuron {
    fn default() -> Self {
        Neuron::new(UpdateRule::default())
    }
}

impl Neuron {
    pub fn new(rule: UpdateRule) -> Self {
        let state = rule.create_scalar_state();
        Neuron {
            rule,
            state,
            activation: 0.0,
            input: 0.0,
            bias: 0.0,
            spiked: false,
            lower_bound: -1.0,
            upper_bound: 1.0,
        }
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_activation(mut self, activation: f64) -> Self {
        self.activation = activation;
        self
    }

    pub fn activation(&self) -> f64 {
        self.activation
    }

    pub fn spiked(&self) -> bool {
        self.spiked
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Input staged so far for the next update. Consumed (and zeroed) when
    /// the update is applied.
    pub fn input(&self) -> f64 {
        self.input
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    pub fn rule(&self) -> &UpdateRule {
        &self.rule
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.rule.validate()?;
        require_range("activation bounds", self.lower_bound, self.upper_bound)?;
        require_finite("bias", self.bias)?;
        require_finite("activation", self.activation)?;
        Ok(())
    }

    pub(crate) fn set_rule(&mut self, rule: UpdateRule) {
        self.state = rule.create_scalar_state();
        self.rule = rule;
    }

    pub(crate) fn set_activation(&mut self, value: f64) -> Result<()> {
        require_finite("activation", value)?;
        self.activation = clip(value, self.lower_bound, self.upper_bound);
        Ok(())
    }

    pub(crate) fn set_bias(&mut self, bias: f64) -> Result<()> {
        require_finite("bias", bias)?;
        self.bias = bias;
        Ok(())
    }

    pub(crate) fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<()> {
        require_range("activation bounds", lower, upper)?;
        self.lower_bound = lower;
        self.upper_bound = upper;
        self.activation = clip(self.activation, lower, upper);
        Ok(())
    }

    pub(crate) fn apply(&mut self, time: u64, rng: &mut StdRng) {
        let out = self.rule.apply_scalar(
            ScalarRuleCtx {
                input: self.input,
                bias: self.bias,
                time,
                rng,
            },
            &mut self.state,
        );
        self.activation = clip(out.activation, self.lower_bound, self.upper_bound);
        self.spiked = out.spiked;
        self.input = 0.0;
    }

    pub(crate) fn reset_inputs(&mut self) {
        self.input = 0.0;
    }

    pub(crate) fn clear(&mut self) {
        self.activation = 0.0;
        self.input = 0.0;
        self.spiked = false;
        self.state = self.rule.create_scalar_state();
    }

    pub(crate) fn randomize(&mut self, rng: &mut StdRng) {
        self.activation = rng.gen_range(self.lower_bound..=self.upper_bound);
    }
}
