// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Neuron array
//!
//! A vector unit: `len` elements updated by one shared rule, with dense
//! activation/input/bias storage and a spike flag per element. This is the
//! representation weight-matrix links connect.

use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{NetworkError, Result};
use neurograph_neural::error::{require_finite, require_range};
use neurograph_neural::{clip, UpdateRule, VectorRuleCtx, VectorRuleState};

#[derive(Debug, Clone)]
pub struct NeuronArray {
    pub(crate) rule: UpdateRule,
    pub(crate) state: VectorRuleState,
    pub(crate) activations: Array1<f64>,
    pub(crate) inputs: Array1<f64>,
    pub(crate) biases: Array1<f64>,
    pub(crate) spikes: Vec<bool>,
    pub(crate) lower_bound: f64,
    pub(crate) upper_bound: f64,
}

impl NeuronArray {
    pub fn new(len: usize, rule: UpdateRule) -> Self {
        let state = rule.create_vector_state(len);
        NeuronArray {
            rule,
            state,
            activations: Array1::zeros(len),
            inputs: Array1::zeros(len),
            biases: Array1::zeros(len),
            spikes: vec![false; len],
            lower_bound: -1.0,
            upper_bound: 1.0,
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_uniform_bias(mut self, bias: f64) -> Self {
        self.biases.fill(bias);
        self
    }

    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    pub fn activations(&self) -> ArrayView1<'_, f64> {
        self.activations.view()
    }

    pub fn spikes(&self) -> &[bool] {
        self.spikes.as_slice()
    }

    pub fn biases(&self) -> ArrayView1<'_, f64> {
        self.biases.view()
    }

    /// Inputs staged so far for the next update.
    pub fn inputs(&self) -> ArrayView1<'_, f64> {
        self.inputs.view()
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
        for &b in &self.biases {
            require_finite("bias", b)?;
        }
        for &a in &self.activations {
            require_finite("activation", a)?;
        }
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len == self.len() {
            Ok(())
        } else {
            Err(NetworkError::LengthMismatch {
                len,
                expected: self.len(),
            })
        }
    }

    pub(crate) fn set_rule(&mut self, rule: UpdateRule) {
        self.state = rule.create_vector_state(self.len());
        self.rule = rule;
    }

    pub(crate) fn set_activations(&mut self, values: ArrayView1<'_, f64>) -> Result<()> {
        self.check_len(values.len())?;
        for &v in values.iter() {
            require_finite("activation", v)?;
        }
        for (slot, &v) in self.activations.iter_mut().zip(values.iter()) {
            *slot = clip(v, self.lower_bound, self.upper_bound);
        }
        Ok(())
    }

    pub(crate) fn set_spikes(&mut self, spikes: &[bool]) -> Result<()> {
        self.check_len(spikes.len())?;
        self.spikes.copy_from_slice(spikes);
        Ok(())
    }

    pub(crate) fn set_biases(&mut self, biases: ArrayView1<'_, f64>) -> Result<()> {
        self.check_len(biases.len())?;
        for &b in biases.iter() {
            require_finite("bias", b)?;
        }
        self.biases.assign(&biases);
        Ok(())
    }

    pub(crate) fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<()> {
        require_range("activation bounds", lower, upper)?;
        self.lower_bound = lower;
        self.upper_bound = upper;
        self.activations.mapv_inplace(|v| clip(v, lower, upper));
        Ok(())
    }

    pub(crate) fn apply(&mut self, time: u64, rng: &mut StdRng) {
        self.rule.apply_vector(
            VectorRuleCtx {
                inputs: self.inputs.view(),
                biases: self.biases.view(),
                time,
                rng,
            },
            &mut self.state,
            &mut self.activations,
            &mut self.spikes,
        );
        let (lower, upper) = (self.lower_bound, self.upper_bound);
        self.activations.mapv_inplace(|v| clip(v, lower, upper));
        self.inputs.fill(0.0);
    }

    pub(crate) fn reset_inputs(&mut self) {
        self.inputs.fill(0.0);
    }

    pub(crate) fn clear(&mut self) {
        self.activations.fill(0.0);
        self.inputs.fill(0.0);
        self.spikes.fill(false);
        self.state = self.rule.create_vector_state(self.len());
    }

    pub(crate) fn randomize(&mut self, rng: &mut StdRng) {
        let (lower, upper) = (self.lower_bound, self.upper_bound);
        self.activations
            .mapv_inplace(|_| rng.gen_range(lower..=upper));
    }
}
