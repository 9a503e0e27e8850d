// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Feed-forward subnetwork
//!
//! A composite node: an ordered stack of neuron arrays joined by inner weight
//! matrices. One network update runs the whole forward pass, so the composite
//! behaves like a single node with the first layer's input size and the last
//! layer's output size. Inner matrices carry no spike responders; propagation
//! between layers is a plain matrix-vector product.

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::node::neuron_array::NeuronArray;
use neurograph_neural::error::require_finite;
use neurograph_neural::UpdateRule;

#[derive(Debug, Clone)]
pub struct Subnetwork {
    pub(crate) layers: Vec<NeuronArray>,
    /// `weights[i]` maps `layers[i]` to `layers[i + 1]`, shaped target x source.
    pub(crate) weights: Vec<Array2<f64>>,
}

impl Subnetwork {
    /// Builds a stack of zero-weight layers of the given sizes, all driven by
    /// the same rule.
    pub fn layered(sizes: &[usize], rule: UpdateRule) -> Result<Self> {
        if sizes.len() < 2 || sizes.iter().any(|&s| s == 0) {
            return Err(NetworkError::InvalidTopology);
        }
        let layers: Vec<NeuronArray> = sizes
            .iter()
            .map(|&len| NeuronArray::new(len, rule.clone()))
            .collect();
        let weights = sizes
            .windows(2)
            .map(|pair| Array2::zeros((pair[1], pair[0])))
            .collect();
        Ok(Subnetwork { layers, weights })
    }

    /// Assembles a subnetwork from prebuilt layers and inner matrices.
    pub fn from_layers(layers: Vec<NeuronArray>, weights: Vec<Array2<f64>>) -> Result<Self> {
        if layers.len() < 2
            || layers.iter().any(|l| l.is_empty())
            || weights.len() != layers.len() - 1
        {
            return Err(NetworkError::InvalidTopology);
        }
        for (i, w) in weights.iter().enumerate() {
            let expected = (layers[i + 1].len(), layers[i].len());
            if w.dim() != expected {
                return Err(NetworkError::ShapeMismatch {
                    rows: w.nrows(),
                    cols: w.ncols(),
                    expected_rows: expected.0,
                    expected_cols: expected.1,
                });
            }
        }
        Ok(Subnetwork { layers, weights })
    }

    pub fn input_len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_len(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&NeuronArray> {
        self.layers.get(index)
    }

    pub fn inner_weights(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        self.weights.get(index).map(|w| w.view())
    }

    pub fn output_activations(&self) -> ArrayView1<'_, f64> {
        self.layers[self.layers.len() - 1].activations()
    }

    pub fn output_spikes(&self) -> &[bool] {
        self.layers[self.layers.len() - 1].spikes()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for layer in &self.layers {
            layer.validate()?;
        }
        for w in &self.weights {
            for &v in w.iter() {
                require_finite("inner weight", v)?;
            }
        }
        Ok(())
    }

    pub(crate) fn set_inner_weights(&mut self, index: usize, weights: Array2<f64>) -> Result<()> {
        let slot = self
            .weights
            .get_mut(index)
            .ok_or(NetworkError::InvalidTopology)?;
        if weights.dim() != slot.dim() {
            return Err(NetworkError::ShapeMismatch {
                rows: weights.nrows(),
                cols: weights.ncols(),
                expected_rows: slot.nrows(),
                expected_cols: slot.ncols(),
            });
        }
        for &v in weights.iter() {
            require_finite("inner weight", v)?;
        }
        *slot = weights;
        Ok(())
    }

    /// Full forward pass: the first layer consumes the staged input, then each
    /// inner matrix feeds the next layer in order.
    pub(crate) fn apply(&mut self, time: u64, rng: &mut StdRng) {
        self.layers[0].apply(time, rng);
        for (i, w) in self.weights.iter().enumerate() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let source = &head[i];
            let target = &mut tail[0];
            general_mat_vec_mul(1.0, w, &source.activations, 1.0, &mut target.inputs);
            target.apply(time, rng);
        }
    }

    pub(crate) fn reset_inputs(&mut self) {
        for layer in &mut self.layers {
            layer.reset_inputs();
        }
    }

    pub(crate) fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    pub(crate) fn randomize(&mut self, rng: &mut StdRng) {
        for layer in &mut self.layers {
            layer.randomize(rng);
        }
    }

    pub(crate) fn randomize_weights(&mut self, rng: &mut StdRng, lower: f64, upper: f64) {
        for w in &mut self.weights {
            w.mapv_inplace(|_| rng.gen_range(lower..=upper));
        }
    }
}
