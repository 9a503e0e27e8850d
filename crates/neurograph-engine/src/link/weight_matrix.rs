// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Weight matrix

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;

use neurograph_neural::{MatrixResponderState, SpikeResponder};

/// Matrix-weighted connection body, shaped target size x source size. Row `i`
/// collects the responses feeding target element `i`; the psr buffer holds
/// the latest row sums and is reused across steps.
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    pub(crate) weights: Array2<f64>,
    pub(crate) state: MatrixResponderState,
    pub(crate) psr: Array1<f64>,
}

impl WeightMatrix {
    pub(crate) fn new(weights: Array2<f64>, responder: &SpikeResponder) -> Self {
        let (rows, cols) = weights.dim();
        WeightMatrix {
            weights,
            state: responder.create_matrix_state(rows, cols),
            psr: Array1::zeros(rows),
        }
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.weights.dim()
    }

    /// Contribution vector delivered by the most recent update.
    pub fn psr(&self) -> ArrayView1<'_, f64> {
        self.psr.view()
    }

    pub(crate) fn refresh(
        &mut self,
        responder: &SpikeResponder,
        source_values: ArrayView1<'_, f64>,
        source_spikes: &[bool],
        rng: &mut StdRng,
    ) {
        responder.apply_matrix(
            &self.weights,
            source_values,
            source_spikes,
            &mut self.state,
            rng,
            &mut self.psr,
        );
    }

    pub(crate) fn reset_response(&mut self, responder: &SpikeResponder) {
        let (rows, cols) = self.weights.dim();
        self.state = responder.create_matrix_state(rows, cols);
        self.psr.fill(0.0);
    }
}
