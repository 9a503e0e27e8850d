// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Scalar synapse

use rand::rngs::StdRng;

use neurograph_neural::{ScalarResponderState, SpikeResponder};

/// Scalar-weighted connection body. The responder's evolving state and the
/// last post-synaptic response live here, next to the weight they are shaped
/// after.
#[derive(Debug, Clone)]
pub struct Synapse {
    pub(crate) weight: f64,
    pub(crate) state: ScalarResponderState,
    pub(crate) psr: f64,
}

impl Synapse {
    pub(crate) fn new(weight: f64, responder: &SpikeResponder) -> Self {
        Synapse {
            weight,
            state: responder.create_scalar_state(),
            psr: 0.0,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Contribution delivered by the most recent update.
    pub fn psr(&self) -> f64 {
        self.psr
    }

    pub(crate) fn refresh(
        &mut self,
        responder: &SpikeResponder,
        source_value: f64,
        source_spiked: bool,
        rng: &mut StdRng,
    ) {
        self.psr = responder.apply_scalar(
            self.weight,
            source_value,
            source_spiked,
            &mut self.state,
            rng,
        );
    }

    pub(crate) fn reset_response(&mut self, responder: &SpikeResponder) {
        self.state = responder.create_scalar_state();
        self.psr = 0.0;
    }
}
