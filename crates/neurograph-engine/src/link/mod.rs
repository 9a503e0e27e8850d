// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Links
//!
//! A [`Link`] is a directed connection between two installed nodes: a scalar
//! [`Synapse`] between neurons or a [`WeightMatrix`] between vector nodes.
//! The wrapper owns what both kinds share: endpoint ids, the responder
//! parameters, the freeze flag, and the link's private rng stream.
//!
//! During phase one of an update a link first refreshes its post-synaptic
//! response from the source's previous-step output (mutating responder state
//! exactly once), then the refreshed response is summed into the target's
//! input accumulator.

use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::ids::NodeId;
use crate::node::Node;
use neurograph_neural::error::require_finite;
use neurograph_neural::SpikeResponder;

mod synapse;
mod weight_matrix;

pub use synapse::Synapse;
pub use weight_matrix::WeightMatrix;

/// The closed set of link kinds.
#[derive(Debug, Clone)]
pub enum LinkBody {
    Synapse(Synapse),
    WeightMatrix(WeightMatrix),
}

impl LinkBody {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LinkBody::Synapse(_) => "synapse",
            LinkBody::WeightMatrix(_) => "weight matrix",
        }
    }
}

/// A link installed in a network.
#[derive(Debug, Clone)]
pub struct Link {
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) responder: SpikeResponder,
    pub(crate) frozen: bool,
    pub(crate) body: LinkBody,
    pub(crate) rng: StdRng,
}

impl Link {
    pub(crate) fn synapse(source: NodeId, target: NodeId, weight: f64, rng: StdRng) -> Self {
        let responder = SpikeResponder::default();
        let body = LinkBody::Synapse(Synapse::new(weight, &responder));
        Link {
            source,
            target,
            responder,
            frozen: false,
            body,
            rng,
        }
    }

    pub(crate) fn weight_matrix(
        source: NodeId,
        target: NodeId,
        weights: Array2<f64>,
        rng: StdRng,
    ) -> Self {
        let responder = SpikeResponder::default();
        let body = LinkBody::WeightMatrix(WeightMatrix::new(weights, &responder));
        Link {
            source,
            target,
            responder,
            frozen: false,
            body,
            rng,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn responder(&self) -> &SpikeResponder {
        &self.responder
    }

    /// Frozen links are skipped by bulk weight randomization and training
    /// helpers; they still conduct during updates.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn body(&self) -> &LinkBody {
        &self.body
    }

    pub fn kind_name(&self) -> &'static str {
        self.body.kind_name()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.body, LinkBody::Synapse(_))
    }

    pub fn weight(&self) -> Option<f64> {
        match &self.body {
            LinkBody::Synapse(s) => Some(s.weight()),
            LinkBody::WeightMatrix(_) => None,
        }
    }

    pub fn weights(&self) -> Option<ArrayView2<'_, f64>> {
        match &self.body {
            LinkBody::Synapse(_) => None,
            LinkBody::WeightMatrix(m) => Some(m.weights()),
        }
    }

    pub fn psr_scalar(&self) -> Option<f64> {
        match &self.body {
            LinkBody::Synapse(s) => Some(s.psr()),
            LinkBody::WeightMatrix(_) => None,
        }
    }

    pub fn psr_vector(&self) -> Option<ArrayView1<'_, f64>> {
        match &self.body {
            LinkBody::Synapse(_) => None,
            LinkBody::WeightMatrix(m) => Some(m.psr()),
        }
    }

    /// Phase one, first half: recompute the post-synaptic response from the
    /// source's previous-step output.
    pub(crate) fn refresh_psr(&mut self, source: &Node) {
        match &mut self.body {
            LinkBody::Synapse(s) => {
                let Some((value, spiked)) = source.scalar_output() else {
                    unreachable!("synapse source must be a scalar neuron");
                };
                s.refresh(&self.responder, value, spiked, &mut self.rng);
            }
            LinkBody::WeightMatrix(m) => {
                let Some((values, spikes)) = source.vector_output() else {
                    unreachable!("weight matrix source must be a vector node");
                };
                m.refresh(&self.responder, values, spikes, &mut self.rng);
            }
        }
    }

    /// Phase one, second half: deliver the refreshed response to the target.
    pub(crate) fn add_psr_into(&self, target: &mut Node) {
        match &self.body {
            LinkBody::Synapse(s) => target.add_scalar_input(s.psr),
            LinkBody::WeightMatrix(m) => target.add_vector_input(m.psr.view()),
        }
    }

    pub(crate) fn set_responder(&mut self, responder: SpikeResponder) {
        self.responder = responder;
        self.reset_response();
    }

    pub(crate) fn set_weight(&mut self, weight: f64) -> Result<()> {
        require_finite("weight", weight)?;
        match &mut self.body {
            LinkBody::Synapse(s) => {
                s.weight = weight;
                Ok(())
            }
            LinkBody::WeightMatrix(_) => Err(NetworkError::Unsupported(
                "scalar weight on a weight matrix",
            )),
        }
    }

    pub(crate) fn set_weights(&mut self, weights: Array2<f64>) -> Result<()> {
        match &mut self.body {
            LinkBody::Synapse(_) => Err(NetworkError::Unsupported("matrix weight on a synapse")),
            LinkBody::WeightMatrix(m) => {
                if weights.dim() != m.weights.dim() {
                    return Err(NetworkError::ShapeMismatch {
                        rows: weights.nrows(),
                        cols: weights.ncols(),
                        expected_rows: m.weights.nrows(),
                        expected_cols: m.weights.ncols(),
                    });
                }
                for &v in weights.iter() {
                    require_finite("weight", v)?;
                }
                m.weights = weights;
                Ok(())
            }
        }
    }

    /// Redraws weights uniformly from `[lower, upper]` using the link's own
    /// stream.
    pub(crate) fn randomize_weight(&mut self, lower: f64, upper: f64) {
        match &mut self.body {
            LinkBody::Synapse(s) => s.weight = self.rng.gen_range(lower..=upper),
            LinkBody::WeightMatrix(m) => {
                let rng = &mut self.rng;
                m.weights.mapv_inplace(|_| rng.gen_range(lower..=upper));
            }
        }
    }

    /// Drops responder state and the buffered response, keeping the weight.
    pub(crate) fn reset_response(&mut self) {
        match &mut self.body {
            LinkBody::Synapse(s) => s.reset_response(&self.responder),
            LinkBody::WeightMatrix(m) => m.reset_response(&self.responder),
        }
    }
}
