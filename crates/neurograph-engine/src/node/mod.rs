// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Nodes
//!
//! A [`Node`] is one unit the network updates: a scalar [`Neuron`], a dense
//! [`NeuronArray`], or a composite [`Subnetwork`]. The [`Node`] wrapper adds
//! the graph bookkeeping every kind shares: incident link lists, update
//! priority, clamp flag, label, and the node's private rng stream.
//!
//! Clamped nodes hold their activation and spike flags through an update;
//! their staged input is discarded so the accumulator still starts every
//! step from zero.

use ndarray::ArrayView1;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::ids::LinkId;

mod neuron;
mod neuron_array;
mod subnetwork;

pub use neuron::Neuron;
pub use neuron_array::NeuronArray;
pub use subnetwork::Subnetwork;

/// The closed set of node kinds.
#[derive(Debug, Clone)]
pub enum NodeBody {
    Neuron(Neuron),
    Array(NeuronArray),
    Subnetwork(Subnetwork),
}

impl From<Neuron> for NodeBody {
    fn from(body: Neuron) -> Self {
        NodeBody::Neuron(body)
    }
}

impl From<NeuronArray> for NodeBody {
    fn from(body: NeuronArray) -> Self {
        NodeBody::Array(body)
    }
}

impl From<Subnetwork> for NodeBody {
    fn from(body: Subnetwork) -> Self {
        NodeBody::Subnetwork(body)
    }
}

impl NodeBody {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeBody::Neuron(_) => "neuron",
            NodeBody::Array(_) => "neuron array",
            NodeBody::Subnetwork(_) => "subnetwork",
        }
    }

    /// Length of the input accumulator external links feed.
    pub fn input_len(&self) -> usize {
        match self {
            NodeBody::Neuron(_) => 1,
            NodeBody::Array(a) => a.len(),
            NodeBody::Subnetwork(s) => s.input_len(),
        }
    }

    /// Length of the output external links read.
    pub fn output_len(&self) -> usize {
        match self {
            NodeBody::Neuron(_) => 1,
            NodeBody::Array(a) => a.len(),
            NodeBody::Subnetwork(s) => s.output_len(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, NodeBody::Neuron(_))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            NodeBody::Neuron(n) => n.validate(),
            NodeBody::Array(a) => a.validate(),
            NodeBody::Subnetwork(s) => s.validate(),
        }
    }

    pub(crate) fn apply(&mut self, time: u64, rng: &mut StdRng) {
        match self {
            NodeBody::Neuron(n) => n.apply(time, rng),
            NodeBody::Array(a) => a.apply(time, rng),
            NodeBody::Subnetwork(s) => s.apply(time, rng),
        }
    }

    pub(crate) fn reset_inputs(&mut self) {
        match self {
            NodeBody::Neuron(n) => n.reset_inputs(),
            NodeBody::Array(a) => a.reset_inputs(),
            NodeBody::Subnetwork(s) => s.reset_inputs(),
        }
    }

    pub(crate) fn clear(&mut self) {
        match self {
            NodeBody::Neuron(n) => n.clear(),
            NodeBody::Array(a) => a.clear(),
            NodeBody::Subnetwork(s) => s.clear(),
        }
    }

    pub(crate) fn randomize(&mut self, rng: &mut StdRng) {
        match self {
            NodeBody::Neuron(n) => n.randomize(rng),
            NodeBody::Array(a) => a.randomize(rng),
            NodeBody::Subnetwork(s) => s.randomize(rng),
        }
    }

    pub(crate) fn has_nonfinite(&self) -> bool {
        match self {
            NodeBody::Neuron(n) => !n.activation.is_finite(),
            NodeBody::Array(a) => a.activations.iter().any(|v| !v.is_finite()),
            NodeBody::Subnetwork(s) => s
                .layers
                .iter()
                .any(|l| l.activations.iter().any(|v| !v.is_finite())),
        }
    }
}

/// A node installed in a network.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) body: NodeBody,
    pub(crate) incoming: Vec<LinkId>,
    pub(crate) outgoing: Vec<LinkId>,
    pub(crate) priority: i32,
    pub(crate) label: String,
    pub(crate) clamped: bool,
    pub(crate) rng: StdRng,
}

impl Node {
    pub(crate) fn new(body: NodeBody, rng: StdRng) -> Self {
        Node {
            body,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            priority: 0,
            label: String::new(),
            clamped: false,
            rng,
        }
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn kind_name(&self) -> &'static str {
        self.body.kind_name()
    }

    pub fn input_len(&self) -> usize {
        self.body.input_len()
    }

    pub fn output_len(&self) -> usize {
        self.body.output_len()
    }

    pub fn is_scalar(&self) -> bool {
        self.body.is_scalar()
    }

    /// Links targeting this node, in attachment order. That order fixes the
    /// input summation order, so it is part of the numeric contract.
    pub fn incoming(&self) -> &[LinkId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[LinkId] {
        &self.outgoing
    }

    /// Lower priorities update earlier; ties resolve by id.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Previous-step output of a scalar neuron, `None` for vector nodes.
    pub fn scalar_output(&self) -> Option<(f64, bool)> {
        match &self.body {
            NodeBody::Neuron(n) => Some((n.activation(), n.spiked())),
            _ => None,
        }
    }

    /// Previous-step output of a vector node, `None` for scalar neurons. A
    /// subnetwork's output is its final layer.
    pub fn vector_output(&self) -> Option<(ArrayView1<'_, f64>, &[bool])> {
        match &self.body {
            NodeBody::Neuron(_) => None,
            NodeBody::Array(a) => Some((a.activations(), a.spikes())),
            NodeBody::Subnetwork(s) => Some((s.output_activations(), s.output_spikes())),
        }
    }

    pub(crate) fn add_scalar_input(&mut self, value: f64) {
        match &mut self.body {
            NodeBody::Neuron(n) => n.input += value,
            _ => unreachable!("scalar input staged on a vector node"),
        }
    }

    pub(crate) fn add_vector_input(&mut self, values: ArrayView1<'_, f64>) {
        match &mut self.body {
            NodeBody::Array(a) => a.inputs.scaled_add(1.0, &values),
            NodeBody::Subnetwork(s) => s.layers[0].inputs.scaled_add(1.0, &values),
            NodeBody::Neuron(_) => unreachable!("vector input staged on a scalar node"),
        }
    }

    /// Phase two of an update: apply the rule, or hold if clamped. Either
    /// way the staged input is consumed.
    pub(crate) fn apply_update(&mut self, time: u64) {
        if self.clamped {
            self.body.reset_inputs();
        } else {
            self.body.apply(time, &mut self.rng);
        }
    }
}
