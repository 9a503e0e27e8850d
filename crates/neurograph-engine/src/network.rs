// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Network container and update protocol
//!
//! [`Network`] owns the graph (id-keyed node and link maps), the step
//! counter, id assignment, the cached update order, and the observer hub.
//! All mutation goes through fallible methods here; structural validity is
//! checked at add/remove time so the per-step path never has to.
//!
//! ## Update protocol
//!
//! One `update()` is two phases with a barrier between them:
//!
//! 1. every link recomputes its post-synaptic response from its source's
//!    previous-step output (responder state advances exactly once), and the
//!    responses are summed into each target's input accumulator in
//!    incoming-list order;
//! 2. every non-clamped node applies its rule to the accumulated input and
//!    clips to bounds; clamped nodes hold their output and discard the
//!    staged input. The step counter then advances.
//!
//! Phase one only reads outputs from the previous completed step, so the
//! global visit order is irrelevant to the result: permuting update
//! priorities, or running phase two across threads, is bit-identical. Cycles
//! and self-loops need no special casing.

use std::fmt;

use ahash::AHashMap;
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::events::{NetworkEvent, NetworkObserver, ObserverHub, ObserverId};
use crate::ids::{LinkId, NodeId};
use crate::link::Link;
use crate::node::{Node, NodeBody};
use crate::rng;
use neurograph_neural::error::{require_finite, require_range};
use neurograph_neural::{SpikeResponder, UpdateRule};

pub struct Network {
    config: NetworkConfig,
    nodes: AHashMap<NodeId, Node>,
    links: AHashMap<LinkId, Link>,
    time: u64,
    next_node: u32,
    next_link: u32,
    /// Node ids sorted by (priority, id); rebuilt lazily after structure or
    /// priority changes.
    update_order: Vec<NodeId>,
    order_dirty: bool,
    scratch_links: Vec<LinkId>,
    observers: ObserverHub,
    nonfinite_warned: bool,
}

impl Network {
    pub fn new(config: NetworkConfig) -> Self {
        Network {
            config,
            nodes: AHashMap::new(),
            links: AHashMap::new(),
            time: 0,
            next_node: 0,
            next_link: 0,
            update_order: Vec::new(),
            order_dirty: false,
            scratch_links: Vec::new(),
            observers: ObserverHub::default(),
            nonfinite_warned: false,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Number of completed update steps.
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // ---- structure ---------------------------------------------------------

    pub fn add_node(&mut self, body: impl Into<NodeBody>) -> Result<NodeId> {
        let id = NodeId(self.next_node);
        self.install_node(id, body.into())?;
        self.next_node += 1;
        Ok(id)
    }

    /// Restores a node under a caller-chosen id, for persistence.
    pub fn insert_node_at(&mut self, id: NodeId, body: impl Into<NodeBody>) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        self.install_node(id, body.into())?;
        self.next_node = self.next_node.max(id.0 + 1);
        Ok(())
    }

    fn install_node(&mut self, id: NodeId, body: NodeBody) -> Result<()> {
        body.validate()?;
        debug!(node = %id, kind = body.kind_name(), "adding node");
        let stream = rng::stream(self.config.seed, rng::NODE_STREAM, id.0);
        self.nodes.insert(id, Node::new(body, stream));
        self.order_dirty = true;
        self.observers.emit(&NetworkEvent::StructureChanged);
        Ok(())
    }

    /// Removes a node and every link incident to it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(NetworkError::UnknownNode(id))?;
        for link_id in node.incoming.iter().chain(node.outgoing.iter()) {
            // A self-loop shows up in both lists; the second remove is a no-op.
            if let Some(link) = self.links.remove(link_id) {
                self.detach(*link_id, &link);
            }
        }
        debug!(node = %id, "removed node");
        self.order_dirty = true;
        self.observers.emit(&NetworkEvent::StructureChanged);
        Ok(())
    }

    pub fn add_synapse(&mut self, source: NodeId, target: NodeId, weight: f64) -> Result<LinkId> {
        let id = LinkId(self.next_link);
        self.install_synapse(id, source, target, weight)?;
        self.next_link += 1;
        Ok(id)
    }

    pub fn insert_synapse_at(
        &mut self,
        id: LinkId,
        source: NodeId,
        target: NodeId,
        weight: f64,
    ) -> Result<()> {
        if self.links.contains_key(&id) {
            return Err(NetworkError::DuplicateLink(id));
        }
        self.install_synapse(id, source, target, weight)?;
        self.next_link = self.next_link.max(id.0 + 1);
        Ok(())
    }

    fn install_synapse(
        &mut self,
        id: LinkId,
        source: NodeId,
        target: NodeId,
        weight: f64,
    ) -> Result<()> {
        let src = self
            .nodes
            .get(&source)
            .ok_or(NetworkError::UnknownNode(source))?;
        let tgt = self
            .nodes
            .get(&target)
            .ok_or(NetworkError::UnknownNode(target))?;
        if !src.is_scalar() || !tgt.is_scalar() {
            return Err(NetworkError::ScalarEndpointRequired { source, target });
        }
        require_finite("weight", weight)?;
        let stream = rng::stream(self.config.seed, rng::LINK_STREAM, id.0);
        self.links
            .insert(id, Link::synapse(source, target, weight, stream));
        self.attach(id, source, target);
        Ok(())
    }

    pub fn add_weight_matrix(
        &mut self,
        source: NodeId,
        target: NodeId,
        weights: Array2<f64>,
    ) -> Result<LinkId> {
        let id = LinkId(self.next_link);
        self.install_weight_matrix(id, source, target, weights)?;
        self.next_link += 1;
        Ok(id)
    }

    pub fn insert_weight_matrix_at(
        &mut self,
        id: LinkId,
        source: NodeId,
        target: NodeId,
        weights: Array2<f64>,
    ) -> Result<()> {
        if self.links.contains_key(&id) {
            return Err(NetworkError::DuplicateLink(id));
        }
        self.install_weight_matrix(id, source, target, weights)?;
        self.next_link = self.next_link.max(id.0 + 1);
        Ok(())
    }

    fn install_weight_matrix(
        &mut self,
        id: LinkId,
        source: NodeId,
        target: NodeId,
        weights: Array2<f64>,
    ) -> Result<()> {
        let src = self
            .nodes
            .get(&source)
            .ok_or(NetworkError::UnknownNode(source))?;
        let tgt = self
            .nodes
            .get(&target)
            .ok_or(NetworkError::UnknownNode(target))?;
        if src.is_scalar() || tgt.is_scalar() {
            return Err(NetworkError::VectorEndpointRequired { source, target });
        }
        let expected = (tgt.input_len(), src.output_len());
        if weights.dim() != expected {
            return Err(NetworkError::ShapeMismatch {
                rows: weights.nrows(),
                cols: weights.ncols(),
                expected_rows: expected.0,
                expected_cols: expected.1,
            });
        }
        for &v in weights.iter() {
            require_finite("weight", v)?;
        }
        let stream = rng::stream(self.config.seed, rng::LINK_STREAM, id.0);
        self.links
            .insert(id, Link::weight_matrix(source, target, weights, stream));
        self.attach(id, source, target);
        Ok(())
    }

    fn attach(&mut self, id: LinkId, source: NodeId, target: NodeId) {
        debug!(link = %id, source = %source, target = %target, "adding link");
        if let Some(node) = self.nodes.get_mut(&source) {
            node.outgoing.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.incoming.push(id);
        }
        self.observers.emit(&NetworkEvent::StructureChanged);
    }

    fn detach(&mut self, id: LinkId, link: &Link) {
        if let Some(node) = self.nodes.get_mut(&link.source) {
            node.outgoing.retain(|l| *l != id);
        }
        if let Some(node) = self.nodes.get_mut(&link.target) {
            node.incoming.retain(|l| *l != id);
        }
    }

    pub fn remove_link(&mut self, id: LinkId) -> Result<()> {
        let link = self
            .links
            .remove(&id)
            .ok_or(NetworkError::UnknownLink(id))?;
        self.detach(id, &link);
        debug!(link = %id, "removed link");
        self.observers.emit(&NetworkEvent::StructureChanged);
        Ok(())
    }

    // ---- enumeration -------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(NetworkError::UnknownNode(id))
    }

    pub fn link(&self, id: LinkId) -> Result<&Link> {
        self.links.get(&id).ok_or(NetworkError::UnknownLink(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(NetworkError::UnknownNode(id))
    }

    fn link_mut(&mut self, id: LinkId) -> Result<&mut Link> {
        self.links.get_mut(&id).ok_or(NetworkError::UnknownLink(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.links.iter().map(|(id, link)| (*id, link))
    }

    /// Node ids in ascending order, the stable enumeration for snapshots.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn link_ids(&self) -> Vec<LinkId> {
        let mut ids: Vec<LinkId> = self.links.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // ---- node state --------------------------------------------------------

    pub fn activation(&self, id: NodeId) -> Result<f64> {
        match self.node(id)?.scalar_output() {
            Some((value, _)) => Ok(value),
            None => Err(NetworkError::Unsupported("scalar read of a vector node")),
        }
    }

    pub fn activations(&self, id: NodeId) -> Result<ArrayView1<'_, f64>> {
        match self.node(id)?.vector_output() {
            Some((values, _)) => Ok(values),
            None => Err(NetworkError::Unsupported("vector read of a scalar node")),
        }
    }

    pub fn spiked(&self, id: NodeId) -> Result<bool> {
        match self.node(id)?.scalar_output() {
            Some((_, spiked)) => Ok(spiked),
            None => Err(NetworkError::Unsupported("scalar read of a vector node")),
        }
    }

    pub fn spikes(&self, id: NodeId) -> Result<&[bool]> {
        match self.node(id)?.vector_output() {
            Some((_, spikes)) => Ok(spikes),
            None => Err(NetworkError::Unsupported("vector read of a scalar node")),
        }
    }

    pub fn set_activation(&mut self, id: NodeId, value: f64) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Neuron(n) => n.set_activation(value),
            _ => Err(NetworkError::Unsupported("scalar write to a vector node")),
        }
    }

    pub fn set_activations(&mut self, id: NodeId, values: ArrayView1<'_, f64>) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Array(a) => a.set_activations(values),
            _ => Err(NetworkError::Unsupported(
                "activation vector write outside a neuron array",
            )),
        }
    }

    pub fn set_spiked(&mut self, id: NodeId, spiked: bool) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Neuron(n) => {
                n.spiked = spiked;
                Ok(())
            }
            _ => Err(NetworkError::Unsupported("scalar write to a vector node")),
        }
    }

    pub fn set_spikes(&mut self, id: NodeId, spikes: &[bool]) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Array(a) => a.set_spikes(spikes),
            _ => Err(NetworkError::Unsupported(
                "spike vector write outside a neuron array",
            )),
        }
    }

    pub fn set_bias(&mut self, id: NodeId, bias: f64) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Neuron(n) => n.set_bias(bias),
            _ => Err(NetworkError::Unsupported("scalar write to a vector node")),
        }
    }

    pub fn set_biases(&mut self, id: NodeId, biases: ArrayView1<'_, f64>) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Array(a) => a.set_biases(biases),
            _ => Err(NetworkError::Unsupported(
                "bias vector write outside a neuron array",
            )),
        }
    }

    pub fn set_bounds(&mut self, id: NodeId, lower: f64, upper: f64) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Neuron(n) => n.set_bounds(lower, upper),
            NodeBody::Array(a) => a.set_bounds(lower, upper),
            NodeBody::Subnetwork(_) => Err(NetworkError::Unsupported(
                "bounds write on a subnetwork; bounds are per layer",
            )),
        }
    }

    /// Swaps the update rule, dropping any rule state. On a subnetwork the
    /// rule is applied to every layer.
    pub fn set_rule(&mut self, id: NodeId, rule: UpdateRule) -> Result<()> {
        rule.validate()?;
        match &mut self.node_mut(id)?.body {
            NodeBody::Neuron(n) => n.set_rule(rule),
            NodeBody::Array(a) => a.set_rule(rule),
            NodeBody::Subnetwork(s) => {
                for layer in &mut s.layers {
                    layer.set_rule(rule.clone());
                }
            }
        }
        Ok(())
    }

    pub fn set_priority(&mut self, id: NodeId, priority: i32) -> Result<()> {
        self.node_mut(id)?.priority = priority;
        self.order_dirty = true;
        Ok(())
    }

    pub fn set_clamped(&mut self, id: NodeId, clamped: bool) -> Result<()> {
        self.node_mut(id)?.clamped = clamped;
        Ok(())
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.label = label.into();
        Ok(())
    }

    /// Stages external input for the next update; consumed like any link
    /// contribution.
    pub fn add_input(&mut self, id: NodeId, value: f64) -> Result<()> {
        require_finite("input", value)?;
        let node = self.node_mut(id)?;
        if !node.is_scalar() {
            return Err(NetworkError::Unsupported("scalar input on a vector node"));
        }
        node.add_scalar_input(value);
        Ok(())
    }

    pub fn add_vector_input(&mut self, id: NodeId, values: ArrayView1<'_, f64>) -> Result<()> {
        for &v in values.iter() {
            require_finite("input", v)?;
        }
        let node = self.node_mut(id)?;
        if node.is_scalar() {
            return Err(NetworkError::Unsupported("vector input on a scalar node"));
        }
        let expected = node.input_len();
        if values.len() != expected {
            return Err(NetworkError::LengthMismatch {
                len: values.len(),
                expected,
            });
        }
        node.add_vector_input(values);
        Ok(())
    }

    /// Redraws the node's activations uniformly within its bounds, from the
    /// node's own stream.
    pub fn randomize_activations(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        let Node { body, rng, .. } = node;
        body.randomize(rng);
        Ok(())
    }

    pub fn set_inner_weights(
        &mut self,
        id: NodeId,
        index: usize,
        weights: Array2<f64>,
    ) -> Result<()> {
        match &mut self.node_mut(id)?.body {
            NodeBody::Subnetwork(s) => s.set_inner_weights(index, weights),
            _ => Err(NetworkError::Unsupported(
                "inner weights outside a subnetwork",
            )),
        }
    }

    pub fn randomize_inner_weights(&mut self, id: NodeId, lower: f64, upper: f64) -> Result<()> {
        require_range("weight range", lower, upper)?;
        let node = self.node_mut(id)?;
        match &mut node.body {
            NodeBody::Subnetwork(s) => {
                s.randomize_weights(&mut node.rng, lower, upper);
                Ok(())
            }
            _ => Err(NetworkError::Unsupported(
                "inner weights outside a subnetwork",
            )),
        }
    }

    // ---- link state --------------------------------------------------------

    pub fn set_weight(&mut self, id: LinkId, weight: f64) -> Result<()> {
        self.link_mut(id)?.set_weight(weight)
    }

    pub fn set_weights(&mut self, id: LinkId, weights: Array2<f64>) -> Result<()> {
        self.link_mut(id)?.set_weights(weights)
    }

    /// Swaps the responder; its evolving state restarts fresh.
    pub fn set_responder(&mut self, id: LinkId, responder: SpikeResponder) -> Result<()> {
        responder.validate()?;
        self.link_mut(id)?.set_responder(responder);
        Ok(())
    }

    pub fn set_frozen(&mut self, id: LinkId, frozen: bool) -> Result<()> {
        self.link_mut(id)?.frozen = frozen;
        Ok(())
    }

    /// Redraws every non-frozen link weight uniformly from `[lower, upper]`.
    pub fn randomize_weights(&mut self, lower: f64, upper: f64) -> Result<()> {
        require_range("weight range", lower, upper)?;
        let mut touched = 0usize;
        for link in self.links.values_mut() {
            if link.frozen {
                continue;
            }
            link.randomize_weight(lower, upper);
            touched += 1;
        }
        debug!(links = touched, "randomized weights");
        Ok(())
    }

    // ---- simulation --------------------------------------------------------

    /// Advances the network one step. See the module docs for the protocol.
    pub fn update(&mut self) {
        self.refresh_update_order();

        let Network {
            nodes,
            links,
            update_order,
            scratch_links,
            ..
        } = self;

        // Phase one, responses: each link reads only previous-step output,
        // so map iteration order cannot affect the result.
        for link in links.values_mut() {
            let Some(source) = nodes.get(&link.source) else {
                unreachable!("link source is not installed");
            };
            link.refresh_psr(source);
        }

        // Phase one, delivery: per-target sums run in incoming-list order.
        for node_id in update_order.iter() {
            let Some(node) = nodes.get_mut(node_id) else {
                unreachable!("update order references a removed node");
            };
            scratch_links.clear();
            scratch_links.extend_from_slice(&node.incoming);
            for link_id in scratch_links.iter() {
                let Some(link) = links.get(link_id) else {
                    unreachable!("incoming list references a removed link");
                };
                link.add_psr_into(node);
            }
        }

        // Phase two: apply rules. Nodes are independent here; above the
        // threshold the serial loop loses to the fork-join overhead.
        let time = self.time;
        const PAR_NODE_THRESHOLD: usize = 128;
        if self.nodes.len() >= PAR_NODE_THRESHOLD {
            self.nodes
                .par_iter_mut()
                .for_each(|(_, node)| node.apply_update(time));
        } else {
            for node in self.nodes.values_mut() {
                node.apply_update(time);
            }
        }

        self.time += 1;
        if !self.nonfinite_warned {
            if let Some(id) = self.first_nonfinite() {
                self.nonfinite_warned = true;
                warn!(node = %id, "non-finite activation; bounds only clip finite values");
            }
        }
        self.observers
            .emit(&NetworkEvent::Updated { time: self.time });
        trace!(time = self.time, "update complete");
    }

    fn refresh_update_order(&mut self) {
        if !self.order_dirty {
            return;
        }
        let Network {
            nodes,
            update_order,
            ..
        } = self;
        update_order.clear();
        update_order.extend(nodes.keys().copied());
        update_order.sort_unstable_by_key(|id| (nodes[id].priority, id.0));
        self.order_dirty = false;
    }

    fn first_nonfinite(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.body.has_nonfinite())
            .map(|(id, _)| *id)
    }

    /// Zeroes all activations, inputs, spike flags, rule state, and responder
    /// state. Structure, parameters, and the step counter are untouched.
    pub fn clear(&mut self) {
        for node in self.nodes.values_mut() {
            node.body.clear();
        }
        for link in self.links.values_mut() {
            link.reset_response();
        }
        self.nonfinite_warned = false;
    }

    pub fn reset_time(&mut self) {
        self.time = 0;
        self.observers.emit(&NetworkEvent::TimeReset);
    }

    // ---- persistence -------------------------------------------------------

    /// Re-establishes transient state after a snapshot restore: per-entity
    /// rng streams, responder state, buffered responses, and the cached
    /// update order. Observers are transient and must re-subscribe.
    pub fn repair_after_load(&mut self) {
        for (id, node) in self.nodes.iter_mut() {
            node.rng = rng::stream(self.config.seed, rng::NODE_STREAM, id.0);
            node.body.reset_inputs();
        }
        for (id, link) in self.links.iter_mut() {
            link.rng = rng::stream(self.config.seed, rng::LINK_STREAM, id.0);
            link.reset_response();
        }
        self.order_dirty = true;
        self.nonfinite_warned = false;
    }

    // ---- observers ---------------------------------------------------------

    pub fn subscribe(&mut self, observer: impl NetworkObserver + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::new(NetworkConfig::default())
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("nodes", &self.nodes.len())
            .field("links", &self.links.len())
            .field("time", &self.time)
            .field("seed", &self.config.seed)
            .field("observers", &self.observers.len())
            .finish()
    }
}
