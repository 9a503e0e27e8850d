// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neurograph - Discrete-Time Neural Network Simulation
//!
//! Neurograph simulates heterogeneous neural networks in discrete time: scalar
//! neurons, neuron arrays, and layered subnetworks wired together by synapses
//! and weight matrices, all advanced by a buffered synchronous update loop
//! whose results never depend on evaluation order.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neurograph = "0.1"
//! ```
//!
//! ```rust
//! use neurograph::prelude::*;
//!
//! let mut net = Network::default();
//! let input = net.add_node(Neuron::new(UpdateRule::linear()))?;
//! let spiker = net.add_node(Neuron::new(UpdateRule::spiking_threshold(0.5)))?;
//! net.add_synapse(input, spiker, 1.0)?;
//!
//! net.set_activation(input, 1.0)?;
//! net.update();
//! assert!(net.spiked(spiker)?);
//! # Ok::<(), NetworkError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Computation: neurograph-neural                         │
//! │  (update rules, spike responders, noise sources)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Graph: neurograph-engine                               │
//! │  (nodes, links, buffered synchronous update loop)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Facade: neurograph (this crate)                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Every stochastic element (noise source, probabilistic responder, weight
//! randomization) draws from a private rng stream derived from the network
//! seed and the owning node or link id. Identically seeded networks produce
//! bit-identical trajectories regardless of update priorities, insertion
//! order, or internal parallelism.
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export computation layer
pub use neurograph_neural as neural;

// Re-export graph layer
pub use neurograph_engine as engine;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::engine::{
        Link, LinkId, Network, NetworkConfig, NetworkError, NetworkEvent, Neuron, NeuronArray,
        Node, NodeId, Subnetwork,
    };
    pub use crate::neural::{NoiseSource, SpikeResponder, UpdateRule};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn facade_reaches_both_layers() {
        let mut net = Network::default();
        let id = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
        assert_eq!(id, NodeId(0));
        assert!(!crate::VERSION.is_empty());
    }
}
