// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neurograph contributors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neurograph Engine
//!
//! The graph layer of the simulator: nodes (scalar neurons, neuron arrays,
//! feed-forward subnetworks), links (scalar synapses, weight matrices), and
//! the [`Network`] container that advances them in discrete time.
//!
//! ## Update Protocol
//!
//! Every [`Network::update`] runs two phases:
//!
//! 1. **Stage**: each link computes its contribution from its source's
//!    *previous* outputs, and contributions are summed into per-node input
//!    buffers in each node's incoming-link order.
//! 2. **Apply**: each node applies its update rule to the buffered input,
//!    producing new activations and spike flags, clipped to the node's
//!    bounds.
//!
//! Because phase 1 never reads anything written in the same step, results
//! are independent of node evaluation order, including the user-assigned
//! update priorities and any phase-internal parallelism.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod link;
pub mod network;
pub mod node;
pub(crate) mod rng;

pub use config::NetworkConfig;
pub use error::{NetworkError, Result};
pub use events::{NetworkEvent, NetworkObserver, ObserverId};
pub use ids::{LinkId, NodeId};
pub use link::{Link, LinkBody, Synapse, WeightMatrix};
pub use network::Network;
pub use node::{Neuron, NeuronArray, Node, NodeBody, Subnetwork};
