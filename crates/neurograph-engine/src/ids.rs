// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Identity types for nodes and links
//!
//! Ids are dense u32 handles assigned by the network and never reused
//! within a network's lifetime, so a persisted graph can be rebuilt with
//! the same ids it was saved with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node ID (unique within one network)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Link ID (unique within one network)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub u32);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}
