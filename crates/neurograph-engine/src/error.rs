// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Engine error types

use std::fmt;

use crate::ids::{LinkId, NodeId};
use neurograph_neural::ParameterError;

// Display/Error/From are written by hand because `derive(thiserror::Error)`
// treats any field named `source` as the error's cause, and the endpoint
// variants use `source` for a plain NodeId.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    UnknownNode(NodeId),

    UnknownLink(LinkId),

    DuplicateNode(NodeId),

    DuplicateLink(LinkId),

    ScalarEndpointRequired { source: NodeId, target: NodeId },

    VectorEndpointRequired { source: NodeId, target: NodeId },

    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    LengthMismatch { len: usize, expected: usize },

    InvalidTopology,

    Unsupported(&'static str),

    Parameter(ParameterError),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::UnknownNode(id) => write!(f, "unknown node {id}"),
            NetworkError::UnknownLink(id) => write!(f, "unknown link {id}"),
            NetworkError::DuplicateNode(id) => write!(f, "node id {id} is already in use"),
            NetworkError::DuplicateLink(id) => write!(f, "link id {id} is already in use"),
            NetworkError::ScalarEndpointRequired { source, target } => write!(
                f,
                "synapse endpoints must both be scalar neurons ({source} -> {target})"
            ),
            NetworkError::VectorEndpointRequired { source, target } => write!(
                f,
                "weight matrix endpoints must both be vector-valued ({source} -> {target})"
            ),
            NetworkError::ShapeMismatch {
                rows,
                cols,
                expected_rows,
                expected_cols,
            } => write!(
                f,
                "weight shape {rows}x{cols} does not match endpoints (need {expected_rows}x{expected_cols})"
            ),
            NetworkError::LengthMismatch { len, expected } => write!(
                f,
                "vector of length {len} does not match node size {expected}"
            ),
            NetworkError::InvalidTopology => {
                write!(f, "layer stack does not admit this operation")
            }
            NetworkError::Unsupported(what) => write!(f, "operation not supported for {what}"),
            NetworkError::Parameter(transparent) => fmt::Display::fmt(transparent, f),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::Parameter(transparent) => std::error::Error::source(transparent),
            _ => None,
        }
    }
}

impl From<ParameterError> for NetworkError {
    fn from(source: ParameterError) -> Self {
        NetworkError::Parameter(source)
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_ids() {
        let err = NetworkError::ScalarEndpointRequired {
            source: NodeId(1),
            target: NodeId(9),
        };
        assert_eq!(
            err.to_string(),
            "synapse endpoints must both be scalar neurons (n1 -> n9)"
        );
    }

    #[test]
    fn parameter_errors_convert() {
        let err: NetworkError = ParameterError::NotPositive {
            name: "time constant",
            value: 0.0,
        }
        .into();
        assert_eq!(err.to_string(), "time constant must be positive, got 0");
    }
}
