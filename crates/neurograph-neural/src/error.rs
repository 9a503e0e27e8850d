// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Parameter validation errors
//!
//! Every configurable rule, responder, and noise source exposes a
//! `validate()` that returns one of these. The engine calls it before an
//! entity enters the graph, so simulation code can assume parameters are
//! well formed.

use thiserror::Error;

/// Rejected parameter value, with the offending field named.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    NotProbability { name: &'static str, value: f64 },

    #[error("empty range for {name}: lower {lower} is not below upper {upper}")]
    EmptyRange {
        name: &'static str,
        lower: f64,
        upper: f64,
    },
}

pub type Result<T> = std::result::Result<T, ParameterError>;

/// Checks a single value for finiteness.
pub fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { name, value })
    }
}

/// Checks a strictly positive, finite value (time constants, slopes).
pub fn require_positive(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

/// Checks a probability in [0, 1].
pub fn require_probability(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::NotProbability { name, value })
    }
}

/// Checks an ordered pair lower < upper, both finite.
pub fn require_range(name: &'static str, lower: f64, upper: f64) -> Result<()> {
    require_finite(name, lower)?;
    require_finite(name, upper)?;
    if lower < upper {
        Ok(())
    } else {
        Err(ParameterError::EmptyRange { name, lower, upper })
    }
}
