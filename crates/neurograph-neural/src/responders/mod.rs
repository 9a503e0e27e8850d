// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Spike responders
//!
//! A [`SpikeResponder`] turns the spike train of a link's source into the
//! contribution the link delivers to its target. Responders are parameter
//! sets; the evolving response (step countdowns, decaying values, synaptic
//! resources) lives in a [`ScalarResponderState`] or [`MatrixResponderState`]
//! owned by the link, shaped like the link's weight.
//!
//! Matrix application is element-wise over the weight matrix: element
//! `(i, j)` follows source element `j`'s spike train, and the contribution
//! to target element `i` is the row sum of the element responses. The
//! [`SpikeResponder::NonResponder`] variant bypasses all of that with a
//! plain matrix-vector product over graded activations.

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

mod convolved_jump_and_decay;
mod jump_and_decay;
mod probabilistic;
mod rise_and_decay;
mod step;
mod udf;

pub use convolved_jump_and_decay::ConvolvedJumpAndDecayResponder;
pub use jump_and_decay::JumpAndDecayResponder;
pub use probabilistic::ProbabilisticResponder;
pub use rise_and_decay::{RiseAndDecayResponder, RisePhase};
pub use step::StepResponder;
pub use udf::UdfResponder;

/// Evolving response state for a scalar link.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarResponderState {
    None,
    Step { countdown: u32 },
    Decay { value: f64 },
    Rise { phase: RisePhase, value: f64 },
    Udf { utilization: f64, resources: f64 },
}

/// Evolving response state for a matrix link, one slot per weight element.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixResponderState {
    None,
    Step {
        countdowns: Array2<u32>,
    },
    Decay {
        values: Array2<f64>,
    },
    Rise {
        phases: Array2<RisePhase>,
        values: Array2<f64>,
    },
    Udf {
        utilizations: Array2<f64>,
        resources: Array2<f64>,
    },
}

impl MatrixResponderState {
    fn dim(&self) -> Option<(usize, usize)> {
        match self {
            MatrixResponderState::None => None,
            MatrixResponderState::Step { countdowns } => Some(countdowns.dim()),
            MatrixResponderState::Decay { values } => Some(values.dim()),
            MatrixResponderState::Rise { values, .. } => Some(values.dim()),
            MatrixResponderState::Udf { utilizations, .. } => Some(utilizations.dim()),
        }
    }
}

/// The closed set of spike responders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpikeResponder {
    /// No spike shaping: contribution is `weight * source activation` every
    /// step (matrix links: one matrix-vector product).
    NonResponder,
    Step(StepResponder),
    JumpAndDecay(JumpAndDecayResponder),
    ConvolvedJumpAndDecay(ConvolvedJumpAndDecayResponder),
    Probabilistic(ProbabilisticResponder),
    RiseAndDecay(RiseAndDecayResponder),
    Udf(UdfResponder),
}

impl Default for SpikeResponder {
    fn default() -> Self {
        SpikeResponder::NonResponder
    }
}

impl SpikeResponder {
    /// Short responder name for logs and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            SpikeResponder::NonResponder => "non-responder",
            SpikeResponder::Step(_) => "step",
            SpikeResponder::JumpAndDecay(_) => "jump and decay",
            SpikeResponder::ConvolvedJumpAndDecay(_) => "convolved jump and decay",
            SpikeResponder::Probabilistic(_) => "probabilistic",
            SpikeResponder::RiseAndDecay(_) => "rise and decay",
            SpikeResponder::Udf(_) => "udf",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SpikeResponder::NonResponder => Ok(()),
            SpikeResponder::Step(r) => r.validate(),
            SpikeResponder::JumpAndDecay(r) => r.validate(),
            SpikeResponder::ConvolvedJumpAndDecay(r) => r.validate(),
            SpikeResponder::Probabilistic(r) => r.validate(),
            SpikeResponder::RiseAndDecay(r) => r.validate(),
            SpikeResponder::Udf(r) => r.validate(),
        }
    }

    /// Fresh response state for a scalar link.
    pub fn create_scalar_state(&self) -> ScalarResponderState {
        match self {
            SpikeResponder::NonResponder | SpikeResponder::Probabilistic(_) => {
                ScalarResponderState::None
            }
            SpikeResponder::Step(_) => ScalarResponderState::Step { countdown: 0 },
            SpikeResponder::JumpAndDecay(r) => ScalarResponderState::Decay { value: r.baseline },
            SpikeResponder::ConvolvedJumpAndDecay(r) => {
                ScalarResponderState::Decay { value: r.baseline }
            }
            SpikeResponder::RiseAndDecay(_) => ScalarResponderState::Rise {
                phase: RisePhase::Quiet,
                value: 0.0,
            },
            SpikeResponder::Udf(r) => ScalarResponderState::Udf {
                utilization: r.baseline_utilization,
                resources: 1.0,
            },
        }
    }

    /// Fresh response state for a matrix link with a `rows x cols` weight.
    pub fn create_matrix_state(&self, rows: usize, cols: usize) -> MatrixResponderState {
        let dim = (rows, cols);
        match self {
            SpikeResponder::NonResponder | SpikeResponder::Probabilistic(_) => {
                MatrixResponderState::None
            }
            SpikeResponder::Step(_) => MatrixResponderState::Step {
                countdowns: Array2::zeros(dim),
            },
            SpikeResponder::JumpAndDecay(r) => MatrixResponderState::Decay {
                values: Array2::from_elem(dim, r.baseline),
            },
            SpikeResponder::ConvolvedJumpAndDecay(r) => MatrixResponderState::Decay {
                values: Array2::from_elem(dim, r.baseline),
            },
            SpikeResponder::RiseAndDecay(_) => MatrixResponderState::Rise {
                phases: Array2::from_elem(dim, RisePhase::Quiet),
                values: Array2::zeros(dim),
            },
            SpikeResponder::Udf(r) => MatrixResponderState::Udf {
                utilizations: Array2::from_elem(dim, r.baseline_utilization),
                resources: Array2::from_elem(dim, 1.0),
            },
        }
    }

    fn ensure_scalar_state(&self, state: &mut ScalarResponderState) {
        let fresh = self.create_scalar_state();
        if std::mem::discriminant(state) != std::mem::discriminant(&fresh) {
            *state = fresh;
        }
    }

    fn ensure_matrix_state(&self, state: &mut MatrixResponderState, dim: (usize, usize)) {
        let fresh = self.create_matrix_state(dim.0, dim.1);
        if std::mem::discriminant(state) != std::mem::discriminant(&fresh)
            || state.dim().is_some_and(|d| d != dim)
        {
            *state = fresh;
        }
    }

    /// Computes one step of a scalar link's contribution.
    ///
    /// `source_value` and `source_spiked` are the source node's outputs from
    /// the previous completed update, which is what makes evaluation order
    /// within a step irrelevant.
    pub fn apply_scalar(
        &self,
        weight: f64,
        source_value: f64,
        source_spiked: bool,
        state: &mut ScalarResponderState,
        rng: &mut StdRng,
    ) -> f64 {
        self.ensure_scalar_state(state);
        match (self, state) {
            (SpikeResponder::NonResponder, _) => weight * source_value,
            (SpikeResponder::Probabilistic(r), _) => {
                r.element(weight, source_value, source_spiked, rng)
            }
            (SpikeResponder::Step(r), ScalarResponderState::Step { countdown }) => {
                r.element(weight, source_spiked, countdown)
            }
            (SpikeResponder::JumpAndDecay(r), ScalarResponderState::Decay { value }) => {
                r.element(weight, source_spiked, value)
            }
            (
                SpikeResponder::ConvolvedJumpAndDecay(r),
                ScalarResponderState::Decay { value },
            ) => r.element(weight, source_spiked, value),
            (SpikeResponder::RiseAndDecay(r), ScalarResponderState::Rise { phase, value }) => {
                r.element(weight, source_spiked, phase, value)
            }
            (
                SpikeResponder::Udf(r),
                ScalarResponderState::Udf {
                    utilization,
                    resources,
                },
            ) => r.element(weight, source_spiked, utilization, resources),
            _ => unreachable!("responder state normalized above"),
        }
    }

    /// Computes one step of a matrix link's contribution into `psr`
    /// (overwritten, length = weight rows).
    ///
    /// Element states advance in row-major order, so probabilistic draws are
    /// reproducible for a given link stream.
    pub fn apply_matrix(
        &self,
        weights: &Array2<f64>,
        source_values: ArrayView1<'_, f64>,
        source_spikes: &[bool],
        state: &mut MatrixResponderState,
        rng: &mut StdRng,
        psr: &mut Array1<f64>,
    ) {
        let dim = weights.dim();
        self.ensure_matrix_state(state, dim);
        match (self, state) {
            (SpikeResponder::NonResponder, _) => {
                general_mat_vec_mul(1.0, weights, &source_values, 0.0, psr);
            }
            (SpikeResponder::Probabilistic(r), _) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(weights[[i, j]], source_values[j], source_spikes[j], rng);
                    }
                    psr[i] = sum;
                }
            }
            (SpikeResponder::Step(r), MatrixResponderState::Step { countdowns }) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(
                            weights[[i, j]],
                            source_spikes[j],
                            &mut countdowns[[i, j]],
                        );
                    }
                    psr[i] = sum;
                }
            }
            (SpikeResponder::JumpAndDecay(r), MatrixResponderState::Decay { values }) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(weights[[i, j]], source_spikes[j], &mut values[[i, j]]);
                    }
                    psr[i] = sum;
                }
            }
            (
                SpikeResponder::ConvolvedJumpAndDecay(r),
                MatrixResponderState::Decay { values },
            ) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(weights[[i, j]], source_spikes[j], &mut values[[i, j]]);
                    }
                    psr[i] = sum;
                }
            }
            (
                SpikeResponder::RiseAndDecay(r),
                MatrixResponderState::Rise { phases, values },
            ) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(
                            weights[[i, j]],
                            source_spikes[j],
                            &mut phases[[i, j]],
                            &mut values[[i, j]],
                        );
                    }
                    psr[i] = sum;
                }
            }
            (
                SpikeResponder::Udf(r),
                MatrixResponderState::Udf {
                    utilizations,
                    resources,
                },
            ) => {
                for i in 0..dim.0 {
                    let mut sum = 0.0;
                    for j in 0..dim.1 {
                        sum += r.element(
                            weights[[i, j]],
                            source_spikes[j],
                            &mut utilizations[[i, j]],
                            &mut resources[[i, j]],
                        );
                    }
                    psr[i] = sum;
                }
            }
            _ => unreachable!("responder state normalized above"),
        }
    }
}
