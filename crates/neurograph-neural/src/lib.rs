// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neurograph contributors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neurograph Neural Computation
//!
//! ALL per-element neural computation in one place:
//! - **Rules**: activation update rules (linear, sigmoidal, binary, spiking)
//! - **Responders**: post-synaptic response to pre-synaptic spike trains
//! - **Noise**: additive noise sources for rules and weight randomization
//!
//! Everything here is graph-agnostic. A rule maps an accumulated input to a
//! new activation (and possibly a spike); a responder maps a source spike
//! train and a weight to a contribution. Buffering, wiring, and update
//! ordering live in `neurograph-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod noise;
pub mod responders;
pub mod rules;
pub mod util;

// Re-export everything for convenience
pub use error::{ParameterError, Result};
pub use noise::NoiseSource;
pub use util::{clip, decay_toward, signum_or_zero};

// Re-export update rules
pub use rules::{
    BinaryRule, IntegrateAndFireRule, LinearRule, ScalarRuleCtx, ScalarRuleOutput,
    ScalarRuleState, SigmoidalRule, SinusoidalRule, SpikingThresholdRule, SquashFunction,
    UpdateRule, VectorRuleCtx, VectorRuleState,
};

// Re-export spike responders
pub use responders::{
    ConvolvedJumpAndDecayResponder, JumpAndDecayResponder, MatrixResponderState,
    ProbabilisticResponder, RiseAndDecayResponder, RisePhase, ScalarResponderState,
    SpikeResponder, StepResponder, UdfResponder,
};
