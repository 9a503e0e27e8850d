// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared numeric helpers for rules and responders

/// Clips `value` into `[lower, upper]`.
///
/// Non-finite values pass through unchanged so that a diverging simulation
/// stays visibly diverged instead of being silently pinned to a bound.
/// Callers guarantee `lower <= upper` and finite bounds.
#[inline(always)]
pub fn clip(value: f64, lower: f64, upper: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lower, upper)
    } else {
        value
    }
}

/// One discrete exponential relaxation step of `value` toward `baseline`.
///
/// Equivalent to integrating `dv/dt = (baseline - v) / time_constant` over a
/// unit step: `v += (baseline - v) * (1 - exp(-1 / time_constant))`. The
/// fixed point is `baseline` and convergence is monotone.
#[inline(always)]
pub fn decay_toward(value: f64, baseline: f64, time_constant: f64) -> f64 {
    value + (baseline - value) * (1.0 - (-1.0 / time_constant).exp())
}

/// Sign of a weight with `0.0` mapped to `0.0`.
///
/// `f64::signum` maps `+0.0` to `1.0`, which would let a zero weight carry a
/// response through step-shaped responders.
#[inline(always)]
pub fn signum_or_zero(weight: f64) -> f64 {
    if weight > 0.0 {
        1.0
    } else if weight < 0.0 {
        -1.0
    } else {
        0.0
    }
}
