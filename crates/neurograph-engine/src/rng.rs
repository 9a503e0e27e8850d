// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-entity RNG stream derivation
//!
//! Every node and link owns a private `StdRng` so its draw sequence depends
//! only on the master seed and its own id, never on how many draws other
//! entities made. That is what keeps noisy runs bit-identical under update
//! reordering and phase-internal parallelism.

use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) const NODE_STREAM: u64 = 0x4e4f_4445;
pub(crate) const LINK_STREAM: u64 = 0x4c49_4e4b;

/// splitmix64 finalizer, spreads adjacent ids across the seed space.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seeded stream for the entity `(tag, raw_id)` under `master`.
pub(crate) fn stream(master: u64, tag: u64, raw_id: u32) -> StdRng {
    let z = master
        .wrapping_add(tag.rotate_left(17))
        .wrapping_add(u64::from(raw_id).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    StdRng::seed_from_u64(mix(z))
}
