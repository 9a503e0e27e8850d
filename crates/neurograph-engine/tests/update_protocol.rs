// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Update Protocol Test Suite
//!
//! Validates the buffered two-phase step against the properties the engine
//! guarantees:
//!
//! - one-hop propagation per step (phase one reads previous-step output only)
//! - order independence: permuting update priorities is bit-identical, with
//!   and without noise (per-entity rng streams)
//! - clamp and bound invariants
//! - reproducibility across identically seeded networks, divergence across
//!   seeds
//! - time bookkeeping for empty networks and after `reset_time`

use ndarray::Array1;
use neurograph_engine::{Network, NetworkConfig, Neuron, NeuronArray, NodeId};
use neurograph_neural::{
    LinearRule, NoiseSource, SpikeResponder, SpikingThresholdRule, StepResponder, UpdateRule,
};

fn noisy_linear(half_width: f64) -> UpdateRule {
    UpdateRule::Linear(LinearRule {
        noise: Some(NoiseSource::uniform_symmetric(half_width)),
    })
}

fn noisy_spiker(threshold: f64, half_width: f64) -> UpdateRule {
    UpdateRule::SpikingThreshold(SpikingThresholdRule {
        threshold,
        noise: Some(NoiseSource::uniform_symmetric(half_width)),
    })
}

#[test]
fn activation_travels_one_link_per_step() {
    let mut net = Network::default();
    let a = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    let b = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    let c = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    net.add_synapse(a, b, 1.0).unwrap();
    net.add_synapse(b, c, 1.0).unwrap();
    net.set_clamped(a, true).unwrap();
    net.set_activation(a, 1.0).unwrap();

    net.update();
    assert_eq!(net.activation(b).unwrap(), 1.0);
    assert_eq!(net.activation(c).unwrap(), 0.0);

    net.update();
    assert_eq!(net.activation(c).unwrap(), 1.0);
}

#[test]
fn input_buffers_do_not_carry_over() {
    let mut net = Network::default();
    let a = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    net.add_input(a, 0.5).unwrap();
    net.update();
    assert_eq!(net.activation(a).unwrap(), 0.5);
    net.update();
    assert_eq!(net.activation(a).unwrap(), 0.0);
}

/// Runs a mixed scalar/vector network with noise on every rule and a
/// stochastic responder, under the given update priorities, and returns the
/// full activation trajectory.
fn noisy_trajectory(priorities: [i32; 5], steps: usize) -> Vec<Vec<f64>> {
    let mut net = Network::new(NetworkConfig::with_seed(2024));

    // Constant spiking drive.
    let drive = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    net.set_clamped(drive, true).unwrap();
    net.set_activation(drive, 0.9).unwrap();
    net.set_spiked(drive, true).unwrap();

    let spiker = net.add_node(Neuron::new(noisy_spiker(0.3, 0.2))).unwrap();
    let sink = net.add_node(Neuron::new(noisy_linear(0.1))).unwrap();
    net.set_bounds(sink, -10.0, 10.0).unwrap();

    let vec_drive = net
        .add_node(NeuronArray::new(2, UpdateRule::spiking_threshold(0.5)))
        .unwrap();
    net.set_clamped(vec_drive, true).unwrap();
    net.set_activations(vec_drive, Array1::ones(2).view()).unwrap();
    net.set_spikes(vec_drive, &[true, true]).unwrap();

    let vec_sink = net
        .add_node(NeuronArray::new(3, noisy_linear(0.05)))
        .unwrap();
    net.set_bounds(vec_sink, -10.0, 10.0).unwrap();

    let s1 = net.add_synapse(drive, spiker, 1.0).unwrap();
    net.set_responder(
        s1,
        SpikeResponder::Probabilistic(neurograph_neural::ProbabilisticResponder::new(0.6)),
    )
    .unwrap();
    let s2 = net.add_synapse(spiker, sink, 0.8).unwrap();
    net.set_responder(
        s2,
        SpikeResponder::Step(StepResponder {
            height: 0.5,
            duration: 2,
        }),
    )
    .unwrap();
    net.add_synapse(sink, sink, 0.25).unwrap();

    let m = net
        .add_weight_matrix(
            vec_drive,
            vec_sink,
            ndarray::arr2(&[[0.5, 0.5], [1.0, 0.0], [0.0, 1.0]]),
        )
        .unwrap();
    net.set_responder(
        m,
        SpikeResponder::Udf(neurograph_neural::UdfResponder::default()),
    )
    .unwrap();

    for (id, p) in [drive, spiker, sink, vec_drive, vec_sink]
        .into_iter()
        .zip(priorities)
    {
        net.set_priority(id, p).unwrap();
    }

    let mut trajectory = Vec::with_capacity(steps);
    for _ in 0..steps {
        net.update();
        let mut row = vec![
            net.activation(drive).unwrap(),
            net.activation(spiker).unwrap(),
            net.activation(sink).unwrap(),
        ];
        row.extend(net.activations(vec_sink).unwrap().iter());
        trajectory.push(row);
    }
    trajectory
}

#[test]
fn permuted_priorities_are_bit_identical_even_with_noise() {
    let base = noisy_trajectory([0, 0, 0, 0, 0], 50);
    assert_eq!(base, noisy_trajectory([4, 3, 2, 1, 0], 50));
    assert_eq!(base, noisy_trajectory([-5, 17, 0, 3, -2], 50));
}

#[test]
fn same_seed_reproduces_and_different_seeds_diverge() {
    let run = |seed: u64| {
        let mut net = Network::new(NetworkConfig::with_seed(seed));
        let a = net.add_node(Neuron::new(noisy_linear(0.5))).unwrap();
        net.set_bounds(a, -10.0, 10.0).unwrap();
        let mut out = Vec::new();
        for _ in 0..20 {
            net.update();
            out.push(net.activation(a).unwrap());
        }
        out
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn clamped_nodes_are_untouched_by_noise_and_input() {
    let mut net = Network::default();
    let a = net.add_node(Neuron::new(noisy_linear(1.0))).unwrap();
    net.set_clamped(a, true).unwrap();
    net.set_activation(a, 0.25).unwrap();
    net.add_synapse(a, a, 3.0).unwrap();
    for _ in 0..10 {
        net.add_input(a, 2.0).unwrap();
        net.update();
        assert_eq!(net.activation(a).unwrap(), 0.25);
    }
}

#[test]
fn activations_stay_inside_bounds() {
    let mut net = Network::new(NetworkConfig::with_seed(3));
    let a = net.add_node(Neuron::new(noisy_linear(0.3))).unwrap();
    let b = net
        .add_node(NeuronArray::new(4, noisy_linear(0.3)))
        .unwrap();
    net.set_bounds(a, -0.5, 0.75).unwrap();
    net.set_bounds(b, -0.25, 0.25).unwrap();
    for step in 0..50 {
        net.add_input(a, if step % 2 == 0 { 5.0 } else { -5.0 }).unwrap();
        net.add_vector_input(b, Array1::from_elem(4, 5.0).view())
            .unwrap();
        net.update();
        let v = net.activation(a).unwrap();
        assert!((-0.5..=0.75).contains(&v), "step {step}: {v}");
        for &v in net.activations(b).unwrap().iter() {
            assert!((-0.25..=0.25).contains(&v), "step {step}: {v}");
        }
    }
}

#[test]
fn sinusoidal_generator_follows_the_step_counter() {
    let mut net = Network::default();
    let osc = net
        .add_node(Neuron::new(UpdateRule::sinusoidal()).with_bounds(-2.0, 2.0))
        .unwrap();
    // Incoming drive must be ignored by the generator.
    let drive = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    net.set_clamped(drive, true).unwrap();
    net.set_activation(drive, 1.0).unwrap();
    net.add_synapse(drive, osc, 10.0).unwrap();

    // Defaults: frequency 0.1, phase 0, range [-1, 1].
    let expected = |t: f64| (0.1 * t).sin();
    let mut first = Vec::new();
    for t in 0..5 {
        net.update();
        let v = net.activation(osc).unwrap();
        assert!((v - expected(t as f64)).abs() < 1e-12, "t={t}: {v}");
        first.push(v);
    }

    // Resetting time restarts the waveform.
    net.reset_time();
    for t in 0..5 {
        net.update();
        assert_eq!(net.activation(osc).unwrap(), first[t]);
    }
}

#[test]
fn empty_network_counts_time() {
    let mut net = Network::default();
    for _ in 0..5 {
        net.update();
    }
    assert_eq!(net.time(), 5);
    net.reset_time();
    assert_eq!(net.time(), 0);
}

#[test]
fn update_order_changes_never_leak_through_removal() {
    // Remove a high-priority node between steps; the survivors' dynamics
    // must match a network that never contained it.
    let run = |with_extra: bool| {
        let mut net = Network::new(NetworkConfig::with_seed(5));
        let a = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
        let b = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
        net.add_synapse(a, b, 0.5).unwrap();
        net.set_clamped(a, true).unwrap();
        net.set_activation(a, 1.0).unwrap();
        let extra = if with_extra {
            let e = net.add_node(Neuron::new(noisy_linear(1.0))).unwrap();
            net.set_priority(e, -100).unwrap();
            Some(e)
        } else {
            None
        };
        net.update();
        if let Some(e) = extra {
            net.remove_node(e).unwrap();
        }
        net.update();
        (net.activation(a).unwrap(), net.activation(b).unwrap())
    };
    assert_eq!(run(false), run(true));
}

#[test]
fn priority_accessor_round_trips() {
    let mut net = Network::default();
    let a = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();
    assert_eq!(net.node(a).unwrap().priority(), 0);
    net.set_priority(a, -3).unwrap();
    assert_eq!(net.node(a).unwrap().priority(), -3);
    assert!(net.set_priority(NodeId(99), 1).is_err());
}
