// Copyright 2025 Neurograph contributors
// SPDX-License-Identifier: Apache-2.0

//! Facade Smoke Test
//!
//! Builds a small mixed network through the `neurograph` umbrella crate and
//! checks that the whole stack holds together: a sinusoidal generator
//! modulates a tonically driven integrate-and-fire neuron whose spikes reach
//! a readout through a depressing synapse, while a spiking array feeds a
//! second array through a weight matrix with a step responder.

use ndarray::Array2;
use neurograph::neural::{IntegrateAndFireRule, SinusoidalRule, StepResponder, UdfResponder};
use neurograph::prelude::*;

struct Rig {
    net: Network,
    generator: NodeId,
    integrator: NodeId,
    readout: NodeId,
    sink: NodeId,
}

fn build(seed: u64) -> Rig {
    let mut net = Network::new(NetworkConfig::with_seed(seed));

    let generator = net
        .add_node(Neuron::new(UpdateRule::Sinusoidal(SinusoidalRule::default())))
        .unwrap();
    let integrator = net
        .add_node(Neuron::new(UpdateRule::IntegrateAndFire(
            IntegrateAndFireRule::default(),
        )))
        .unwrap();
    net.set_bounds(integrator, -90.0, 0.0).unwrap();
    // Tonic drive above threshold; the generator modulates spike timing.
    net.set_bias(integrator, 25.0).unwrap();
    let readout = net.add_node(Neuron::new(UpdateRule::linear())).unwrap();

    net.add_synapse(generator, integrator, 2.0).unwrap();
    let depressing = net.add_synapse(integrator, readout, 0.5).unwrap();
    net.set_responder(depressing, SpikeResponder::Udf(UdfResponder::default()))
        .unwrap();

    let bank = net
        .add_node(NeuronArray::new(2, UpdateRule::spiking_threshold(0.5)))
        .unwrap();
    let sink = net
        .add_node(NeuronArray::new(4, UpdateRule::linear()))
        .unwrap();
    let fanout = net
        .add_weight_matrix(bank, sink, Array2::from_elem((4, 2), 0.25))
        .unwrap();
    net.set_responder(
        fanout,
        SpikeResponder::Step(StepResponder {
            height: 0.5,
            duration: 2,
        }),
    )
    .unwrap();
    net.set_clamped(bank, true).unwrap();
    net.set_spikes(bank, &[true, false]).unwrap();

    Rig {
        net,
        generator,
        integrator,
        readout,
        sink,
    }
}

#[test]
fn pipeline_runs_spikes_and_stays_bounded() {
    let mut rig = build(11);

    let mut spike_count = 0;
    let mut readout_peak = 0.0f64;
    for _ in 0..400 {
        rig.net.update();
        spike_count += usize::from(rig.net.spiked(rig.integrator).unwrap());
        readout_peak = readout_peak.max(rig.net.activation(rig.readout).unwrap());
        let g = rig.net.activation(rig.generator).unwrap();
        assert!((-1.0..=1.0).contains(&g));
        for v in rig.net.activations(rig.sink).unwrap() {
            assert!(v.is_finite());
        }
    }

    assert_eq!(rig.net.time(), 400);
    assert!(spike_count > 0, "the integrator never fired");
    assert!(spike_count < 400, "the integrator fired every step");
    assert!(readout_peak > 0.0, "no release ever reached the readout");
    // The held spike column keeps the responding matrix elements active.
    assert!(rig.net.activations(rig.sink).unwrap().iter().all(|&v| v == 0.5));
}

#[test]
fn identical_builds_stay_in_lockstep() {
    let mut left = build(23);
    let mut right = build(23);

    for _ in 0..100 {
        left.net.update();
        right.net.update();
    }
    assert_eq!(
        left.net.activation(left.integrator).unwrap(),
        right.net.activation(right.integrator).unwrap()
    );
    assert_eq!(
        left.net.activations(left.sink).unwrap(),
        right.net.activations(right.sink).unwrap()
    );
}
