// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end dispatch and learning tests over small networks.

use synfire_engine::{
    DispatchLimits, Network, NetworkParameters, SeededOracle,
};
use synfire_neural::{NeuronId, NeuronParameters, Spike, Synapse};

/// No-decay parameters with every initial weight pinned to `weight`.
fn pinned_params(weight: f32, delay: f64) -> NetworkParameters {
    NetworkParameters {
        neuron: NeuronParameters {
            threshold: 1.0,
            resting_potential: 0.0,
            tau: f64::INFINITY,
            refractory_period: 1.0,
        },
        init_weight_min: weight,
        init_weight_max: weight,
        default_delay: delay,
        ..Default::default()
    }
}

/// Two-input relay into a single integrator: the output neuron accumulates
/// 0.6 twice and fires exactly once, at the second spike, then resets.
#[test]
fn test_relay_integrator_scenario() {
    let mut oracle = SeededOracle::from_seed(0);
    let mut network = Network::new(&[2, 1], pinned_params(0.6, 0.0), &mut oracle).unwrap();

    let relay = NeuronId(0);
    let output = NeuronId(2);

    let report = network
        .dispatch(vec![
            Spike::stimulus(relay, 0.0, 1.0),
            Spike::stimulus(relay, 1.0, 1.0),
        ])
        .unwrap();

    assert!(!report.bound_exceeded);
    // Relay fired twice, output once
    assert_eq!(network.fire_counts()[relay.0 as usize], 2);
    assert_eq!(network.fire_counts()[output.0 as usize], 1);

    // 0.6 at t=0 stays under threshold; 0.6 more at t=1 crosses 1.0
    assert_eq!(network.get_output(), vec![1.0]);
    assert_eq!(network.output_potentials(), vec![0.0]);
    assert_eq!(
        network.neuron(output).unwrap().last_fire_time(),
        Some(1.0)
    );
}

#[test]
fn test_subthreshold_input_produces_no_output() {
    let mut oracle = SeededOracle::from_seed(0);
    let mut network = Network::new(&[2, 1], pinned_params(0.6, 0.0), &mut oracle).unwrap();

    network
        .dispatch(vec![Spike::stimulus(NeuronId(0), 0.0, 1.0)])
        .unwrap();

    assert_eq!(network.get_output(), vec![0.0]);
    // The single forwarded 0.6 is sitting on the output membrane
    assert!((network.output_potentials()[0] - 0.6).abs() < 1e-6);
}

/// Fixed seed + fixed sorted input => identical outputs and identical
/// learned weights across independent runs.
#[test]
fn test_deterministic_replay() {
    let run = || {
        let mut oracle = SeededOracle::from_seed(1234);
        let mut network =
            Network::new(&[3, 5, 2], NetworkParameters::default(), &mut oracle).unwrap();

        let inputs: Vec<Spike> = (0..30)
            .map(|i| Spike::stimulus(NeuronId(i % 3), i as f64 * 0.5, 0.8))
            .collect();

        let report = network.dispatch(inputs).unwrap();
        network.apply_learning();

        let weights: Vec<f32> = network.synapses().map(Synapse::weight).collect();
        (report, network.get_output(), weights)
    };

    let (report_a, output_a, weights_a) = run();
    let (report_b, output_b, weights_b) = run();

    assert_eq!(report_a, report_b);
    assert_eq!(output_a, output_b);
    assert_eq!(weights_a, weights_b);
}

/// Causal activity (pre fires, then post) potentiates the connecting
/// synapse; anti-causal activity depresses it.
#[test]
fn test_learning_direction() {
    let mut oracle = SeededOracle::from_seed(0);
    let mut network = Network::new(&[1, 1], pinned_params(0.5, 1.0), &mut oracle).unwrap();
    let initial = network.synapses().next().unwrap().weight();

    // Input fires at t=0 and t=1; output crosses threshold at t=2
    network
        .dispatch(vec![
            Spike::stimulus(NeuronId(0), 0.0, 1.0),
            Spike::stimulus(NeuronId(0), 1.0, 1.0),
        ])
        .unwrap();
    assert_eq!(network.get_output(), vec![1.0]);

    let report = network.apply_learning();
    assert_eq!(report.synapses_updated, 1);
    assert!(report.total_potentiation > 0.0);
    assert_eq!(report.total_depression, 0.0);
    assert!(network.synapses().next().unwrap().weight() > initial);

    // Anti-causal: output is driven directly first, input fires later
    network.reset_state();
    let before = network.synapses().next().unwrap().weight();
    network
        .dispatch(vec![
            Spike::stimulus(NeuronId(1), 0.0, 2.0),
            Spike::stimulus(NeuronId(0), 5.0, 1.0),
        ])
        .unwrap();

    let report = network.apply_learning();
    assert_eq!(report.synapses_updated, 1);
    assert!(report.total_depression > 0.0);
    assert!(network.synapses().next().unwrap().weight() < before);
}

/// Synapses whose endpoints never both fire are untouched by learning.
#[test]
fn test_learning_skips_silent_synapses() {
    let mut oracle = SeededOracle::from_seed(0);
    let mut network = Network::new(&[2, 1], pinned_params(0.3, 0.0), &mut oracle).unwrap();

    // Only neuron 0 fires; the output never crosses threshold
    network
        .dispatch(vec![Spike::stimulus(NeuronId(0), 0.0, 1.0)])
        .unwrap();

    let report = network.apply_learning();
    assert_eq!(report.synapses_updated, 0);
}

/// A spike chain through a delayed feedback loop stops at the horizon and
/// reports it without erroring.
#[test]
fn test_bounded_feedback_reports_cleanly() {
    let mut oracle = SeededOracle::from_seed(0);
    let mut params = pinned_params(0.5, 1.0);
    params.limits = DispatchLimits {
        max_events: 10_000,
        time_horizon: 50.0,
    };
    let mut network = Network::new(&[1, 1], params, &mut oracle).unwrap();
    // Strong edges in both directions close a self-sustaining loop
    network
        .connect(
            NeuronId(1),
            NeuronId(0),
            1.0,
            1.0,
            synfire_neural::SynapsePolarity::Excitatory,
        )
        .unwrap();
    network
        .connect(
            NeuronId(0),
            NeuronId(1),
            1.0,
            1.0,
            synfire_neural::SynapsePolarity::Excitatory,
        )
        .unwrap();

    let report = network
        .dispatch(vec![Spike::stimulus(NeuronId(0), 0.0, 1.0)])
        .unwrap();

    assert!(report.bound_exceeded);
    assert!(report.final_time <= 50.0);
    assert!(report.events_processed > 10);
}