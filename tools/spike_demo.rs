// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Demo entry point: build a network from configuration, drive it with a
//! seeded batch of stimulus spikes, run a few dispatch + learning passes,
//! and print the output vector, learned weight summary, and energy report.

use tracing_subscriber::EnvFilter;

use synfire::prelude::*;
use synfire::{activity_monitor, network_parameters, MemoryStore};

const TRAINING_PASSES: usize = 5;
const SPIKES_PER_INPUT: usize = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config(None)?;
    let params = network_parameters(&config)?;
    let monitor = activity_monitor(&config);

    let mut oracle = SeededOracle::from_seed(config.network.seed);
    let mut network = Network::new(&config.network.layer_sizes, params, &mut oracle)?;
    tracing::info!(
        layers = ?config.network.layer_sizes,
        neurons = network.neuron_count(),
        synapses = network.synapse_count(),
        seed = config.network.seed,
        "network ready"
    );

    // Stimulus batch: a handful of super-threshold spikes per input neuron,
    // at oracle-drawn times so the whole run replays from the seed.
    let input_layer: Vec<NeuronId> = network.layer(0).unwrap_or(&[]).to_vec();
    let threshold = config.neuron.threshold;
    let mut stimulus = Vec::new();
    for &neuron in &input_layer {
        for _ in 0..SPIKES_PER_INPUT {
            let time = oracle.next_bounded(0.0, 40.0);
            let weight = oracle.next_bounded(threshold as f64, threshold as f64 * 1.5) as f32;
            stimulus.push(Spike::stimulus(neuron, time, weight));
        }
    }
    stimulus.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut last_report = None;
    for pass in 0..TRAINING_PASSES {
        network.reset_state();
        let report = network.dispatch(stimulus.clone())?;
        let learning = network.apply_learning();
        tracing::info!(
            pass,
            events = report.events_processed,
            fired = report.neurons_fired,
            updated = learning.synapses_updated,
            ltp = learning.total_potentiation,
            ltd = learning.total_depression,
            bound_exceeded = report.bound_exceeded,
            "training pass complete"
        );
        last_report = Some(report);
    }

    println!("output vector: {:?}", network.get_output());

    let weights: Vec<f32> = network.synapses().map(|s| s.weight()).collect();
    let mean = weights.iter().sum::<f32>() / weights.len().max(1) as f32;
    let (lo, hi) = weights.iter().fold((f32::MAX, f32::MIN), |(lo, hi), &w| {
        (lo.min(w), hi.max(w))
    });
    println!(
        "learned weights: n={} mean={:.4} min={:.4} max={:.4}",
        weights.len(),
        mean,
        lo,
        hi
    );

    if let Some(report) = last_report {
        let energy = monitor.report(network.fire_counts(), report.final_time);
        println!("energy: {energy}");
    }

    let mut store = MemoryStore::new();
    store.store(&network.snapshot())?;
    let stats = network.snapshot().statistics();
    println!("snapshot stored: {stats}");

    Ok(())
}
