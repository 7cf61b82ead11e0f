// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Layered spiking network and the dispatch loop
//!
//! The `Network` exclusively owns every neuron and synapse. Layers partition
//! the neuron set; adjacent layers are fully connected at construction time
//! with oracle-drawn initial weights, and further synapses can be wired
//! explicitly.
//!
//! ## Dispatch
//! Input spikes seed a timestamp-ordered queue. Each popped spike is
//! delivered to its target neuron; a firing neuron emits one delayed spike
//! per outgoing synapse back into the queue. Feedback topologies can spike
//! indefinitely, so the loop is bounded by a maximum event count and a
//! simulation-time horizon - hitting either is a defined early-termination
//! mode flagged on the report, not an error.
//!
//! ## Learning
//! Weights are read-only during dispatch and mutate only in
//! [`Network::apply_learning`], which runs after the event queue has
//! quiesced. Deltas are computed in parallel over read-only neuron state and
//! applied serially, so no two updates ever race on one synapse.

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use synfire_neural::{
    Neuron, NeuronId, NeuronParameters, Spike, Synapse, SynapseId, SynapsePolarity,
    WeightBounds,
};
use synfire_plasticity::{compute_weight_update, StdpConfig};

use crate::error::{EngineError, Result};
use crate::queue::SpikeQueue;
use crate::rng::RandomOracle;

/// Termination bounds for one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchLimits {
    /// Maximum number of spike events processed per dispatch
    pub max_events: usize,

    /// Simulation-time horizon; spikes stamped beyond it are not delivered.
    /// Kept finite by default so snapshots stay JSON-representable.
    pub time_horizon: f64,
}

impl Default for DispatchLimits {
    fn default() -> Self {
        Self {
            max_events: 100_000,
            time_horizon: 1.0e6,
        }
    }
}

impl DispatchLimits {
    pub fn validate(&self) -> Result<()> {
        if self.max_events == 0 {
            return Err(EngineError::InvalidParameter(
                "dispatch max_events must be at least 1",
            ));
        }
        if self.time_horizon.is_nan() || self.time_horizon <= 0.0 {
            return Err(EngineError::InvalidParameter(
                "dispatch time_horizon must be positive",
            ));
        }
        Ok(())
    }
}

/// Construction parameters for a [`Network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParameters {
    /// Parameters applied to every neuron built from layer sizes
    pub neuron: NeuronParameters,

    /// Clamping range for all synaptic weights
    pub weight_bounds: WeightBounds,

    /// Range initial weights are drawn from (clamped into bounds)
    pub init_weight_min: f32,
    pub init_weight_max: f32,

    /// Transmission delay for synapses created by layer wiring
    pub default_delay: f64,

    /// Learning rule configuration
    pub stdp: StdpConfig,

    /// Dispatch termination bounds
    pub limits: DispatchLimits,
}

impl Default for NetworkParameters {
    fn default() -> Self {
        Self {
            neuron: NeuronParameters::default(),
            weight_bounds: WeightBounds::UNIT,
            init_weight_min: 0.1,
            init_weight_max: 0.9,
            default_delay: 1.0,
            stdp: StdpConfig::default(),
            limits: DispatchLimits::default(),
        }
    }
}

impl NetworkParameters {
    pub fn validate(&self) -> Result<()> {
        self.neuron.validate()?;
        self.stdp
            .validate()
            .map_err(EngineError::InvalidParameter)?;
        self.limits.validate()?;
        if !(self.init_weight_min <= self.init_weight_max) {
            return Err(EngineError::InvalidParameter(
                "init weight range must be ordered",
            ));
        }
        if !self.default_delay.is_finite() || self.default_delay < 0.0 {
            return Err(EngineError::InvalidParameter(
                "default_delay must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DispatchReport {
    /// Timestamp of the last delivered spike
    pub final_time: f64,

    /// Spike events delivered (including refractory-discarded ones)
    pub events_processed: usize,

    /// Fire events across the whole network
    pub neurons_fired: usize,

    /// Deliveries discarded because the target was refractory
    pub refractory_skips: usize,

    /// True when max_events or time_horizon cut the run short
    pub bound_exceeded: bool,
}

/// Outcome of one learning phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LearningReport {
    /// Synapses whose weight actually moved
    pub synapses_updated: usize,

    /// Sum of positive deltas (LTP)
    pub total_potentiation: f32,

    /// Sum of |negative deltas| (LTD)
    pub total_depression: f32,
}

/// A layered spiking network owning all neurons and synapses.
#[derive(Debug)]
pub struct Network {
    pub(crate) params: NetworkParameters,
    pub(crate) neurons: Vec<Neuron>,
    pub(crate) synapses: Vec<Synapse>,
    pub(crate) layers: Vec<Vec<NeuronId>>,
    /// Source neuron -> outgoing synapse ids, in creation order
    pub(crate) outgoing: AHashMap<NeuronId, Vec<SynapseId>>,
    pub(crate) fire_counts: Vec<u32>,
    pub(crate) clock: f64,
}

impl Network {
    /// Build a network from layer sizes, fully connecting adjacent layers
    /// with initial weights drawn from `oracle`.
    ///
    /// Fails with [`EngineError::InvalidTopology`] on an empty layer list or
    /// any zero-size layer; parameter validation failures surface before any
    /// allocation.
    pub fn new(
        layer_sizes: &[usize],
        params: NetworkParameters,
        oracle: &mut dyn RandomOracle,
    ) -> Result<Self> {
        params.validate()?;
        if layer_sizes.is_empty() {
            return Err(EngineError::InvalidTopology(
                "layer list must not be empty".into(),
            ));
        }
        if let Some(pos) = layer_sizes.iter().position(|&s| s == 0) {
            return Err(EngineError::InvalidTopology(format!(
                "layer {pos} has size 0"
            )));
        }

        let neuron_count: usize = layer_sizes.iter().sum();
        let mut network = Self {
            params,
            neurons: Vec::with_capacity(neuron_count),
            synapses: Vec::new(),
            layers: Vec::with_capacity(layer_sizes.len()),
            outgoing: AHashMap::new(),
            fire_counts: vec![0; neuron_count],
            clock: 0.0,
        };

        for &size in layer_sizes {
            let mut layer = Vec::with_capacity(size);
            for _ in 0..size {
                let id = NeuronId(network.neurons.len() as u32);
                network
                    .neurons
                    .push(Neuron::new(id, network.params.neuron)?);
                layer.push(id);
            }
            network.layers.push(layer);
        }

        // Full connectivity between adjacent layers
        let (lo, hi) = (
            network.params.init_weight_min as f64,
            network.params.init_weight_max as f64,
        );
        for pair in 0..network.layers.len().saturating_sub(1) {
            let sources = network.layers[pair].clone();
            let targets = network.layers[pair + 1].clone();
            for source in sources {
                for &target in &targets {
                    let weight = oracle.next_bounded(lo, hi) as f32;
                    let delay = network.params.default_delay;
                    network.connect(
                        source,
                        target,
                        weight,
                        delay,
                        SynapsePolarity::Excitatory,
                    )?;
                }
            }
        }

        debug!(
            target: "synfire::network",
            neurons = network.neurons.len(),
            synapses = network.synapses.len(),
            layers = network.layers.len(),
            "network constructed"
        );
        Ok(network)
    }

    /// Wire an explicit synapse between two existing neurons.
    pub fn connect(
        &mut self,
        source: NeuronId,
        target: NeuronId,
        weight: f32,
        delay: f64,
        polarity: SynapsePolarity,
    ) -> Result<SynapseId> {
        for id in [source, target] {
            if id.0 as usize >= self.neurons.len() {
                return Err(EngineError::InvalidTopology(format!(
                    "synapse endpoint {id} does not exist"
                )));
            }
        }

        let id = SynapseId(self.synapses.len() as u32);
        let synapse = Synapse::new(
            id,
            source,
            target,
            weight,
            delay,
            polarity,
            self.params.weight_bounds,
        )?;
        self.synapses.push(synapse);
        self.outgoing.entry(source).or_default().push(id);
        Ok(id)
    }

    /// Deliver a batch of input spikes and every spike they transitively
    /// cause, in timestamp order, until the queue drains or a bound is hit.
    pub fn dispatch(&mut self, input_spikes: Vec<Spike>) -> Result<DispatchReport> {
        let mut queue = SpikeQueue::with_capacity(input_spikes.len().max(64));
        for spike in input_spikes {
            if spike.target.0 as usize >= self.neurons.len() {
                return Err(EngineError::NeuronNotFound(spike.target));
            }
            queue.push(spike);
        }

        let limits = self.params.limits;
        let mut report = DispatchReport {
            final_time: self.clock,
            ..Default::default()
        };

        while let Some(spike) = queue.pop() {
            if spike.time > limits.time_horizon {
                report.bound_exceeded = true;
                trace!(
                    target: "synfire::dispatch",
                    time = spike.time,
                    horizon = limits.time_horizon,
                    pending = queue.len(),
                    "time horizon reached"
                );
                break;
            }
            if report.events_processed >= limits.max_events {
                report.bound_exceeded = true;
                trace!(
                    target: "synfire::dispatch",
                    max_events = limits.max_events,
                    pending = queue.len(),
                    "event bound reached"
                );
                break;
            }
            report.events_processed += 1;

            let idx = spike.target.0 as usize;
            if self.neurons[idx].is_refractory(spike.time) {
                report.refractory_skips += 1;
            }

            let fired = self.neurons[idx].integrate(spike.weight, spike.time);
            self.clock = self.clock.max(spike.time);
            report.final_time = self.clock;

            if fired {
                self.fire_counts[idx] += 1;
                report.neurons_fired += 1;

                if let Some(outgoing) = self.outgoing.get(&spike.target) {
                    for &sid in outgoing {
                        queue.push(self.synapses[sid.0 as usize].transmit(spike.time));
                    }
                }
            }
        }

        debug!(
            target: "synfire::dispatch",
            events = report.events_processed,
            fired = report.neurons_fired,
            refractory = report.refractory_skips,
            final_time = report.final_time,
            bound_exceeded = report.bound_exceeded,
            "dispatch complete"
        );
        Ok(report)
    }

    /// Spike count per output-layer neuron since the last state reset.
    pub fn get_output(&self) -> Vec<f32> {
        self.output_layer()
            .iter()
            .map(|id| self.fire_counts[id.0 as usize] as f32)
            .collect()
    }

    /// Membrane potential per output-layer neuron, for inspection.
    pub fn output_potentials(&self) -> Vec<f32> {
        self.output_layer()
            .iter()
            .map(|id| self.neurons[id.0 as usize].membrane_potential())
            .collect()
    }

    /// Run the STDP phase over every synapse with a recorded pre and post
    /// fire time. Must only be called after dispatch has quiesced: deltas
    /// are computed in parallel against read-only neuron state, then
    /// applied serially.
    pub fn apply_learning(&mut self) -> LearningReport {
        let neurons = &self.neurons;
        let stdp = self.params.stdp;

        let deltas: Vec<f32> = self
            .synapses
            .par_iter()
            .map(|synapse| {
                let pre = neurons[synapse.source().0 as usize].last_fire_time();
                let post = neurons[synapse.target().0 as usize].last_fire_time();
                match (pre, post) {
                    (Some(pre_t), Some(post_t)) => compute_weight_update(pre_t, post_t, &stdp),
                    _ => 0.0,
                }
            })
            .collect();

        let mut report = LearningReport::default();
        for (synapse, &delta) in self.synapses.iter_mut().zip(deltas.iter()) {
            if delta == 0.0 {
                continue;
            }
            synapse.apply_weight_delta(delta);
            report.synapses_updated += 1;
            if delta > 0.0 {
                report.total_potentiation += delta;
            } else {
                report.total_depression += -delta;
            }
        }

        debug!(
            target: "synfire::learning",
            updated = report.synapses_updated,
            ltp = report.total_potentiation,
            ltd = report.total_depression,
            "learning phase complete"
        );
        report
    }

    /// Reset all dynamic state (membranes, fire history, clock) between
    /// runs. Learned weights are kept.
    pub fn reset_state(&mut self) {
        for neuron in &mut self.neurons {
            neuron.reset();
        }
        self.fire_counts.fill(0);
        self.clock = 0.0;
    }

    #[inline]
    pub fn params(&self) -> &NetworkParameters {
        &self.params
    }

    #[inline]
    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.0 as usize)
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        self.synapses.get(id.0 as usize)
    }

    pub fn synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.iter()
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    /// Neuron ids of the given layer.
    pub fn layer(&self, index: usize) -> Option<&[NeuronId]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    /// Fire count per neuron since the last state reset.
    pub fn fire_counts(&self) -> &[u32] {
        &self.fire_counts
    }

    fn output_layer(&self) -> &[NeuronId] {
        self.layers.last().map(Vec::as_slice).unwrap_or(&[])
    }
}
