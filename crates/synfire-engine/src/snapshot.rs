// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 */

//! Network snapshot types and the persistence seam
//!
//! These types represent the serializable state of a complete network in a
//! structure-of-arrays layout. They are engine-agnostic and can be used for
//! file I/O, transport, or checkpoint inspection.
//!
//! Persistence itself is a pluggable collaborator with a single contract:
//! [`SnapshotStore::store`] is fire-and-forget, with no transactional
//! guarantee required from implementations. [`MemoryStore`] is the
//! in-process implementation.

use core::fmt;

use serde::{Deserialize, Serialize};

use synfire_neural::{Neuron, NeuronId, NeuronParameters, Synapse, SynapseId, SynapsePolarity};

use crate::error::Result;
use crate::network::{Network, NetworkParameters};

/// Snapshot format version (for backward compatibility)
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable neuron state, one entry per neuron across all arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuronTable {
    pub count: usize,
    pub thresholds: Vec<f32>,
    pub resting_potentials: Vec<f32>,
    pub taus: Vec<f64>,
    pub refractory_periods: Vec<f64>,
    pub membrane_potentials: Vec<f32>,
    pub last_fire_times: Vec<Option<f64>>,
    pub last_update_times: Vec<f64>,
}

/// Serializable synapse state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynapseTable {
    pub count: usize,
    pub sources: Vec<u32>,
    pub targets: Vec<u32>,
    pub weights: Vec<f32>,
    pub delays: Vec<f64>,
    pub polarities: Vec<SynapsePolarity>,
}

/// Complete network snapshot: parameters, topology, and dynamic state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Format version
    pub version: u32,

    /// Construction parameters (weight bounds, learning rule, limits)
    pub params: NetworkParameters,

    /// Layer membership as neuron indices
    pub layers: Vec<Vec<u32>>,

    /// Neuron data
    pub neurons: NeuronTable,

    /// Synapse data
    pub synapses: SynapseTable,
}

/// Statistics about a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStatistics {
    pub neuron_count: usize,
    pub synapse_count: usize,
    pub layer_count: usize,
    pub avg_weight: f32,
}

impl fmt::Display for SnapshotStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Neurons: {}, Synapses: {}, Layers: {}, Avg Weight: {:.3}",
            self.neuron_count, self.synapse_count, self.layer_count, self.avg_weight
        )
    }
}

impl NetworkSnapshot {
    /// Validate internal consistency: array lengths agree and every synapse
    /// endpoint and layer member is a real neuron index.
    pub fn validate(&self) -> core::result::Result<(), String> {
        let n = self.neurons.count;
        let neuron_arrays = [
            self.neurons.thresholds.len(),
            self.neurons.resting_potentials.len(),
            self.neurons.membrane_potentials.len(),
            self.neurons.last_fire_times.len(),
            self.neurons.last_update_times.len(),
            self.neurons.taus.len(),
            self.neurons.refractory_periods.len(),
        ];
        if neuron_arrays.iter().any(|&len| len != n) {
            return Err(format!("neuron array size mismatch: expected {n}"));
        }

        let s = self.synapses.count;
        let synapse_arrays = [
            self.synapses.sources.len(),
            self.synapses.targets.len(),
            self.synapses.weights.len(),
            self.synapses.delays.len(),
            self.synapses.polarities.len(),
        ];
        if synapse_arrays.iter().any(|&len| len != s) {
            return Err(format!("synapse array size mismatch: expected {s}"));
        }

        for i in 0..s {
            for endpoint in [self.synapses.sources[i], self.synapses.targets[i]] {
                if endpoint as usize >= n {
                    return Err(format!("synapse {i} references missing neuron {endpoint}"));
                }
            }
        }

        let mut seen = vec![false; n];
        for (li, layer) in self.layers.iter().enumerate() {
            for &member in layer {
                let idx = member as usize;
                if idx >= n {
                    return Err(format!("layer {li} references missing neuron {member}"));
                }
                if seen[idx] {
                    return Err(format!("neuron {member} appears in more than one layer"));
                }
                seen[idx] = true;
            }
        }
        if seen.iter().any(|&present| !present) {
            return Err("layers do not cover every neuron".into());
        }

        Ok(())
    }

    pub fn statistics(&self) -> SnapshotStatistics {
        let synapse_count = self.synapses.count;
        let avg_weight = if synapse_count > 0 {
            self.synapses.weights.iter().sum::<f32>() / synapse_count as f32
        } else {
            0.0
        };
        SnapshotStatistics {
            neuron_count: self.neurons.count,
            synapse_count,
            layer_count: self.layers.len(),
            avg_weight,
        }
    }
}

impl Network {
    /// Capture the full network state.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let mut neurons = NeuronTable {
            count: self.neurons.len(),
            ..Default::default()
        };
        for neuron in &self.neurons {
            let p = neuron.params();
            neurons.thresholds.push(p.threshold);
            neurons.resting_potentials.push(p.resting_potential);
            neurons.taus.push(p.tau);
            neurons.refractory_periods.push(p.refractory_period);
            neurons.membrane_potentials.push(neuron.membrane_potential());
            neurons.last_fire_times.push(neuron.last_fire_time());
            neurons.last_update_times.push(neuron.last_update_time());
        }

        let mut synapses = SynapseTable {
            count: self.synapses.len(),
            ..Default::default()
        };
        for synapse in &self.synapses {
            synapses.sources.push(synapse.source().0);
            synapses.targets.push(synapse.target().0);
            synapses.weights.push(synapse.weight());
            synapses.delays.push(synapse.delay());
            synapses.polarities.push(synapse.polarity());
        }

        NetworkSnapshot {
            version: SNAPSHOT_VERSION,
            params: self.params.clone(),
            layers: self
                .layers
                .iter()
                .map(|layer| layer.iter().map(|id| id.0).collect())
                .collect(),
            neurons,
            synapses,
        }
    }

    /// Rebuild a network from a snapshot, including dynamic state.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self> {
        snapshot
            .validate()
            .map_err(crate::error::EngineError::InvalidTopology)?;
        snapshot.params.validate()?;

        let mut neurons = Vec::with_capacity(snapshot.neurons.count);
        for i in 0..snapshot.neurons.count {
            let params = NeuronParameters {
                threshold: snapshot.neurons.thresholds[i],
                resting_potential: snapshot.neurons.resting_potentials[i],
                tau: snapshot.neurons.taus[i],
                refractory_period: snapshot.neurons.refractory_periods[i],
            };
            neurons.push(Neuron::from_state(
                NeuronId(i as u32),
                params,
                snapshot.neurons.membrane_potentials[i],
                snapshot.neurons.last_fire_times[i],
                snapshot.neurons.last_update_times[i],
            )?);
        }

        let mut synapses = Vec::with_capacity(snapshot.synapses.count);
        let mut outgoing: ahash::AHashMap<NeuronId, Vec<SynapseId>> = ahash::AHashMap::new();
        for i in 0..snapshot.synapses.count {
            let id = SynapseId(i as u32);
            let source = NeuronId(snapshot.synapses.sources[i]);
            synapses.push(Synapse::new(
                id,
                source,
                NeuronId(snapshot.synapses.targets[i]),
                snapshot.synapses.weights[i],
                snapshot.synapses.delays[i],
                snapshot.synapses.polarities[i],
                snapshot.params.weight_bounds,
            )?);
            outgoing.entry(source).or_default().push(id);
        }

        let fire_counts = vec![0; snapshot.neurons.count];
        Ok(Self {
            params: snapshot.params.clone(),
            neurons,
            synapses,
            layers: snapshot
                .layers
                .iter()
                .map(|layer| layer.iter().map(|&id| NeuronId(id)).collect())
                .collect(),
            outgoing,
            fire_counts,
            clock: 0.0,
        })
    }
}

/// Persistence errors for the store seam.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot rejected: {0}")]
    Rejected(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal persistence contract: fire-and-forget storage of snapshots.
pub trait SnapshotStore {
    fn store(&mut self, snapshot: &NetworkSnapshot) -> core::result::Result<(), StoreError>;

    fn load_latest(&self) -> Option<NetworkSnapshot>;
}

/// In-process store with no durability guarantee.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: Vec<NetworkSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn store(&mut self, snapshot: &NetworkSnapshot) -> core::result::Result<(), StoreError> {
        snapshot.validate().map_err(StoreError::Rejected)?;
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn load_latest(&self) -> Option<NetworkSnapshot> {
        self.snapshots.last().cloned()
    }
}
