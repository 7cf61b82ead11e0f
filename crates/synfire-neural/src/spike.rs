// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike events
//!
//! A spike is the unit of inter-neuron communication: an immutable record of
//! where a pulse is going, when it arrives, and how much weighted current it
//! carries. The weight is copied at emission time on purpose - learning may
//! rewrite the synapse while the spike is still in flight, and an in-flight
//! spike must not observe that.

use serde::{Deserialize, Serialize};

use crate::types::{NeuronId, SynapseId};

/// Immutable spike event, consumed exactly once by the dispatch loop.
///
/// Spikes that originate from a synapse carry its id; externally injected
/// stimulus spikes carry `None` and target an input neuron directly, the
/// same way sensory injection delivers (neuron, potential) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    /// Originating synapse, if any (`None` = external stimulus)
    pub synapse: Option<SynapseId>,

    /// Neuron this spike is delivered to
    pub target: NeuronId,

    /// Arrival timestamp in simulation time
    pub time: f64,

    /// Signed weighted current, snapshotted at emission
    pub weight: f32,
}

impl Spike {
    /// External stimulus spike aimed at an input neuron.
    pub fn stimulus(target: NeuronId, time: f64, weight: f32) -> Self {
        Self {
            synapse: None,
            target,
            time,
            weight,
        }
    }
}
