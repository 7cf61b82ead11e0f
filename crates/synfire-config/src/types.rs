// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Typed configuration sections
//!
//! Every field has a serde default so partial TOML files work; the defaults
//! describe a small three-layer network that runs the demo out of the box.

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynfireConfig {
    #[serde(default)]
    pub network: NetworkSection,

    #[serde(default)]
    pub neuron: NeuronSection,

    #[serde(default)]
    pub stdp: StdpSection,

    #[serde(default)]
    pub dispatch: DispatchSection,

    #[serde(default)]
    pub energy: EnergySection,
}

/// `[network]` - topology and weight initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NetworkSection {
    /// Neurons per layer, input first
    pub layer_sizes: Vec<usize>,

    /// Range initial weights are drawn from
    pub init_weight_min: f32,
    pub init_weight_max: f32,

    /// Weight clamping range
    pub weight_min: f32,
    pub weight_max: f32,

    /// Transmission delay for layer-wired synapses
    pub default_delay: f64,

    /// RNG seed for weight initialization and stimulus generation
    pub seed: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            layer_sizes: vec![4, 8, 2],
            init_weight_min: 0.1,
            init_weight_max: 0.9,
            weight_min: 0.0,
            weight_max: 1.0,
            default_delay: 1.0,
            seed: 42,
        }
    }
}

/// `[neuron]` - membrane dynamics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NeuronSection {
    pub threshold: f32,
    pub resting_potential: f32,

    /// Membrane time constant; 0 disables decay (mapped to infinity)
    pub tau: f64,

    pub refractory_period: f64,
}

impl Default for NeuronSection {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            resting_potential: 0.0,
            tau: 20.0,
            refractory_period: 1.0,
        }
    }
}

/// `[stdp]` - learning rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StdpSection {
    pub a_plus: f32,
    pub a_minus: f32,
    pub time_window: f64,
}

impl Default for StdpSection {
    fn default() -> Self {
        Self {
            a_plus: 0.01,
            a_minus: 0.012,
            time_window: 20.0,
        }
    }
}

/// `[dispatch]` - termination bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DispatchSection {
    pub max_events: usize,
    pub time_horizon: f64,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            max_events: 100_000,
            time_horizon: 1.0e6,
        }
    }
}

/// `[energy]` - activity accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EnergySection {
    pub energy_per_spike: f64,
    pub idle_power_per_neuron: f64,
    pub power_budget: f64,
}

impl Default for EnergySection {
    fn default() -> Self {
        Self {
            energy_per_spike: 25e-12,
            idle_power_per_neuron: 1e-12,
            power_budget: 1e-6,
        }
    }
}
