// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Firing-activity energy accounting
//!
//! Aggregates per-neuron fire counts into a power/efficiency estimate
//! checked against a configured budget. The model is deliberately coarse:
//! a fixed energy cost per spike plus a fixed idle draw per neuron over the
//! simulated window.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Energy model configuration. Units are abstract but consistent:
/// energy in joule-like units, power = energy per simulation-time unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Energy cost of one spike event
    pub energy_per_spike: f64,

    /// Idle draw per neuron per simulation-time unit
    pub idle_power_per_neuron: f64,

    /// Average-power budget for a dispatch window
    pub power_budget: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            energy_per_spike: 25e-12,
            idle_power_per_neuron: 1e-12,
            power_budget: 1e-6,
        }
    }
}

/// Aggregated energy estimate for one dispatch window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub total_spikes: u64,
    pub duration: f64,
    pub energy: f64,
    pub average_power: f64,
    pub spikes_per_joule: f64,
    pub within_budget: bool,
}

impl fmt::Display for EnergyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Spikes: {}, Energy: {:.3e}, Avg Power: {:.3e} ({}), Efficiency: {:.3e} spikes/J",
            self.total_spikes,
            self.energy,
            self.average_power,
            if self.within_budget {
                "within budget"
            } else {
                "OVER budget"
            },
            self.spikes_per_joule
        )
    }
}

/// Computes [`EnergyReport`]s from fire-count arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityMonitor {
    config: ActivityConfig,
}

impl ActivityMonitor {
    pub fn new(config: ActivityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    /// Estimate energy use for a window of `duration` simulation-time units
    /// in which each neuron fired `fire_counts[i]` times.
    pub fn report(&self, fire_counts: &[u32], duration: f64) -> EnergyReport {
        let total_spikes: u64 = fire_counts.iter().map(|&c| c as u64).sum();
        let neuron_count = fire_counts.len() as f64;
        let duration = duration.max(0.0);

        let spike_energy = total_spikes as f64 * self.config.energy_per_spike;
        let idle_energy = neuron_count * self.config.idle_power_per_neuron * duration;
        let energy = spike_energy + idle_energy;

        let average_power = if duration > 0.0 { energy / duration } else { 0.0 };
        let spikes_per_joule = if energy > 0.0 {
            total_spikes as f64 / energy
        } else {
            0.0
        };

        EnergyReport {
            total_spikes,
            duration,
            energy,
            average_power,
            spikes_per_joule,
            within_budget: average_power <= self.config.power_budget,
        }
    }
}
