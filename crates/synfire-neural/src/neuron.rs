// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # LIF (Leaky Integrate-and-Fire) Neuron
//!
//! Event-driven membrane dynamics. Because delivery is event-driven rather
//! than burst-stepped, passive leak is applied lazily as exponential decay
//! over the elapsed time since the last update:
//!
//! ```text
//! Passive Decay (per delivered spike):
//!     V(t) = V_rest + (V(t_prev) - V_rest) * exp(-(t - t_prev) / tau)
//!
//!     Where:
//!     - V      = membrane potential
//!     - V_rest = resting potential
//!     - tau    = membrane time constant (non-finite tau disables decay)
//!
//! Integration:
//!     V(t) += spike weight
//!
//! Firing Check:
//!     if t is within refractory_period of the last fire:
//!         Skip (no integration, no fire)
//!     else if V(t) >= threshold:
//!         FIRE and reset to V_rest
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{NeuralError, NeuronId, Result};

/// LIF neuron parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParameters {
    /// Firing threshold: membrane potential at or above this fires the neuron
    pub threshold: f32,

    /// Resting potential: baseline the membrane decays toward
    pub resting_potential: f32,

    /// Membrane time constant in simulation-time units.
    /// `f64::INFINITY` disables passive decay.
    pub tau: f64,

    /// Time window after a fire during which input is discarded
    pub refractory_period: f64,
}

impl NeuronParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate parameter ranges before a neuron is built from them.
    pub fn validate(&self) -> Result<()> {
        if !(self.tau > 0.0) {
            return Err(NeuralError::InvalidNeuronParameter(
                "tau must be positive (use infinity to disable decay)",
            ));
        }
        if !self.refractory_period.is_finite() || self.refractory_period < 0.0 {
            return Err(NeuralError::InvalidNeuronParameter(
                "refractory_period must be finite and >= 0",
            ));
        }
        if self.threshold <= self.resting_potential {
            return Err(NeuralError::InvalidNeuronParameter(
                "threshold must exceed resting_potential",
            ));
        }
        Ok(())
    }
}

impl Default for NeuronParameters {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            resting_potential: 0.0,
            tau: 20.0,
            refractory_period: 1.0,
        }
    }
}

/// A single LIF neuron.
///
/// The membrane potential is mutated only by passive decay toward the
/// resting potential and by additive contributions from delivered spikes.
/// Inside the refractory window the neuron neither integrates nor fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    id: NeuronId,
    params: NeuronParameters,
    membrane_potential: f32,
    last_fire: Option<f64>,
    last_update: f64,
}

impl Neuron {
    /// Create a neuron at rest. Fails on out-of-range parameters.
    pub fn new(id: NeuronId, params: NeuronParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            id,
            params,
            membrane_potential: params.resting_potential,
            last_fire: None,
            last_update: 0.0,
        })
    }

    /// Rebuild a neuron from previously captured state.
    pub fn from_state(
        id: NeuronId,
        params: NeuronParameters,
        membrane_potential: f32,
        last_fire: Option<f64>,
        last_update: f64,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            id,
            params,
            membrane_potential,
            last_fire,
            last_update,
        })
    }

    #[inline]
    pub fn id(&self) -> NeuronId {
        self.id
    }

    #[inline]
    pub fn params(&self) -> &NeuronParameters {
        &self.params
    }

    #[inline]
    pub fn membrane_potential(&self) -> f32 {
        self.membrane_potential
    }

    /// Timestamp of the most recent fire, if the neuron has fired this run.
    #[inline]
    pub fn last_fire_time(&self) -> Option<f64> {
        self.last_fire
    }

    /// Timestamp of the most recent integration.
    #[inline]
    pub fn last_update_time(&self) -> f64 {
        self.last_update
    }

    /// True while `at_time` falls inside the refractory window of the last fire.
    #[inline]
    pub fn is_refractory(&self, at_time: f64) -> bool {
        match self.last_fire {
            Some(fired_at) => at_time - fired_at < self.params.refractory_period,
            None => false,
        }
    }

    /// Deliver a weighted spike at `at_time`.
    ///
    /// Returns `true` when the neuron fires. Spikes must arrive in
    /// non-decreasing timestamp order per neuron; an earlier timestamp is
    /// clamped to the last update time (decay of zero) and logged, since the
    /// simulation stays memory-safe but loses decay fidelity for that event.
    pub fn integrate(&mut self, spike_weight: f32, at_time: f64) -> bool {
        if self.is_refractory(at_time) {
            return false;
        }

        let mut dt = at_time - self.last_update;
        if dt < 0.0 {
            warn!(
                target: "synfire::neuron",
                neuron = %self.id,
                at_time,
                last_update = self.last_update,
                "non-monotonic spike delivery; clamping elapsed time to 0"
            );
            dt = 0.0;
        }

        if dt > 0.0 && self.params.tau.is_finite() {
            let decay = (-dt / self.params.tau).exp() as f32;
            self.membrane_potential = self.params.resting_potential
                + (self.membrane_potential - self.params.resting_potential) * decay;
        }
        self.last_update = self.last_update.max(at_time);

        self.membrane_potential += spike_weight;

        if self.membrane_potential >= self.params.threshold {
            self.membrane_potential = self.params.resting_potential;
            self.last_fire = Some(at_time);
            return true;
        }
        false
    }

    /// Reinitialize to the resting state. Used between simulation runs.
    pub fn reset(&mut self) {
        self.membrane_potential = self.params.resting_potential;
        self.last_fire = None;
        self.last_update = 0.0;
    }
}
