// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synaptic connections
//!
//! A synapse is a directed weighted edge between exactly one presynaptic and
//! one postsynaptic neuron, with a transmission delay. The weight is kept
//! inside a clamped range across every mutation; polarity carries the sign
//! so the stored weight itself stays in-range:
//!
//! ```text
//! contribution = sign × weight
//!
//!     sign   = +1.0 (excitatory) or -1.0 (inhibitory)
//!     weight = clamped to [min, max], default [0, 1]
//! ```

use serde::{Deserialize, Serialize};

use crate::spike::Spike;
use crate::types::{NeuralError, NeuronId, Result, SynapseId};

/// Synapse polarity: whether transmitted current depolarizes or
/// hyperpolarizes the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynapsePolarity {
    Excitatory,
    Inhibitory,
}

impl SynapsePolarity {
    #[inline(always)]
    pub fn sign(self) -> f32 {
        match self {
            SynapsePolarity::Excitatory => 1.0,
            SynapsePolarity::Inhibitory => -1.0,
        }
    }
}

/// Inclusive clamping range for synaptic weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: f32,
    pub max: f32,
}

impl WeightBounds {
    /// The default normalized range.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !(min < max) {
            return Err(NeuralError::InvalidWeightBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline(always)]
    pub fn clamp(&self, weight: f32) -> f32 {
        weight.clamp(self.min, self.max)
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Directed weighted connection between two neurons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synapse {
    id: SynapseId,
    source: NeuronId,
    target: NeuronId,
    weight: f32,
    delay: f64,
    polarity: SynapsePolarity,
    bounds: WeightBounds,
}

impl Synapse {
    /// Create a synapse; the initial weight is clamped into `bounds`.
    pub fn new(
        id: SynapseId,
        source: NeuronId,
        target: NeuronId,
        weight: f32,
        delay: f64,
        polarity: SynapsePolarity,
        bounds: WeightBounds,
    ) -> Result<Self> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(NeuralError::InvalidDelay(delay));
        }
        Ok(Self {
            id,
            source,
            target,
            weight: bounds.clamp(weight),
            delay,
            polarity,
            bounds,
        })
    }

    #[inline]
    pub fn id(&self) -> SynapseId {
        self.id
    }

    #[inline]
    pub fn source(&self) -> NeuronId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> NeuronId {
        self.target
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    pub fn delay(&self) -> f64 {
        self.delay
    }

    #[inline]
    pub fn polarity(&self) -> SynapsePolarity {
        self.polarity
    }

    #[inline]
    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    /// Signed contribution this synapse delivers per presynaptic spike.
    #[inline(always)]
    pub fn signed_weight(&self) -> f32 {
        self.polarity.sign() * self.weight
    }

    /// Emit a spike toward the postsynaptic neuron.
    ///
    /// The spike is stamped `at_time + delay` and snapshots the current
    /// signed weight, so later plasticity updates cannot retroactively
    /// change an in-flight event.
    pub fn transmit(&self, at_time: f64) -> Spike {
        Spike {
            synapse: Some(self.id),
            target: self.target,
            time: at_time + self.delay,
            weight: self.signed_weight(),
        }
    }

    /// Apply a plasticity delta, clamping the result into bounds.
    pub fn apply_weight_delta(&mut self, delta: f32) {
        self.weight = self.bounds.clamp(self.weight + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synapse(weight: f32) -> Synapse {
        Synapse::new(
            SynapseId(0),
            NeuronId(1),
            NeuronId(2),
            weight,
            0.5,
            SynapsePolarity::Excitatory,
            WeightBounds::UNIT,
        )
        .unwrap()
    }

    #[test]
    fn test_transmit_stamps_delay_and_weight() {
        let s = synapse(0.6);
        let spike = s.transmit(2.0);
        assert_eq!(spike.synapse, Some(SynapseId(0)));
        assert_eq!(spike.target, NeuronId(2));
        assert_eq!(spike.time, 2.5);
        assert!((spike.weight - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_inhibitory_sign() {
        let s = Synapse::new(
            SynapseId(0),
            NeuronId(1),
            NeuronId(2),
            0.4,
            0.0,
            SynapsePolarity::Inhibitory,
            WeightBounds::UNIT,
        )
        .unwrap();
        assert!((s.transmit(0.0).weight + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_weight_delta_clamps() {
        let mut s = synapse(0.9);
        s.apply_weight_delta(0.5);
        assert_eq!(s.weight(), 1.0);

        s.apply_weight_delta(-2.0);
        assert_eq!(s.weight(), 0.0);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut s = synapse(0.37);
        let before = s.weight();
        s.apply_weight_delta(0.0);
        assert_eq!(s.weight(), before);
    }

    #[test]
    fn test_repeated_deltas_stay_in_bounds() {
        let mut s = synapse(0.5);
        for _ in 0..100 {
            s.apply_weight_delta(0.3);
            assert!(s.weight() >= 0.0 && s.weight() <= 1.0);
        }
        for _ in 0..100 {
            s.apply_weight_delta(-0.7);
            assert!(s.weight() >= 0.0 && s.weight() <= 1.0);
        }
    }

    #[test]
    fn test_initial_weight_clamped() {
        let s = synapse(3.0);
        assert_eq!(s.weight(), 1.0);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(WeightBounds::new(1.0, 0.0).is_err());
        assert!(WeightBounds::new(0.0, 0.0).is_err());
        assert!(WeightBounds::new(-0.5, 0.5).is_ok());
    }

    #[test]
    fn test_invalid_delay_rejected() {
        let r = Synapse::new(
            SynapseId(0),
            NeuronId(1),
            NeuronId(2),
            0.5,
            -1.0,
            SynapsePolarity::Excitatory,
            WeightBounds::UNIT,
        );
        assert!(r.is_err());
    }
}
