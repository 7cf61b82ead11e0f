// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neural computation
//!
//! Construction-time validation errors only. The hot integration path is
//! pure arithmetic and has no failure modes; defensive conditions there are
//! clamped and logged instead of surfaced.

/// Error types for neural computation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Invalid neuron parameter: {0}")]
    InvalidNeuronParameter(&'static str),

    #[error("Invalid weight bounds: min {min} must be below max {max}")]
    InvalidWeightBounds { min: f32, max: f32 },

    #[error("Invalid transmission delay: {0} (must be finite and >= 0)")]
    InvalidDelay(f64),
}

pub type Result<T> = core::result::Result<T, NeuralError>;
