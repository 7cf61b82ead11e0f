// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the simulation engine
//!
//! Topology errors are fatal at construction time - a malformed network is
//! never handed back to the caller. Hitting a dispatch bound is NOT an
//! error; it is a normal termination mode reported on
//! [`crate::network::DispatchReport`].

use synfire_neural::{NeuralError, NeuronId};

/// Error types for engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Neuron not found: {0}")]
    NeuronNotFound(NeuronId),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error(transparent)]
    Neural(#[from] NeuralError),
}

pub type Result<T> = core::result::Result<T, EngineError>;
