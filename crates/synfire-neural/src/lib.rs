// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Neural Computation
//!
//! ALL per-neuron computation in one place:
//! - **Types**: Core type definitions (NeuronId, SynapseId, Spike, errors)
//! - **Neuron**: Leaky integrate-and-fire membrane dynamics
//! - **Synapse**: Weighted, delayed, clamped connections
//!
//! This crate owns no simulation state beyond a single neuron or synapse;
//! the event queue, layering, and learning orchestration live in
//! `synfire-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Spike events
pub mod spike;

// Membrane dynamics
pub mod neuron;

// Synaptic connections
pub mod synapse;

// Re-export everything for convenience
pub use types::{NeuralError, NeuronId, Result, SynapseId};

pub use spike::Spike;

pub use neuron::{Neuron, NeuronParameters};

pub use synapse::{Synapse, SynapsePolarity, WeightBounds};
