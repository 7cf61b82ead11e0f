// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Plasticity Module
//!
//! STDP (Spike-Timing-Dependent Plasticity) for the synfire engine:
//! pure weight-delta computation from pre/post spike timing pairs.
//!
//! ## Architecture
//! - Pure functions, no allocation in hot paths
//! - Deterministic execution
//! - Weight mutation stays with the synapse owner; this crate only
//!   computes signed deltas

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod stdp;

// Re-export key types
pub use stdp::{compute_stdp_batch, compute_weight_update, StdpConfig};
