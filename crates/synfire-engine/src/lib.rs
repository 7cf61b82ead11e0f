// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Engine
//!
//! Discrete-event simulation over a layered spiking network:
//! - **Network**: owns all neurons and synapses, validates topology
//! - **Queue**: timestamp-ordered spike events with deterministic tie-break
//! - **Dispatch**: bounded event loop (max events / time horizon)
//! - **Learning**: STDP phase applied after dispatch quiesces
//! - **Activity**: firing-activity energy accounting against a power budget
//! - **Snapshot**: serializable network captures with a pluggable store
//!
//! Correctness rests on event ordering, not wall-clock concurrency: spikes
//! destined for the same neuron are applied in non-decreasing timestamp
//! order, and synapse weights mutate only in the learning phase. The core
//! is synchronous and CPU-bound; the only parallelism is rayon's fork-join
//! over read-only state when learning deltas are computed.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activity;
pub mod error;
pub mod network;
pub mod queue;
pub mod rng;
pub mod snapshot;

pub use activity::{ActivityConfig, ActivityMonitor, EnergyReport};
pub use error::{EngineError, Result};
pub use network::{
    DispatchLimits, DispatchReport, LearningReport, Network, NetworkParameters,
};
pub use queue::SpikeQueue;
pub use rng::{RandomOracle, SeededOracle};
pub use snapshot::{
    MemoryStore, NetworkSnapshot, SnapshotStatistics, SnapshotStore, StoreError,
};
