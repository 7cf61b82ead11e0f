// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synfire - Discrete-Event Spiking Neural Network Engine
//!
//! Synfire simulates layered spiking networks with leaky integrate-and-fire
//! membrane dynamics, delayed synaptic transmission, and spike-timing-
//! dependent plasticity, driven by a deterministic timestamp-ordered event
//! queue.
//!
//! ## Quick Start
//!
//! ```rust
//! use synfire::prelude::*;
//!
//! // Deterministic weight initialization
//! let mut oracle = SeededOracle::from_seed(42);
//!
//! // Two input neurons feeding one output neuron
//! let mut network = Network::new(&[2, 1], NetworkParameters::default(), &mut oracle)?;
//!
//! // Drive the first input neuron past threshold twice
//! let report = network.dispatch(vec![
//!     Spike::stimulus(NeuronId(0), 0.0, 1.2),
//!     Spike::stimulus(NeuronId(0), 2.0, 1.2),
//! ])?;
//!
//! println!("{} events, outputs: {:?}", report.events_processed, network.get_output());
//!
//! // Strengthen causal synapses after the run has quiesced
//! network.apply_learning();
//! # Ok::<(), synfire::EngineError>(())
//! ```
//!
//! ## Crates
//!
//! - [`synfire_neural`]: neuron/synapse/spike primitives
//! - [`synfire_plasticity`]: the STDP rule
//! - [`synfire_engine`]: network, event queue, dispatch, snapshots
//! - [`synfire_config`]: TOML configuration

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use synfire_config as config;
pub use synfire_engine as engine;
pub use synfire_neural as neural;
pub use synfire_plasticity as plasticity;

pub use synfire_config::{load_config, ConfigError, SynfireConfig};
pub use synfire_engine::{
    ActivityConfig, ActivityMonitor, DispatchLimits, DispatchReport, EnergyReport, EngineError,
    LearningReport, MemoryStore, Network, NetworkParameters, NetworkSnapshot, RandomOracle,
    SeededOracle, SnapshotStore, SpikeQueue, StoreError,
};
pub use synfire_neural::{
    NeuralError, Neuron, NeuronId, NeuronParameters, Spike, Synapse, SynapseId, SynapsePolarity,
    WeightBounds,
};
pub use synfire_plasticity::{compute_weight_update, StdpConfig};

/// Common imports for typical use
pub mod prelude {
    pub use synfire_config::{load_config, SynfireConfig};
    pub use synfire_engine::{
        ActivityMonitor, Network, NetworkParameters, RandomOracle, SeededOracle, SnapshotStore,
    };
    pub use synfire_neural::{NeuronId, NeuronParameters, Spike, SynapseId, SynapsePolarity};
    pub use synfire_plasticity::StdpConfig;
}

/// Build engine parameters from a loaded configuration.
///
/// `neuron.tau = 0` in the file means "no decay" and maps to an infinite
/// time constant; everything else carries over directly. The config has
/// already been validated field-by-field, so the engine's own validation is
/// a backstop rather than the primary gate.
pub fn network_parameters(config: &SynfireConfig) -> Result<NetworkParameters, EngineError> {
    let tau = if config.neuron.tau == 0.0 {
        f64::INFINITY
    } else {
        config.neuron.tau
    };

    let params = NetworkParameters {
        neuron: NeuronParameters {
            threshold: config.neuron.threshold,
            resting_potential: config.neuron.resting_potential,
            tau,
            refractory_period: config.neuron.refractory_period,
        },
        weight_bounds: WeightBounds::new(config.network.weight_min, config.network.weight_max)?,
        init_weight_min: config.network.init_weight_min,
        init_weight_max: config.network.init_weight_max,
        default_delay: config.network.default_delay,
        stdp: StdpConfig {
            a_plus: config.stdp.a_plus,
            a_minus: config.stdp.a_minus,
            time_window: config.stdp.time_window,
        },
        limits: DispatchLimits {
            max_events: config.dispatch.max_events,
            time_horizon: config.dispatch.time_horizon,
        },
    };
    params.validate()?;
    Ok(params)
}

/// Build an activity monitor from the `[energy]` section.
pub fn activity_monitor(config: &SynfireConfig) -> ActivityMonitor {
    ActivityMonitor::new(ActivityConfig {
        energy_per_spike: config.energy.energy_per_spike,
        idle_power_per_neuron: config.energy.idle_power_per_neuron,
        power_budget: config.energy.power_budget,
    })
}
