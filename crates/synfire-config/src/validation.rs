// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Catches malformed values before anything is built from them. The engine
//! validates again at construction time; this layer exists so a bad TOML
//! file fails fast with a message naming the offending field.

use crate::types::SynfireConfig;

/// Validate a complete configuration. Returns the first problem found.
pub fn validate_config(config: &SynfireConfig) -> Result<(), String> {
    let net = &config.network;

    if net.layer_sizes.is_empty() {
        return Err("network.layer_sizes must not be empty".into());
    }
    if let Some(pos) = net.layer_sizes.iter().position(|&s| s == 0) {
        return Err(format!("network.layer_sizes[{pos}] must be at least 1"));
    }
    if !(net.weight_min < net.weight_max) {
        return Err(format!(
            "network.weight_min ({}) must be below network.weight_max ({})",
            net.weight_min, net.weight_max
        ));
    }
    if !(net.init_weight_min <= net.init_weight_max) {
        return Err(format!(
            "network.init_weight_min ({}) must not exceed network.init_weight_max ({})",
            net.init_weight_min, net.init_weight_max
        ));
    }
    if !net.default_delay.is_finite() || net.default_delay < 0.0 {
        return Err(format!(
            "network.default_delay ({}) must be finite and >= 0",
            net.default_delay
        ));
    }

    let neuron = &config.neuron;
    if neuron.tau < 0.0 || neuron.tau.is_nan() {
        return Err(format!("neuron.tau ({}) must be >= 0", neuron.tau));
    }
    if neuron.refractory_period < 0.0 || !neuron.refractory_period.is_finite() {
        return Err(format!(
            "neuron.refractory_period ({}) must be finite and >= 0",
            neuron.refractory_period
        ));
    }
    if neuron.threshold <= neuron.resting_potential {
        return Err(format!(
            "neuron.threshold ({}) must exceed neuron.resting_potential ({})",
            neuron.threshold, neuron.resting_potential
        ));
    }

    let stdp = &config.stdp;
    if !(stdp.a_plus > 0.0) || !(stdp.a_minus > 0.0) {
        return Err("stdp.a_plus and stdp.a_minus must be positive".into());
    }
    if !stdp.time_window.is_finite() || stdp.time_window <= 0.0 {
        return Err(format!(
            "stdp.time_window ({}) must be finite and positive",
            stdp.time_window
        ));
    }

    let dispatch = &config.dispatch;
    if dispatch.max_events == 0 {
        return Err("dispatch.max_events must be at least 1".into());
    }
    if dispatch.time_horizon.is_nan() || dispatch.time_horizon <= 0.0 {
        return Err(format!(
            "dispatch.time_horizon ({}) must be positive",
            dispatch.time_horizon
        ));
    }

    let energy = &config.energy;
    if energy.energy_per_spike < 0.0 || energy.idle_power_per_neuron < 0.0 {
        return Err("energy costs must be >= 0".into());
    }
    if !(energy.power_budget > 0.0) {
        return Err(format!(
            "energy.power_budget ({}) must be positive",
            energy.power_budget
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SynfireConfig;

    #[test]
    fn test_defaults_validate() {
        assert!(validate_config(&SynfireConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_layers_rejected() {
        let mut config = SynfireConfig::default();
        config.network.layer_sizes.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_layer_rejected() {
        let mut config = SynfireConfig::default();
        config.network.layer_sizes = vec![4, 0, 2];
        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("layer_sizes[1]"));
    }

    #[test]
    fn test_inverted_weight_range_rejected() {
        let mut config = SynfireConfig::default();
        config.network.weight_min = 1.0;
        config.network.weight_max = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_stdp_rejected() {
        let mut config = SynfireConfig::default();
        config.stdp.time_window = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = SynfireConfig::default();
        config.stdp.a_plus = -0.01;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_max_events_rejected() {
        let mut config = SynfireConfig::default();
        config.dispatch.max_events = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let mut config = SynfireConfig::default();
        config.neuron.threshold = -1.0;
        assert!(validate_config(&config).is_err());
    }
}
