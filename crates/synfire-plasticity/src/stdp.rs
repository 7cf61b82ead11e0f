// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! STDP (Spike-Timing-Dependent Plasticity) computation
//!
//! Pure functions for computing synaptic weight changes based on spike
//! timing. Exponential STDP rule over a bounded causal window:
//!
//! ```text
//! dt = post_spike_time - pre_spike_time
//!
//! |dt| > window  ->  0                          (pair not causally related)
//! dt > 0         ->  +a_plus  * exp(-dt/window) (pre before post: LTP)
//! dt < 0         ->  -a_minus * exp( dt/window) (post before pre: LTD)
//! dt == 0        ->  0                          (deliberate tie-break)
//! ```
//!
//! Simultaneous spikes produce no net change: with neither ordering
//! established there is no causal direction to reinforce. The zero is a
//! documented tie-break, not a missing case.

use serde::{Deserialize, Serialize};

/// STDP configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdpConfig {
    /// Potentiation learning rate (A+)
    pub a_plus: f32,

    /// Depression learning rate (A-)
    pub a_minus: f32,

    /// Causal window in simulation-time units. Pairs farther apart than
    /// this produce no update; inside the window it also acts as the decay
    /// constant of the update magnitude.
    pub time_window: f64,
}

impl Default for StdpConfig {
    fn default() -> Self {
        Self {
            a_plus: 0.01,
            a_minus: 0.012,
            time_window: 20.0,
        }
    }
}

impl StdpConfig {
    /// Reject configurations that would make every update a no-op or flip
    /// the sign law.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.a_plus > 0.0) || !(self.a_minus > 0.0) {
            return Err("STDP: learning rates must be positive");
        }
        if !self.time_window.is_finite() || self.time_window <= 0.0 {
            return Err("STDP: time_window must be finite and positive");
        }
        Ok(())
    }
}

/// Compute the STDP weight delta for one pre/post spike timing pair.
///
/// Returns a positive value for causal pairs (pre fired first), a negative
/// value for anti-causal pairs, and exactly zero for simultaneous spikes or
/// pairs outside the causal window.
///
/// # Example
/// ```
/// use synfire_plasticity::{compute_weight_update, StdpConfig};
///
/// let config = StdpConfig::default();
///
/// // Pre before post -> potentiation
/// assert!(compute_weight_update(0.0, 5.0, &config) > 0.0);
///
/// // Post before pre -> depression
/// assert!(compute_weight_update(5.0, 0.0, &config) < 0.0);
///
/// // Outside the window -> no update
/// assert_eq!(compute_weight_update(0.0, 100.0, &config), 0.0);
/// ```
#[inline]
pub fn compute_weight_update(
    pre_spike_time: f64,
    post_spike_time: f64,
    config: &StdpConfig,
) -> f32 {
    let dt = post_spike_time - pre_spike_time;

    if dt.abs() > config.time_window {
        return 0.0;
    }

    if dt > 0.0 {
        // Pre fired before post -> potentiation
        config.a_plus * ((-dt / config.time_window).exp() as f32)
    } else if dt < 0.0 {
        // Post fired before pre -> depression
        -config.a_minus * ((dt / config.time_window).exp() as f32)
    } else {
        // Simultaneous -> tie-break, no net change
        0.0
    }
}

/// Batch compute STDP deltas for aligned slices of spike timing pairs.
///
/// # Safety
/// Slices must have the same length.
#[inline]
pub fn compute_stdp_batch(
    pre_times: &[f64],
    post_times: &[f64],
    config: &StdpConfig,
    deltas: &mut [f32],
) {
    let count = pre_times.len();
    debug_assert_eq!(post_times.len(), count);
    debug_assert_eq!(deltas.len(), count);

    for i in 0..count {
        deltas[i] = compute_weight_update(pre_times[i], post_times[i], config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_potentiation_sign() {
        let config = StdpConfig::default();
        let delta = compute_weight_update(0.0, 5.0, &config);
        assert!(delta > 0.0);
        assert!(delta <= config.a_plus);
    }

    #[test]
    fn test_depression_sign() {
        let config = StdpConfig::default();
        let delta = compute_weight_update(5.0, 0.0, &config);
        assert!(delta < 0.0);
        assert!(delta >= -config.a_minus);
    }

    #[test]
    fn test_simultaneous_is_zero() {
        let config = StdpConfig::default();
        assert_eq!(compute_weight_update(3.0, 3.0, &config), 0.0);
    }

    #[test]
    fn test_outside_window_is_zero() {
        let config = StdpConfig::default();
        assert_eq!(compute_weight_update(0.0, 20.5, &config), 0.0);
        assert_eq!(compute_weight_update(20.5, 0.0, &config), 0.0);
    }

    #[test]
    fn test_window_edge_still_updates() {
        let config = StdpConfig::default();
        // |dt| == window is inside the (inclusive) window
        assert!(compute_weight_update(0.0, 20.0, &config) > 0.0);
        assert!(compute_weight_update(20.0, 0.0, &config) < 0.0);
    }

    #[test]
    fn test_magnitude_decays_with_gap() {
        let config = StdpConfig::default();
        let near = compute_weight_update(0.0, 1.0, &config);
        let far = compute_weight_update(0.0, 10.0, &config);
        assert!(near > far);

        let near_d = compute_weight_update(1.0, 0.0, &config).abs();
        let far_d = compute_weight_update(10.0, 0.0, &config).abs();
        assert!(near_d > far_d);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let config = StdpConfig::default();
        let pre = [0.0, 5.0, 3.0, 0.0];
        let post = [5.0, 0.0, 3.0, 100.0];
        let mut deltas = [0.0f32; 4];

        compute_stdp_batch(&pre, &post, &config, &mut deltas);

        assert!(deltas[0] > 0.0); // Potentiation
        assert!(deltas[1] < 0.0); // Depression
        assert_eq!(deltas[2], 0.0); // Simultaneous
        assert_eq!(deltas[3], 0.0); // Outside window
        for (i, d) in deltas.iter().enumerate() {
            assert_eq!(*d, compute_weight_update(pre[i], post[i], &config));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(StdpConfig::default().validate().is_ok());
        assert!(StdpConfig {
            a_plus: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(StdpConfig {
            time_window: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(StdpConfig {
            time_window: f64::INFINITY,
            ..Default::default()
        }
        .validate()
        .is_err());
    }
}
