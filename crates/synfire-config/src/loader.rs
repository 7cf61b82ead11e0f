// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration loading: file discovery, parsing, environment overrides

use std::env;
use std::path::{Path, PathBuf};

use crate::types::SynfireConfig;
use crate::validation::validate_config;
use crate::{ConfigError, ConfigResult};

/// File names probed, in order, when no explicit path is given.
const CANDIDATE_FILES: &[&str] = &["synfire.toml", "config/synfire.toml"];

/// Locate a config file in the working directory.
pub fn find_config_file() -> Option<PathBuf> {
    CANDIDATE_FILES
        .iter()
        .map(|&name| PathBuf::from(name))
        .find(|p| p.is_file())
}

/// Load, override, and validate configuration.
///
/// With `path = None` the candidate locations are probed and, when nothing
/// is found, built-in defaults are used - a missing file is only an error
/// when a path was requested explicitly.
pub fn load_config(path: Option<&Path>) -> ConfigResult<SynfireConfig> {
    let mut config = match path {
        Some(explicit) => {
            if !explicit.is_file() {
                return Err(ConfigError::FileNotFound(explicit.display().to_string()));
            }
            parse_file(explicit)?
        }
        None => match find_config_file() {
            Some(found) => parse_file(&found)?,
            None => SynfireConfig::default(),
        },
    };

    apply_environment_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::ValidationError)?;
    Ok(config)
}

fn parse_file(path: &Path) -> ConfigResult<SynfireConfig> {
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Apply `SYNFIRE_*` environment overrides on top of file/default values.
///
/// Supported:
/// - `SYNFIRE_SEED` - RNG seed (u64)
/// - `SYNFIRE_MAX_EVENTS` - dispatch event bound (usize)
/// - `SYNFIRE_TIME_HORIZON` - dispatch time bound (f64)
pub fn apply_environment_overrides(config: &mut SynfireConfig) -> ConfigResult<()> {
    if let Ok(raw) = env::var("SYNFIRE_SEED") {
        config.network.seed = raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("SYNFIRE_SEED={raw}")))?;
    }
    if let Ok(raw) = env::var("SYNFIRE_MAX_EVENTS") {
        config.dispatch.max_events = raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("SYNFIRE_MAX_EVENTS={raw}")))?;
    }
    if let Ok(raw) = env::var("SYNFIRE_TIME_HORIZON") {
        config.dispatch.time_horizon = raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("SYNFIRE_TIME_HORIZON={raw}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that read or mutate the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_explicit_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [network]
            layer_sizes = [3, 3, 1]
            seed = 99

            [dispatch]
            max_events = 500
            "#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.network.layer_sizes, vec![3, 3, 1]);
        assert_eq!(config.network.seed, 99);
        assert_eq!(config.dispatch.max_events, 500);
    }

    #[test]
    fn test_environment_overrides_win() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("SYNFIRE_SEED", "1234");
        env::set_var("SYNFIRE_MAX_EVENTS", "77");

        let mut config = SynfireConfig::default();
        apply_environment_overrides(&mut config).unwrap();

        env::remove_var("SYNFIRE_SEED");
        env::remove_var("SYNFIRE_MAX_EVENTS");

        assert_eq!(config.network.seed, 1234);
        assert_eq!(config.dispatch.max_events, 77);
    }

    #[test]
    fn test_malformed_environment_override_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("SYNFIRE_TIME_HORIZON", "not-a-number");
        let mut config = SynfireConfig::default();
        let result = apply_environment_overrides(&mut config);
        env::remove_var("SYNFIRE_TIME_HORIZON");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_file_rejected_by_validation() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [network]
            layer_sizes = [3, 0, 1]
            "#
        )
        .unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
