//! Runtime Configuration
//!
//! Settings for the shell around the simulation. The core itself takes
//! no configuration: it never sleeps and never reads the environment.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::TICK_RATE;

/// Input script used when none is configured.
pub const DEFAULT_SCRIPT: &str = "d.d.s.a.";

/// Simulation shell configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Frame rate the external driver should call `advance()` at (Hz).
    pub tick_rate: u32,
    /// Number of ticks the demo runs.
    pub max_ticks: u32,
    /// JSON level file (array of rows of raw codes). Built-in level if None.
    pub level_path: Option<PathBuf>,
    /// Input script (see `parse_script`).
    pub script: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            max_ticks: 64,
            level_path: None,
            script: DEFAULT_SCRIPT.to_string(),
        }
    }
}

impl SimConfig {
    /// Create config from environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            tick_rate: parse_or("BOULDER_TICK_RATE", lookup("BOULDER_TICK_RATE"), defaults.tick_rate),
            max_ticks: parse_or("BOULDER_MAX_TICKS", lookup("BOULDER_MAX_TICKS"), defaults.max_ticks),
            level_path: lookup("BOULDER_LEVEL").map(PathBuf::from),
            script: lookup("BOULDER_SCRIPT").unwrap_or(defaults.script),
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("ignoring invalid {}={:?}", key, raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.tick_rate, 30);
    }

    #[test]
    fn test_overrides() {
        let config = SimConfig::from_lookup(lookup(&[
            ("BOULDER_TICK_RATE", "60"),
            ("BOULDER_MAX_TICKS", " 10 "),
            ("BOULDER_LEVEL", "levels/one.json"),
            ("BOULDER_SCRIPT", "dd."),
        ]));

        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.max_ticks, 10);
        assert_eq!(config.level_path, Some(PathBuf::from("levels/one.json")));
        assert_eq!(config.script, "dd.");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = SimConfig::from_lookup(lookup(&[("BOULDER_MAX_TICKS", "many")]));
        assert_eq!(config.max_ticks, 64);
    }
}
