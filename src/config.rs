//! Layered configuration (spec §12).
//!
//! Resolution order, highest precedence first: explicit CLI flags >
//! `PCX_*` environment variables > `pcx.toml` in the current directory
//! > built-in defaults. Mirrors the teacher's environment-aware CLI
//! default resolution (`init_tracing`'s `EnvFilter` precedence chain in
//! `bin/pmat.rs`), adapted from tracing verbosity flags to numeric
//! tunables. This layer sits outside the core boundary: `Orchestrator`
//! takes a `Config` by value and never reads the environment itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tree_depth_bound: u32,
    pub master_theorem_epsilon: f64,
    pub cache_capacity: usize,
    pub confidence_floor: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree_depth_bound: 4,
            master_theorem_epsilon: 1e-6,
            cache_capacity: 256,
            confidence_floor: 50,
        }
    }
}

/// CLI-flag overrides; every field is optional so only flags the user
/// actually passed take precedence over the environment/file layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tree_depth_bound: Option<u32>,
    pub master_theorem_epsilon: Option<f64>,
    pub cache_capacity: Option<usize>,
    pub confidence_floor: Option<u8>,
}

impl Config {
    /// Loads `pcx.toml` from the current directory (if present),
    /// layers `PCX_*` environment variables over it, then applies
    /// `overrides` from explicit CLI flags.
    pub fn load(overrides: ConfigOverrides) -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        config.apply_overrides(overrides);
        config
    }

    fn from_file() -> Option<Self> {
        let text = std::fs::read_to_string("pcx.toml").ok()?;
        match toml::from_str(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed pcx.toml");
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Some(v) = env_parsed("PCX_TREE_DEPTH_BOUND") {
            self.tree_depth_bound = v;
        }
        if let Some(v) = env_parsed("PCX_MASTER_THEOREM_EPSILON") {
            self.master_theorem_epsilon = v;
        }
        if let Some(v) = env_parsed("PCX_CACHE_CAPACITY") {
            self.cache_capacity = v;
        }
        if let Some(v) = env_parsed("PCX_CONFIDENCE_FLOOR") {
            self.confidence_floor = v;
        }
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(v) = overrides.tree_depth_bound {
            self.tree_depth_bound = v;
        }
        if let Some(v) = overrides.master_theorem_epsilon {
            self.master_theorem_epsilon = v;
        }
        if let Some(v) = overrides.cache_capacity {
            self.cache_capacity = v;
        }
        if let Some(v) = overrides.confidence_floor {
            self.confidence_floor = v;
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = Config::default();
        assert_eq!(config.tree_depth_bound, 4);
        assert_eq!(config.cache_capacity, 256);
        assert_eq!(config.confidence_floor, 50);
    }

    #[test]
    fn overrides_take_precedence_over_defaults() {
        let config = Config::load(ConfigOverrides {
            tree_depth_bound: Some(7),
            ..Default::default()
        });
        assert_eq!(config.tree_depth_bound, 7);
    }
}
