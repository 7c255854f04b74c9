//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.secretgate.toml` in repo root
//! 4. `~/.config/secretgate/config.toml` (global defaults)
//! 5. Built-in defaults
//!
//! Loading never fails: a guard that refuses to run because its own
//! config is malformed would let the commit through unchecked, so a bad
//! file warns on stderr and contributes nothing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::env::Env;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub rules: RulesConfig,
}

/// Scan behaviour configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Enable the entropy heuristic in addition to the regex rules.
    pub entropy: bool,
}

/// Rule source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Patterns document replacing the built-in set (YAML).
    pub patterns_file: Option<String>,
    /// Rules file extending the active set (TOML).
    pub additional_rules: Option<String>,
}

impl Config {
    /// Load configuration with layering. Infallible: unreadable or
    /// unparsable files warn and are skipped.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Self {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Some(global) = Self::load_file(&global_path) {
                    config.merge(global);
                }
            }
        }

        // Layer 3: repo-local config
        if let Some(root) = repo_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                if let Some(local) = Self::load_file(&local_path) {
                    config.merge(local);
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        config
    }

    /// Load a config file, warning instead of failing.
    fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Warning: ignoring config {}: {e}", path.display());
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: ignoring config {}: {e}", path.display());
                None
            }
        }
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        if other.scan.entropy {
            self.scan.entropy = true;
        }
        if other.rules.patterns_file.is_some() {
            self.rules.patterns_file = other.rules.patterns_file;
        }
        if other.rules.additional_rules.is_some() {
            self.rules.additional_rules = other.rules.additional_rules;
        }
    }

    /// Apply environment variable overrides.
    ///
    /// The patterns/rules path variables are consumed by clap's `env`
    /// fallback on the flags themselves; only the entropy switch is
    /// resolved here.
    fn apply_env_vars(&mut self, env: &Env) {
        if env.var(constants::ENV_ENTROPY).is_ok() {
            match env.flag(constants::ENV_ENTROPY) {
                Some(value) => self.scan.entropy = value,
                None => eprintln!(
                    "Warning: ignoring invalid {} value",
                    constants::ENV_ENTROPY
                ),
            }
        }
    }
}
