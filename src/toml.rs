//! Very basic functionality to read an optional `config.toml` overlay for
//! the scan defaults, matching the teacher's `LazyLock`-once read pattern.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const CONFIG_FILE: &str = "config.toml";

/// Read `config.toml` only once per process.
pub static CONFIG_TOML: LazyLock<ConfigToml> = LazyLock::new(ConfigToml::read_toml);

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConfigToml {
    /// Default scan step limit used when `-n` is not passed on the CLI.
    #[serde(default = "default_step_limit_scan")]
    pub step_limit_scan: u64,

    /// Default worker pool size used when `-cores` is absent or `0`.
    /// `0` means "use host parallelism".
    #[serde(default = "default_cores")]
    pub cores: usize,
}

impl ConfigToml {
    pub fn read_toml() -> ConfigToml {
        if Path::new(CONFIG_FILE).exists() {
            let content = fs::read_to_string(CONFIG_FILE)
                .unwrap_or_else(|_| panic!("config file {CONFIG_FILE} could not be read"));
            toml::from_str(&content)
                .unwrap_or_else(|_| panic!("config file {CONFIG_FILE} could not be parsed"))
        } else {
            ConfigToml::default()
        }
    }
}

impl Default for ConfigToml {
    fn default() -> Self {
        ConfigToml {
            step_limit_scan: default_step_limit_scan(),
            cores: default_cores(),
        }
    }
}

fn default_step_limit_scan() -> u64 {
    10_000
}

fn default_cores() -> usize {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = ConfigToml::default();
        assert_eq!(config.step_limit_scan, 10_000);
        assert_eq!(config.cores, 0);
    }
}
