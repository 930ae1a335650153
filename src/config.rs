//! This module contains the `Config` struct used to configure a CLI run of
//! the decider, built with the same builder pattern the teacher crate uses
//! for its own (much larger) `Config`.

use std::fmt::Display;

use crate::toml::CONFIG_TOML;
use crate::utils::resolve_core_count;

/// What a successful certificate gets printed as, selected by `-pm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// `-pm 0`: just the solved machine's text format.
    MachineText,
    /// `-pm 1`: short certificate, compact JSON.
    ShortCertJson,
    /// `-pm 2`: full certificate, compact JSON.
    FullCertJson,
    /// `-pm 3`: short certificate, pretty-printed JSON.
    ShortCertJsonPretty,
    /// `-pm 4`: full certificate, pretty-printed JSON.
    FullCertJsonPretty,
}

impl PrintMode {
    pub fn from_flag(n: u8) -> Option<Self> {
        match n {
            0 => Some(PrintMode::MachineText),
            1 => Some(PrintMode::ShortCertJson),
            2 => Some(PrintMode::FullCertJson),
            3 => Some(PrintMode::ShortCertJsonPretty),
            4 => Some(PrintMode::FullCertJsonPretty),
            _ => None,
        }
    }
}

impl Display for PrintMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrintMode::MachineText => "machine-text",
            PrintMode::ShortCertJson => "short-cert-json",
            PrintMode::FullCertJson => "full-cert-json",
            PrintMode::ShortCertJsonPretty => "short-cert-json-pretty",
            PrintMode::FullCertJsonPretty => "full-cert-json-pretty",
        };
        write!(f, "{name}")
    }
}

/// Immutable configuration for one CLI run, built with [`Config::builder`].
#[derive(Debug, Clone)]
pub struct Config {
    step_limit_scan: u64,
    run_schedule_probe: bool,
    print_mode: PrintMode,
    cores: usize,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Step limit for scan mode (`-n`).
    pub fn step_limit_scan(&self) -> u64 {
        self.step_limit_scan
    }

    /// Whether scan mode also probes `100, 1000, …` below the final step
    /// limit (the negation of `-x`).
    pub fn run_schedule_probe(&self) -> bool {
        self.run_schedule_probe
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// Resolved worker pool size: host parallelism if `-cores` was absent
    /// or zero.
    pub fn cores(&self) -> usize {
        resolve_core_count(self.cores)
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config {{ step_limit_scan: {}, run_schedule_probe: {}, print_mode: {}, cores: {} }}",
            self.step_limit_scan,
            self.run_schedule_probe,
            self.print_mode,
            self.cores()
        )
    }
}

/// Builder for [`Config`]. Fields not explicitly set fall back to
/// `config.toml`'s overlay, then to the hard-coded defaults below.
pub struct ConfigBuilder {
    step_limit_scan: Option<u64>,
    run_schedule_probe: bool,
    print_mode: PrintMode,
    cores: Option<usize>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            step_limit_scan: None,
            run_schedule_probe: true,
            print_mode: PrintMode::MachineText,
            cores: None,
        }
    }
}

impl ConfigBuilder {
    pub fn step_limit_scan(mut self, n: u64) -> Self {
        self.step_limit_scan = Some(n);
        self
    }

    pub fn run_schedule_probe(mut self, probe: bool) -> Self {
        self.run_schedule_probe = probe;
        self
    }

    pub fn print_mode(mut self, mode: PrintMode) -> Self {
        self.print_mode = mode;
        self
    }

    pub fn cores(mut self, cores: usize) -> Self {
        self.cores = Some(cores);
        self
    }

    pub fn build(self) -> Config {
        Config {
            step_limit_scan: self.step_limit_scan.unwrap_or(CONFIG_TOML.step_limit_scan),
            run_schedule_probe: self.run_schedule_probe,
            print_mode: self.print_mode,
            cores: self.cores.unwrap_or(CONFIG_TOML.cores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_scan_mode_probing() {
        let config = Config::builder().build();
        assert!(config.run_schedule_probe());
        assert_eq!(config.print_mode(), PrintMode::MachineText);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = Config::builder()
            .step_limit_scan(5_000)
            .run_schedule_probe(false)
            .print_mode(PrintMode::FullCertJson)
            .cores(2)
            .build();
        assert_eq!(config.step_limit_scan(), 5_000);
        assert!(!config.run_schedule_probe());
        assert_eq!(config.print_mode(), PrintMode::FullCertJson);
        assert_eq!(config.cores(), 2);
    }

    #[test]
    fn print_mode_from_flag_rejects_out_of_range() {
        assert!(PrintMode::from_flag(5).is_none());
        assert_eq!(PrintMode::from_flag(0), Some(PrintMode::MachineText));
    }
}
