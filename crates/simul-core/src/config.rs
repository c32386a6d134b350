//! Configuration loading and typed config structures for the simulator.
//!
//! The canonical configuration lives in `simul-config.yaml` at the project
//! root. Every field carries a serde default, so a partial file (or no file
//! at all) yields a complete configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `simul-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, noise source).
    #[serde(default)]
    pub world: WorldConfig,

    /// Coefficients of the economic rule catalog.
    #[serde(default)]
    pub ruleset: RulesetConfig,

    /// Headless run parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Which noise source drives production and spoilage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizerMode {
    /// Normally distributed noise from a seeded PRNG.
    #[default]
    Gaussian,
    /// No noise; every draw returns its input.
    PassThrough,
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed of the gaussian randomizer. `None` seeds from the OS.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,

    /// Noise source.
    #[serde(default)]
    pub randomizer: RandomizerMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            randomizer: RandomizerMode::default(),
        }
    }
}

/// Coefficients consumed by the rule catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulesetConfig {
    /// Fraction of stored food lost per tick.
    #[serde(default = "default_agriculture_storage_decay")]
    pub agriculture_storage_decay: f64,

    /// Gold per unit of taxed agricultural produce.
    #[serde(default = "default_conversion_rate")]
    pub agriculture_to_gold: f64,

    /// Gold per unit of manufactured produce.
    #[serde(default = "default_conversion_rate")]
    pub manufacture_to_gold: f64,

    /// Share of region gold spent on luxury each tick.
    #[serde(default = "default_gold_to_luxury")]
    pub gold_to_luxury: f64,

    /// Fraction of luxury lost per tick.
    #[serde(default = "default_luxury_decay")]
    pub luxury_decay: f64,

    /// Damping applied when population shrinks.
    #[serde(default = "default_population_factor")]
    pub population_shrink_factor: f64,

    /// Damping applied when population grows.
    #[serde(default = "default_population_factor")]
    pub population_growth_factor: f64,

    /// Relative standard deviation of production and spoilage draws.
    #[serde(default = "default_production_std_deviation")]
    pub production_std_deviation: f64,
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            agriculture_storage_decay: default_agriculture_storage_decay(),
            agriculture_to_gold: default_conversion_rate(),
            manufacture_to_gold: default_conversion_rate(),
            gold_to_luxury: default_gold_to_luxury(),
            luxury_decay: default_luxury_decay(),
            population_shrink_factor: default_population_factor(),
            population_growth_factor: default_population_factor(),
            production_std_deviation: default_production_std_deviation(),
        }
    }
}

/// Headless run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Number of ticks the headless driver runs before exiting.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Ticks between full read-model snapshots in the log. `0` disables them.
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            snapshot_interval_ticks: default_snapshot_interval_ticks(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Iberia".to_owned()
}

const fn default_seed() -> Option<u64> {
    Some(42)
}

const fn default_agriculture_storage_decay() -> f64 {
    0.1
}

const fn default_conversion_rate() -> f64 {
    1.0
}

const fn default_gold_to_luxury() -> f64 {
    0.2
}

const fn default_luxury_decay() -> f64 {
    0.1
}

const fn default_population_factor() -> f64 {
    0.8
}

const fn default_production_std_deviation() -> f64 {
    crate::randomizer::DEFAULT_STD_DEVIATION
}

const fn default_max_ticks() -> u64 {
    100
}

const fn default_snapshot_interval_ticks() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}
