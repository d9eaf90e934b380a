//! Configuration loading and typed config structures for the simulator.
//!
//! The optional configuration file is `allee-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the YAML
//! structure and a loader that reads and validates the file. Every field has
//! a default, so an empty file (or no file at all) yields the stock game.
//!
//! The initial colony state, the action multipliers and the projection
//! length are fixed game rules and are absent here.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Environment variable that overrides `events.seed`.
pub const SEED_ENV_VAR: &str = "ALLEE_SEED";

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

    /// The configuration parsed but describes an unusable setup.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulator configuration.
///
/// Mirrors the structure of `allee-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulatorConfig {
    /// Event generator settings.
    #[serde(default)]
    pub events: EventsConfig,

    /// Projection and sweep settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulatorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ALLEE_SEED` overrides `events.seed` when set to a valid `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.events.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_grid(
            "analysis.lyapunov",
            self.analysis.lyapunov.r_min,
            self.analysis.lyapunov.r_max,
            self.analysis.lyapunov.r_step,
        )?;
        check_grid(
            "analysis.bifurcation",
            self.analysis.bifurcation.r_min,
            self.analysis.bifurcation.r_max,
            self.analysis.bifurcation.r_step,
        )?;
        let start = self.analysis.bifurcation.initial_population;
        if !start.is_finite() || start < 0.0 {
            return Err(invalid(
                "analysis.bifurcation.initial_population must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn check_grid(section: &str, r_min: f64, r_max: f64, r_step: f64) -> Result<(), ConfigError> {
    if !r_step.is_finite() || r_step <= 0.0 {
        return Err(invalid(&format!("{section}.r_step must be positive")));
    }
    if !r_min.is_finite() || !r_max.is_finite() || r_max < r_min {
        return Err(invalid(&format!(
            "{section}.r_max must be finite and not below r_min"
        )));
    }
    Ok(())
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

/// Event generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventsConfig {
    /// Seed for reproducible event sequences. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EventsConfig {
    /// Apply `ALLEE_SEED` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref());
    }

    /// Replace the seed with `value` when it parses as a `u64`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_seed_override(&mut self, value: Option<&str>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u64>() {
            Ok(seed) => self.seed = Some(seed),
            Err(_) => warn!(value = raw, "Ignoring unparseable {SEED_ENV_VAR}"),
        }
    }
}

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Lyapunov sweep settings.
    #[serde(default)]
    pub lyapunov: LyapunovConfig,

    /// Bifurcation sweep settings.
    #[serde(default)]
    pub bifurcation: BifurcationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lyapunov: LyapunovConfig::default(),
            bifurcation: BifurcationConfig::default(),
        }
    }
}

/// Lyapunov exponent sweep over the growth rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LyapunovConfig {
    /// First growth rate of the sweep.
    #[serde(default = "default_lyapunov_r_min")]
    pub r_min: f64,

    /// Last growth rate of the sweep (inclusive when the grid lands on it).
    #[serde(default = "default_r_max")]
    pub r_max: f64,

    /// Grid spacing.
    #[serde(default = "default_lyapunov_r_step")]
    pub r_step: f64,

    /// Iterations discarded before accumulating.
    #[serde(default = "default_warmup")]
    pub warmup: usize,

    /// Iterations accumulated into the estimate.
    #[serde(default = "default_lyapunov_samples")]
    pub samples: usize,
}

impl Default for LyapunovConfig {
    fn default() -> Self {
        Self {
            r_min: default_lyapunov_r_min(),
            r_max: default_r_max(),
            r_step: default_lyapunov_r_step(),
            warmup: default_warmup(),
            samples: default_lyapunov_samples(),
        }
    }
}

/// Bifurcation diagram sweep over the growth rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BifurcationConfig {
    /// First growth rate of the sweep.
    #[serde(default = "default_bifurcation_r_min")]
    pub r_min: f64,

    /// Last growth rate of the sweep (inclusive when the grid lands on it).
    #[serde(default = "default_r_max")]
    pub r_max: f64,

    /// Grid spacing.
    #[serde(default = "default_bifurcation_r_step")]
    pub r_step: f64,

    /// Iterations discarded before recording.
    #[serde(default = "default_warmup")]
    pub warmup: usize,

    /// Points recorded per growth rate.
    #[serde(default = "default_bifurcation_samples")]
    pub samples: usize,

    /// Starting population for every growth rate.
    #[serde(default = "default_bifurcation_initial_population")]
    pub initial_population: f64,
}

impl Default for BifurcationConfig {
    fn default() -> Self {
        Self {
            r_min: default_bifurcation_r_min(),
            r_max: default_r_max(),
            r_step: default_bifurcation_r_step(),
            warmup: default_warmup(),
            samples: default_bifurcation_samples(),
            initial_population: default_bifurcation_initial_population(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_lyapunov_r_min() -> f64 {
    0.01
}

const fn default_lyapunov_r_step() -> f64 {
    0.02
}

const fn default_lyapunov_samples() -> usize {
    500
}

const fn default_bifurcation_r_min() -> f64 {
    0.001
}

const fn default_bifurcation_r_step() -> f64 {
    0.005
}

const fn default_bifurcation_samples() -> usize {
    100
}

const fn default_bifurcation_initial_population() -> f64 {
    50.0
}

const fn default_r_max() -> f64 {
    3.0
}

const fn default_warmup() -> usize {
    500
}

fn default_log_level() -> String {
    "info".to_owned()
}
