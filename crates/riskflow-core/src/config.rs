//! Configuration loading and typed config structures for the Riskflow simulation.
//!
//! The configuration lives in a YAML file (by default
//! `riskflow-config.yaml`). This module defines strongly-typed structs that
//! mirror the YAML structure and a loader that reads and validates it.
//! Every field has a default, so an empty file describes the reference
//! scenario: 100 agents, 50 ticks, an automation hazard striking 20 agents
//! at tick 1.

use std::path::{Path, PathBuf};

use riskflow_agents::TraitDistribution;
use riskflow_types::{MAX_SIGNAL_MAGNITUDE, MIN_SIGNAL_MAGNITUDE};
use serde::{Deserialize, Serialize};

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

    /// The parameters parse but cannot describe a runnable scenario.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Description of the rejected parameter.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Named hazards with their risk multipliers, rescaled first-component
/// scores from a survey of smart-grid functions.
pub const HAZARD_PRESETS: [(&str, f64); 10] = [
    ("Automation", 1.3),
    ("Meter Reading", 0.898_671_335_721_28),
    ("Remote Connect", 1.197_252_052_614_51),
    ("Outage Detection", 0.7),
    ("Power Theft", 0.976_680_716_275_362),
    ("Pricing", 0.813_628_981_657_745),
    ("Customer Information", 0.875_750_820_478_405),
    ("Distributed Resources", 0.937_800_864_934_615),
    ("Transmissions", 1.107_266_090_726_83),
    ("Test Value", 1.0),
];

/// Look up a hazard preset by exact name.
pub fn hazard_preset(name: &str) -> Option<f64> {
    HAZARD_PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, multiplier)| *multiplier)
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scenario parameters for every run.
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Agent trait distribution.
    #[serde(default)]
    pub traits: TraitDistribution,

    /// Repetition settings.
    #[serde(default)]
    pub trials: TrialsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where results are written.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a parameter is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a parameter is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values that cannot be run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first rejected value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scenario.validate()?;
        if self.trials.num_runs == 0 {
            return Err(invalid("trials.num_runs must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters of one scenario.
///
/// Tick-valued fields count from 0; a run executes ticks `0..num_ticks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of agents in the network.
    #[serde(default = "default_num_nodes")]
    pub num_nodes: usize,

    /// Ties each new agent forms during preferential attachment.
    #[serde(default = "default_num_edges")]
    pub num_edges: usize,

    /// Ticks per run.
    #[serde(default = "default_num_ticks")]
    pub num_ticks: u64,

    /// Tick at which the hazard strikes.
    #[serde(default = "default_hazard_triggered")]
    pub hazard_triggered: u64,

    /// Agents struck directly by the hazard.
    #[serde(default = "default_num_affected")]
    pub num_affected: usize,

    /// Ticks between the hazard and the start of media reporting.
    #[serde(default = "default_media_delay")]
    pub media_delay: u64,

    /// Media signal multiplier, in `[0.1, 2.0]`.
    #[serde(default = "default_media_multiplier")]
    pub media_multiplier: f64,

    /// Starting media intensity in `[0, 1]`; defaults to
    /// `2 * num_affected / num_nodes`.
    #[serde(default)]
    pub media_reporting_intensity: Option<f64>,

    /// First tick of government communication.
    #[serde(default = "default_government_delay")]
    pub government_delay: u64,

    /// Tick at which government communication stops (exclusive).
    #[serde(default = "default_government_stop")]
    pub government_stop: u64,

    /// Government signal multiplier, in `[0.1, 2.0]`.
    #[serde(default = "default_government_multiplier")]
    pub government_multiplier: f64,

    /// Hazard name, also the preset key when no multiplier is given.
    #[serde(default = "default_hazard_name")]
    pub hazard_name: String,

    /// Explicit hazard multiplier, overriding the preset.
    #[serde(default)]
    pub hazard_multiplier: Option<f64>,

    /// Random seed; `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            num_nodes: default_num_nodes(),
            num_edges: default_num_edges(),
            num_ticks: default_num_ticks(),
            hazard_triggered: default_hazard_triggered(),
            num_affected: default_num_affected(),
            media_delay: default_media_delay(),
            media_multiplier: default_media_multiplier(),
            media_reporting_intensity: None,
            government_delay: default_government_delay(),
            government_stop: default_government_stop(),
            government_multiplier: default_government_multiplier(),
            hazard_name: default_hazard_name(),
            hazard_multiplier: None,
            seed: None,
        }
    }
}

impl ScenarioConfig {
    /// The hazard multiplier: the explicit value, else the preset for
    /// `hazard_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if no multiplier is given and the
    /// name matches no preset.
    pub fn resolved_hazard_multiplier(&self) -> Result<f64, ConfigError> {
        if let Some(multiplier) = self.hazard_multiplier {
            return Ok(multiplier);
        }
        hazard_preset(&self.hazard_name).ok_or_else(|| {
            invalid(format!(
                "unknown hazard '{}' and no hazard_multiplier given",
                self.hazard_name
            ))
        })
    }

    /// The starting media intensity: the explicit value, else twice the
    /// share of agents the hazard strikes.
    pub fn resolved_reporting_intensity(&self) -> f64 {
        self.media_reporting_intensity.unwrap_or_else(|| {
            if self.num_nodes == 0 {
                0.0
            } else {
                2.0 * self.num_affected as f64 / self.num_nodes as f64
            }
        })
    }

    /// Tick at which media reporting starts, if it fits in `u64`.
    pub const fn media_start(&self) -> Option<u64> {
        self.hazard_triggered.checked_add(self.media_delay)
    }

    /// Reject parameters that cannot produce a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first rejected value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_edges < 1 || self.num_edges >= self.num_nodes {
            return Err(invalid(format!(
                "num_edges must satisfy 1 <= num_edges < num_nodes (got {} and {})",
                self.num_edges, self.num_nodes
            )));
        }
        if self.num_ticks == 0 {
            return Err(invalid("num_ticks must be at least 1"));
        }
        if self.num_affected > self.num_nodes {
            return Err(invalid(format!(
                "num_affected ({}) exceeds num_nodes ({})",
                self.num_affected, self.num_nodes
            )));
        }
        if self.media_start().is_none() {
            return Err(invalid("hazard_triggered + media_delay overflows"));
        }
        check_multiplier("media_multiplier", self.media_multiplier)?;
        check_multiplier("government_multiplier", self.government_multiplier)?;
        check_multiplier("hazard_multiplier", self.resolved_hazard_multiplier()?)?;

        let intensity = self.resolved_reporting_intensity();
        if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
            return Err(invalid(format!(
                "media_reporting_intensity must be within [0, 1] (got {intensity})"
            )));
        }
        Ok(())
    }
}

/// Repetition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialsConfig {
    /// Runs to execute; results are also averaged across runs.
    #[serde(default = "default_num_runs")]
    pub num_runs: u32,

    /// Grow a fresh network and population for every run instead of
    /// replaying the first one.
    #[serde(default)]
    pub regenerate_network: bool,
}

impl Default for TrialsConfig {
    fn default() -> Self {
        Self {
            num_runs: default_num_runs(),
            regenerate_network: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
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

/// Result output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSON result files.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

fn check_multiplier(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (MIN_SIGNAL_MAGNITUDE..=MAX_SIGNAL_MAGNITUDE).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{name} must be within [{MIN_SIGNAL_MAGNITUDE}, {MAX_SIGNAL_MAGNITUDE}] (got {value})"
        )))
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_num_nodes() -> usize {
    100
}

const fn default_num_edges() -> usize {
    3
}

const fn default_num_ticks() -> u64 {
    50
}

const fn default_hazard_triggered() -> u64 {
    1
}

const fn default_num_affected() -> usize {
    20
}

const fn default_media_delay() -> u64 {
    2
}

const fn default_media_multiplier() -> f64 {
    1.2
}

const fn default_government_delay() -> u64 {
    3
}

const fn default_government_stop() -> u64 {
    53
}

const fn default_government_multiplier() -> f64 {
    0.4
}

fn default_hazard_name() -> String {
    "Automation".to_owned()
}

const fn default_num_runs() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("riskflow-output")
}
