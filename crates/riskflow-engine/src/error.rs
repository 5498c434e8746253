//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup, the trials, and the export.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: riskflow_core::config::ConfigError,
    },

    /// Building the simulation failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: riskflow_core::simulation::SimulationError,
    },

    /// The trials failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: riskflow_core::runner::RunnerError,
    },

    /// An output file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A result could not be serialized.
    #[error("failed to serialize {path}: {source}")]
    Json {
        /// The file being written.
        path: PathBuf,
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}
