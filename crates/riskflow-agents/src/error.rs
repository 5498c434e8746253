//! Error types for the riskflow-agents crate.
//!
//! Agent behaviour itself never fails: perceptions and signal magnitudes
//! saturate into their domains. Errors arise only when the population is
//! set up with parameters that cannot describe a valid distribution.

/// Errors that can occur while preparing agents.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The trait covariance matrix is not symmetric positive definite.
    #[error("invalid trait covariance: {reason}")]
    InvalidCovariance {
        /// Description of which check failed.
        reason: String,
    },

    /// A distribution parameter is NaN or infinite.
    #[error("non-finite trait parameter {name}: {value}")]
    NonFiniteParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}
