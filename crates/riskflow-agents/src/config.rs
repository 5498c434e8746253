//! Population parameters for agent trait sampling.
//!
//! Risk perception, benefit perception, and technological fear are drawn
//! jointly from a three-variate normal distribution fitted to survey data.
//! The [`TraitDistribution`] bundles its mean vector and covariance matrix
//! so callers (scenario config, tests) can override the defaults.

use serde::{Deserialize, Serialize};

/// Mean of the survey-fitted distribution, in trait order.
pub const DEFAULT_TRAIT_MEAN: [f64; 3] = [3.143_534, 2.465_156, 3.025_205];

/// Covariance of the survey-fitted distribution, in trait order.
pub const DEFAULT_TRAIT_COVARIANCE: [[f64; 3]; 3] = [
    [0.693_363_7, -0.391_255_4, 0.387_180_3],
    [-0.391_255_4, 0.621_929_1, -0.214_740_6],
    [0.387_180_3, -0.214_740_6, 0.755_552_6],
];

/// Joint distribution of the three agent traits.
///
/// Components are ordered risk perception, benefit perception,
/// technological fear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitDistribution {
    /// Mean vector (default: survey means, about 3.14, 2.47, 3.03).
    pub mean: [f64; 3],

    /// Symmetric positive-definite covariance matrix.
    pub covariance: [[f64; 3]; 3],
}

impl Default for TraitDistribution {
    fn default() -> Self {
        Self {
            mean: DEFAULT_TRAIT_MEAN,
            covariance: DEFAULT_TRAIT_COVARIANCE,
        }
    }
}
