//! Joint sampling of agent traits.
//!
//! [`TraitSampler`] factors the covariance matrix once (Cholesky, lower
//! triangular) and then turns three independent standard-normal draws into
//! one correlated trait vector per agent. Each component is clipped into
//! the perception domain `[1, 5]`.

use rand::Rng;
use rand_distr::StandardNormal;
use riskflow_types::clamp_perception;

use crate::config::TraitDistribution;
use crate::error::AgentError;

/// Tolerance for the covariance symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// One agent's clipped trait values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitDraw {
    /// Risk perception in `[1, 5]`.
    pub risk_perception: f64,
    /// Benefit perception in `[1, 5]`.
    pub benefit_perception: f64,
    /// Technological fear in `[1, 5]`.
    pub technological_fear: f64,
}

/// Lower-triangular Cholesky factor of a 3x3 covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LowerTriangular {
    l11: f64,
    l21: f64,
    l22: f64,
    l31: f64,
    l32: f64,
    l33: f64,
}

/// Draws correlated trait vectors from a [`TraitDistribution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitSampler {
    mean: [f64; 3],
    factor: LowerTriangular,
}

impl TraitSampler {
    /// Validate the distribution and precompute its Cholesky factor.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NonFiniteParameter`] for NaN or infinite
    /// entries and [`AgentError::InvalidCovariance`] when the matrix is
    /// asymmetric or not positive definite.
    pub fn new(distribution: &TraitDistribution) -> Result<Self, AgentError> {
        for value in distribution.mean {
            if !value.is_finite() {
                return Err(AgentError::NonFiniteParameter { name: "mean", value });
            }
        }
        for value in distribution.covariance.iter().flatten().copied() {
            if !value.is_finite() {
                return Err(AgentError::NonFiniteParameter {
                    name: "covariance",
                    value,
                });
            }
        }

        let [[a11, a12, a13], [a21, a22, a23], [a31, a32, a33]] = distribution.covariance;
        if (a12 - a21).abs() > SYMMETRY_TOLERANCE
            || (a13 - a31).abs() > SYMMETRY_TOLERANCE
            || (a23 - a32).abs() > SYMMETRY_TOLERANCE
        {
            return Err(AgentError::InvalidCovariance {
                reason: "matrix is not symmetric".to_owned(),
            });
        }

        let l11 = positive_sqrt(a11, 1)?;
        let l21 = a21 / l11;
        let l31 = a31 / l11;
        let l22 = positive_sqrt(a22 - l21 * l21, 2)?;
        let l32 = (a32 - l31 * l21) / l22;
        let l33 = positive_sqrt(a33 - l31 * l31 - l32 * l32, 3)?;

        Ok(Self {
            mean: distribution.mean,
            factor: LowerTriangular {
                l11,
                l21,
                l22,
                l31,
                l32,
                l33,
            },
        })
    }

    /// Draw one trait vector, clipping each component into `[1, 5]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TraitDraw {
        let z1: f64 = rng.sample(StandardNormal);
        let z2: f64 = rng.sample(StandardNormal);
        let z3: f64 = rng.sample(StandardNormal);
        let [m1, m2, m3] = self.mean;
        let LowerTriangular {
            l11,
            l21,
            l22,
            l31,
            l32,
            l33,
        } = self.factor;

        TraitDraw {
            risk_perception: clamp_perception(m1 + l11 * z1),
            benefit_perception: clamp_perception(m2 + l21 * z1 + l22 * z2),
            technological_fear: clamp_perception(m3 + l31 * z1 + l32 * z2 + l33 * z3),
        }
    }
}

/// Square root of a Cholesky pivot, rejecting non-positive pivots.
fn positive_sqrt(pivot: f64, row: usize) -> Result<f64, AgentError> {
    if pivot <= 0.0 {
        return Err(AgentError::InvalidCovariance {
            reason: format!("not positive definite (pivot {pivot} at row {row})"),
        });
    }
    Ok(pivot.sqrt())
}
