//! Enumeration types for the Riskflow simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Signal origin
// ---------------------------------------------------------------------------

/// Where a risk signal came from.
///
/// Every origin except [`SignalOrigin::Neighbour`] traces back to the hazard
/// event itself, either directly (the grid) or through an institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    /// Reporting by the media.
    Media,
    /// Official communication by the government.
    Government,
    /// A peer in the social network passing on its own perception.
    Neighbour,
    /// The hazard striking an agent directly.
    Grid,
}

impl SignalOrigin {
    /// All origins in reporting order.
    pub const ALL: [Self; 4] = [Self::Government, Self::Media, Self::Neighbour, Self::Grid];

    /// Whether the signal was sent by another agent in the network.
    pub const fn is_neighbour(self) -> bool {
        matches!(self, Self::Neighbour)
    }
}

impl core::fmt::Display for SignalOrigin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Media => "media",
            Self::Government => "government",
            Self::Neighbour => "neighbour",
            Self::Grid => "grid",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Colour category
// ---------------------------------------------------------------------------

/// Four-level discretisation of an agent's risk perception.
///
/// | Category | Risk perception |
/// |----------|-----------------|
/// | Green    | `< 2`           |
/// | Yellow   | `[2, 3)`        |
/// | Orange   | `[3, 4)`        |
/// | Red      | `>= 4`          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    /// Low risk perception.
    Green,
    /// Medium risk perception.
    Yellow,
    /// Heightened risk perception.
    Orange,
    /// High risk perception.
    Red,
}

impl ColorCategory {
    /// Bucket a risk perception value.
    ///
    /// Each boundary (2, 3, 4) belongs to the higher bucket.
    pub fn from_risk_perception(risk_perception: f64) -> Self {
        if risk_perception < 2.0 {
            Self::Green
        } else if risk_perception < 3.0 {
            Self::Yellow
        } else if risk_perception < 4.0 {
            Self::Orange
        } else {
            Self::Red
        }
    }
}
