//! Numeric domains shared by every crate that produces or consumes
//! perceptions and signals.
//!
//! Values outside these domains are saturated to the nearest bound, never
//! rejected.

/// Lowest possible risk, benefit, or technological-fear perception.
pub const MIN_PERCEPTION: f64 = 1.0;

/// Highest possible risk, benefit, or technological-fear perception.
pub const MAX_PERCEPTION: f64 = 5.0;

/// Weakest magnitude a risk signal can carry.
pub const MIN_SIGNAL_MAGNITUDE: f64 = 0.1;

/// Strongest magnitude a risk signal can carry.
pub const MAX_SIGNAL_MAGNITUDE: f64 = 2.0;

/// Saturate a perception value into `[MIN_PERCEPTION, MAX_PERCEPTION]`.
pub fn clamp_perception(value: f64) -> f64 {
    value.clamp(MIN_PERCEPTION, MAX_PERCEPTION)
}

/// Saturate a signal magnitude into
/// `[MIN_SIGNAL_MAGNITUDE, MAX_SIGNAL_MAGNITUDE]`.
pub fn clamp_magnitude(value: f64) -> f64 {
    value.clamp(MIN_SIGNAL_MAGNITUDE, MAX_SIGNAL_MAGNITUDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perception_saturates() {
        assert!((clamp_perception(7.3) - MAX_PERCEPTION).abs() < f64::EPSILON);
        assert!((clamp_perception(0.2) - MIN_PERCEPTION).abs() < f64::EPSILON);
        assert!((clamp_perception(3.5) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn magnitude_saturates() {
        assert!((clamp_magnitude(2.6) - MAX_SIGNAL_MAGNITUDE).abs() < f64::EPSILON);
        assert!((clamp_magnitude(0.0) - MIN_SIGNAL_MAGNITUDE).abs() < f64::EPSILON);
        assert!((clamp_magnitude(1.2) - 1.2).abs() < f64::EPSILON);
    }
}
