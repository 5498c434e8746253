//! Linear rescaling between numeric ranges.

/// Map `value` from `[old_min, old_max]` onto a new range.
///
/// The new range is given as `(new_max, new_min)`, and the mapping is
/// `(value - old_min) / (old_max - old_min) * (new_max - new_min) + new_min`,
/// so `old_min` lands on `new_min` and `old_max` on `new_max`. Passing a
/// `new_max` smaller than `new_min` inverts the direction: a high risk
/// perception becomes a low benefit multiplier, for example.
///
/// Values outside the old range extrapolate linearly; callers clamp.
pub fn rescale(value: f64, old_min: f64, old_max: f64, new_max: f64, new_min: f64) -> f64 {
    (value - old_min) / (old_max - old_min) * (new_max - new_min) + new_min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn endpoints_map_to_endpoints() {
        assert!(close(rescale(1.0, 1.0, 5.0, 2.0, 1.0), 1.0));
        assert!(close(rescale(5.0, 1.0, 5.0, 2.0, 1.0), 2.0));
        assert!(close(rescale(3.0, 1.0, 5.0, 2.0, 1.0), 1.5));
    }

    #[test]
    fn reversed_target_range_inverts() {
        // benefit 1 -> multiplier 0.1, benefit 5 -> multiplier 1.0
        assert!(close(rescale(1.0, 1.0, 5.0, 1.0, 0.1), 0.1));
        assert!(close(rescale(5.0, 1.0, 5.0, 1.0, 0.1), 1.0));
        // uniform draw 0 -> threshold 1, draw 1 -> threshold 5
        assert!(close(rescale(0.0, 0.0, 1.0, 5.0, 1.0), 1.0));
        assert!(close(rescale(1.0, 0.0, 1.0, 5.0, 1.0), 5.0));
    }

    #[test]
    fn media_damping_crosses_one_at_midrange() {
        // avg 1 -> 0.1, avg 5 -> 2.0; the factor passes 1.0 at about 2.895
        assert!(close(rescale(1.0, 1.0, 5.0, 2.0, 0.1), 0.1));
        assert!(close(rescale(5.0, 1.0, 5.0, 2.0, 0.1), 2.0));
        assert!(rescale(2.5, 1.0, 5.0, 2.0, 0.1) < 1.0);
        assert!(rescale(3.0, 1.0, 5.0, 2.0, 0.1) > 1.0);
    }

    #[test]
    fn out_of_range_extrapolates() {
        assert!(close(rescale(6.0, 1.0, 5.0, 2.0, 1.0), 2.25));
    }
}
