//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the i32 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).floor();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Clamp a probability into `[0, 1]`, treating NaN as 0.
#[must_use]
pub fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_truncates_toward_negative_infinity() {
        assert_eq!(floor_f64_to_i32(4.0 * 0.75), 3);
        assert_eq!(floor_f64_to_i32(5.0 * 0.5), 2);
        assert_eq!(floor_f64_to_i32(-0.5), -1);
    }

    #[test]
    fn floor_handles_non_finite_and_overflow() {
        assert_eq!(floor_f64_to_i32(f64::NAN), 0);
        assert_eq!(floor_f64_to_i32(f64::INFINITY), 0);
        assert_eq!(floor_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn probabilities_are_clamped() {
        assert!((clamp_probability(1.5) - 1.0).abs() < f64::EPSILON);
        assert!(clamp_probability(-0.2).abs() < f64::EPSILON);
        assert!(clamp_probability(f64::NAN).abs() < f64::EPSILON);
        assert!((clamp_probability(0.4) - 0.4).abs() < f64::EPSILON);
    }
}
