//! Arithmetic mean of two values.

/// Arithmetic mean of `a` and `b`.
///
/// Follows IEEE 754 double precision semantics: NaN propagates, infinities
/// dominate finite operands, and `a + b` may overflow to infinity before the
/// division.
#[inline]
pub fn mean(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Mean of two values of the same floating-point type.
pub trait Average {
    fn avg(a: Self, b: Self) -> Self;
}

impl Average for f64 {
    #[inline]
    fn avg(a: Self, b: Self) -> Self {
        mean(a, b)
    }
}

impl Average for f32 {
    #[inline]
    fn avg(a: Self, b: Self) -> Self {
        (a + b) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_one_and_two() {
        assert_eq!(mean(1.0, 2.0), 1.5);
    }

    #[test]
    fn test_mean_of_zeros() {
        assert_eq!(mean(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_mean_of_opposites() {
        assert_eq!(mean(-5.0, 5.0), 0.0);
    }

    #[test]
    fn test_infinity_dominates_finite() {
        assert_eq!(mean(f64::INFINITY, 42.0), f64::INFINITY);
        assert_eq!(mean(-3.0, f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_opposite_infinities_are_nan() {
        assert!(mean(f64::INFINITY, f64::NEG_INFINITY).is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        assert!(mean(f64::NAN, 1.0).is_nan());
        assert!(mean(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_sum_overflow_reaches_infinity() {
        // No rescaling: the sum overflows before the halving.
        assert_eq!(mean(f64::MAX, f64::MAX), f64::INFINITY);
    }

    #[test]
    fn test_average_trait_matches_mean() {
        assert_eq!(f64::avg(1.0, 2.0), mean(1.0, 2.0));
        assert_eq!(f32::avg(-5.0, 5.0), 0.0);
    }
}
