//! Canonical display strings for evaluation results.

/// Label for an indeterminate (NaN) result.
pub const INDETERMINATE_LABEL: &str = "Indéterminé";
/// Label for positive infinity.
pub const POSITIVE_INFINITY_LABEL: &str = "∞";
/// Label for negative infinity.
pub const NEGATIVE_INFINITY_LABEL: &str = "-∞";
/// Label shown when a strict evaluation fails.
pub const ERROR_LABEL: &str = "Erreur";

/// Magnitudes at or above this are shown in exponential notation.
const EXPONENTIAL_UPPER: f64 = 1e12;
/// Non-zero magnitudes below this are shown in exponential notation.
const EXPONENTIAL_LOWER: f64 = 1e-6;

/// Format a result for display.
///
/// Values whose magnitude, rounded to 12 significant digits, falls outside
/// `[1e-6, 1e12)` are rounded to 10 significant digits and printed in
/// exponential notation (`1e13`, `-5e-7`); everything else is rounded to
/// 12 significant digits and printed in plain decimal. Both paths re-read
/// the rounded text so that trailing zeros disappear.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return INDETERMINATE_LABEL.to_string();
    }
    if value.is_infinite() {
        let label = if value > 0.0 {
            POSITIVE_INFINITY_LABEL
        } else {
            NEGATIVE_INFINITY_LABEL
        };
        return label.to_string();
    }
    if value == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }

    // Thresholds apply to the rounded value so that re-formatting the
    // output picks the same notation.
    let plain = round_significant(value, 12);
    if !needs_exponent(plain) {
        return format!("{plain}");
    }
    let rounded = round_significant(value, 10);
    if needs_exponent(rounded) {
        format!("{rounded:e}")
    } else {
        format!("{rounded}")
    }
}

fn needs_exponent(value: f64) -> bool {
    let abs = value.abs();
    abs >= EXPONENTIAL_UPPER || abs < EXPONENTIAL_LOWER
}

/// Whether `text` is one of the sentinel labels rather than a number.
pub fn is_sentinel(text: &str) -> bool {
    matches!(
        text,
        INDETERMINATE_LABEL | POSITIVE_INFINITY_LABEL | NEGATIVE_INFINITY_LABEL
    )
}

/// Round to `digits` significant digits by going through exponential text.
fn round_significant(value: f64, digits: usize) -> f64 {
    let text = format!("{:.*e}", digits - 1, value);
    text.parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(format_result(f64::NAN), "Indéterminé");
        assert_eq!(format_result(f64::INFINITY), "∞");
        assert_eq!(format_result(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(format_result(123.456), "123.456");
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(-2.5), "-2.5");
        assert_eq!(format_result(0.000001), "0.000001");
    }

    #[test]
    fn test_zero_has_no_sign() {
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_twelve_significant_digits() {
        assert_eq!(format_result(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(2.0 / 3.0), "0.666666666667");
    }

    #[test]
    fn test_exponential_notation() {
        assert_eq!(format_result(1e13), "1e13");
        assert_eq!(format_result(5e-7), "5e-7");
        assert_eq!(format_result(-1e12), "-1e12");
        assert_eq!(format_result(123456789012345.0), "1.23456789e14");
    }

    #[test]
    fn test_just_below_upper_threshold() {
        assert_eq!(format_result(999999999999.0), "999999999999");
    }

    #[test]
    fn test_rounding_across_thresholds() {
        assert_eq!(format_result(999_999_999_999.9), "1e12");
        assert_eq!(format_result(-999_999_999_999.9), "-1e12");
        assert_eq!(format_result(9.99999999999e-7), "0.000001");
        assert_eq!(format_result(9.9999999996e-7), "0.000001");
    }

    #[test]
    fn test_format_is_stable() {
        for x in [
            123.456,
            1.0 / 3.0,
            1e13,
            5e-7,
            -987654.321,
            2.0_f64.sqrt(),
            6.02214076e23,
            999_999_999_999.9,
            9.99999999999e-7,
            9.9999999996e-7,
            -999_999_999_999.6,
        ] {
            let once = format_result(x);
            let twice = format_result(once.parse().unwrap());
            assert_eq!(once, twice, "drift for {x}");
        }
    }

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("∞"));
        assert!(is_sentinel("-∞"));
        assert!(is_sentinel("Indéterminé"));
        assert!(!is_sentinel("0"));
        assert!(!is_sentinel(ERROR_LABEL));
    }
}
