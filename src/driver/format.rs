//! Output rendering for search results.

use crate::common::Value;

/// Placeholder written for a search that matched nothing.
pub const EMPTY_RESULT: &str = "Null";

/// Render one value the way search output has always printed doubles.
///
/// Plain decimal for magnitudes in `[1e-3, 1e7)`, `E` notation otherwise;
/// the mantissa always carries a fractional part (`7.0`, `1.0E7`).
///
/// # Example
/// ```
/// use bplustree::driver::format_value;
///
/// assert_eq!(format_value(7.0), "7.0");
/// assert_eq!(format_value(0.3534), "0.3534");
/// assert_eq!(format_value(12_500_000.0), "1.25E7");
/// assert_eq!(format_value(0.0001), "1.0E-4");
/// ```
pub fn format_value(value: Value) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // Debug keeps the trailing `.0` on integral values.
        return format!("{:?}", value);
    }

    let scientific = format!("{:E}", value);
    match scientific.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0E{}", mantissa, exponent)
        }
        _ => scientific,
    }
}

/// Render a search result line: comma-separated values, or `Null`.
///
/// # Example
/// ```
/// use bplustree::driver::format_values;
///
/// assert_eq!(format_values(&[1.0, 2.5]), "1.0,2.5");
/// assert_eq!(format_values(&[]), "Null");
/// ```
pub fn format_values(values: &[Value]) -> String {
    if values.is_empty() {
        return EMPTY_RESULT.to_string();
    }
    values
        .iter()
        .map(|&value| format_value(value))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(-0.0), "-0.0");
        assert_eq!(format_value(0.001), "0.001");
        assert_eq!(format_value(9_999_999.0), "9999999.0");
    }

    #[test]
    fn test_scientific_values() {
        assert_eq!(format_value(1e7), "1.0E7");
        assert_eq!(format_value(-3.5e10), "-3.5E10");
        assert_eq!(format_value(2.5e-5), "2.5E-5");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_values_joins_without_spaces() {
        assert_eq!(format_values(&[0.3534, 31.907, 7.0]), "0.3534,31.907,7.0");
        assert_eq!(format_values(&[]), EMPTY_RESULT);
    }
}
