//! Number rendering for simulator text files.
//!
//! The simulator parses C-style numeric text, so floats follow the `%G` and
//! `%e` conventions rather than Rust's shortest round-trip output.

/// Renders `value` like C's `%.{significant}G`.
///
/// Fixed notation is used when the decimal exponent lies in
/// `-4..significant`, scientific notation with an upper-case `E` and a signed
/// two-digit exponent otherwise. Trailing zeros and a dangling decimal point
/// are removed in both cases.
pub fn format_general(value: f64, significant: usize) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-INF" } else { "INF" }.to_string();
    }
    let significant = significant.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the requested digits may bump the exponent (9.99.. -> 1.0e1),
    // so the exponent is read back from the rounded scientific form.
    let scientific = format!("{:.*e}", significant - 1, value);
    let (mantissa, exponent) = split_exponent(&scientific);

    if exponent >= -4 && exponent < significant as i32 {
        let decimals = (significant as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    } else {
        format!("{}E{}", trim_fraction(mantissa), signed_exponent(exponent))
    }
}

/// Renders `value` like C's `%.{decimals}e`, e.g. `1.500000000000000000e+01`.
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let scientific = format!("{:.*e}", decimals, value);
    let (mantissa, exponent) = split_exponent(&scientific);
    format!("{mantissa}e{}", signed_exponent(exponent))
}

fn split_exponent(scientific: &str) -> (&str, i32) {
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (scientific, 0),
    }
}

fn signed_exponent(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{:02}", exponent.unsigned_abs())
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_fixed_range() {
        assert_eq!(format_general(0.001, 8), "0.001");
        assert_eq!(format_general(300.0, 8), "300");
        assert_eq!(format_general(1.0 / 3.0, 8), "0.33333333");
        assert_eq!(format_general(12345678.0, 8), "12345678");
        assert_eq!(format_general(-2.5, 8), "-2.5");
        assert_eq!(format_general(0.0001, 8), "0.0001");
    }

    #[test]
    fn general_scientific_range() {
        assert_eq!(format_general(123456789.0, 8), "1.2345679E+08");
        assert_eq!(format_general(0.00001, 8), "1E-05");
        assert_eq!(format_general(-6.02e23, 8), "-6.02E+23");
        assert_eq!(format_general(99999999.9, 8), "1E+08");
    }

    #[test]
    fn general_special_values() {
        assert_eq!(format_general(0.0, 8), "0");
        assert_eq!(format_general(-0.0, 8), "-0");
        assert_eq!(format_general(f64::INFINITY, 8), "INF");
        assert_eq!(format_general(f64::NAN, 8), "NAN");
    }

    #[test]
    fn scientific_matches_c_layout() {
        assert_eq!(format_scientific(10.0, 18), "1.000000000000000000e+01");
        assert_eq!(format_scientific(0.0, 3), "0.000e+00");
        assert_eq!(format_scientific(-0.00125, 2), "-1.25e-03");
        assert_eq!(format_scientific(1e120, 1), "1.0e+120");
    }
}
