/// Truncates an `f64` toward zero into an `i64`.
///
/// Values outside the `i64` range saturate to `i64::MIN` / `i64::MAX`, and
/// `NaN` becomes `0`.
///
/// ## Example
/// ```
/// use arithc::util::num::truncate_to_i64;
///
/// assert_eq!(truncate_to_i64(5.9), 5);
/// assert_eq!(truncate_to_i64(-5.9), -5);
/// assert_eq!(truncate_to_i64(1e300), i64::MAX);
/// assert_eq!(truncate_to_i64(f64::NAN), 0);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn truncate_to_i64(value: f64) -> i64 {
    value as i64
}

/// Converts an `i128` to the nearest `f64`.
///
/// The conversion is exact while the magnitude stays below `2^53`.
///
/// ## Example
/// ```
/// use arithc::util::num::i128_to_f64;
///
/// assert_eq!(i128_to_f64(252), 252.0);
/// assert_eq!(i128_to_f64(-3), -3.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn i128_to_f64(value: i128) -> f64 {
    value as f64
}

/// Converts an `i64` to the nearest `f64`.
///
/// ## Example
/// ```
/// use arithc::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(1000), 1000.0);
/// assert_eq!(i64_to_f64(i64::MAX), 9_223_372_036_854_775_807.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Formats `value` with at most `digits` significant digits, the way C's
/// `%.*g` does.
///
/// Uses scientific notation when the decimal exponent is below `-4` or not
/// below `digits`, and drops trailing zeros of the fraction either way.
///
/// ## Example
/// ```
/// use arithc::util::num::format_significant;
///
/// assert_eq!(format_significant(6.0, 20), "6");
/// assert_eq!(format_significant(0.1, 20), "0.10000000000000000555");
/// assert_eq!(format_significant(1e25, 6), "1e+25");
/// assert_eq!(format_significant(123_456.0, 3), "1.23e+05");
/// assert_eq!(format_significant(-0.00001234, 3), "-1.23e-05");
/// assert_eq!(format_significant(f64::NEG_INFINITY, 20), "-inf");
/// ```
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent = exponent.parse::<i64>().unwrap_or(0);
    let limit = i64::try_from(digits).unwrap_or(i64::MAX);

    if exponent < -4 || exponent >= limit {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs());
    }

    let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
