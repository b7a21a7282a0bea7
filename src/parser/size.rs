//! Robocopy size strings to byte counts

use super::patterns::{FLOAT_PREFIX, SIZE};

const KIB: f64 = 1024.0;

/// Leading float of `raw`, e.g. `"1.2.3"` gives 1.2.
fn leading_float(raw: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn to_bytes(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Convert a robocopy size (`"1.5 g"`, `"300 m"`, `"2048"`) to bytes.
///
/// Suffixes `k/m/g/t` are binary multiples and may be followed by `b`.
/// Unrecognized input falls back to its leading number, then to 0.
///
/// ```
/// use robokit::parser::parse_size;
///
/// assert_eq!(parse_size("1.5 g"), 1_610_612_736);
/// assert_eq!(parse_size("2 kb"), 2048);
/// assert_eq!(parse_size("n/a"), 0);
/// ```
pub fn parse_size(raw: &str) -> u64 {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.is_empty() {
        return 0;
    }

    let Some(caps) = SIZE.captures(&cleaned) else {
        return leading_float(&cleaned).map(to_bytes).unwrap_or(0);
    };

    let value = leading_float(&caps[1]).unwrap_or(f64::NAN);
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => KIB,
        Some("m") => KIB.powi(2),
        Some("g") => KIB.powi(3),
        Some("t") => KIB.powi(4),
        _ => 1.0,
    };
    to_bytes(value * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_bytes() {
        assert_eq!(parse_size("2048"), 2048);
        assert_eq!(parse_size("  0 "), 0);
    }

    #[test]
    fn test_suffixes_case_insensitive() {
        assert_eq!(parse_size("1 k"), 1024);
        assert_eq!(parse_size("1 M"), 1_048_576);
        assert_eq!(parse_size("1.5 g"), 1_610_612_736);
        assert_eq!(parse_size("2 T"), 2 * 1024u64.pow(4));
        assert_eq!(parse_size("300mb"), 300 * 1_048_576);
    }

    #[test]
    fn test_rounds_fractional_bytes() {
        assert_eq!(parse_size("1.001 k"), 1025);
    }

    #[test]
    fn test_fallback_and_garbage() {
        assert_eq!(parse_size("12.5 bytes"), 13);
        assert_eq!(parse_size("1.2.3"), 1);
        assert_eq!(parse_size("."), 0);
        assert_eq!(parse_size("abc"), 0);
        assert_eq!(parse_size(""), 0);
        assert_eq!(parse_size("-5"), 0);
    }
}
