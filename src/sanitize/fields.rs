//! Per-field whitelist rules
//!
//! Each rule is a pure function. The `check_*` variants return `None` when
//! the value is rejected so the caller can log which field was dropped; the
//! `sanitize_*` variants apply the field's fallback.

use crate::types::DEFAULT_FILE_PATTERN;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Shell metacharacters that disqualify a path outright.
pub const DANGEROUS_PATH_CHARS: [char; 14] = [
    ';', '&', '|', '<', '>', '`', '$', '(', ')', '{', '}', '[', ']', '!',
];

static FILE_PATTERN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9*?._ -]+$").unwrap());
static EXCLUDE_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9*?.,_ -]*$").unwrap());
static ATTRIBUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[RASHCNETOD]*$").unwrap());

/// Inclusive range plus the value substituted when input falls outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    pub min: i64,
    pub max: i64,
    pub default: u32,
}

impl NumericBounds {
    pub const fn new(min: i64, max: i64, default: u32) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const LEVELS_BOUNDS: NumericBounds = NumericBounds::new(0, 9_999, 0);
pub const RETRIES_BOUNDS: NumericBounds = NumericBounds::new(0, 10_000_000, 1_000_000);
pub const WAIT_SECONDS_BOUNDS: NumericBounds = NumericBounds::new(0, 3_600, 30);
pub const THREAD_COUNT_BOUNDS: NumericBounds = NumericBounds::new(1, 128, 8);

fn clean(raw: &str) -> String {
    raw.trim().replace('\0', "")
}

/// Trimmed, NUL-free path, or `None` if it carries a shell metacharacter.
pub fn check_path(raw: &str) -> Option<String> {
    let cleaned = clean(raw);
    if cleaned.contains(&DANGEROUS_PATH_CHARS[..]) {
        return None;
    }
    Some(cleaned)
}

/// Sanitize a source/destination path. Rejected paths become empty.
///
/// ```
/// use robokit::sanitize::sanitize_path;
///
/// assert_eq!(sanitize_path(r"\\server\share\folder"), r"\\server\share\folder");
/// assert_eq!(sanitize_path(r"C:\Test;rm -rf /"), "");
/// ```
pub fn sanitize_path(raw: &str) -> String {
    check_path(raw).unwrap_or_default()
}

pub fn check_file_pattern(raw: &str) -> Option<String> {
    let cleaned = clean(raw);
    FILE_PATTERN_RE.is_match(&cleaned).then_some(cleaned)
}

/// Sanitize the file selection pattern, falling back to `*.*`.
pub fn sanitize_file_pattern(raw: &str) -> String {
    check_file_pattern(raw).unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string())
}

pub fn check_exclude_list(raw: &str) -> Option<String> {
    let cleaned = clean(raw);
    EXCLUDE_LIST_RE.is_match(&cleaned).then_some(cleaned)
}

/// Sanitize a comma-separated exclusion list. Rejected lists are dropped.
pub fn sanitize_exclude_list(raw: &str) -> String {
    check_exclude_list(raw).unwrap_or_default()
}

pub fn check_attributes(raw: &str) -> Option<String> {
    let upper = clean(raw).to_uppercase();
    ATTRIBUTES_RE.is_match(&upper).then_some(upper)
}

/// Sanitize a robocopy attribute set (`RASHCNETOD`), upper-cased.
pub fn sanitize_attributes(raw: &str) -> String {
    check_attributes(raw).unwrap_or_default()
}

/// Integer prefix of a string: optional sign then decimal digits.
///
/// `"7"` and `"7 files"` both give 7; `"abc"` gives `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|n| sign * n)
}

/// Integer view of a raw JSON value, truncating fractional numbers.
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// In-range integer value of a numeric option, or `None`.
pub fn check_number(value: Option<&Value>, bounds: NumericBounds) -> Option<u32> {
    value
        .and_then(integer_value)
        .filter(|n| bounds.contains(*n))
        .and_then(|n| u32::try_from(n).ok())
}

/// Parse and bound-check a numeric option.
pub fn sanitize_number(value: Option<&Value>, bounds: NumericBounds) -> u32 {
    check_number(value, bounds).unwrap_or(bounds.default)
}

/// Form-style truthiness: empty strings, zero, null and missing are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
