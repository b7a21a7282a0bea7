//! Option sanitizer
//!
//! Turns the raw options object sent by a form (or read from an options
//! file) into a [`CopyRequest`]. Text fields go through whitelists, numbers
//! through inclusive bounds, flags through truthiness. Nothing reaches the
//! argument builder unsanitized.

mod fields;

pub use fields::{
    check_attributes, check_exclude_list, check_file_pattern, check_number, check_path,
    integer_value, is_truthy, parse_int_prefix, sanitize_attributes, sanitize_exclude_list,
    sanitize_file_pattern, sanitize_number, sanitize_path, NumericBounds, DANGEROUS_PATH_CHARS,
    LEVELS_BOUNDS, RETRIES_BOUNDS, THREAD_COUNT_BOUNDS, WAIT_SECONDS_BOUNDS,
};

use crate::types::{CopyRequest, RoboError, DEFAULT_FILE_PATTERN};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Validate a raw options object.
///
/// Fails if `raw` is not an object or if source/destination end up empty.
/// Every other field degrades to a safe value instead of failing.
///
/// # Example
/// ```
/// use robokit::sanitize::sanitize;
/// use serde_json::json;
///
/// let request = sanitize(&json!({
///     "source": r"C:\Data",
///     "destination": r"\\nas\backup",
///     "files": "*.docx",
///     "threads": 0,
/// }))
/// .unwrap();
///
/// assert_eq!(request.file_pattern, "*.docx");
/// assert_eq!(request.thread_count, 8);
/// ```
pub fn sanitize(raw: &Value) -> Result<CopyRequest, RoboError> {
    let options = raw
        .as_object()
        .ok_or_else(|| RoboError::Validation("options must be an object".to_string()))?;

    let source = required_path(options, "source")?;
    let destination = required_path(options, "destination")?;

    let file_pattern = match text(options, "files") {
        Some(raw) if !raw.trim().is_empty() => check_file_pattern(raw).unwrap_or_else(|| {
            warn!(field = "files", "rejected file pattern, using default");
            DEFAULT_FILE_PATTERN.to_string()
        }),
        _ => DEFAULT_FILE_PATTERN.to_string(),
    };

    let request = CopyRequest {
        source,
        destination,
        file_pattern,
        recurse: flag(options, "subdirectories"),
        copy_empty_dirs: flag(options, "emptySubdirectories"),
        levels: number(options, "levels", LEVELS_BOUNDS),
        restart_mode: flag(options, "restartMode"),
        backup_mode: flag(options, "backupMode"),
        copy_all: flag(options, "copyAll"),
        mirror: flag(options, "mirrorMode"),
        move_files: flag(options, "moveFiles"),
        move_dirs: flag(options, "moveDirs"),
        copy_archive: flag(options, "copyArchive"),
        reset_archive: flag(options, "resetArchive"),
        include_attributes: optional_text(options, "includeAttributes", check_attributes),
        exclude_attributes: optional_text(options, "excludeAttributes", check_attributes),
        exclude_files: optional_text(options, "excludeFiles", check_exclude_list),
        exclude_dirs: optional_text(options, "excludeDirs", check_exclude_list),
        retries: number(options, "retries", RETRIES_BOUNDS),
        wait_seconds: number(options, "waitTime", WAIT_SECONDS_BOUNDS),
        verbose: flag(options, "verbose"),
        no_progress: flag(options, "noProgress"),
        show_eta: flag(options, "eta"),
        multi_thread: flag(options, "multiThread"),
        thread_count: number(options, "threads", THREAD_COUNT_BOUNDS),
    };

    debug!(
        pattern = %request.file_pattern,
        threads = request.thread_count,
        "options sanitized"
    );
    Ok(request)
}

fn text<'a>(options: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    options.get(key).and_then(Value::as_str)
}

fn required_path(options: &Map<String, Value>, field: &'static str) -> Result<String, RoboError> {
    let raw = text(options, field).unwrap_or_default();
    match check_path(raw) {
        Some(path) if !path.is_empty() => Ok(path),
        Some(_) => Err(RoboError::UnsafeInput { field }),
        None => {
            warn!(field, "rejected path containing shell metacharacters");
            Err(RoboError::UnsafeInput { field })
        }
    }
}

fn optional_text(
    options: &Map<String, Value>,
    field: &'static str,
    check: fn(&str) -> Option<String>,
) -> String {
    let Some(raw) = text(options, field) else {
        return String::new();
    };
    check(raw).unwrap_or_else(|| {
        warn!(field, "rejected value, field dropped");
        String::new()
    })
}

fn number(options: &Map<String, Value>, field: &'static str, bounds: NumericBounds) -> u32 {
    let value = options.get(field);
    check_number(value, bounds).unwrap_or_else(|| {
        if value.is_some_and(|v| !v.is_null()) {
            debug!(field, default = bounds.default, "numeric option out of range");
        }
        bounds.default
    })
}

fn flag(options: &Map<String, Value>, field: &str) -> bool {
    is_truthy(options.get(field))
}
