//! Precompiled robocopy output patterns
//!
//! Digits are matched as ASCII `[0-9]` so every capture parses with
//! `str::parse`.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// `   Dirs :   12   10    2    0    0    0`
pub static DIRS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Dirs\s*:\s*([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)")
});

/// `  Files :  120  100   15    0    5    0`
pub static FILES: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Files\s*:\s*([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([0-9]+)")
});

/// `  Bytes :  1.5 g  1.2 g  300 m  0  0  0`
pub static BYTES: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)Bytes\s*:\s*([0-9.]+\s*[kmgt]?)\s+([0-9.]+\s*[kmgt]?)\s+([0-9.]+\s*[kmgt]?)\s+([0-9.]+\s*[kmgt]?)",
    )
});

/// `  Times :  0:01:02  0:00:58  0:00:00  0:00:04`
pub static TIMES: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"Times\s*:\s*([0-9:]+)\s+([0-9:]+)\s+([0-9:]+)\s+([0-9:]+)")
});

/// Standalone progress token such as `45.0%`.
pub static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| compile(r"([0-9]+(?:\.[0-9]+)?)\s*%"));

/// `Speed :  12345678 Bytes/sec.` or `12.3 MB/s`
pub static SPEED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9.]+)\s*(bytes?|kb?|mb?|gb?|tb?)/s"));

pub static NEW_FILE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^\s*New File\s+([0-9]+)\s+(.*)"));

pub static EXTRA_FILE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^\s*\*EXTRA File\s+(.*)"));

/// `2024/01/01 10:00:00 ERROR 5 (0x00000005) Copying File C:\x.txt`
pub static ERROR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)ERROR\s+([0-9]+)\s+\((0x[0-9A-F]+)\)\s+(.*)"));

/// Leading float of a string, in the manner of a lenient number parser.
pub static FLOAT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)"));

/// Size with optional binary unit suffix, applied to lower-cased input.
pub static SIZE: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9.]+)\s*([kmgt])?b?$"));
