//! Sanitizer and argument builder properties.
//!
//! Untrusted option objects go in; what comes out must be a bounded,
//! metacharacter-free argument vector.

use robokit::args::build;
use robokit::sanitize::{sanitize, DANGEROUS_PATH_CHARS};
use robokit::RoboError;
use serde_json::{json, Value};

fn options(extra: Value) -> Value {
    let mut raw = json!({ "source": r"C:\Data", "destination": r"\\nas\backup" });
    if let (Some(base), Some(extra)) = (raw.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    raw
}

fn arguments(extra: Value) -> Vec<String> {
    build(&sanitize(&options(extra)).expect("options should sanitize")).into_vec()
}

#[test]
fn test_every_dangerous_character_rejects_source() {
    for c in DANGEROUS_PATH_CHARS {
        let raw = json!({ "source": format!(r"C:\Data{}x", c), "destination": r"D:\dst" });
        let err = sanitize(&raw).expect_err("dangerous source must be rejected");
        assert!(
            matches!(err, RoboError::UnsafeInput { field: "source" }),
            "char {c:?} gave {err:?}"
        );
    }
}

#[test]
fn test_dangerous_destination_rejected() {
    let raw = json!({ "source": r"C:\Data", "destination": r"D:\out`whoami`" });
    let err = sanitize(&raw).expect_err("dangerous destination must be rejected");
    assert!(matches!(err, RoboError::UnsafeInput { field: "destination" }));
    assert_eq!(err.to_string(), "Unsafe or empty value for 'destination'");
}

#[test]
fn test_paths_with_spaces_stay_single_tokens() {
    let raw = json!({
        "source": r"  C:\Program Files\App  ",
        "destination": r"D:\My Backups",
    });
    let args = build(&sanitize(&raw).unwrap()).into_vec();
    assert_eq!(args, vec![r"C:\Program Files\App", r"D:\My Backups", "/R:1000000", "/W:30"]);
}

#[test]
fn test_thread_count_bounds() {
    let multi = |threads: Value| arguments(json!({ "multiThread": true, "threads": threads }));

    assert!(multi(json!(0)).contains(&"/MT:8".to_string()));
    assert!(multi(json!(129)).contains(&"/MT:8".to_string()));
    assert!(multi(json!(128)).contains(&"/MT:128".to_string()));
    assert!(multi(json!(1)).contains(&"/MT:1".to_string()));
    assert!(multi(json!("16")).contains(&"/MT:16".to_string()));
    assert!(multi(json!("lots")).contains(&"/MT:8".to_string()));
}

#[test]
fn test_thread_count_ignored_without_multithread_flag() {
    let args = arguments(json!({ "threads": 32 }));
    assert!(args.iter().all(|a| !a.starts_with("/MT")));
}

#[test]
fn test_retry_and_wait_bounds() {
    let args = arguments(json!({ "retries": -1, "waitTime": 3601 }));
    assert!(args.contains(&"/R:1000000".to_string()));
    assert!(args.contains(&"/W:30".to_string()));

    let args = arguments(json!({ "retries": 5, "waitTime": 0 }));
    assert!(args.contains(&"/R:5".to_string()));
    assert!(args.iter().all(|a| !a.starts_with("/W:")));
}

#[test]
fn test_levels_bounds() {
    assert!(arguments(json!({ "levels": 9999 })).contains(&"/LEV:9999".to_string()));
    assert!(arguments(json!({ "levels": 1 })).contains(&"/LEV:1".to_string()));

    // Out of range falls back to 0, which suppresses the token.
    for levels in [json!(10000), json!(-1)] {
        let args = arguments(json!({ "levels": levels }));
        assert!(args.iter().all(|a| !a.starts_with("/LEV")), "got {args:?}");
    }
}

#[test]
fn test_retries_bounds() {
    let retries = |n: Value| arguments(json!({ "retries": n }));

    assert!(retries(json!(10_000_000)).contains(&"/R:10000000".to_string()));
    assert!(retries(json!(10_000_001)).contains(&"/R:1000000".to_string()));
    assert!(retries(json!(1)).contains(&"/R:1".to_string()));
}

#[test]
fn test_wait_time_bounds() {
    let wait = |n: Value| arguments(json!({ "waitTime": n }));

    assert!(wait(json!(3600)).contains(&"/W:3600".to_string()));
    assert!(wait(json!(3601)).contains(&"/W:30".to_string()));
    assert!(wait(json!(-1)).contains(&"/W:30".to_string()));
    assert!(wait(json!(1)).contains(&"/W:1".to_string()));
}

#[test]
fn test_full_option_set_order() {
    let args = arguments(json!({
        "files": "*.docx",
        "subdirectories": true,
        "emptySubdirectories": true,
        "levels": 3,
        "restartMode": true,
        "backupMode": "yes",
        "copyAll": 1,
        "mirrorMode": true,
        "copyArchive": true,
        "resetArchive": true,
        "includeAttributes": "rh",
        "excludeAttributes": " s ",
        "excludeFiles": "*.tmp,*.bak",
        "excludeDirs": "node_modules",
        "retries": 2,
        "waitTime": 5,
        "verbose": true,
        "noProgress": true,
        "eta": true,
        "multiThread": true,
        "threads": 4,
    }));

    assert_eq!(
        args,
        vec![
            r"C:\Data", r"\\nas\backup", "*.docx", "/S", "/E", "/LEV:3", "/Z", "/B",
            "/COPYALL", "/MIR", "/A", "/M", "/IA:RH", "/XA:S", "/XF", "*.tmp", "/XF", "*.bak",
            "/XD", "node_modules", "/R:2", "/W:5", "/V", "/NP", "/ETA", "/MT:4",
        ]
    );
}

#[test]
fn test_falsy_flags_emit_nothing() {
    let args = arguments(json!({
        "subdirectories": false,
        "mirrorMode": 0,
        "verbose": "",
        "eta": null,
        "retries": 0,
        "waitTime": 0,
    }));
    assert_eq!(args, vec![r"C:\Data", r"\\nas\backup"]);
}

#[test]
fn test_no_token_carries_shell_metacharacters() {
    let args = arguments(json!({
        "files": "*.txt | del",
        "excludeFiles": "a;b",
        "excludeDirs": "$(x)",
        "includeAttributes": "R&",
        "excludeAttributes": "Q",
    }));

    for token in &args {
        assert!(
            !token.contains(&DANGEROUS_PATH_CHARS[..]),
            "token {token:?} carries a metacharacter"
        );
    }
    assert_eq!(args, vec![r"C:\Data", r"\\nas\backup", "/R:1000000", "/W:30"]);
}

#[test]
fn test_build_is_deterministic() {
    let raw = options(json!({ "mirrorMode": true, "excludeDirs": "a, b", "threads": 12 }));
    let first = build(&sanitize(&raw).unwrap());
    let second = build(&sanitize(&raw).unwrap());
    assert_eq!(first, second);
}
