//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep. Waiting happens on I/O or on
//! futures, never on a timer used as poor man's synchronization.
//! **Exception**: `exercises/timing.rs`, whose whole purpose is a bounded delay.

use std::path::Path;

use architectural_enforcement::{code_part, scan_production};

/// Files allowed to sleep
const SLEEP_ALLOWED: &[&str] = &["exercises/timing.rs"];

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = scan_production(|path, lines, idx| {
        is_sleep_call(code_part(lines[idx])) && !is_sleep_allowed(path)
    });

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - exercises/timing.rs (bounded random delay)");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(")
}

fn is_sleep_allowed(path: &Path) -> bool {
    SLEEP_ALLOWED.iter().any(|allowed| path.ends_with(allowed))
}

#[test]
fn test_sleep_violation_detection() {
    assert!(is_sleep_call(
        "    tokio::time::sleep(Duration::from_millis(10)).await;"
    ));
    assert!(is_sleep_call("    std::thread::sleep(d);"));
    assert!(!is_sleep_call("    tokio::task::yield_now().await;"));
}

#[test]
fn test_timing_exercise_is_exempt() {
    assert!(is_sleep_allowed(Path::new(
        "orgclient/core/src/exercises/timing.rs"
    )));
    assert!(!is_sleep_allowed(Path::new("orgclient/core/src/github.rs")));
}
