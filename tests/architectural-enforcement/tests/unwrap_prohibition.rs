//! Integration Test: Panic-Free Library Code
//!
//! **Policy**: Library code propagates errors with `?`; it never calls
//! `unwrap()` or `expect()`. Test code may.

use architectural_enforcement::{code_part, scan_production};

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan_production(|_, lines, idx| is_panicking_call(code_part(lines[idx])));

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        panic!(
            "\nFound {} unwrap()/expect() call(s) in library code.\nPropagate the error instead.",
            violations.len()
        );
    }
}

fn is_panicking_call(code: &str) -> bool {
    code.contains(".unwrap()") || code.contains(".expect(")
}

#[test]
fn test_detection() {
    assert!(is_panicking_call("let v = map.get(k).unwrap();"));
    assert!(is_panicking_call("let c = builder.build().expect(\"client\");"));
    assert!(!is_panicking_call("let v = map.get(k).unwrap_or_default();"));
    assert!(!is_panicking_call("let v = x.unwrap_or_else(|_| y);"));
}
