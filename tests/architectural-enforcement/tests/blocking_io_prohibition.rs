//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async functions in production code MUST NOT use blocking I/O.
//! **Required**: `reqwest` async client, `tokio` primitives.
//! **Acceptable**: Blocking calls in synchronous functions (config loading
//! runs before any request is made) and in test code.

use architectural_enforcement::{code_part, is_in_async_function, scan_production};

/// Test that async production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_code() {
    let violations = scan_production(|_, lines, idx| {
        blocking_call(code_part(lines[idx])).is_some() && is_in_async_function(lines, idx)
    });

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n❌ FORBIDDEN in async functions:");
        eprintln!("  - std::fs::*, std::net::*");
        eprintln!("  - std::process::Command");
        eprintln!("  - std::thread::sleep");
        eprintln!("  - reqwest::blocking::*");

        panic!(
            "\nFound {} blocking I/O violation(s) in async code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Kind of blocking call on this line, if any
fn blocking_call(code: &str) -> Option<&'static str> {
    if code.contains("std::fs::") {
        Some("Blocking file I/O")
    } else if code.contains("std::net::") {
        Some("Blocking network I/O")
    } else if code.contains("std::process::Command") {
        Some("Blocking process I/O")
    } else if code.contains("std::thread::sleep") {
        Some("Blocking sleep")
    } else if code.contains("reqwest::blocking") {
        Some("Blocking HTTP client")
    } else {
        None
    }
}

#[test]
fn test_blocking_io_detection() {
    let code = vec![
        "async fn bad_function() {",
        "    let contents = std::fs::read_to_string(\"file.txt\")?;",
        "}",
    ];

    assert_eq!(blocking_call(code[1]), Some("Blocking file I/O"));
    assert!(is_in_async_function(&code, 1));
}

#[test]
fn test_sync_function_is_acceptable() {
    let code = vec![
        "pub fn load_config() {",
        "    let contents = std::fs::read_to_string(\"client.toml\")?;",
        "}",
    ];

    assert!(blocking_call(code[1]).is_some());
    assert!(!is_in_async_function(&code, 1));
}

#[test]
fn test_async_client_is_not_blocking() {
    assert_eq!(
        blocking_call("let r = self.http_client.get(url).send().await;"),
        None
    );
    assert_eq!(
        blocking_call("let c = reqwest::blocking::Client::new();"),
        Some("Blocking HTTP client")
    );
}
