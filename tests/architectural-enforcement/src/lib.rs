//! Architectural Enforcement Helpers
//!
//! Source-scanning helpers shared by the enforcement tests:
//! - No sleeping outside the timing exercise
//! - No blocking I/O inside async functions
//! - No `unwrap()`/`expect()` in library code
//!
//! The scanners are line based. Test code is recognised by the convention
//! that each file's `#[cfg(test)]` module comes last.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
pub const PRODUCTION_SOURCE_DIRS: &[&str] = &["orgclient/core/src"];

/// A rule violation at a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the violation
    pub path: PathBuf,
    /// One-based line number
    pub line_number: usize,
    /// Offending line, trimmed
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line_number, self.line)
    }
}

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// All `.rs` files under `dir`
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// All production `.rs` files in the workspace
pub fn production_files() -> Vec<PathBuf> {
    let root = workspace_root();
    PRODUCTION_SOURCE_DIRS
        .iter()
        .flat_map(|dir| rust_files(&root.join(dir)))
        .collect()
}

/// The line with any `//` comment removed
///
/// A `//` inside a string literal (such as a URL) is code, not a comment.
pub fn code_part(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' if in_string => idx += 1,
            b'"' => in_string = !in_string,
            // '"' char literal
            b'\'' if !in_string && bytes.get(idx + 1) == Some(&b'"') => idx += 2,
            b'/' if !in_string && bytes.get(idx + 1) == Some(&b'/') => return &line[..idx],
            _ => {}
        }
        idx += 1;
    }
    line
}

/// Whether `lines[current_idx]` is at or after the file's `#[cfg(test)]` item
pub fn is_in_test_code(lines: &[&str], current_idx: usize) -> bool {
    lines[..=current_idx]
        .iter()
        .any(|line| line.trim_start().starts_with("#[cfg(test)]"))
}

/// Strip a leading visibility qualifier
fn strip_visibility(line: &str) -> &str {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("pub(crate) ") {
        rest
    } else if let Some(rest) = line.strip_prefix("pub ") {
        rest
    } else {
        line
    }
}

/// Whether the nearest enclosing `fn` above `current_idx` is async
pub fn is_in_async_function(lines: &[&str], current_idx: usize) -> bool {
    for i in (0..=current_idx).rev() {
        let line = strip_visibility(lines[i]);

        if line.starts_with("async fn ") {
            return true;
        }
        if line.starts_with("fn ") || line.starts_with("const fn ") {
            return false;
        }

        // Stop at module/impl boundaries
        if line.starts_with("mod ") || (line.starts_with("impl") && line.contains('{')) {
            return false;
        }
    }
    false
}

/// Scan production files, reporting lines for which `is_violation` holds
///
/// `is_violation` receives the file path, all lines, and the line index.
/// Comment text and test code are never passed to it.
pub fn scan_production<F>(is_violation: F) -> Vec<Violation>
where
    F: Fn(&Path, &[&str], usize) -> bool,
{
    let mut violations = Vec::new();

    for path in production_files() {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let lines: Vec<&str> = content.lines().collect();

        for idx in 0..lines.len() {
            if is_in_test_code(&lines, idx) {
                break;
            }
            if is_violation(&path, &lines, idx) {
                violations.push(Violation {
                    path: path.clone(),
                    line_number: idx + 1,
                    line: lines[idx].trim().to_string(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_sources_are_found() {
        let files = production_files();
        assert!(
            files.iter().any(|p| p.ends_with("orgclient/core/src/lib.rs")),
            "Expected to find orgclient/core/src/lib.rs, found {files:?}"
        );
    }

    #[test]
    fn test_code_part_strips_comments() {
        assert_eq!(code_part("let x = 1; // note"), "let x = 1; ");
        assert_eq!(code_part("/// docs"), "");
    }

    #[test]
    fn test_code_part_keeps_urls_in_strings() {
        let line = r#"let v = get("https://api.github.com").unwrap(); // fetch"#;
        assert_eq!(code_part(line), r#"let v = get("https://api.github.com").unwrap(); "#);

        let escaped = r#"let s = "say \"//\"".len(); // trailing"#;
        assert_eq!(code_part(escaped), r#"let s = "say \"//\"".len(); "#);

        assert_eq!(code_part(r#"let q = '"'; // quote"#), r#"let q = '"'; "#);
    }

    #[test]
    fn test_async_function_detection() {
        let code = vec![
            "impl Fetcher {",
            "    pub async fn get(&self) {",
            "        std::fs::read_to_string(\"x\");",
            "    }",
            "    pub fn load() {",
            "        std::fs::read_to_string(\"x\");",
            "    }",
            "}",
        ];

        assert!(is_in_async_function(&code, 2));
        assert!(!is_in_async_function(&code, 5));
    }

    #[test]
    fn test_test_code_detection() {
        let code = vec!["fn real() {}", "#[cfg(test)]", "mod tests {", "    fn t() {}", "}"];

        assert!(!is_in_test_code(&code, 0));
        assert!(is_in_test_code(&code, 3));
    }
}
