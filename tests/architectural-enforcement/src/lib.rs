//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce the workspace's
//! architectural rules:
//! - `quotes-core` stays surface-agnostic (no ratatui/crossterm/arboard)
//! - No blocking sleeps or blocking HTTP clients in production code
//!
//! The tests live in `tests/`; this library holds the shared scanning
//! helpers.

use std::path::{Path, PathBuf};

/// Root of the workspace, resolved from this package's manifest directory.
///
/// The tests run with the package directory as the working directory, so
/// relative paths would silently scan nothing; anchoring on
/// `CARGO_MANIFEST_DIR` keeps them honest wherever cargo is invoked from.
pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .expect("workspace root should resolve")
}

/// All `.rs` files under `dir`, recursively.
pub fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|entry| entry.into_path())
        .collect();
    sources.sort();
    sources
}

/// Strip the in-module test code from a source file.
///
/// Test modules sit at the end of files in this workspace, so everything
/// from the first `#[cfg(test)]` on is test-only and exempt from the
/// production-code rules.
pub fn production_portion(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_root_contains_the_members() {
        let root = workspace_root();
        assert!(root.join("core/Cargo.toml").exists());
        assert!(root.join("tui/Cargo.toml").exists());
    }

    #[test]
    fn production_portion_cuts_at_the_test_module() {
        let content = "fn a() {}\n#[cfg(test)]\nmod tests {}\n";
        assert_eq!(production_portion(content), "fn a() {}\n");
        assert_eq!(production_portion("fn a() {}\n"), "fn a() {}\n");
    }
}
