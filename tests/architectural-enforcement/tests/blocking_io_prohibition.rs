//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code in core and the TUI runs on the tokio
//! runtime and must never park a worker thread. `std::thread::sleep` and
//! `reqwest::blocking` are forbidden outside test code.
//!
//! Synchronous file reads during configuration loading (before the render
//! loop starts) are acceptable and not covered by this rule.

use std::fs;
use std::path::Path;

use architectural_enforcement::{production_portion, rust_sources, workspace_root};

#[test]
fn no_thread_sleep_or_blocking_http_in_production_code() {
    let root = workspace_root();
    let mut violations = Vec::new();

    check_directory(&root.join("core/src"), &mut violations);
    check_directory(&root.join("tui/src"), &mut violations);

    if !violations.is_empty() {
        eprintln!("\nBlocking calls found in production code:");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nForbidden:");
        eprintln!("  - std::thread::sleep (parks a tokio worker)");
        eprintln!("  - reqwest::blocking (blocking HTTP client)");
        eprintln!("\nUse instead:");
        eprintln!("  - tokio::time::sleep(...).await");
        eprintln!("  - the async reqwest client");

        panic!(
            "\nFound {} blocking-call violation(s) in production code.",
            violations.len()
        );
    }
}

fn check_directory(dir: &Path, violations: &mut Vec<String>) {
    for path in rust_sources(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (idx, line) in production_portion(&content).lines().enumerate() {
            let code_part = line.split("//").next().unwrap_or(line);

            if code_part.contains("thread::sleep") {
                violations.push(format!(
                    "{}:{} - blocking sleep: {}",
                    path.display(),
                    idx + 1,
                    line.trim()
                ));
            }

            if code_part.contains("reqwest::blocking") {
                violations.push(format!(
                    "{}:{} - blocking HTTP client: {}",
                    path.display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }
}
