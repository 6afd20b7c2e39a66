//! Integration Test: Surface Isolation
//!
//! **Policy**: `quotes-core` is the headless product core. It must compile
//! and run anywhere, so it must not depend on or reference any terminal
//! surface crate. Surfaces depend on core, never the other way around.

use std::fs;

use architectural_enforcement::{rust_sources, workspace_root};

/// Crates that only a surface may use.
const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "arboard"];

#[test]
fn core_manifest_has_no_surface_dependencies() {
    let manifest_path = workspace_root().join("core/Cargo.toml");
    let manifest = fs::read_to_string(&manifest_path)
        .unwrap_or_else(|e| panic!("read {}: {e}", manifest_path.display()));

    let violations: Vec<&str> = SURFACE_CRATES
        .iter()
        .copied()
        .filter(|krate| manifest.contains(krate))
        .collect();

    assert!(
        violations.is_empty(),
        "quotes-core must stay surface-agnostic, but its manifest names: {violations:?}"
    );
}

#[test]
fn core_sources_do_not_reference_surface_crates() {
    let mut violations = Vec::new();

    for path in rust_sources(&workspace_root().join("core/src")) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (idx, line) in content.lines().enumerate() {
            // Skip comments; a doc sentence may legitimately mention a
            // surface crate by name.
            let code_part = line.split("//").next().unwrap_or(line);

            for krate in SURFACE_CRATES {
                if code_part.contains(&format!("{krate}::"))
                    || code_part.contains(&format!("use {krate}"))
                {
                    violations.push(format!(
                        "{}:{} - surface crate in core: {}",
                        path.display(),
                        idx + 1,
                        line.trim()
                    ));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nSurface crates referenced from quotes-core:");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "\nFound {} surface-isolation violation(s). Core must not know about \
             ratatui, crossterm, or arboard.",
            violations.len()
        );
    }
}
