//! Hygiene — source-level rules for the page-interaction layer.
//!
//! Every feature on the page is a best-effort visual affordance, so production
//! code must never panic or silently swallow a result. These tests scan
//! `src/` (test files excluded) and hold each pattern to a zero budget.

use std::fs;
use std::path::Path;

/// Patterns that may not appear in production sources.
const FORBIDDEN: &[(&str, &str)] = &[
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics on None/Err"),
    ("panic!(", "aborts the page script"),
    ("unreachable!(", "aborts the page script"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    ("let _ =", "discards a result without inspecting it"),
    (".ok()", "discards an error without logging it"),
    ("#[allow(dead_code)]", "hides unused code"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(index, line)| format!("  {}:{}: {}", file.path, index + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "src/lib.rs not scanned");
    assert!(files.iter().all(|f| !f.path.ends_with("_test.rs")));
}

#[test]
fn forbidden_patterns_stay_at_zero() {
    let files = source_files();
    let mut report = Vec::new();
    for (pattern, why) in FORBIDDEN {
        let found = hits(&files, pattern);
        if !found.is_empty() {
            report.push(format!("{pattern} ({why}): {} found\n{}", found.len(), found.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene violations:\n{}", report.join("\n"));
}

#[test]
fn every_feature_module_has_tests() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    for module in ["theme", "smooth_scroll", "reveal", "counter", "ripple", "scroll_top", "contact", "typing", "page"] {
        let test_file = src.join(format!("{module}_test.rs"));
        assert!(test_file.exists(), "missing {}", test_file.display());
    }
}
