//! Source scanning helpers for layering contracts.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A matching source line.
pub struct Hit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Debug for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text.trim())
    }
}

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every `.rs` file under `relative_dir`, sorted.
pub fn rust_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

fn scan(relative_dir: &str, mut keep: impl FnMut(&Path, &str) -> bool) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in rust_files(relative_dir) {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, text) in content.lines().enumerate() {
            if keep(&file, text) {
                hits.push(Hit {
                    file: display_path(&file),
                    line: idx + 1,
                    text: text.to_string(),
                });
            }
        }
    }
    hits
}

/// Lines under `relative_dir` containing any of `patterns`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(relative_dir, |_, text| patterns.iter().any(|p| text.contains(p)))
}

/// Like [`find_lines_containing`], but ignores every file under one of
/// `allowed_prefixes`.
pub fn find_lines_containing_outside(
    relative_dir: &str,
    patterns: &[&str],
    allowed_prefixes: &[&str],
) -> Vec<Hit> {
    find_lines_containing(relative_dir, patterns)
        .into_iter()
        .filter(|hit| !allowed_prefixes.iter().any(|p| hit.file.starts_with(p)))
        .collect()
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}

pub fn read_relative(relative_path: &str) -> String {
    fs::read_to_string(root().join(relative_path))
        .unwrap_or_else(|e| panic!("failed to read {relative_path}: {e}"))
}

fn is_export_line(text: &str) -> bool {
    let line = text.trim();
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with("#[cfg")
        || ["pub mod ", "mod ", "pub use "]
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

/// Lines in `mod.rs` files that are not declarations, re-exports or
/// comments.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    scan(relative_dir, |file, text| {
        file.file_name().is_some_and(|name| name == "mod.rs") && !is_export_line(text)
    })
}
