//! Panic-Free Production Code
//!
//! Production code propagates errors instead of unwrapping them, and does not
//! silence dead code warnings. Everything from a file's `mod tests` block
//! onwards is treated as test code and exempt.

use std::fs;
use std::path::{Path, PathBuf};

const BANNED_PATTERNS: [&str; 3] = [".unwrap()", ".expect(", "#[allow(dead_code)]"];

/// A banned pattern found in production code
#[derive(Debug)]
struct Violation {
    file_path: String,
    line_number: usize,
    context: String,
}

/// Collects violations across the workspace crates
struct PanicChecker {
    violations: Vec<Violation>,
    files_checked: usize,
}

impl PanicChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    /// Source directories of every workspace crate except this one
    fn crate_source_dirs() -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir("..")? {
            let path = entry?.path();
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if name.starts_with("leadhunter-") && name != "leadhunter-tests" {
                dirs.push(path.join("src"));
            }
        }
        Ok(dirs)
    }

    fn find_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::find_rust_files(&path, files)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    fn check_source(&mut self, file_path: &str, content: &str) {
        self.files_checked += 1;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed == "mod tests {" {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            if BANNED_PATTERNS.iter().any(|pattern| trimmed.contains(pattern)) {
                self.violations.push(Violation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    context: trimmed.to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut files = Vec::new();
        for dir in Self::crate_source_dirs()? {
            Self::find_rust_files(&dir, &mut files)?;
        }
        for file in files {
            let content = fs::read_to_string(&file)?;
            self.check_source(&file.to_string_lossy(), &content);
        }
        Ok(())
    }

    fn report_violations(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Panic-free check: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        println!("Banned patterns in production code:");
        for violation in &self.violations {
            println!("{}:{}", violation.file_path, violation.line_number);
            println!("  {}", violation.context);
        }
        println!();
        println!("Propagate the error with `?` or handle it explicitly.");

        false
    }
}
