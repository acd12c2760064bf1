use crate::config::constants::{language_for_extension, IGNORED_DIRS};
use std::fs;
use std::path::{Path, PathBuf};

/// Collects analyzable source files under a directory, skipping build
/// output, dependency trees and hidden entries.
pub fn collect_source_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, recursive, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("⚠️ cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if recursive && !IGNORED_DIRS.contains(&name.as_str()) {
                walk(&path, recursive, files);
            }
            continue;
        }

        let supported = path
            .extension()
            .map(|e| language_for_extension(&e.to_string_lossy()).is_some())
            .unwrap_or(false);
        if supported {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_supported_files_and_skips_noise() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.py"), "x = 1\n").unwrap();
        fs::write(root.join("b.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("notes.txt"), "hello\n").unwrap();
        fs::write(root.join(".hidden.py"), "x = 1\n").unwrap();
        fs::create_dir(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules/c.js"), "let x = 1\n").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/d.py"), "y = 2\n").unwrap();

        let found = collect_source_files(root, true);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.rs", "sub/d.py"]);
    }

    #[test]
    fn non_recursive_walk_stays_at_the_top() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.py"), "x = 1\n").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/d.py"), "y = 2\n").unwrap();

        let found = collect_source_files(root, false);
        assert_eq!(found.len(), 1);
    }
}
