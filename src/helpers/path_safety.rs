use crate::errors::{EnhancerError, EnhancerResult};
use std::path::{Path, PathBuf};

/// Directories analysis is allowed to touch: home, the system temp dir and
/// the current working directory, plus anything configured on top.
pub fn default_safe_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs.push(std::env::temp_dir());
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs
}

pub fn is_safe_path(path: &Path, safe_dirs: &[PathBuf]) -> bool {
    let resolved = match path.canonicalize() {
        Ok(p) => p,
        Err(_) => return false,
    };

    safe_dirs.iter().any(|dir| {
        dir.canonicalize()
            .map(|safe| resolved.starts_with(&safe))
            .unwrap_or(false)
    })
}

pub fn ensure_safe(path: &Path, safe_dirs: &[PathBuf]) -> EnhancerResult<()> {
    if is_safe_path(path, safe_dirs) {
        Ok(())
    } else {
        Err(EnhancerError::system(
            "path safety check",
            &format!(
                "'{}' is outside the allowed directories; add it to analysis.safe_dirs to analyze it",
                path.display()
            ),
        ))
    }
}
