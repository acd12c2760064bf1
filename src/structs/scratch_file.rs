use crate::errors::EnhancerResult;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk copy of content handed to an analysis process that reads a file
/// path rather than stdin. Uniquely named per request (timestamp + random
/// suffix), so concurrent requests never collide and no locking is needed.
/// Removed on drop, which covers success, failure, timeout and launch-error
/// paths alike.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn create(scratch_dir: &Path, source: &Path, content: &[u8]) -> EnhancerResult<Self> {
        fs::create_dir_all(scratch_dir)?;

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "scratch".to_string());
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");

        let mut name = format!("{}_{}_{}", stem, timestamp, &suffix[..8]);
        if let Some(ext) = source.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }

        let path = scratch_dir.join(name);
        fs::write(&path, content)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::debug!(
                    "failed to remove scratch file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}
