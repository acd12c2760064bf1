use crate::structs::scratch_file::ScratchFile;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub security_scan: bool,
    pub performance_scan: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            security_scan: true,
            performance_scan: true,
        }
    }
}

/// Invocation descriptor for one analysis attempt. Immutable once built;
/// owns its scratch artifact, which is deleted when the request is dropped.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub target: PathBuf,
    pub model: String,
    pub options: AnalysisOptions,
    pub program: PathBuf,
    pub args: Vec<String>,
    scratch: ScratchFile,
}

impl AnalysisRequest {
    pub(crate) fn new(
        target: PathBuf,
        model: String,
        options: AnalysisOptions,
        program: PathBuf,
        args: Vec<String>,
        scratch: ScratchFile,
    ) -> Self {
        Self {
            target,
            model,
            options,
            program,
            args,
            scratch,
        }
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }
}
