use crate::config::constants::default_scratch_dir;
use crate::errors::{EnhancerError, EnhancerResult};
use crate::structs::analysis_request::{AnalysisOptions, AnalysisRequest};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::analyzer_config::AnalyzerConfig;
use crate::structs::scratch_file::ScratchFile;
use std::path::{Path, PathBuf};

/// Turns (path, content, model, options) into an invocation descriptor for
/// the analysis process. Synchronous; the only side effect is the scratch
/// artifact, whose lifetime is tied to the returned request.
pub struct RequestBuilder {
    program: PathBuf,
    base_args: Vec<String>,
    model_sequence: Vec<String>,
    scratch_dir: PathBuf,
}

impl RequestBuilder {
    pub fn new(
        program: PathBuf,
        base_args: Vec<String>,
        model_sequence: Vec<String>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            program,
            base_args,
            model_sequence,
            scratch_dir,
        }
    }

    /// An empty configured program means the current executable: watch mode
    /// spawns its own `analyze` subcommand, the way the editor extension
    /// spawns the CLI.
    pub fn from_config(ai: &AiConfig, analyzer: &AnalyzerConfig) -> EnhancerResult<Self> {
        let program = if analyzer.program.trim().is_empty() {
            std::env::current_exe()
                .map_err(|e| EnhancerError::system("resolving current executable", &e.to_string()))?
        } else {
            PathBuf::from(&analyzer.program)
        };

        Ok(Self::new(
            program,
            analyzer.args.clone(),
            ai.model_sequence.clone(),
            default_scratch_dir(),
        ))
    }

    pub fn build(
        &self,
        target: &Path,
        content: &[u8],
        model: Option<&str>,
        options: AnalysisOptions,
    ) -> EnhancerResult<AnalysisRequest> {
        // First entry of the priority-ordered sequence; availability is the
        // analysis process's problem, not ours.
        let model = match model {
            Some(m) => m.to_string(),
            None => self
                .model_sequence
                .first()
                .cloned()
                .ok_or_else(|| {
                    EnhancerError::config("model sequence is empty", Some("ai.model_sequence"))
                })?,
        };

        let scratch = ScratchFile::create(&self.scratch_dir, target, content)?;

        let mut args = self.base_args.clone();
        args.push(scratch.path().to_string_lossy().to_string());
        args.push("--model".to_string());
        args.push(model.clone());
        if !options.security_scan {
            args.push("--no-security-scan".to_string());
        }
        if !options.performance_scan {
            args.push("--no-performance-scan".to_string());
        }

        Ok(AnalysisRequest::new(
            target.to_path_buf(),
            model,
            options,
            self.program.clone(),
            args,
            scratch,
        ))
    }
}
