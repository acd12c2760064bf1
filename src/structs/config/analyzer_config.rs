use crate::helpers::config_helper::ConfigHelper;
use serde::{Deserialize, Serialize};

/// The external analysis entry point spawned by the watch pipeline.
/// An empty `program` means the current executable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub program: String,

    /// Arguments placed before the positional scratch-file path.
    #[serde(default = "ConfigHelper::default_analyzer_args")]
    pub args: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: ConfigHelper::default_analyzer_args(),
        }
    }
}
