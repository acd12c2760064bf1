use crate::helpers::config_helper::ConfigHelper;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// Quiet period before a burst of edits triggers one analysis run.
    #[serde(default = "ConfigHelper::default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "ConfigHelper::default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Per-run budget for the external analysis process.
    #[serde(default = "ConfigHelper::default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_security_scan")]
    pub security_scan: bool,

    #[serde(default = "ConfigHelper::default_performance_scan")]
    pub performance_scan: bool,

    /// Language filter; empty means every supported language is eligible.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Bound on concurrent analyses during directory batch runs.
    #[serde(default = "ConfigHelper::default_max_workers")]
    pub max_workers: usize,

    /// Extra directories allowed for analysis on top of home/tmp/cwd.
    #[serde(default)]
    pub safe_dirs: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delay_ms: ConfigHelper::default_delay_ms(),
            max_file_size_bytes: ConfigHelper::default_max_file_size_bytes(),
            timeout_secs: ConfigHelper::default_timeout_secs(),
            security_scan: ConfigHelper::default_security_scan(),
            performance_scan: ConfigHelper::default_performance_scan(),
            languages: Vec::new(),
            max_workers: ConfigHelper::default_max_workers(),
            safe_dirs: Vec::new(),
        }
    }
}
