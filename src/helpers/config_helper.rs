use crate::config::constants;
use crate::services::model_catalog;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_delay_ms() -> u64 {
        constants::DEFAULT_ANALYSIS_DELAY_MS
    }

    pub fn default_max_file_size_bytes() -> u64 {
        constants::DEFAULT_MAX_FILE_SIZE_BYTES
    }

    pub fn default_timeout_secs() -> u64 {
        constants::DEFAULT_RUN_TIMEOUT_SECS
    }

    pub fn default_security_scan() -> bool {
        true
    }

    pub fn default_performance_scan() -> bool {
        true
    }

    pub fn default_max_workers() -> usize {
        constants::DEFAULT_MAX_WORKERS
    }

    pub fn default_model_sequence() -> Vec<String> {
        model_catalog::DEFAULT_MODEL_SEQUENCE
            .iter()
            .map(|m| m.to_string())
            .collect()
    }

    pub fn default_ollama_host() -> String {
        constants::DEFAULT_OLLAMA_HOST.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        constants::DEFAULT_AI_REQUEST_TIMEOUT_SECS
    }

    pub fn default_max_retries() -> u32 {
        constants::DEFAULT_MAX_RETRIES
    }

    pub fn default_retry_delay_secs() -> u64 {
        constants::DEFAULT_RETRY_DELAY_SECS
    }

    pub fn default_analyzer_args() -> Vec<String> {
        vec![
            "analyze".to_string(),
            "--format".to_string(),
            "json".to_string(),
        ]
    }
}
