use crate::helpers::config_helper::ConfigHelper;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    /// Priority-ordered models; the first entry is the default when none is
    /// requested. Availability is not probed here.
    #[serde(default = "ConfigHelper::default_model_sequence")]
    pub model_sequence: Vec<String>,

    #[serde(default = "ConfigHelper::default_ollama_host")]
    pub ollama_host: String,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "ConfigHelper::default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model_sequence: ConfigHelper::default_model_sequence(),
            ollama_host: ConfigHelper::default_ollama_host(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
            max_retries: ConfigHelper::default_max_retries(),
            retry_delay_secs: ConfigHelper::default_retry_delay_secs(),
        }
    }
}
