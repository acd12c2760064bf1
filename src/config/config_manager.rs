use crate::config::constants::{OLLAMA_HOST_ENV, OLLAMA_TIMEOUT_ENV};
use crate::errors::{EnhancerError, EnhancerResult};
use crate::services::model_catalog;
use crate::structs::config::config::Config;
use std::fs;
use std::path::PathBuf;

const SAMPLE_CONFIG: &str = r#"# Enhancer configuration

[analysis]
# Quiet period (ms) before a burst of edits triggers one analysis run
delay_ms = 1000

# Reject files larger than this (bytes); default 10 MiB
max_file_size_bytes = 10485760

# Per-run budget for the analysis process (seconds)
timeout_secs = 120

security_scan = true
performance_scan = true

# Restrict analysis to these languages; empty = all supported
languages = []

# Concurrent analyses during directory batch runs
max_workers = 2

# Extra directories allowed for analysis on top of home/tmp/cwd
safe_dirs = []

[ai]
# Priority-ordered models; the first entry is the default
model_sequence = [
    "enhancer-llama:latest",
    "codestral:latest",
    "qwen2.5-coder:latest",
    "deepseek-r1:latest",
    "phi4:latest",
]

# Local Ollama daemon (OLLAMA_HOST env var overrides)
ollama_host = "http://localhost:11434"
request_timeout_secs = 120
max_retries = 3
retry_delay_secs = 2

[analyzer]
# Analysis entry point spawned by watch mode; empty = this executable
program = ""
args = ["analyze", "--format", "json"]
"#;

#[derive(Debug, Default)]
pub struct ConfigReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn print_summary(&self) {
        if self.is_valid() {
            log::info!("✅ Configuration is valid");
        } else {
            log::error!("❌ Configuration has {} error(s)", self.errors.len());
        }

        for error in &self.errors {
            log::error!("   ❌ {}", error);
        }

        for warning in &self.warnings {
            log::warn!("   ⚠️ {}", warning);
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(".enhancer/config.toml"))
    }

    /// Loads the config file if present, otherwise defaults. `OLLAMA_HOST`
    /// and `OLLAMA_TIMEOUT` env vars are applied once here; nothing else
    /// reads the environment.
    pub fn load() -> EnhancerResult<Config> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                log::debug!("📋 Loading config from {}", path.display());
                let content = fs::read_to_string(&path)?;
                toml::from_str::<Config>(&content)?
            }
            _ => Config::default(),
        };

        if let Ok(host) = std::env::var(OLLAMA_HOST_ENV) {
            if !host.trim().is_empty() {
                config.ai.ollama_host = host;
            }
        }
        if let Ok(timeout) = std::env::var(OLLAMA_TIMEOUT_ENV) {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.ai.request_timeout_secs = secs,
                _ => log::warn!("⚠️ Ignoring unparseable {} value", OLLAMA_TIMEOUT_ENV),
            }
        }

        Ok(config)
    }

    pub fn create_sample_config() -> EnhancerResult<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            EnhancerError::config("could not determine the home directory", None)
        })?;

        if path.exists() {
            return Err(EnhancerError::config(
                &format!("configuration file already exists at {}", path.display()),
                None,
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, SAMPLE_CONFIG)?;
        Ok(path)
    }

    pub fn validate_config(config: &Config) -> ConfigReport {
        let mut report = ConfigReport::default();

        if config.analysis.max_file_size_bytes == 0 {
            report
                .errors
                .push("analysis.max_file_size_bytes must be greater than 0".to_string());
        }
        if config.analysis.timeout_secs == 0 {
            report
                .errors
                .push("analysis.timeout_secs must be greater than 0".to_string());
        }
        if config.analysis.max_workers == 0 {
            report
                .errors
                .push("analysis.max_workers must be greater than 0".to_string());
        }
        if config.ai.model_sequence.is_empty() {
            report
                .errors
                .push("ai.model_sequence must contain at least one model".to_string());
        }

        for model in &config.ai.model_sequence {
            if model_catalog::provider_for_model(model).is_none() {
                report.warnings.push(format!(
                    "model '{}' is not in the known catalog; it will still be passed through",
                    model
                ));
            }
        }

        if !config.ai.ollama_host.starts_with("http://")
            && !config.ai.ollama_host.starts_with("https://")
        {
            report
                .errors
                .push(format!("ai.ollama_host '{}' is not a URL", config.ai.ollama_host));
        }

        for dir in &config.analysis.safe_dirs {
            if !PathBuf::from(dir).is_dir() {
                report
                    .warnings
                    .push(format!("analysis.safe_dirs entry '{}' does not exist", dir));
            }
        }

        report
    }
}
