use crate::enums::validation_reason::ValidationReason;
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum EnhancerError {
    /// The target was rejected before any work started.
    Validation {
        path: String,
        reason: ValidationReason,
    },
    /// The analysis process could not be started at all.
    Launch {
        program: String,
        reason: String,
    },
    /// The analysis process ran and exited non-zero.
    AnalysisFailed {
        target: String,
        exit_code: i32,
        stderr: String,
    },
    /// The analysis process exceeded its time budget and was terminated.
    Timeout {
        target: String,
        waited_ms: u64,
    },
    Configuration {
        message: String,
        field: Option<String>,
    },
    Network {
        operation: String,
        reason: String,
    },
    Parse {
        content_type: String,
        reason: String,
    },
    System {
        operation: String,
        reason: String,
    },
}

impl EnhancerError {
    pub fn validation(path: &str, reason: ValidationReason) -> Self {
        Self::Validation {
            path: path.to_string(),
            reason,
        }
    }

    pub fn launch(program: &str, reason: &str) -> Self {
        Self::Launch {
            program: program.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_failed(target: &str, exit_code: i32, stderr: &str) -> Self {
        Self::AnalysisFailed {
            target: target.to_string(),
            exit_code,
            stderr: stderr.to_string(),
        }
    }

    pub fn timeout(target: &str, waited_ms: u64) -> Self {
        Self::Timeout {
            target: target.to_string(),
            waited_ms,
        }
    }

    pub fn config(message: &str, field: Option<&str>) -> Self {
        Self::Configuration {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
        }
    }

    pub fn network(operation: &str, reason: &str) -> Self {
        Self::Network {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(content_type: &str, reason: &str) -> Self {
        Self::Parse {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system(operation: &str, reason: &str) -> Self {
        Self::System {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { path, reason } => {
                format!("Validation failed for '{}': {}", path, reason.describe())
            }
            Self::Launch { program, reason } => {
                format!(
                    "Could not start analysis process '{}': {}\n💡 Check that the executable exists and is on PATH",
                    program, reason
                )
            }
            Self::AnalysisFailed {
                target,
                exit_code,
                stderr,
            } => {
                let mut msg = format!("Analysis of '{}' failed (exit code {})", target, exit_code);
                if !stderr.trim().is_empty() {
                    msg.push_str(&format!("\n{}", stderr.trim()));
                }
                msg
            }
            Self::Timeout { target, waited_ms } => {
                format!("Analysis of '{}' timed out after {} ms", target, waited_ms)
            }
            Self::Configuration { message, field } => {
                let mut msg = format!("Configuration error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                msg
            }
            Self::Network { operation, reason } => {
                format!(
                    "Network error during {}: {}\n💡 Check that the Ollama daemon is running",
                    operation, reason
                )
            }
            Self::Parse {
                content_type,
                reason,
            } => {
                format!("Parse error in {}: {}", content_type, reason)
            }
            Self::System { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }

    /// Errors a caller can reasonably retry or fix without restarting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout { .. }
                | Self::AnalysisFailed { .. }
                | Self::Configuration { .. }
        )
    }
}

impl fmt::Display for EnhancerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for EnhancerError {}

pub type EnhancerResult<T> = Result<T, EnhancerError>;

impl From<std::io::Error> for EnhancerError {
    fn from(error: std::io::Error) -> Self {
        EnhancerError::System {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnhancerError {
    fn from(error: serde_json::Error) -> Self {
        EnhancerError::Parse {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for EnhancerError {
    fn from(error: toml::de::Error) -> Self {
        EnhancerError::Parse {
            content_type: "TOML".to_string(),
            reason: error.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for EnhancerError {
    fn from(error: reqwest::Error) -> Self {
        EnhancerError::Network {
            operation: "HTTP request".to_string(),
            reason: error.to_string(),
        }
    }
}
