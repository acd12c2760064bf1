use crate::structs::code_metrics::CodeMetrics;
use crate::structs::finding::Finding;

/// What the `analyze` entry point produces for one file before rendering.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub target: String,
    pub metrics: CodeMetrics,
    pub findings: Vec<Finding>,
    pub suggestions: Vec<String>,
    /// Model that actually answered, when the AI pass ran.
    pub model: Option<String>,
}
