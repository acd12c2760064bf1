use crate::enums::severity::Severity;
use crate::structs::code_metrics::CodeMetrics;
use crate::structs::finding::Finding;
use serde::{Deserialize, Serialize};

/// Structured form of one analysis run's output. Replaced wholesale by the
/// next result for the same target; never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub target: String,
    pub findings: Vec<Finding>,
    pub metrics: CodeMetrics,
    /// Captured process output, kept for fallback display.
    pub raw: String,
    /// Set when some report lines could not be understood; the result is
    /// still usable with defaulted fields.
    pub degraded: bool,
}

impl AnalysisResult {
    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}
