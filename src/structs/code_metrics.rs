use serde::{Deserialize, Serialize};

/// Line-count metrics for one analyzed file.
///
/// Invariant (maintained by the metrics computation, deliberately NOT
/// enforced when parsing foreign reports):
/// `total_lines == code_lines + comment_lines + blank_lines`.
/// Docstring lines are counted inside `comment_lines`, not additively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMetrics {
    pub total_lines: u64,
    pub code_lines: u64,
    pub comment_lines: u64,
    pub blank_lines: u64,
    pub docstring_lines: u64,
    pub file_size_bytes: u64,
}

impl CodeMetrics {
    pub fn is_consistent(&self) -> bool {
        self.total_lines == self.code_lines + self.comment_lines + self.blank_lines
    }
}
