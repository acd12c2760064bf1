use crate::enums::finding_category::FindingCategory;
use crate::enums::severity::Severity;
use serde::{Deserialize, Serialize};

/// One issue reported for a target. Findings have no identity beyond their
/// fields and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based; 1 when the source report carried no location.
    pub line: u32,
    /// 0-based; 0 when the source report carried no location.
    pub column: u32,
    pub severity: Severity,
    pub category: FindingCategory,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, category: FindingCategory, message: &str) -> Self {
        Self {
            line: 1,
            column: 0,
            severity,
            category,
            message: message.to_string(),
        }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line.max(1);
        self
    }
}
