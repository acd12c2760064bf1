use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingCategory {
    #[serde(rename = "security")]
    Security,
    #[serde(rename = "performance")]
    Performance,
    #[serde(rename = "quality")]
    Quality,
    #[serde(rename = "style")]
    Style,
}

impl FindingCategory {
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "security" => Self::Security,
            "performance" => Self::Performance,
            "style" => Self::Style,
            _ => Self::Quality,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Quality => "quality",
            Self::Style => "style",
        }
    }
}

impl Default for FindingCategory {
    fn default() -> Self {
        FindingCategory::Quality
    }
}
