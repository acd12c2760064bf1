use serde::{Deserialize, Serialize};

/// Reason codes for rejecting a unit of work before any process is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationReason {
    #[serde(rename = "bad_extension")]
    BadExtension,
    #[serde(rename = "too_large")]
    TooLarge,
    #[serde(rename = "bad_encoding")]
    BadEncoding,
}

impl ValidationReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::BadExtension => "file extension is not a supported source type",
            Self::TooLarge => "content exceeds the configured maximum size",
            Self::BadEncoding => "content is not valid UTF-8",
        }
    }
}
