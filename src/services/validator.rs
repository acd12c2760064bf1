use crate::config::constants::language_for_extension;
use crate::enums::validation_reason::ValidationReason;
use crate::structs::config::analysis_config::AnalysisConfig;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(ValidationReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Eligibility check run before any process is spawned. Pure; rejections are
/// a tagged outcome, not an error, so callers can warn instead of crash.
///
/// The three checks are independent predicates: each looks at one aspect of
/// the input and none feeds into another. The first failing check, in the
/// order extension → size → encoding, names the rejection.
pub fn validate(path: &Path, content: &[u8], config: &AnalysisConfig) -> ValidationOutcome {
    if !check_extension(path, &config.languages) {
        return ValidationOutcome::Rejected(ValidationReason::BadExtension);
    }
    if !check_size(content, config.max_file_size_bytes) {
        return ValidationOutcome::Rejected(ValidationReason::TooLarge);
    }
    if !check_encoding(content) {
        return ValidationOutcome::Rejected(ValidationReason::BadEncoding);
    }
    ValidationOutcome::Accepted
}

/// Extension must map to a supported language; when a language filter is
/// configured, that language must also be in it.
pub fn check_extension(path: &Path, language_filter: &[String]) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_string()) else {
        return false;
    };
    let Some(language) = language_for_extension(&ext) else {
        return false;
    };
    language_filter.is_empty() || language_filter.iter().any(|l| l.eq_ignore_ascii_case(language))
}

pub fn check_size(content: &[u8], max_bytes: u64) -> bool {
    content.len() as u64 <= max_bytes
}

pub fn check_encoding(content: &[u8]) -> bool {
    std::str::from_utf8(content).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn accepts_a_small_python_file() {
        let outcome = validate(Path::new("a.py"), b"print('hi')\n", &config());
        assert!(outcome.is_accepted());
    }

    #[test]
    fn rejects_unknown_extensions() {
        let outcome = validate(Path::new("a.bin"), b"data", &config());
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(ValidationReason::BadExtension)
        );
    }

    #[test]
    fn rejects_extensionless_paths() {
        assert!(!check_extension(&PathBuf::from("Makefile"), &[]));
    }

    #[test]
    fn rejects_oversized_content() {
        let mut cfg = config();
        cfg.max_file_size_bytes = 8;
        let outcome = validate(Path::new("a.py"), b"123456789", &cfg);
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(ValidationReason::TooLarge)
        );
    }

    #[test]
    fn rejects_invalid_utf8() {
        let outcome = validate(Path::new("a.py"), &[0xff, 0xfe, 0x00], &config());
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(ValidationReason::BadEncoding)
        );
    }

    #[test]
    fn language_filter_narrows_eligibility() {
        let filter = vec!["python".to_string()];
        assert!(check_extension(Path::new("a.py"), &filter));
        assert!(!check_extension(Path::new("a.rs"), &filter));
    }

    /// Altering one check's input never changes the other checks' verdicts.
    #[test]
    fn checks_are_independent() {
        let big = vec![b'x'; 32];
        let bad_utf8 = vec![0xff; 32];

        // Same content, different extension: size and encoding verdicts hold.
        assert_eq!(check_size(&big, 16), check_size(&big, 16));
        assert!(!check_encoding(&bad_utf8));
        assert!(check_extension(Path::new("a.py"), &[]));
        assert!(!check_extension(Path::new("a.unknown"), &[]));

        // Bad encoding does not affect the size verdict and vice versa.
        assert!(check_size(&bad_utf8, 64));
        assert!(!check_size(&bad_utf8, 16));
        assert!(!check_encoding(&bad_utf8));
    }
}
