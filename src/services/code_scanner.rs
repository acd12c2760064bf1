use crate::config::constants::MAX_LINE_LENGTH;
use crate::enums::finding_category::FindingCategory;
use crate::enums::severity::Severity;
use crate::structs::analysis_request::AnalysisOptions;
use crate::structs::finding::Finding;

const DANGEROUS_CALLS: &[&str] = &["eval(", "exec(", "os.system(", "shell=True"];

const SECRET_MARKERS: &[&str] = &["api_key", "apikey", "secret", "password", "private_key"];

/// Static per-line rule scan. Fast, language-agnostic heuristics; findings
/// carry real line numbers.
pub fn scan(content: &str, options: &AnalysisOptions) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = (index + 1) as u32;
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if line.chars().count() > MAX_LINE_LENGTH {
            findings.push(
                Finding::new(
                    Severity::Low,
                    FindingCategory::Style,
                    &format!("line exceeds {} characters", MAX_LINE_LENGTH),
                )
                .at_line(line_number),
            );
        }

        if trimmed.contains("TODO") || trimmed.contains("FIXME") {
            findings.push(
                Finding::new(
                    Severity::Low,
                    FindingCategory::Quality,
                    "TODO/FIXME comment found",
                )
                .at_line(line_number),
            );
        }

        if trimmed == "except:" {
            findings.push(
                Finding::new(
                    Severity::Medium,
                    FindingCategory::Quality,
                    "bare except swallows every exception",
                )
                .at_line(line_number),
            );
        }

        if options.security_scan {
            for call in DANGEROUS_CALLS {
                if trimmed.contains(call) {
                    findings.push(
                        Finding::new(
                            Severity::High,
                            FindingCategory::Security,
                            &format!("dangerous call: {}", call.trim_end_matches('(')),
                        )
                        .at_line(line_number),
                    );
                }
            }

            if lowered.contains('=')
                && SECRET_MARKERS.iter().any(|m| lowered.contains(m))
                && (lowered.contains('"') || lowered.contains('\''))
            {
                findings.push(
                    Finding::new(
                        Severity::Critical,
                        FindingCategory::Security,
                        "possible hardcoded secret",
                    )
                    .at_line(line_number),
                );
            }
        }

        if options.performance_scan {
            if lowered.contains("select *") {
                findings.push(
                    Finding::new(
                        Severity::Medium,
                        FindingCategory::Performance,
                        "SELECT * fetches more than needed",
                    )
                    .at_line(line_number),
                );
            }

            if trimmed.contains(".readlines()") {
                findings.push(
                    Finding::new(
                        Severity::Low,
                        FindingCategory::Performance,
                        ".readlines() loads the whole file into memory",
                    )
                    .at_line(line_number),
                );
            }
        }
    }

    findings
}
