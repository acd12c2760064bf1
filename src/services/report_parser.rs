use crate::config::constants::METRIC_KEYS;
use crate::enums::finding_category::FindingCategory;
use crate::enums::severity::Severity;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::code_metrics::CodeMetrics;
use crate::structs::finding::Finding;
use serde::Deserialize;

/// One line of the JSON interchange. Untagged: the field set decides the
/// variant, so variants with required marker fields come first.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)] // header/suggestion payloads are recognized, not consumed
enum ReportLine {
    Metrics { metrics: JsonMetrics },
    Header { target: String },
    Suggestion { suggestion: String },
    Finding(JsonFinding),
}

#[derive(Deserialize, Default)]
struct JsonMetrics {
    total_lines: Option<u64>,
    code_lines: Option<u64>,
    comment_lines: Option<u64>,
    blank_lines: Option<u64>,
    docstring_lines: Option<u64>,
    file_size_bytes: Option<u64>,
}

#[derive(Deserialize)]
struct JsonFinding {
    severity: Option<String>,
    category: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
    message: String,
}

/// Converts an analysis process's line-oriented output into structured form.
/// Never fails: unknown lines are skipped, absent metrics default to 0, and
/// malformed candidate lines only set the `degraded` flag. The CodeMetrics
/// sum invariant is deliberately not enforced here; an inconsistent upstream
/// report yields an inconsistent but usable result.
pub fn parse(raw: &str, target: &str) -> AnalysisResult {
    let mut metrics = CodeMetrics::default();
    let mut findings = Vec::new();
    let mut degraded = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('{') {
            match serde_json::from_str::<ReportLine>(trimmed) {
                Ok(ReportLine::Finding(f)) => findings.push(finding_from_json(f)),
                Ok(ReportLine::Metrics { metrics: m }) => apply_json_metrics(&mut metrics, &m),
                Ok(ReportLine::Header { .. }) | Ok(ReportLine::Suggestion { .. }) => {}
                Err(_) => degraded = true,
            }
            continue;
        }

        if let Some(finding) = parse_bracket_finding(trimmed) {
            findings.push(finding);
            continue;
        }

        parse_metric_line(trimmed, &mut metrics, &mut degraded);
    }

    AnalysisResult {
        target: target.to_string(),
        findings,
        metrics,
        raw: raw.to_string(),
        degraded,
    }
}

/// `[SEVERITY] message text`. The token is lower-cased and matched against
/// the severity enum, defaulting to `low`. The text form carries no
/// location, so findings land at (line 1, column 0); the JSON interchange
/// carries real positions.
fn parse_bracket_finding(line: &str) -> Option<Finding> {
    let rest = line.strip_prefix('[')?;
    let (token, message) = rest.split_once(']')?;
    let message = message.trim();
    if token.is_empty() || token.contains(char::is_whitespace) || message.is_empty() {
        return None;
    }

    Some(Finding::new(
        Severity::from_token(token),
        FindingCategory::default(),
        message,
    ))
}

/// `key: number` where key is one of the fixed metric names. Returns whether
/// the line named a known metric; a non-numeric value degrades the result
/// but leaves the field at its default.
fn parse_metric_line(line: &str, metrics: &mut CodeMetrics, degraded: &mut bool) -> bool {
    let Some((key, value)) = line.split_once(':') else {
        return false;
    };
    let key = key.trim();
    if !METRIC_KEYS.contains(&key) {
        return false;
    }

    match value.trim().parse::<u64>() {
        Ok(number) => set_metric(metrics, key, number),
        Err(_) => *degraded = true,
    }
    true
}

fn set_metric(metrics: &mut CodeMetrics, key: &str, value: u64) {
    match key {
        "total_lines" => metrics.total_lines = value,
        "code_lines" => metrics.code_lines = value,
        "comment_lines" => metrics.comment_lines = value,
        "blank_lines" => metrics.blank_lines = value,
        "docstring_lines" => metrics.docstring_lines = value,
        "file_size_bytes" => metrics.file_size_bytes = value,
        _ => {}
    }
}

fn apply_json_metrics(metrics: &mut CodeMetrics, json: &JsonMetrics) {
    metrics.total_lines = json.total_lines.unwrap_or(0);
    metrics.code_lines = json.code_lines.unwrap_or(0);
    metrics.comment_lines = json.comment_lines.unwrap_or(0);
    metrics.blank_lines = json.blank_lines.unwrap_or(0);
    metrics.docstring_lines = json.docstring_lines.unwrap_or(0);
    metrics.file_size_bytes = json.file_size_bytes.unwrap_or(0);
}

fn finding_from_json(json: JsonFinding) -> Finding {
    Finding {
        line: json.line.unwrap_or(1).max(1),
        column: json.column.unwrap_or(0),
        severity: json
            .severity
            .as_deref()
            .map(Severity::from_token)
            .unwrap_or_default(),
        category: json
            .category
            .as_deref()
            .map(FindingCategory::from_token)
            .unwrap_or_default(),
        message: json.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_metrics_and_a_low_finding() {
        let raw = "total_lines: 1\ncode_lines: 1\n[LOW] trivial statement";
        let result = parse(raw, "a.py");

        assert_eq!(result.metrics.total_lines, 1);
        assert_eq!(result.metrics.code_lines, 1);
        assert_eq!(result.metrics.blank_lines, 0);
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].severity, Severity::Low);
        assert_eq!(result.findings[0].message, "trivial statement");
        assert_eq!(result.findings[0].line, 1);
        assert_eq!(result.findings[0].column, 0);
        assert!(!result.degraded);
    }

    #[test]
    fn consistent_metrics_satisfy_the_sum_invariant() {
        let raw = "total_lines: 100\ncode_lines: 60\ncomment_lines: 20\nblank_lines: 20";
        let result = parse(raw, "a.py");
        assert!(result.metrics.is_consistent());
    }

    #[test]
    fn missing_metric_defaults_to_zero_without_failing() {
        let raw = "total_lines: 100\ncode_lines: 60\ncomment_lines: 20";
        let result = parse(raw, "a.py");
        assert_eq!(result.metrics.blank_lines, 0);
        // Inconsistent but non-fatal; the parser does not police the invariant.
        assert!(!result.metrics.is_consistent());
        assert!(!result.degraded);
    }

    #[test]
    fn unknown_severity_token_defaults_to_low() {
        let result = parse("[BOGUS] something odd", "a.py");
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].severity, Severity::Low);
    }

    #[test]
    fn severity_token_matching_is_case_insensitive() {
        let result = parse("[critical] hardcoded secret\n[High] injection risk", "a.py");
        assert_eq!(result.findings[0].severity, Severity::Critical);
        assert_eq!(result.findings[1].severity, Severity::High);
    }

    #[test]
    fn non_numeric_metric_degrades_but_keeps_going() {
        let raw = "total_lines: lots\ncode_lines: 3\n[LOW] fine";
        let result = parse(raw, "a.py");
        assert!(result.degraded);
        assert_eq!(result.metrics.total_lines, 0);
        assert_eq!(result.metrics.code_lines, 3);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn json_findings_carry_real_positions() {
        let raw = r#"{"severity":"high","category":"security","line":12,"column":4,"message":"dangerous call to eval()"}"#;
        let result = parse(raw, "a.py");
        assert_eq!(result.findings.len(), 1);
        let f = &result.findings[0];
        assert_eq!(f.line, 12);
        assert_eq!(f.column, 4);
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.category, FindingCategory::Security);
    }

    #[test]
    fn json_metrics_line_is_understood() {
        let raw = r#"{"metrics":{"total_lines":3,"code_lines":2,"comment_lines":0,"blank_lines":1,"docstring_lines":0,"file_size_bytes":27}}"#;
        let result = parse(raw, "a.py");
        assert_eq!(result.metrics.total_lines, 3);
        assert_eq!(result.metrics.file_size_bytes, 27);
        assert!(result.metrics.is_consistent());
    }

    #[test]
    fn header_and_suggestion_lines_are_not_findings() {
        let raw = "{\"target\":\"a.py\"}\n{\"suggestion\":\"use f-strings\"}\n[LOW] ok";
        let result = parse(raw, "a.py");
        assert_eq!(result.findings.len(), 1);
        assert!(!result.degraded);
    }

    #[test]
    fn malformed_json_line_sets_the_degraded_flag() {
        let result = parse("{not json at all", "a.py");
        assert!(result.degraded);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn prose_and_banners_are_ignored() {
        let raw = "ENHANCER report\n================\nall good here\ntotal_lines: 2";
        let result = parse(raw, "a.py");
        assert_eq!(result.metrics.total_lines, 2);
        assert!(result.findings.is_empty());
        assert!(!result.degraded);
    }

    #[test]
    fn raw_output_is_kept_verbatim() {
        let raw = "total_lines: 1\nsomething unstructured";
        let result = parse(raw, "a.py");
        assert_eq!(result.raw, raw);
        assert_eq!(result.target, "a.py");
    }

    proptest! {
        /// Any metric values survive a render-through-text round trip.
        #[test]
        fn metric_values_round_trip(
            total in 0u64..1_000_000,
            code in 0u64..1_000_000,
            comment in 0u64..1_000_000,
            blank in 0u64..1_000_000,
        ) {
            let raw = format!(
                "total_lines: {}\ncode_lines: {}\ncomment_lines: {}\nblank_lines: {}",
                total, code, comment, blank
            );
            let result = parse(&raw, "a.py");
            prop_assert_eq!(result.metrics.total_lines, total);
            prop_assert_eq!(result.metrics.code_lines, code);
            prop_assert_eq!(result.metrics.comment_lines, comment);
            prop_assert_eq!(result.metrics.blank_lines, blank);
            prop_assert!(!result.degraded);
        }

        /// The parser never panics and never produces a finding at line 0.
        #[test]
        fn arbitrary_input_never_breaks_the_parser(raw in "\\PC*") {
            let result = parse(&raw, "a.py");
            for finding in &result.findings {
                prop_assert!(finding.line >= 1);
            }
        }
    }
}
