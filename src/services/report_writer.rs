use crate::enums::report_format::ReportFormat;
use crate::structs::file_report::FileReport;
use serde_json::json;
use std::fmt::Write;

/// Renders a report in the line protocol consumed downstream: `key: number`
/// metrics and `[SEVERITY] message` findings for text, one JSON object per
/// line for the structured interchange.
pub fn render(report: &FileReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => render_json(report),
    }
}

fn render_text(report: &FileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "target: {}", report.target);
    if let Some(model) = &report.model {
        let _ = writeln!(out, "model: {}", model);
    }

    let m = &report.metrics;
    let _ = writeln!(out, "total_lines: {}", m.total_lines);
    let _ = writeln!(out, "code_lines: {}", m.code_lines);
    let _ = writeln!(out, "comment_lines: {}", m.comment_lines);
    let _ = writeln!(out, "blank_lines: {}", m.blank_lines);
    let _ = writeln!(out, "docstring_lines: {}", m.docstring_lines);
    let _ = writeln!(out, "file_size_bytes: {}", m.file_size_bytes);

    for finding in &report.findings {
        // The text form carries the location inside the message; only the
        // JSON form encodes it as a field.
        if finding.line > 1 {
            let _ = writeln!(
                out,
                "[{}] {} (line {})",
                finding.severity.tag(),
                finding.message,
                finding.line
            );
        } else {
            let _ = writeln!(out, "[{}] {}", finding.severity.tag(), finding.message);
        }
    }

    for suggestion in &report.suggestions {
        let _ = writeln!(out, "suggestion: {}", suggestion);
    }

    out
}

fn render_json(report: &FileReport) -> String {
    let mut out = String::new();

    let header = json!({ "target": report.target, "model": report.model });
    let _ = writeln!(out, "{}", header);

    let _ = writeln!(out, "{}", json!({ "metrics": report.metrics }));

    for finding in &report.findings {
        let _ = writeln!(out, "{}", serde_json::to_string(finding).unwrap_or_default());
    }

    for suggestion in &report.suggestions {
        let _ = writeln!(out, "{}", json!({ "suggestion": suggestion }));
    }

    out
}
