use crate::structs::code_metrics::CodeMetrics;

/// Line-comment markers per language; the fallback covers everything else.
fn comment_prefixes(language: Option<&str>) -> &'static [&'static str] {
    match language {
        Some("python") | Some("shell") | Some("ruby") => &["#"],
        Some("rust") | Some("javascript") | Some("typescript") | Some("java") | Some("go")
        | Some("cpp") | Some("c") | Some("php") => &["//"],
        Some("lua") | Some("sql") => &["--"],
        _ => &["#", "//"],
    }
}

/// Classifies every line as exactly one of code, comment or blank, so
/// `total_lines == code_lines + comment_lines + blank_lines` holds by
/// construction. Python docstring lines are counted inside `comment_lines`
/// and tracked separately in `docstring_lines`.
pub fn compute_metrics(content: &str, language: Option<&str>) -> CodeMetrics {
    let prefixes = comment_prefixes(language);
    let track_docstrings = language == Some("python");

    let mut metrics = CodeMetrics {
        file_size_bytes: content.len() as u64,
        ..CodeMetrics::default()
    };

    let mut in_docstring = false;

    for line in content.lines() {
        metrics.total_lines += 1;
        let trimmed = line.trim();

        if in_docstring {
            metrics.comment_lines += 1;
            metrics.docstring_lines += 1;
            if trimmed.contains("\"\"\"") || trimmed.contains("'''") {
                in_docstring = false;
            }
            continue;
        }

        if trimmed.is_empty() {
            metrics.blank_lines += 1;
            continue;
        }

        if track_docstrings && (trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''")) {
            metrics.comment_lines += 1;
            metrics.docstring_lines += 1;
            let quote = if trimmed.starts_with("\"\"\"") { "\"\"\"" } else { "'''" };
            // One-line docstring closes on the same line.
            if trimmed.len() < 6 || !trimmed[3..].contains(quote) {
                in_docstring = true;
            }
            continue;
        }

        if prefixes.iter().any(|p| trimmed.starts_with(p)) {
            metrics.comment_lines += 1;
            continue;
        }

        metrics.code_lines += 1;
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_script_is_one_code_line() {
        let metrics = compute_metrics("print('hi')\n", Some("python"));
        assert_eq!(metrics.total_lines, 1);
        assert_eq!(metrics.code_lines, 1);
        assert_eq!(metrics.comment_lines, 0);
        assert_eq!(metrics.blank_lines, 0);
        assert_eq!(metrics.file_size_bytes, 12);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn python_lines_classify_by_kind() {
        let source = "\
# header comment

def f():
    \"\"\"Docstring line one.
    Line two.
    \"\"\"
    return 1
";
        let metrics = compute_metrics(source, Some("python"));
        assert_eq!(metrics.total_lines, 7);
        assert_eq!(metrics.comment_lines, 4); // 1 comment + 3 docstring lines
        assert_eq!(metrics.docstring_lines, 3);
        assert_eq!(metrics.blank_lines, 1);
        assert_eq!(metrics.code_lines, 2);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn one_line_docstring_does_not_swallow_the_file() {
        let source = "\"\"\"Module docstring.\"\"\"\nx = 1\n";
        let metrics = compute_metrics(source, Some("python"));
        assert_eq!(metrics.docstring_lines, 1);
        assert_eq!(metrics.code_lines, 1);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn rust_comments_use_slashes() {
        let source = "// top\nfn main() {}\n\n";
        let metrics = compute_metrics(source, Some("rust"));
        assert_eq!(metrics.comment_lines, 1);
        assert_eq!(metrics.code_lines, 1);
        assert_eq!(metrics.blank_lines, 1);
        assert_eq!(metrics.docstring_lines, 0);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn the_invariant_holds_for_unknown_languages() {
        let source = "# maybe comment\nwords\n\n// also comment\n";
        let metrics = compute_metrics(source, None);
        assert!(metrics.is_consistent());
    }
}
