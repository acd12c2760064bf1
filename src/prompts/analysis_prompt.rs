use crate::structs::analysis_request::AnalysisOptions;

/// Builds the analysis prompt for one file. Section focus follows the
/// enabled scans; the response-shape instructions keep the model's output
/// close to something the keyword distiller can work with.
pub fn build_prompt(code: &str, language: Option<&str>, options: &AnalysisOptions) -> String {
    let language = language.unwrap_or("source");

    let mut focus = vec![
        "1. Code quality issues",
        "2. Potential bugs",
        "3. Best practice violations",
    ];
    if options.security_scan {
        focus.push("4. Security vulnerabilities (injection, unsafe calls, hardcoded secrets)");
    }
    if options.performance_scan {
        focus.push("5. Performance problems");
    }

    format!(
        "Analyze this {} code. Identify:\n{}\n\nCode to analyze:\n```{}\n{}\n```\n\n\
         Report each issue on its own line and mention line numbers where \
         applicable. Then provide a numbered list of concrete improvement \
         suggestions.",
        language,
        focus.join("\n"),
        language,
        code
    )
}
