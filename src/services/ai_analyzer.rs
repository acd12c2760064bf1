use crate::enums::finding_category::FindingCategory;
use crate::enums::severity::Severity;
use crate::prompts::analysis_prompt;
use crate::services::model_catalog;
use crate::services::ollama::OllamaClient;
use crate::structs::analysis_request::AnalysisOptions;
use crate::structs::config::ai_config::AiConfig;
use crate::structs::finding::Finding;

const ISSUE_KEYWORDS: &[&str] = &["issue", "problem", "error", "vulnerability", "bug", "risk"];

#[derive(Debug, Default)]
pub struct AiAnalysis {
    pub findings: Vec<Finding>,
    pub suggestions: Vec<String>,
    /// Model that actually answered.
    pub model: Option<String>,
}

/// Runs the AI pass: tries the requested model, then falls down the
/// configured sequence. Inference failure degrades to an empty analysis;
/// it never kills the static results.
pub struct AiAnalyzer {
    client: OllamaClient,
    sequence: Vec<String>,
}

impl AiAnalyzer {
    pub fn new(config: &AiConfig) -> crate::errors::EnhancerResult<Self> {
        Ok(Self {
            client: OllamaClient::new(config)?,
            sequence: config.model_sequence.clone(),
        })
    }

    pub async fn analyze(
        &self,
        code: &str,
        language: Option<&str>,
        model: Option<&str>,
        options: &AnalysisOptions,
    ) -> AiAnalysis {
        let prompt = analysis_prompt::build_prompt(code, language, options);

        let candidates: Vec<String> = match model {
            Some(m) => vec![m.to_string()],
            None => self.sequence.clone(),
        };

        for candidate in &candidates {
            // Only the local daemon is wired up as a transport; catalog
            // entries from cloud providers are listed, not served.
            match model_catalog::provider_for_model(candidate) {
                Some("ollama") | None => {}
                Some(provider) => {
                    log::warn!(
                        "⚠️ model '{}' needs the {} provider; skipping",
                        candidate,
                        provider
                    );
                    continue;
                }
            }

            log::info!("🤖 querying model {}", candidate);
            match self.client.generate(candidate, &prompt).await {
                Ok(response) => {
                    return AiAnalysis {
                        findings: distill_issues(&response),
                        suggestions: distill_suggestions(&response),
                        model: Some(candidate.clone()),
                    };
                }
                Err(e) => {
                    log::warn!("⚠️ model {} failed: {}", candidate, e);
                }
            }
        }

        log::warn!("⚠️ no model answered; continuing with static findings only");
        AiAnalysis::default()
    }
}

/// Free-form response → findings. Keyword lines become medium findings;
/// the category is guessed from the vocabulary of the line.
fn distill_issues(response: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut in_fence = false;

    for line in response.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || trimmed.is_empty() {
            continue;
        }

        let lowered = trimmed.to_lowercase();
        if !ISSUE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            continue;
        }

        let category = if lowered.contains("security") || lowered.contains("vulnerab") {
            FindingCategory::Security
        } else if lowered.contains("performance") || lowered.contains("slow") {
            FindingCategory::Performance
        } else {
            FindingCategory::Quality
        };

        let message = trimmed.trim_start_matches(['-', '*', ' ']).to_string();
        findings.push(Finding::new(Severity::Medium, category, &message));
    }

    findings
}

/// Numbered or bulleted lines of substance become suggestions.
fn distill_suggestions(response: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    for line in response.lines() {
        let trimmed = line.trim();
        let Some(first) = trimmed.chars().next() else {
            continue;
        };
        if !first.is_ascii_digit() && first != '-' && first != '*' {
            continue;
        }

        let cleaned = trimmed
            .trim_start_matches(|c: char| c.is_ascii_digit() || ".-* ".contains(c))
            .trim();
        if cleaned.len() > 10 {
            suggestions.push(cleaned.to_string());
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_lines_become_medium_findings() {
        let response = "\
The code looks mostly fine.
- Security issue: user input reaches eval
- Performance problem: quadratic loop over rows
Nothing else stands out.
";
        let findings = distill_issues(response);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].category, FindingCategory::Security);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[1].category, FindingCategory::Performance);
    }

    #[test]
    fn suggestions_come_from_numbered_lines() {
        let response = "\
Suggestions:
1. Replace eval with ast.literal_eval for safety
2. ok
- Cache the computed totals between calls
";
        let suggestions = distill_suggestions(response);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("Replace eval"));
        assert!(suggestions[1].starts_with("Cache the computed"));
    }

    #[test]
    fn code_fences_are_not_issues() {
        let response = "```python\nbug = 1\n```";
        assert!(distill_issues(response).is_empty());
    }
}
