use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Models servable by a local Ollama daemon.
pub const OLLAMA_MODELS: &[&str] = &[
    "enhancer-llama:latest",
    "codestral:latest",
    "qwen2.5-coder:latest",
    "deepseek-r1:latest",
    "phi4:latest",
    "command-r7b:latest",
    "llama3.2:latest",
    "llama3.3:latest",
    "olmo2:latest",
    "codellama:latest",
    "mistral:latest",
    "mixtral:latest",
    "gemma2:latest",
    "qwen2:latest",
    "deepseek-coder:latest",
    "codegemma:latest",
    "wizardcoder:latest",
    "phind-codellama:latest",
    "starcoder:latest",
];

pub const GROQ_MODELS: &[&str] = &[
    "mixtral-8x7b-32768",
    "llama3-70b-8192",
    "llama3-8b-8192",
];

pub const OPENAI_MODELS: &[&str] = &["gpt-4", "gpt-4-turbo-preview", "gpt-3.5-turbo"];

pub const ANTHROPIC_MODELS: &[&str] = &[
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-2.1",
];

pub const GOOGLE_MODELS: &[&str] = &["gemini-pro", "gemini-pro-vision"];

/// Fallback order when no model is requested explicitly.
pub const DEFAULT_MODEL_SEQUENCE: &[&str] = &[
    "enhancer-llama:latest",
    "codestral:latest",
    "qwen2.5-coder:latest",
    "deepseek-r1:latest",
    "phi4:latest",
    "command-r7b:latest",
    "llama3.2:latest",
    "olmo2:latest",
];

pub const PROVIDERS: &[(&str, &[&str])] = &[
    ("ollama", OLLAMA_MODELS),
    ("groq", GROQ_MODELS),
    ("openai", OPENAI_MODELS),
    ("anthropic", ANTHROPIC_MODELS),
    ("google", GOOGLE_MODELS),
];

static PROVIDER_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (provider, models) in PROVIDERS {
        for model in *models {
            index.insert(*model, *provider);
        }
    }
    index
});

pub fn all_models() -> Vec<&'static str> {
    PROVIDERS.iter().flat_map(|(_, models)| models.iter().copied()).collect()
}

pub fn models_for_provider(provider: &str) -> &'static [&'static str] {
    PROVIDERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(provider))
        .map(|(_, models)| *models)
        .unwrap_or(&[])
}

pub fn provider_for_model(model: &str) -> Option<&'static str> {
    PROVIDER_INDEX.get(model).copied()
}

pub fn is_ollama_model(model: &str) -> bool {
    provider_for_model(model) == Some("ollama")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_is_all_ollama() {
        for model in DEFAULT_MODEL_SEQUENCE {
            assert!(is_ollama_model(model), "{} should be an ollama model", model);
        }
    }

    #[test]
    fn provider_lookup_covers_every_table() {
        assert_eq!(provider_for_model("gpt-4"), Some("openai"));
        assert_eq!(provider_for_model("gemini-pro"), Some("google"));
        assert_eq!(provider_for_model("claude-2.1"), Some("anthropic"));
        assert_eq!(provider_for_model("no-such-model"), None);
    }

    #[test]
    fn all_models_has_no_duplicates() {
        let models = all_models();
        let unique: std::collections::HashSet<_> = models.iter().collect();
        assert_eq!(models.len(), unique.len());
    }
}
