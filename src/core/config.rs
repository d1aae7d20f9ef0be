//! Runtime configuration with documented defaults
//!
//! Everything here can be overridden through environment variables; the
//! defaults match the hosted DeepSeek chat API the assistant was built
//! against.

/// Configuration for the assistant runtime
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Chat completions endpoint (OpenAI-compatible or Anthropic)
    ///
    /// The client detects the wire format from this URL, so pointing it at
    /// an Anthropic endpoint switches request/response shapes automatically.
    pub api_url: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Locale hint carried through interpretation (`"id"` by default)
    ///
    /// The fallback keyword table currently covers Indonesian plus common
    /// English verbs regardless of this value.
    pub locale: String,

    /// Default auto-execute preference for actions the policy cannot
    /// decide on its own (ambiguous deletes/completes/updates)
    pub auto_execute: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.deepseek.com/chat/completions".into(),
            model: "deepseek-chat".into(),
            locale: "id".into(),
            auto_execute: true,
        }
    }
}

impl AgentConfig {
    /// Build a config from environment variables, falling back to defaults
    ///
    /// Recognized: LLM_API_URL, LLM_MODEL, AGENT_LOCALE, AGENT_AUTO_EXECUTE
    /// (the API key itself belongs to the LLM client, not the config).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("LLM_API_URL").unwrap_or(defaults.api_url),
            model: std::env::var("LLM_MODEL").unwrap_or(defaults.model),
            locale: std::env::var("AGENT_LOCALE").unwrap_or(defaults.locale),
            auto_execute: std::env::var("AGENT_AUTO_EXECUTE")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(defaults.auto_execute),
        }
    }
}
