//! Async LLM client for chat replies and intent analysis
//!
//! Model-agnostic HTTP client: OpenAI-compatible APIs (DeepSeek is the
//! default) and the Anthropic API, with the format detected from the URL.
//! Retries, timeouts, and backoff are deliberately not handled here; callers
//! degrade to the keyword fallback on any failure.

use crate::core::error::{AgentError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat settings matching the assistant's tuning
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// System prompt for the conversational reply channel
const SYSTEM_PROMPT: &str = "Anda adalah asisten AI cerdas untuk aplikasi task list berbahasa Indonesia. \
Tugas Anda adalah membantu pengguna mengelola task mereka dengan cara yang ramah dan efektif.\n\n\
Karakteristik Anda:\n\
- Berbicara dalam bahasa Indonesia yang natural dan ramah\n\
- Memberikan saran yang konstruktif tentang manajemen task\n\
- Memahami konteks dan memberikan respons yang relevan\n\
- Dapat membantu dengan berbagai operasi task: membuat, melihat, mengupdate, menghapus, dan menandai selesai\n\
- Memberikan motivasi dan tips produktivitas\n\n\
Selalu berikan respons yang helpful, informatif, dan mendorong produktivitas pengguna.";

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // DeepSeek, OpenAI, and other compatible APIs use OpenAI format
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL (defaults to the DeepSeek chat endpoint)
    /// Optional: LLM_MODEL (defaults to deepseek-chat)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| AgentError::LlmUnconfigured("LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| "https://api.deepseek.com/chat/completions".into());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "deepseek-chat".into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Send a prompt with optional context, returning the model's text
    ///
    /// The context (a rendered snapshot of the user's tasks) rides along as
    /// an assistant turn for OpenAI-format APIs; Anthropic requires
    /// user-first alternation, so there it is folded into the system prompt.
    pub async fn generate(&self, prompt: &str, context: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.generate_anthropic(prompt, context).await,
            ApiFormat::OpenAI => self.generate_openai(prompt, context).await,
        }
    }

    async fn generate_anthropic(&self, prompt: &str, context: &str) -> Result<String> {
        let system = if context.trim().is_empty() {
            SYSTEM_PROMPT.to_string()
        } else {
            format!("{}\n\nKonteks task saat ini:\n{}", SYSTEM_PROMPT, context)
        };

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user".into(),
                content: prompt.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| AgentError::LlmError("Empty response".into()))
    }

    async fn generate_openai(&self, prompt: &str, context: &str) -> Result<String> {
        let mut messages = vec![Message {
            role: "system".into(),
            content: SYSTEM_PROMPT.into(),
        }];
        if !context.trim().is_empty() {
            messages.push(Message {
                role: "assistant".into(),
                content: format!("Konteks task saat ini:\n{}", context),
            });
        }
        messages.push(Message {
            role: "user".into(),
            content: prompt.into(),
        });

        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
            messages,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| AgentError::LlmError("Empty response".into()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format (DeepSeek, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LlmClient::new(
            "test-key".into(),
            "https://api.example.com".into(),
            "test-model".into(),
        );
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.example.com");
        assert_eq!(client.model, "test-model");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            LlmClient::detect_api_format("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            LlmClient::detect_api_format("https://api.deepseek.com/chat/completions"),
            ApiFormat::OpenAI
        );
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = LlmClient::from_env();
        // Should fail if LLM_API_KEY is not set
        if std::env::var("LLM_API_KEY").is_err() {
            assert!(matches!(result, Err(AgentError::LlmUnconfigured(_))));
        }
    }
}
