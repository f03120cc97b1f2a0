//! Answer-generation backends.

use async_trait::async_trait;
use docrag_core::{AnswerBackend, GenerateError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default chat-completions endpoint (Groq's OpenAI-compatible API).
const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default generation model.
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// System role instruction sent with every request.
const SYSTEM_PROMPT: &str = "Answer questions concisely based on the provided context.";

/// Backend for OpenAI-compatible chat-completions APIs.
///
/// One bounded attempt per call, with an explicit per-request timeout; the
/// composer owns the fallback, so this type only maps HTTP outcomes to
/// [`GenerateError`].
pub struct HttpBackend {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    temperature: f32,
    max_tokens: usize,
}

impl HttpBackend {
    /// Create a backend against the given endpoint.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    /// Create a backend from the environment.
    ///
    /// Reads `GROQ_API_KEY` first, then `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingCredentials`] when neither variable
    /// is set; the caller falls back to [`NullBackend`].
    pub fn from_env() -> Result<Self, GenerateError> {
        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                GenerateError::MissingCredentials(
                    "neither GROQ_API_KEY nor OPENAI_API_KEY is set".to_string(),
                )
            })?;
        Ok(Self::new(DEFAULT_API_URL, api_key))
    }

    /// Override the generation model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl AnswerBackend for HttpBackend {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerateError::MalformedResponse("no choices in response".to_string()))
    }
}

/// The "none configured" backend variant.
///
/// Always fails with [`GenerateError::NotConfigured`], which the composer
/// recovers from via the extractive path, so an engine without credentials
/// behaves identically to one whose backend just failed.
pub struct NullBackend;

#[async_trait]
impl AnswerBackend for NullBackend {
    fn name(&self) -> &str {
        "none"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::NotConfigured)
    }
}
