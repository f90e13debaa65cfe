//! HTTP client for an OpenAI-compatible chat-completions backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP request timeout for a single completion call. A stuck upstream call
/// degrades only the requesting operation, so the bound is generous but firm.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default chat-completions base URL.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default model used for both generation and explanations.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the tutor backend connection.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Base URL of the chat-completions API (no trailing slash).
    pub api_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
}

impl TutorConfig {
    /// Load tutor configuration from environment variables.
    ///
    /// | Env Var          | Required | Default                     |
    /// |------------------|----------|-----------------------------|
    /// | `TUTOR_API_KEY`  | **yes**  | --                          |
    /// | `TUTOR_API_URL`  | no       | `https://api.openai.com/v1` |
    /// | `TUTOR_MODEL`    | no       | `gpt-4o-mini`               |
    ///
    /// # Panics
    ///
    /// Panics if `TUTOR_API_KEY` is not set.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("TUTOR_API_KEY").expect("TUTOR_API_KEY must be set in the environment");
        let api_url =
            std::env::var("TUTOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let model = std::env::var("TUTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_url,
            api_key,
            model,
        }
    }
}

/// Errors from the tutor backend layer.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("tutor backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The model's reply did not satisfy the task output contract.
    /// Carries the raw text so callers can surface it for diagnostics.
    #[error("tutor backend returned malformed output")]
    Format {
        /// The raw reply text, after fence stripping.
        raw: String,
    },
}

/// One chat message in a completion request.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the tutor's chat-completions backend.
pub struct TutorClient {
    client: reqwest::Client,
    config: TutorConfig,
}

impl TutorClient {
    /// Create a client with a pre-configured HTTP connection pool.
    pub fn new(config: TutorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Send one system + user prompt pair, returning the reply text.
    ///
    /// A missing or absent message content deserializes to an empty string;
    /// callers decide whether empty output is an error for their contract.
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, TutorError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "tutor backend returned an error");
            return Err(TutorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}
