//! Description generation against a chat-completions endpoint.
//!
//! One request per call: no retries, no streaming, no partial output.
//! Every failure is folded into [`GenerationOutcome::Failure`] so callers
//! never see a transport error escape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GENERATION_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Input for one generation call. Built fresh per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Name of the record being described.
    pub subject_name: String,
    /// Feature tags, in the order the user entered them.
    pub features: Vec<String>,
}

impl GenerationRequest {
    /// Creates a request for `subject_name` with `features`.
    pub fn new(subject_name: impl Into<String>, features: Vec<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            features,
        }
    }

    /// Natural-language prompt for this request.
    pub fn prompt(&self) -> String {
        build_prompt(&self.subject_name, &self.features)
    }
}

/// Builds the prompt sent to the model.
///
/// Deterministic: the subject name and every feature appear in order,
/// features comma-joined.
pub fn build_prompt(subject_name: &str, features: &[String]) -> String {
    format!(
        "Generate product description optimized for SEO for a product named \"{}\" with the following features: {}.",
        subject_name,
        features.join(", ")
    )
}

/// Splits comma-separated tag input into trimmed, non-empty features.
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Trimmed text of the first completion.
    Success(String),
    /// Why the call failed.
    Failure(String),
}

impl GenerationOutcome {
    /// Returns `true` for [`GenerationOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts into a `Result`, useful with `?`.
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Success(text) => Ok(text),
            Self::Failure(reason) => Err(reason),
        }
    }
}

/// A text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issues exactly one generation call authenticated with `credential`.
    async fn generate(&self, credential: &str, request: &GenerationRequest) -> GenerationOutcome;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`TextGenerator`] for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiGenerator {
    /// Builds a generator with an explicit request timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            max_tokens,
        })
    }

    /// Generator pointed at the public API with default model settings.
    pub fn with_defaults(timeout: Duration) -> reqwest::Result<Self> {
        Self::new(
            DEFAULT_GENERATION_API_BASE,
            DEFAULT_MODEL,
            DEFAULT_MAX_TOKENS,
            timeout,
        )
    }

    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| e.to_string())?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| "response contained no completion".to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, credential: &str, request: &GenerationRequest) -> GenerationOutcome {
        log::info!(
            "Generating description for '{}' ({} feature(s))",
            request.subject_name,
            request.features.len()
        );

        match self.complete(credential, &request.prompt()).await {
            Ok(text) => GenerationOutcome::Success(text),
            Err(reason) => {
                log::warn!("Failed to generate description: {}", reason);
                GenerationOutcome::Failure(reason)
            }
        }
    }
}
