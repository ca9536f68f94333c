//! Completion backend client.
//!
//! Sends the persona plus assembled context to the Responses API and
//! extracts the reply text.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::config::CompletionConfig;
use crate::engine::errors::{CoachError, CoachResult};

/// Longest upstream error body carried into a [`CoachError::Upstream`].
const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsesEnvelope {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    error: UpstreamErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for the completion backend.
pub struct CompletionGateway {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionGateway {
    /// Build a gateway from completion settings.
    ///
    /// # Errors
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be constructed.
    pub fn new(config: CompletionConfig) -> CoachResult<Self> {
        if config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(CoachError::InvalidConfig(
                "completion.api_key is not set".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { http, config })
    }

    /// Send a persona and assembled context, returning the reply text.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// empty reply.
    pub async fn complete(&self, persona: &str, context: &str) -> CoachResult<String> {
        let request = ResponsesRequest {
            model: &self.config.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: persona,
                },
                InputMessage {
                    role: "user",
                    content: context,
                },
            ],
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let response = self
            .http
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Upstream {
                status: status.as_u16(),
                body: upstream_error_message(&body),
            });
        }

        let envelope: ResponsesEnvelope = response.json().await?;
        extract_reply(&envelope).ok_or(CoachError::EmptyCompletion)
    }
}

/// Pull the human-readable message out of an error body, truncated.
fn upstream_error_message(body: &str) -> String {
    let message = serde_json::from_str::<UpstreamError>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    message.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Join the text parts of the reply. Falls back to the chat-completions
/// shape when the envelope carries `choices` instead of `output`.
fn extract_reply(envelope: &ResponsesEnvelope) -> Option<String> {
    let mut parts = Vec::new();
    for item in &envelope.output {
        if item.kind != "message" {
            continue;
        }
        for part in &item.content {
            if (part.kind == "output_text" || part.kind == "text") && !part.text.is_empty() {
                parts.push(part.text.as_str());
            }
        }
    }
    if !parts.is_empty() {
        return Some(parts.join("\n"));
    }

    envelope
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .filter(|content| !content.is_empty())
}
