//! Chat-completions backed [`TextGenerator`].

use super::{GenerationError, GenerationKind, TextGenerator};
use crate::config::AssistConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OpenAiGenerator {
    client: Client,
    settings: AssistConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(settings: AssistConfig, api_key: String) -> Result<Self, GenerationError> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured("API key is empty".into()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GenerationError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    /// Reads the key from the environment variable named in `settings`.
    pub fn from_env(settings: AssistConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
            GenerationError::NotConfigured(format!("{} is not set", settings.api_key_env))
        })?;
        Self::new(settings, api_key)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.api_base.trim_end_matches('/'))
    }

    fn build_request<'a>(
        &'a self,
        kind: GenerationKind,
        system_framing: &'a str,
        user_input: &'a str,
    ) -> ChatRequest<'a> {
        let (max_tokens, temperature) = match kind {
            GenerationKind::Draft => (self.settings.max_tokens, self.settings.temperature),
            GenerationKind::Summary => (
                self.settings.summary_max_tokens,
                self.settings.summary_temperature,
            ),
        };
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_framing,
                },
                ChatMessage {
                    role: "user",
                    content: user_input,
                },
            ],
            max_tokens,
            temperature,
        }
    }
}

fn extract_text(response: ChatResponse) -> Result<String, GenerationError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("no choices in response".into()))?
        .message
        .content
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        kind: GenerationKind,
        system_framing: &str,
        user_input: &str,
    ) -> Result<String, GenerationError> {
        let body = self.build_request(kind, system_framing, user_input);

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GenerationError::NotConfigured(
                "API key was rejected".into(),
            ));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        extract_text(parsed)
    }
}
