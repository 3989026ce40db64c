//! OpenAI-compatible chat-completion client used as the live scenario source.

use crate::provider::{ProviderError, ScenarioProvider};
use async_trait::async_trait;
use reqwest::Client;
use routeplan_core::config::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

pub fn scenario_prompt(source: &str, destination: &str) -> String {
    format!(
        "Please provide the current weather and traffic condition between '{}' and '{}' in short.",
        source, destination
    )
}

pub struct ChatCompletionProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl ChatCompletionProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            temperature: config.temperature,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ScenarioProvider for ChatCompletionProvider {
    async fn scenario(&self, source: &str, destination: &str) -> Result<String, ProviderError> {
        let prompt = scenario_prompt(source, destination);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(model = %self.model, source, destination, "requesting live scenario");
        let raw = request.send().await?.error_for_status()?.text().await?;

        let response: ChatResponse = serde_json::from_str(&raw)
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("response has no message content".to_string()))?;

        Ok(content)
    }
}
