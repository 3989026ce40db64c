use async_trait::async_trait;
use routeplan_core::config::DEFAULT_SCENARIO_TEXT;
use routeplan_core::error::{ErrorCode, RouteplanError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("scenario request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed scenario response: {0}")]
    MalformedResponse(String),
    #[error("scenario provider unavailable: {0}")]
    Unavailable(String),
}

impl RouteplanError for ProviderError {
    fn error_code(&self) -> ErrorCode {
        match self {
            ProviderError::Http(_) | ProviderError::Unavailable(_) => ErrorCode::Unavailable,
            ProviderError::MalformedResponse(_) => ErrorCode::Internal,
        }
    }
}

/// Source of the free-text road condition description for one trip.
#[async_trait]
pub trait ScenarioProvider: Send + Sync {
    async fn scenario(&self, source: &str, destination: &str) -> Result<String, ProviderError>;
}

/// Always answers with the same description. Used offline and in tests.
pub struct StaticScenarioProvider {
    text: String,
}

impl StaticScenarioProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl ScenarioProvider for StaticScenarioProvider {
    async fn scenario(&self, _source: &str, _destination: &str) -> Result<String, ProviderError> {
        Ok(self.text.clone())
    }
}

/// Where the scenario text of a planned route came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSource {
    Request,
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScenario {
    pub text: String,
    pub source: ScenarioSource,
}

/// Wraps a provider so that callers always get a usable description.
///
/// Provider errors and blank answers are logged and replaced by the default
/// text; they never propagate.
pub struct FallbackScenarioProvider {
    inner: Arc<dyn ScenarioProvider>,
    default_text: String,
}

impl FallbackScenarioProvider {
    pub fn new(inner: Arc<dyn ScenarioProvider>) -> Self {
        Self {
            inner,
            default_text: DEFAULT_SCENARIO_TEXT.to_string(),
        }
    }

    pub fn with_default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = text.into();
        self
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    pub async fn resolve(&self, source: &str, destination: &str) -> ResolvedScenario {
        match self.inner.scenario(source, destination).await {
            Ok(text) if !text.trim().is_empty() => ResolvedScenario {
                text,
                source: ScenarioSource::Provider,
            },
            Ok(_) => {
                tracing::warn!(source, destination, "scenario provider returned blank text, using default");
                self.fallback()
            }
            Err(err) => {
                tracing::warn!(
                    source,
                    destination,
                    error = %err,
                    code = %err.error_code(),
                    "scenario provider failed, using default"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> ResolvedScenario {
        ResolvedScenario {
            text: self.default_text.clone(),
            source: ScenarioSource::Fallback,
        }
    }
}

#[async_trait]
impl ScenarioProvider for FallbackScenarioProvider {
    async fn scenario(&self, source: &str, destination: &str) -> Result<String, ProviderError> {
        Ok(self.resolve(source, destination).await.text)
    }
}
