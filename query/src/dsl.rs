use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One routing request, as read from JSON or assembled by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteRequest {
    pub source: String,
    pub destination: String,
    /// Skips the scenario provider when set.
    #[serde(default)]
    pub scenario: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteValidationError {
    #[error("source must not be empty")]
    EmptySource,
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("scenario must not be empty when provided")]
    EmptyScenario,
}

impl RouteRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            scenario: None,
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), RouteValidationError> {
        if self.source.trim().is_empty() {
            return Err(RouteValidationError::EmptySource);
        }
        if self.destination.trim().is_empty() {
            return Err(RouteValidationError::EmptyDestination);
        }
        if let Some(scenario) = &self.scenario {
            if scenario.trim().is_empty() {
                return Err(RouteValidationError::EmptyScenario);
            }
        }
        Ok(())
    }

    /// City names come from free-text input; surrounding whitespace is not
    /// part of the name.
    pub fn normalized(&self) -> Self {
        Self {
            source: self.source.trim().to_string(),
            destination: self.destination.trim().to_string(),
            scenario: self.scenario.as_ref().map(|s| s.trim().to_string()),
        }
    }
}
