use crate::model::EdgeRecord;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCENARIO_TEXT: &str = "Clear weather, light traffic";

const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_PROVIDER_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Remote text-generation service used to describe live road conditions.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            model: DEFAULT_PROVIDER_MODEL.to_string(),
            api_key: None,
            temperature: 0.2,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Substituted whenever the provider fails or is disabled.
    pub default_text: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            default_text: DEFAULT_SCENARIO_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Replaces the built-in keyword table when present.
    pub severity: Option<HashMap<String, u32>>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Seed edges. The reference city network is used when absent.
    pub edges: Option<Vec<EdgeRecord>>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub scenario: ScenarioConfig,
    pub classifier: ClassifierConfig,
    pub graph: GraphConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Layers `<dir>/default`, `<dir>/<RUN_MODE>` and `ROUTEPLAN_*` environment
    /// variables (nested keys separated by `__`, e.g. `ROUTEPLAN_PROVIDER__API_KEY`).
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join(run_mode).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("ROUTEPLAN")
                    .prefix_separator("_")
                    .separator("__"),
            );

        builder.build()?.try_deserialize()
    }
}
