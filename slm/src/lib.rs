pub mod chat;
pub mod classifier;
pub mod provider;

pub use chat::ChatCompletionProvider;
pub use classifier::{ScenarioClassifier, SeverityTable};
pub use provider::{
    FallbackScenarioProvider, ProviderError, ResolvedScenario, ScenarioProvider, ScenarioSource,
    StaticScenarioProvider,
};
