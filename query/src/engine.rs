use crate::dsl::RouteRequest;
use crate::search::{PathSearch, SearchResult};
use routeplan_core::config::AppConfig;
use routeplan_core::error::{ErrorCode, RouteplanError};
use routeplan_core::metrics::{MetricsCollector, MetricsSnapshot};
use serde::{Deserialize, Serialize};
use slm::{
    ChatCompletionProvider, FallbackScenarioProvider, ProviderError, ResolvedScenario,
    ScenarioClassifier, ScenarioProvider, ScenarioSource, SeverityTable, StaticScenarioProvider,
};
use std::sync::Arc;
use std::time::Instant;
use storage::seed::build_city_graph;
use storage::{GraphError, RouteGraph};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub source: String,
    pub destination: String,
    pub scenario: String,
    pub scenario_source: ScenarioSource,
    pub penalty: u32,
    /// `None` when no route exists.
    pub cost: Option<u64>,
    pub path: Vec<String>,
    pub search_latency_us: u64,
}

impl RouteResponse {
    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    pub fn search_result(&self) -> SearchResult {
        SearchResult {
            cost: self.cost,
            path: self.path.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route request: {0}")]
    InvalidRequest(String),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("scenario provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl RouteplanError for RouteError {
    fn error_code(&self) -> ErrorCode {
        match self {
            RouteError::InvalidRequest(_) => ErrorCode::InvalidArgument,
            RouteError::Graph(err) => err.error_code(),
            RouteError::Provider(err) => err.error_code(),
        }
    }
}

/// Answers route requests against a read-only graph.
///
/// Each request resolves its scenario text first (request override, provider,
/// or the default text when the provider fails), then runs the search with
/// the resulting penalty.
pub struct RoutePlanner {
    graph: Arc<RouteGraph>,
    classifier: ScenarioClassifier,
    scenarios: FallbackScenarioProvider,
    metrics: MetricsCollector,
}

impl RoutePlanner {
    pub fn new(graph: Arc<RouteGraph>, provider: Arc<dyn ScenarioProvider>) -> Self {
        Self {
            graph,
            classifier: ScenarioClassifier::default(),
            scenarios: FallbackScenarioProvider::new(provider),
            metrics: MetricsCollector::default(),
        }
    }

    /// Wires graph, classifier table and scenario provider from configuration.
    /// A disabled provider answers every request with the default text.
    pub fn from_config(config: &AppConfig) -> Result<Self, RouteError> {
        let graph = build_city_graph(config.graph.edges.as_deref())?;

        let provider: Arc<dyn ScenarioProvider> = if config.provider.enabled {
            Arc::new(ChatCompletionProvider::from_config(&config.provider)?)
        } else {
            Arc::new(StaticScenarioProvider::new(config.scenario.default_text.clone()))
        };

        let mut planner = Self::new(Arc::new(graph), provider)
            .with_default_scenario(config.scenario.default_text.clone());
        if let Some(severity) = &config.classifier.severity {
            planner = planner.with_classifier(ScenarioClassifier::new(SeverityTable::from(severity.clone())));
        }
        Ok(planner)
    }

    pub fn with_classifier(mut self, classifier: ScenarioClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_default_scenario(mut self, text: impl Into<String>) -> Self {
        self.scenarios = self.scenarios.with_default_text(text);
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn classifier(&self) -> &ScenarioClassifier {
        &self.classifier
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub async fn plan_json(&self, raw: &str) -> Result<RouteResponse, RouteError> {
        let request =
            RouteRequest::parse_json(raw).map_err(|err| RouteError::InvalidRequest(err.to_string()))?;
        self.plan(request).await
    }

    pub async fn plan(&self, request: RouteRequest) -> Result<RouteResponse, RouteError> {
        request
            .validate()
            .map_err(|err| RouteError::InvalidRequest(err.to_string()))?;
        let RouteRequest {
            source,
            destination,
            scenario,
        } = request.normalized();

        let scenario = match scenario {
            Some(text) => ResolvedScenario {
                text,
                source: ScenarioSource::Request,
            },
            None => {
                let resolved = self.scenarios.resolve(&source, &destination).await;
                self.metrics
                    .record_scenario(resolved.source == ScenarioSource::Fallback);
                resolved
            }
        };

        let penalty = self.classifier.weight_for(&scenario.text);
        info!(
            source = %source,
            destination = %destination,
            scenario = %scenario.text,
            matched = ?self.classifier.matches(&scenario.text),
            penalty,
            "scenario classified"
        );

        let started = Instant::now();
        let result = PathSearch::new(&self.graph, &self.classifier).search_with_penalty(
            &source,
            &destination,
            u64::from(penalty),
        );
        let search_latency_us = started.elapsed().as_micros() as u64;
        self.metrics
            .record_search(search_latency_us, result.is_reachable());

        match result.cost {
            Some(cost) => info!(cost, hops = result.path.len().saturating_sub(1), "route planned"),
            None => info!(source = %source, destination = %destination, "no route between cities"),
        }

        Ok(RouteResponse {
            source,
            destination,
            scenario: scenario.text,
            scenario_source: scenario.source,
            penalty,
            cost: result.cost,
            path: result.path,
            search_latency_us,
        })
    }
}
