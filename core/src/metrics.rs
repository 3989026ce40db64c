use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    pub total_searches: u64,
    pub unreachable: u64,
    pub latencies: VecDeque<u64>, // microseconds
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioMetrics {
    pub fetched: u64,
    pub fallbacks: u64,
}

#[derive(Clone)]
pub struct MetricsCollector {
    state: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    search_metrics: SearchMetrics,
    scenario_metrics: ScenarioMetrics,
    max_history: usize,
}

impl MetricsCollector {
    pub fn new(max_history: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(MetricsState {
                search_metrics: SearchMetrics::default(),
                scenario_metrics: ScenarioMetrics::default(),
                max_history: max_history.max(1),
            })),
        }
    }

    // Poisoning is ignored; the counters hold no cross-field invariant.
    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_search(&self, latency_us: u64, reachable: bool) {
        let mut state = self.lock();
        state.search_metrics.total_searches += 1;
        if !reachable {
            state.search_metrics.unreachable += 1;
        }
        state.search_metrics.latencies.push_back(latency_us);
        if state.search_metrics.latencies.len() > state.max_history {
            state.search_metrics.latencies.pop_front();
        }
    }

    pub fn record_scenario(&self, fell_back: bool) {
        let mut state = self.lock();
        state.scenario_metrics.fetched += 1;
        if fell_back {
            state.scenario_metrics.fallbacks += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.lock();
        let s = &state.search_metrics;
        let sc = &state.scenario_metrics;

        let mut sorted_latencies: Vec<u64> = s.latencies.iter().copied().collect();
        sorted_latencies.sort_unstable();

        let fallback_rate = if sc.fetched > 0 {
            sc.fallbacks as f32 / sc.fetched as f32
        } else {
            0.0
        };

        MetricsSnapshot {
            total_searches: s.total_searches,
            unreachable: s.unreachable,
            scenario_fallbacks: sc.fallbacks,
            fallback_rate,
            p50: percentile(&sorted_latencies, 50.0),
            p95: percentile(&sorted_latencies, 95.0),
            p99: percentile(&sorted_latencies, 99.0),
            history_count: s.latencies.len(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(1_000)
    }
}

fn percentile(sorted: &[u64], p: f32) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((p / 100.0) * (sorted.len() as f32)).ceil() as usize;
    sorted[idx.saturating_sub(1).min(sorted.len() - 1)]
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub unreachable: u64,
    pub scenario_fallbacks: u64,
    pub fallback_rate: f32,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub history_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let metrics = MetricsCollector::new(10);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_searches, 0);
        assert_eq!(snapshot.p99, 0);
        assert_eq!(snapshot.fallback_rate, 0.0);
    }

    #[test]
    fn test_percentiles_and_history_bound() {
        let metrics = MetricsCollector::new(100);
        for latency in 1..=100 {
            metrics.record_search(latency, latency % 10 != 0);
        }
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_searches, 100);
        assert_eq!(snapshot.unreachable, 10);
        assert_eq!(snapshot.p50, 50);
        assert!((94..=96).contains(&snapshot.p95));
        assert!(snapshot.p99 >= snapshot.p95);

        let bounded = MetricsCollector::new(3);
        for latency in [5, 6, 7, 8] {
            bounded.record_search(latency, true);
        }
        let snapshot = bounded.snapshot();
        assert_eq!(snapshot.total_searches, 4);
        assert_eq!(snapshot.history_count, 3);
        assert_eq!(snapshot.p50, 7);
    }

    #[test]
    fn test_fallback_rate() {
        let metrics = MetricsCollector::new(10);
        metrics.record_scenario(false);
        metrics.record_scenario(true);
        metrics.record_scenario(false);
        metrics.record_scenario(true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.scenario_fallbacks, 2);
        assert_eq!(snapshot.fallback_rate, 0.5);
    }
}
