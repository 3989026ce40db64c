use serde::{Deserialize, Serialize};
use slm::ScenarioClassifier;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use storage::RouteGraph;
use tracing::{debug, trace};

/// Outcome of one shortest-path search.
///
/// `cost: None` with an empty path is the "no path" sentinel; it stands for
/// an infinite cost (see [`SearchResult::total_cost`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub cost: Option<u64>,
    pub path: Vec<String>,
}

impl SearchResult {
    pub fn unreachable() -> Self {
        Self {
            cost: None,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    pub fn total_cost(&self) -> f64 {
        self.cost.map_or(f64::INFINITY, |cost| cost as f64)
    }
}

struct QueueEntry<'a> {
    cost: u64,
    seq: u64,
    node: &'a str,
    parent: Option<&'a str>,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so that `BinaryHeap` pops the cheapest entry, oldest first on ties.
impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uniform-cost search over a [`RouteGraph`] where every traversed edge costs
/// its base weight plus the penalty of the trip's scenario.
pub struct PathSearch<'g> {
    graph: &'g RouteGraph,
    classifier: &'g ScenarioClassifier,
}

impl<'g> PathSearch<'g> {
    pub fn new(graph: &'g RouteGraph, classifier: &'g ScenarioClassifier) -> Self {
        Self { graph, classifier }
    }

    /// The penalty is a pure function of `scenario`, so it is classified once
    /// and applied to every relaxed edge.
    pub fn search(&self, source: &str, destination: &str, scenario: &str) -> SearchResult {
        let penalty = u64::from(self.classifier.weight_for(scenario));
        shortest_path(self.graph, source, destination, penalty)
    }

    pub fn search_with_penalty(&self, source: &str, destination: &str, penalty: u64) -> SearchResult {
        shortest_path(self.graph, source, destination, penalty)
    }
}

/// Dijkstra with lazy deletion: stale queue entries for already finalized
/// nodes are skipped on pop. Non-negative edge costs guarantee the first pop
/// of a node is at its minimum cost.
pub fn shortest_path<'a>(
    graph: &'a RouteGraph,
    source: &'a str,
    destination: &str,
    penalty: u64,
) -> SearchResult {
    let mut queue = BinaryHeap::new();
    // finalized node -> predecessor on its optimal path
    let mut finalized: HashMap<&'a str, Option<&'a str>> = HashMap::new();
    let mut seq = 0u64;

    queue.push(QueueEntry {
        cost: 0,
        seq,
        node: source,
        parent: None,
    });

    while let Some(QueueEntry {
        cost, node, parent, ..
    }) = queue.pop()
    {
        if finalized.contains_key(node) {
            continue;
        }
        finalized.insert(node, parent);
        trace!(node, cost, "finalized");

        if node == destination {
            let path = reconstruct_path(&finalized, node);
            debug!(
                source,
                destination,
                cost,
                hops = path.len().saturating_sub(1),
                finalized = finalized.len(),
                "route found"
            );
            return SearchResult {
                cost: Some(cost),
                path,
            };
        }

        for (neighbor, base_weight) in graph.neighbors(node) {
            if finalized.contains_key(neighbor) {
                continue;
            }
            seq += 1;
            queue.push(QueueEntry {
                cost: cost.saturating_add(base_weight).saturating_add(penalty),
                seq,
                node: neighbor,
                parent: Some(node),
            });
        }
    }

    debug!(source, destination, finalized = finalized.len(), "no route");
    SearchResult::unreachable()
}

fn reconstruct_path(finalized: &HashMap<&str, Option<&str>>, end: &str) -> Vec<String> {
    let mut path = vec![end.to_string()];
    let mut current = end;
    while let Some(&Some(parent)) = finalized.get(current) {
        path.push(parent.to_string());
        current = parent;
    }
    path.reverse();
    path
}
