use routeplan_core::error::{ErrorCode, RouteplanError};
use routeplan_core::model::EdgeRecord;
use std::collections::HashMap;
use thiserror::Error;

/// node -> (neighbor -> base weight)
pub type Adjacency = HashMap<String, HashMap<String, u64>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("negative base weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: i64 },
}

impl RouteplanError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::NegativeWeight { .. } => ErrorCode::InvalidArgument,
        }
    }
}

/// Directed road network keyed by city name.
///
/// Every known node owns an adjacency entry, possibly empty, so the key set of
/// the adjacency map is the node set. At most one edge exists per ordered
/// pair; re-inserting a pair overwrites its weight.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: Adjacency,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[EdgeRecord]) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for record in records {
            graph.try_add_edge(&record.from, &record.to, record.weight)?;
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "route graph built"
        );
        Ok(graph)
    }

    pub fn add_node(&mut self, id: impl Into<String>) {
        self.adjacency.entry(id.into()).or_default();
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, base_weight: u64) {
        let from = from.into();
        let to = to.into();
        self.add_node(to.clone());
        self.adjacency
            .entry(from)
            .or_default()
            .insert(to, base_weight);
    }

    /// Like [`add_edge`](Self::add_edge) but accepts an untrusted signed weight.
    /// Negative weights are rejected and leave the graph untouched.
    pub fn try_add_edge(&mut self, from: &str, to: &str, base_weight: i64) -> Result<(), GraphError> {
        let weight = u64::try_from(base_weight).map_err(|_| GraphError::NegativeWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight: base_weight,
        })?;
        self.add_edge(from, to, weight);
        Ok(())
    }

    /// One-hop successors of `node` with their base weights. Unknown nodes
    /// have no successors.
    pub fn neighbors<'a>(&'a self, node: &str) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(|(target, weight)| (target.as_str(), *weight))
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<u64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Node names in lexical order.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.adjacency.keys().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_registers_both_endpoints() {
        let mut graph = RouteGraph::new();
        graph.add_edge("Tehran", "Qom", 10);

        assert!(graph.contains_node("Tehran"));
        assert!(graph.contains_node("Qom"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("Qom").count(), 0);
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 3);
        graph.add_node("A");
        graph.add_node("A");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_weight("A", "B"), Some(3));
    }

    #[test]
    fn test_last_write_wins() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 10);
        graph.add_edge("A", "B", 4);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("A", "B"), Some(4));
    }

    #[test]
    fn test_neighbors_of_unknown_node_is_empty() {
        let graph = RouteGraph::new();
        assert_eq!(graph.neighbors("nowhere").count(), 0);
    }

    #[test]
    fn test_neighbors_are_directed() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 1);
        graph.add_edge("A", "C", 2);

        let mut neighbors: Vec<_> = graph.neighbors("A").collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![("B", 1), ("C", 2)]);
        assert_eq!(graph.edge_weight("B", "A"), None);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = RouteGraph::new();
        let err = graph.try_add_edge("A", "B", -1).unwrap_err();

        assert_eq!(
            err,
            GraphError::NegativeWeight {
                from: "A".to_string(),
                to: "B".to_string(),
                weight: -1,
            }
        );
        assert_eq!(err.error_code(), ErrorCode::InvalidArgument);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_from_records_stops_on_negative_weight() {
        let records = vec![EdgeRecord::new("A", "B", 2), EdgeRecord::new("B", "C", -5)];
        assert!(matches!(
            RouteGraph::from_records(&records),
            Err(GraphError::NegativeWeight { weight: -5, .. })
        ));
    }
}
