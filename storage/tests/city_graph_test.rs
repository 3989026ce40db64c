use std::fs;

use routeplan_core::model::EdgeRecord;
use storage::render::{render_to_file, DotRenderer, GraphRenderer};
use storage::seed::{build_city_graph, reference_city_edges};
use storage::{GraphError, RouteGraph};

#[test]
fn test_reference_edges_are_all_non_negative() {
    let edges = reference_city_edges();
    assert_eq!(edges.len(), 18);
    assert!(edges.iter().all(|edge| edge.weight >= 0));
}

#[test]
fn test_reference_graph_is_directed() {
    let graph = build_city_graph(None).unwrap();
    assert_eq!(graph.edge_weight("Tehran", "Sari"), Some(15));
    assert_eq!(graph.edge_weight("Sari", "Tehran"), None);
    assert!(graph.contains_node("Sabzevar"));
    assert!(!graph.contains_node("Tabriz"));
}

#[test]
fn test_duplicate_records_keep_last_weight() {
    let records = vec![
        EdgeRecord::new("Tehran", "Qom", 10),
        EdgeRecord::new("Tehran", "Qom", 12),
    ];
    let graph = RouteGraph::from_records(&records).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_weight("Tehran", "Qom"), Some(12));
}

#[test]
fn test_negative_record_reports_offending_edge() {
    let records = vec![EdgeRecord::new("Yazd", "Kerman", -22)];
    let err = build_city_graph(Some(records.as_slice())).unwrap_err();
    assert_eq!(err.to_string(), "negative base weight -22 on edge Yazd -> Kerman");
    assert!(matches!(err, GraphError::NegativeWeight { .. }));
}

#[test]
fn test_render_reference_graph_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cities.dot");
    let graph = build_city_graph(None).unwrap();

    render_to_file(&DotRenderer::default(), &graph, &path).unwrap();

    let dot = fs::read_to_string(&path).unwrap();
    assert_eq!(dot.lines().filter(|line| line.contains("->")).count(), 18);
    assert!(dot.contains("\"Mashhad\" -> \"Neyshabur\" [label=\"8\"];"));

    let mut again = Vec::new();
    DotRenderer::default().render(&graph, &mut again).unwrap();
    assert_eq!(String::from_utf8(again).unwrap(), dot);
}
