use crate::index::{GraphError, RouteGraph};
use routeplan_core::model::EdgeRecord;

const REFERENCE_CITY_EDGES: [(&str, &str, i64); 18] = [
    ("Tehran", "Qom", 10),
    ("Qom", "Esfahan", 20),
    ("Tehran", "Esfahan", 40),
    ("Esfahan", "Shiraz", 30),
    ("Qom", "Shiraz", 60),
    ("Shiraz", "Bushehr", 25),
    ("Tehran", "Sari", 15),
    ("Sari", "Gorgan", 10),
    ("Gorgan", "Mashhad", 30),
    ("Esfahan", "Yazd", 18),
    ("Yazd", "Kerman", 22),
    ("Kerman", "Zahedan", 35),
    ("Mashhad", "Neyshabur", 8),
    ("Neyshabur", "Sabzevar", 10),
    ("Esfahan", "Ahvaz", 45),
    ("Ahvaz", "BandarAbbas", 40),
    ("Bushehr", "BandarAbbas", 30),
    ("BandarAbbas", "Zahedan", 60),
];

/// The intercity road network shipped as the default deployment.
pub fn reference_city_edges() -> Vec<EdgeRecord> {
    REFERENCE_CITY_EDGES
        .iter()
        .map(|(from, to, weight)| EdgeRecord::new(*from, *to, *weight))
        .collect()
}

/// Builds the graph from configured records, or from the reference network
/// when no records are configured.
pub fn build_city_graph(records: Option<&[EdgeRecord]>) -> Result<RouteGraph, GraphError> {
    match records {
        Some(records) => RouteGraph::from_records(records),
        None => RouteGraph::from_records(&reference_city_edges()),
    }
}
