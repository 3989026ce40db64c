pub mod graph;

pub use graph::{Adjacency, GraphError, RouteGraph};
