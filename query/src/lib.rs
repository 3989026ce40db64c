pub mod dsl;
pub mod engine;
pub mod search;

pub use dsl::{RouteRequest, RouteValidationError};
pub use engine::{RouteError, RoutePlanner, RouteResponse};
pub use search::{shortest_path, PathSearch, SearchResult};
