pub mod index;
pub mod render;
pub mod seed;

pub use index::{GraphError, RouteGraph};
