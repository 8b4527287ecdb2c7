mod config;
mod edge;
mod geo;
mod graph;
mod node;
pub mod plan;
mod query;
mod schedule;

pub use config::*;
pub use edge::*;
pub use geo::*;
pub use graph::*;
pub use node::*;
pub use query::*;
pub use schedule::*;
