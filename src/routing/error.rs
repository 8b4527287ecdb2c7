use thiserror::Error;

use crate::structures::NodeID;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// Destination unreachable, or no journey meets the deadline.
    #[error("no path found")]
    NoPathFound,
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("edge {edge} of node {node} does not exist")]
    MalformedEdge { node: NodeID, edge: usize },
    #[error("search labels are inconsistent at node {0}")]
    InconsistentPath(NodeID),
}
