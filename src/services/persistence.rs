use std::fs;

use postcard::{from_bytes, to_allocvec};
use tracing::info;

use crate::structures::Graph;

pub fn save_graph(graph: &Graph, path: &str) -> Result<(), String> {
    let bytes = to_allocvec(graph).map_err(|e| format!("Failed to serialize graph: {e}"))?;
    fs::write(path, &bytes).map_err(|e| format!("Failed to save graph: {e}"))?;
    info!(bytes = bytes.len(), "Graph saved to {}", path);
    Ok(())
}

pub fn load_graph(path: &str) -> Result<Graph, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read graph file: {e}"))?;
    let graph: Graph =
        from_bytes(&bytes).map_err(|e| format!("Failed to deserialize graph: {e}"))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Graph restored from {}",
        path
    );
    Ok(graph)
}
