use kdtree::{KdTree, distance::squared_euclidean};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::structures::{EdgeData, LatLng, ModeID, NodeData, NodeID, Schedule};

/// Two coordinates closer than this on both axes (degrees) are the same node.
pub const NODE_TOLERANCE: f64 = 1e-7;

// Squared euclidean radius enclosing the tolerance box.
const NODE_LOOKUP_RADIUS: f64 = 4.0 * NODE_TOLERANCE * NODE_TOLERANCE;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeID),
    #[error("edge {from} -> {to} references a node that was never interned")]
    MalformedEdge { from: NodeID, to: NodeID },
    #[error("mode {0:?} does not exist")]
    ModeNotFound(ModeID),
    #[error("coordinate ({0}) is not finite")]
    NonFiniteCoordinate(LatLng),
    #[error("too many transport modes")]
    TooManyModes,
    #[error("spatial index error: {0}")]
    Index(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    pub name: String,
    /// currency per km
    pub fare_rate: f64,
    /// km/h
    pub speed: f64,
    pub schedule: Schedule,
}

#[derive(Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<NodeData>,
    edges: Vec<Vec<EdgeData>>,
    nodes_tree: KdTree<f64, NodeID, [f64; 2]>,
    modes: Vec<TransportMode>,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    pub fn new() -> Graph {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            nodes_tree: KdTree::new(2),
            modes: Vec::new(),
        }
    }

    /// Returns the node at `lat_lng`, creating it if no existing node lies
    /// within [`NODE_TOLERANCE`]. When several nodes match, the oldest wins.
    pub fn intern_node(&mut self, lat_lng: LatLng) -> Result<NodeID, GraphError> {
        if !lat_lng.latitude.is_finite() || !lat_lng.longitude.is_finite() {
            return Err(GraphError::NonFiniteCoordinate(lat_lng));
        }
        if let Some(id) = self.find_node(lat_lng)? {
            return Ok(id);
        }
        self.add_node(NodeData { lat_lng })
    }

    fn find_node(&self, lat_lng: LatLng) -> Result<Option<NodeID>, GraphError> {
        let candidates = self
            .nodes_tree
            .within(
                &[lat_lng.latitude, lat_lng.longitude],
                NODE_LOOKUP_RADIUS,
                &squared_euclidean,
            )
            .map_err(|e| GraphError::Index(format!("{e:?}")))?;

        Ok(candidates
            .into_iter()
            .map(|(_, id)| *id)
            .filter(|id| {
                let loc = self.nodes[id.0].lat_lng;
                (loc.latitude - lat_lng.latitude).abs() < NODE_TOLERANCE
                    && (loc.longitude - lat_lng.longitude).abs() < NODE_TOLERANCE
            })
            .min())
    }

    fn add_node(&mut self, node: NodeData) -> Result<NodeID, GraphError> {
        let id = NodeID(self.nodes.len());

        self.nodes_tree
            .add([node.lat_lng.latitude, node.lat_lng.longitude], id)
            .map_err(|e| GraphError::Index(format!("{e:?}")))?;
        self.nodes.push(node);
        self.edges.push(Vec::new());

        Ok(id)
    }

    pub fn add_mode(&mut self, mode: TransportMode) -> Result<ModeID, GraphError> {
        if let Some(idx) = self.modes.iter().position(|m| *m == mode) {
            return Ok(ModeID(idx as u16));
        }
        let id = u16::try_from(self.modes.len()).map_err(|_| GraphError::TooManyModes)?;
        self.modes.push(mode);
        Ok(ModeID(id))
    }

    pub fn add_edge(&mut self, from: NodeID, edge: EdgeData) -> Result<(), GraphError> {
        if from.0 >= self.nodes.len() || edge.destination.0 >= self.nodes.len() {
            return Err(GraphError::MalformedEdge {
                from,
                to: edge.destination,
            });
        }
        if edge.mode.0 as usize >= self.modes.len() {
            return Err(GraphError::ModeNotFound(edge.mode));
        }
        self.edges[from.0].push(edge);
        Ok(())
    }

    /// Adds a directed edge of `mode` whose length is the great-circle
    /// distance between the two nodes.
    pub fn connect(&mut self, from: NodeID, to: NodeID, mode: ModeID) -> Result<(), GraphError> {
        let transport = self.get_mode(mode).ok_or(GraphError::ModeNotFound(mode))?;
        let (fare_rate, speed, schedule) = (transport.fare_rate, transport.speed, transport.schedule);

        let length = self.nodes_distance(from, to)?;
        self.add_edge(
            from,
            EdgeData {
                destination: to,
                length,
                mode,
                fare_rate,
                speed,
                schedule,
            },
        )
    }

    pub fn get_node(&self, id: NodeID) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    pub fn get_mode(&self, id: ModeID) -> Option<&TransportMode> {
        self.modes.get(id.0 as usize)
    }

    pub fn mode_name(&self, id: ModeID) -> &str {
        self.get_mode(id).map_or("Unknown", |m| m.name.as_str())
    }

    pub fn edges(&self, from: NodeID) -> &[EdgeData] {
        self.edges.get(from.0).map_or(&[], Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Nearest node by great-circle distance. Scans every node so that ties
    /// resolve to the lowest id.
    pub fn nearest_node_dist(&self, lat_lng: LatLng) -> Option<(f64, NodeID)> {
        let mut best: Option<(f64, NodeID)> = None;
        for (idx, node) in self.nodes.iter().enumerate() {
            let d = lat_lng.dist(node.lat_lng);
            match best {
                Some((best_d, _)) if d >= best_d => {}
                _ => best = Some((d, NodeID(idx))),
            }
        }
        best
    }

    pub fn nodes_distance(&self, a: NodeID, b: NodeID) -> Result<f64, GraphError> {
        let node_a = self.get_node(a).ok_or(GraphError::NodeNotFound(a))?;
        let node_b = self.get_node(b).ok_or(GraphError::NodeNotFound(b))?;

        Ok(node_a.loc().dist(node_b.loc()))
    }
}
