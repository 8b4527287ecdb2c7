use async_graphql::SimpleObject;

use crate::structures::{LatLng, NodeID};

#[derive(Debug, SimpleObject, Clone, Copy)]
pub struct PlanPlace {
    pub lat: f64,
    pub lon: f64,
    /// Graph node, absent for the query's own coordinates.
    pub node: Option<usize>,
}

impl PlanPlace {
    pub fn new(loc: LatLng, node: Option<NodeID>) -> PlanPlace {
        PlanPlace {
            lat: loc.latitude,
            lon: loc.longitude,
            node: node.map(|n| n.0),
        }
    }
}
