use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::structures::LatLng;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeData {
    pub lat_lng: LatLng,
}

impl NodeData {
    pub fn loc(&self) -> LatLng {
        self.lat_lng
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeID(pub usize);

impl Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
