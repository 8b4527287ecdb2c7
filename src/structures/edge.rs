use serde::{Deserialize, Serialize};

use crate::structures::{NodeID, Schedule};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModeID(pub u16);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeData {
    pub destination: NodeID,
    /// km
    pub length: f64,
    pub mode: ModeID,
    /// currency per km
    pub fare_rate: f64,
    /// km/h
    pub speed: f64,
    pub schedule: Schedule,
}

impl EdgeData {
    pub fn fare(&self) -> f64 {
        self.length * self.fare_rate
    }

    /// Minutes spent on board.
    pub fn travel_time(&self) -> f64 {
        self.length / self.speed * 60.0
    }
}
