use async_graphql::{Enum, SimpleObject};

use crate::{
    routing::{Leg, WALK_MODE},
    structures::{format_clock_time, plan::PlanPlace},
};

#[derive(Debug, Enum, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlanLegType {
    WALK,
    RIDE,
}

#[derive(Debug, SimpleObject, Clone)]
pub struct PlanLeg {
    pub leg_type: PlanLegType,
    pub mode: String,
    /// km
    pub length: f64,
    /// minutes
    pub wait: f64,
    /// minutes
    pub travel: f64,
    pub fare: f64,
    /// minutes since midnight
    pub start: f64,
    pub end: f64,
    pub start_clock: String,
    pub end_clock: String,

    pub from: PlanPlace,
    pub to: PlanPlace,
}

impl From<&Leg> for PlanLeg {
    fn from(leg: &Leg) -> Self {
        PlanLeg {
            leg_type: if leg.mode == WALK_MODE {
                PlanLegType::WALK
            } else {
                PlanLegType::RIDE
            },
            mode: leg.mode.clone(),
            length: leg.length,
            wait: leg.wait,
            travel: leg.travel,
            fare: leg.fare,
            start: leg.departure,
            end: leg.arrival,
            start_clock: format_clock_time(leg.departure),
            end_clock: format_clock_time(leg.arrival),
            from: PlanPlace::new(leg.from, leg.from_node),
            to: PlanPlace::new(leg.to, leg.to_node),
        }
    }
}
