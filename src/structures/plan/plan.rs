use async_graphql::{Enum, SimpleObject};

use crate::{
    routing::Itinerary,
    structures::{Objective, ObjectiveKind, plan::PlanLeg},
};

#[derive(Debug, Enum, Copy, Clone, PartialEq, Eq)]
pub enum PlanObjective {
    ShortestDistance,
    CheapestFare,
    EarliestArrival,
    CheapestByDeadline,
}

impl From<PlanObjective> for ObjectiveKind {
    fn from(o: PlanObjective) -> Self {
        match o {
            PlanObjective::ShortestDistance => ObjectiveKind::ShortestDistance,
            PlanObjective::CheapestFare => ObjectiveKind::CheapestFare,
            PlanObjective::EarliestArrival => ObjectiveKind::EarliestArrival,
            PlanObjective::CheapestByDeadline => ObjectiveKind::CheapestByDeadline,
        }
    }
}

impl From<Objective> for PlanObjective {
    fn from(o: Objective) -> Self {
        match o {
            Objective::ShortestDistance => PlanObjective::ShortestDistance,
            Objective::CheapestFare => PlanObjective::CheapestFare,
            Objective::EarliestArrival => PlanObjective::EarliestArrival,
            Objective::CheapestByDeadline { .. } => PlanObjective::CheapestByDeadline,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct Plan {
    pub objective: PlanObjective,
    pub objective_value: f64,
    pub legs: Vec<PlanLeg>,
    pub start: f64,
    pub end: f64,
    pub fare: f64,
    pub length: f64,
}

impl From<&Itinerary> for Plan {
    fn from(itinerary: &Itinerary) -> Self {
        Plan {
            objective: itinerary.objective.into(),
            objective_value: itinerary.objective_value,
            legs: itinerary.legs.iter().map(<PlanLeg as From<&_>>::from).collect(),
            start: itinerary.departure().unwrap_or_default(),
            end: itinerary.arrival().unwrap_or_default(),
            fare: itinerary.total_fare(),
            length: itinerary.total_length(),
        }
    }
}
