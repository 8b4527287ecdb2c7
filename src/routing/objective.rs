use crate::structures::{EdgeData, Objective};

/// Cost of taking one edge from a given clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub wait: f64,
    pub travel: f64,
    pub fare: f64,
    pub arrival: f64,
}

impl Objective {
    /// Label of the source node once the traveller stands on it at `clock`.
    pub fn initial_label(&self, clock: f64) -> f64 {
        match self {
            Objective::EarliestArrival => clock,
            _ => 0.0,
        }
    }

    /// Traverses `edge` from `clock`, or `None` when this objective cannot
    /// use the edge at that time.
    ///
    /// Distance and fare searches ignore schedules entirely: they never wait
    /// and every edge is usable. The clock is still carried along for the
    /// itinerary.
    pub fn step(&self, clock: f64, edge: &EdgeData) -> Option<Step> {
        let travel = edge.travel_time();
        let fare = edge.fare();

        if !self.is_time_dependent() {
            return Some(Step {
                wait: 0.0,
                travel,
                fare,
                arrival: clock + travel,
            });
        }

        let wait = edge.schedule.wait_time(clock)?;
        let arrival = clock + wait + travel;
        if let Some(deadline) = self.deadline() {
            if arrival > deadline {
                return None;
            }
        }

        Some(Step {
            wait,
            travel,
            fare,
            arrival,
        })
    }

    /// Label reached at the head of `edge` from a tail labelled `label`.
    pub fn relax(&self, label: f64, edge: &EdgeData, step: &Step) -> f64 {
        match self {
            Objective::ShortestDistance => label + edge.length,
            Objective::CheapestFare | Objective::CheapestByDeadline { .. } => label + step.fare,
            Objective::EarliestArrival => step.arrival,
        }
    }
}
