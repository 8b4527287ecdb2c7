use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::structures::LatLng;

/// Parses an `HH:MM` clock time into minutes since midnight.
pub fn parse_clock_time(s: &str) -> Result<f64, String> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| format!("Invalid clock time '{s}': {e}"))?;
    Ok(f64::from(time.hour() * 60 + time.minute()))
}

/// Renders minutes since midnight on a 12-hour clock, folding into one day.
pub fn format_clock_time(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        (minutes.floor() as u64 % (24 * 60)) as u32
    } else {
        0
    };
    NaiveTime::from_hms_opt(total / 60, total % 60, 0)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Objective without its parameters, as picked by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    ShortestDistance,
    CheapestFare,
    EarliestArrival,
    CheapestByDeadline,
}

/// Scalar a query minimises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Objective {
    ShortestDistance,
    CheapestFare,
    EarliestArrival,
    /// Cheapest fare among journeys arriving no later than `deadline`
    /// (minutes since midnight).
    CheapestByDeadline { deadline: f64 },
}

impl Objective {
    pub fn name(&self) -> &'static str {
        match self {
            Objective::ShortestDistance => "shortest-distance",
            Objective::CheapestFare => "cheapest-fare",
            Objective::EarliestArrival => "earliest-arrival",
            Objective::CheapestByDeadline { .. } => "cheapest-by-deadline",
        }
    }

    /// Whether departures and service windows constrain the search.
    pub fn is_time_dependent(&self) -> bool {
        matches!(
            self,
            Objective::EarliestArrival | Objective::CheapestByDeadline { .. }
        )
    }

    pub fn deadline(&self) -> Option<f64> {
        match self {
            Objective::CheapestByDeadline { deadline } => Some(*deadline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub from: LatLng,
    pub to: LatLng,
    pub objective: Objective,
    /// Minutes since midnight at which the traveller leaves `from`.
    pub start_time: f64,
}

impl RouteQuery {
    /// Builds a query from caller-supplied `HH:MM` times. A missing start
    /// falls back to `default_start`; a deadline is required for, and only
    /// for, [`ObjectiveKind::CheapestByDeadline`].
    pub fn parse(
        from: LatLng,
        to: LatLng,
        kind: ObjectiveKind,
        start: Option<&str>,
        deadline: Option<&str>,
        default_start: f64,
    ) -> Result<RouteQuery, String> {
        let start_time = match start {
            Some(s) => parse_clock_time(s)?,
            None => default_start,
        };
        let objective = match (kind, deadline) {
            (ObjectiveKind::ShortestDistance, None) => Objective::ShortestDistance,
            (ObjectiveKind::CheapestFare, None) => Objective::CheapestFare,
            (ObjectiveKind::EarliestArrival, None) => Objective::EarliestArrival,
            (ObjectiveKind::CheapestByDeadline, Some(d)) => Objective::CheapestByDeadline {
                deadline: parse_clock_time(d)?,
            },
            (ObjectiveKind::CheapestByDeadline, None) => {
                return Err("A deadline is required".to_string());
            }
            (_, Some(_)) => return Err("Only the deadline objective takes a deadline".to_string()),
        };

        let query = RouteQuery {
            from,
            to,
            objective,
            start_time,
        };
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.from.is_valid() {
            return Err(format!("invalid source coordinate ({})", self.from));
        }
        if !self.to.is_valid() {
            return Err(format!("invalid destination coordinate ({})", self.to));
        }
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(format!("invalid start time {}", self.start_time));
        }
        if let Some(deadline) = self.objective.deadline() {
            if !deadline.is_finite() {
                return Err(format!("invalid deadline {deadline}"));
            }
            if deadline < self.start_time {
                return Err(format!(
                    "deadline {deadline} is earlier than start time {}",
                    self.start_time
                ));
            }
        }
        Ok(())
    }
}
