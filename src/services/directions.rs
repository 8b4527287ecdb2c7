use crate::{
    routing::{Itinerary, Leg, WALK_MODE},
    structures::{LatLng, format_clock_time},
};

fn coord(loc: LatLng) -> String {
    format!("({:.6}, {:.6})", loc.longitude, loc.latitude)
}

fn describe(leg: &Leg, first: bool, last: bool) -> String {
    if leg.mode == WALK_MODE {
        let from = if first {
            format!("Source {}", coord(leg.from))
        } else {
            coord(leg.from)
        };
        let to = if last {
            format!("Destination {}", coord(leg.to))
        } else {
            coord(leg.to)
        };
        format!("Walk from {from} to {to}")
    } else {
        format!(
            "Ride {} from {} to {}",
            leg.mode,
            coord(leg.from),
            coord(leg.to)
        )
    }
}

/// Human readable directions, one paragraph per leg.
pub fn render_directions(itinerary: &Itinerary, currency: &str) -> String {
    let count = itinerary.legs.len();

    itinerary
        .legs
        .iter()
        .enumerate()
        .map(|(i, leg)| {
            format!(
                "{} - {}, Cost: {currency} {:.2}: {}.\n",
                format_clock_time(leg.departure),
                format_clock_time(leg.arrival),
                leg.fare,
                describe(leg, i == 0, i + 1 == count)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
