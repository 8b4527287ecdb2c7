use std::time::Instant;

use tracing::{debug, info};

use crate::{
    routing::{Itinerary, Leg, RoutingError, label_setting, reconstruct},
    structures::{Graph, LatLng, NodeID, Objective, RouteQuery},
};

/// km/h, used for the walks between the query coordinates and the graph.
pub const WALKING_SPEED: f64 = 2.0;
pub const WALK_MODE: &str = "Walk";

/// Minutes needed to walk `distance` km.
pub fn walking_time(distance: f64) -> f64 {
    distance / WALKING_SPEED * 60.0
}

fn snap(graph: &Graph, loc: LatLng, what: &str) -> Result<(f64, NodeID), RoutingError> {
    let (dist, id) = graph
        .nearest_node_dist(loc)
        .ok_or_else(|| RoutingError::InvalidQuery("graph has no nodes".to_string()))?;
    debug!(
        "Nearest node {what}: {id} at {:.3}km (geo: {})",
        dist,
        graph.get_node(id).map_or(loc, |n| n.loc())
    );
    Ok((dist, id))
}

fn walk_leg(
    from: LatLng,
    to: LatLng,
    from_node: Option<NodeID>,
    to_node: Option<NodeID>,
    length: f64,
    departure: f64,
) -> Leg {
    let travel = walking_time(length);
    Leg {
        mode: WALK_MODE.to_string(),
        from,
        to,
        from_node,
        to_node,
        length,
        wait: 0.0,
        travel,
        fare: 0.0,
        departure,
        arrival: departure + travel,
    }
}

/// Solves one journey query against a finished graph.
///
/// The traveller walks to the node nearest to `query.from`, rides the graph
/// under `query.objective`, then walks from the node nearest to `query.to`.
/// With a deadline, the final walk must also arrive in time, so the search
/// runs against the deadline minus that walk.
pub fn route(graph: &Graph, query: &RouteQuery) -> Result<Itinerary, RoutingError> {
    query.validate().map_err(RoutingError::InvalidQuery)?;

    let (from_dist, from_id) = snap(graph, query.from, "a")?;
    let (to_dist, to_id) = snap(graph, query.to, "b")?;
    let from_loc = graph.get_node(from_id).map_or(query.from, |n| n.loc());
    let to_loc = graph.get_node(to_id).map_or(query.to, |n| n.loc());

    let deadline = query.objective.deadline();
    let first_walk = walk_leg(
        query.from,
        from_loc,
        None,
        Some(from_id),
        from_dist,
        query.start_time,
    );
    let last_walk_time = walking_time(to_dist);
    if deadline.is_some_and(|d| first_walk.arrival > d - last_walk_time) {
        debug!("Deadline passes before the walks alone can be done");
        return Err(RoutingError::NoPathFound);
    }
    let objective = match deadline {
        Some(d) => Objective::CheapestByDeadline {
            deadline: d - last_walk_time,
        },
        None => query.objective,
    };

    let before = Instant::now();
    let tree = label_setting(
        graph,
        objective,
        from_id,
        first_walk.arrival,
        Some(to_id),
    );
    info!(
        objective = query.objective.name(),
        settled = tree.settled_count(),
        elapsed_ms = before.elapsed().as_millis() as u64,
        "search finished"
    );

    let target = match tree.label(to_id) {
        Some(label) if label.settled && label.is_reached() => *label,
        _ => {
            debug!("Didn't find a path after settling {} nodes", tree.settled_count());
            return Err(RoutingError::NoPathFound);
        }
    };

    let ride = reconstruct(graph, &tree, objective, to_id)?;

    let last_walk = walk_leg(to_loc, query.to, Some(to_id), None, to_dist, target.clock);
    if deadline.is_some_and(|d| last_walk.arrival > d) {
        debug!("Final walk misses the deadline");
        return Err(RoutingError::NoPathFound);
    }

    let mut legs = Vec::with_capacity(ride.len() + 2);
    legs.push(first_walk);
    legs.extend(ride);
    legs.push(last_walk);

    Ok(Itinerary {
        objective: query.objective,
        objective_value: target.value,
        legs,
    })
}
