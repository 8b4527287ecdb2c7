use serde::Serialize;

use crate::{
    routing::{RoutingError, SearchTree},
    structures::{Graph, LatLng, NodeID, Objective},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub mode: String,
    pub from: LatLng,
    pub to: LatLng,
    /// Graph nodes at each end; `None` for the query coordinates themselves.
    pub from_node: Option<NodeID>,
    pub to_node: Option<NodeID>,
    /// km
    pub length: f64,
    /// minutes
    pub wait: f64,
    /// minutes
    pub travel: f64,
    pub fare: f64,
    /// Clock time the vehicle (or walker) leaves, after any wait.
    pub departure: f64,
    pub arrival: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub objective: Objective,
    /// Label of the destination node under `objective`.
    pub objective_value: f64,
    pub legs: Vec<Leg>,
}

impl Itinerary {
    pub fn departure(&self) -> Option<f64> {
        self.legs.first().map(|l| l.departure)
    }

    pub fn arrival(&self) -> Option<f64> {
        self.legs.last().map(|l| l.arrival)
    }

    pub fn total_fare(&self) -> f64 {
        self.legs.iter().map(|l| l.fare).sum()
    }

    pub fn total_length(&self) -> f64 {
        self.legs.iter().map(|l| l.length).sum()
    }
}

/// Rebuilds the legs leading from the search source to `target`.
///
/// Each leg is recomputed forward from the source clock with the same step
/// function the search used, so wait, travel and fare are reported per leg.
pub fn reconstruct(
    graph: &Graph,
    tree: &SearchTree,
    objective: Objective,
    target: NodeID,
) -> Result<Vec<Leg>, RoutingError> {
    let mut hops = Vec::<(NodeID, usize)>::new();
    let mut current = target;

    while let Some((prev, idx)) = tree.label(current).and_then(|l| l.predecessor) {
        if hops.len() >= graph.node_count() {
            return Err(RoutingError::InconsistentPath(current));
        }
        hops.push((prev, idx));
        current = prev;
    }
    if current != tree.source() {
        return Err(RoutingError::InconsistentPath(current));
    }
    hops.reverse();

    let mut clock = tree
        .label(tree.source())
        .map(|l| l.clock)
        .ok_or(RoutingError::InconsistentPath(tree.source()))?;
    let mut legs = Vec::with_capacity(hops.len());

    for (node, idx) in hops {
        let edge = graph
            .edges(node)
            .get(idx)
            .ok_or(RoutingError::MalformedEdge { node, edge: idx })?;
        let step = objective
            .step(clock, edge)
            .ok_or(RoutingError::InconsistentPath(node))?;
        let from = graph
            .get_node(node)
            .ok_or(RoutingError::MalformedEdge { node, edge: idx })?;
        let to = graph
            .get_node(edge.destination)
            .ok_or(RoutingError::MalformedEdge { node, edge: idx })?;

        legs.push(Leg {
            mode: graph.mode_name(edge.mode).to_string(),
            from: from.loc(),
            to: to.loc(),
            from_node: Some(node),
            to_node: Some(edge.destination),
            length: edge.length,
            wait: step.wait,
            travel: step.travel,
            fare: step.fare,
            departure: clock + step.wait,
            arrival: step.arrival,
        });
        clock = step.arrival;
    }

    Ok(legs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        routing::label_setting,
        structures::{Schedule, TransportMode},
    };

    fn metro_line() -> (Graph, Vec<NodeID>) {
        let mut g = Graph::new();
        let metro = g
            .add_mode(TransportMode {
                name: "Metro".to_string(),
                fare_rate: 5.0,
                speed: 15.0,
                schedule: Schedule::new(5.0, 1, 23),
            })
            .unwrap();
        let ids: Vec<NodeID> = (0..3)
            .map(|i| g.intern_node(LatLng::new(23.7 + f64::from(i) * 0.02, 90.4)).unwrap())
            .collect();
        g.connect(ids[0], ids[1], metro).unwrap();
        g.connect(ids[1], ids[2], metro).unwrap();
        (g, ids)
    }

    #[test]
    fn legs_chain_in_time() {
        let (g, ids) = metro_line();
        let objective = Objective::EarliestArrival;
        let tree = label_setting(&g, objective, ids[0], 601.0, Some(ids[2]));
        let legs = reconstruct(&g, &tree, objective, ids[2]).unwrap();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].mode, "Metro");
        assert_eq!(legs[0].wait, 4.0);
        assert_eq!(legs[0].departure, 605.0);
        assert_eq!(legs[0].from_node, Some(ids[0]));
        assert_eq!(legs[1].to_node, Some(ids[2]));
        assert!((legs[1].departure - legs[1].wait - legs[0].arrival).abs() < 1e-9);
        assert_eq!(legs[1].arrival, tree.label(ids[2]).unwrap().clock);
        assert_eq!(legs[1].arrival, tree.label(ids[2]).unwrap().value);
    }

    #[test]
    fn source_as_target_has_no_legs() {
        let (g, ids) = metro_line();
        let tree = label_setting(&g, Objective::CheapestFare, ids[1], 0.0, Some(ids[1]));
        assert!(reconstruct(&g, &tree, Objective::CheapestFare, ids[1]).unwrap().is_empty());
    }

    #[test]
    fn unreached_target_is_inconsistent() {
        let (g, ids) = metro_line();
        let tree = label_setting(&g, Objective::CheapestFare, ids[2], 0.0, None);
        assert_eq!(
            reconstruct(&g, &tree, Objective::CheapestFare, ids[0]),
            Err(RoutingError::InconsistentPath(ids[0]))
        );
    }

    #[test]
    fn itinerary_totals() {
        let (g, ids) = metro_line();
        let tree = label_setting(&g, Objective::CheapestFare, ids[0], 540.0, None);
        let legs = reconstruct(&g, &tree, Objective::CheapestFare, ids[2]).unwrap();
        let itinerary = Itinerary {
            objective: Objective::CheapestFare,
            objective_value: tree.label(ids[2]).unwrap().value,
            legs,
        };
        assert!((itinerary.total_fare() - itinerary.objective_value).abs() < 1e-9);
        assert_eq!(itinerary.departure(), Some(540.0));
        assert!(itinerary.total_length() > 0.0);
    }
}
