use std::cmp::{Ordering, Reverse};

use priority_queue::PriorityQueue;
use tracing::debug;

use crate::structures::{Graph, NodeID, Objective};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// Objective value; `f64::INFINITY` until the node is reached.
    pub value: f64,
    /// Clock time (minutes since midnight) when the traveller reaches the node.
    pub clock: f64,
    /// Previous node and the index of the edge taken from it.
    pub predecessor: Option<(NodeID, usize)>,
    pub settled: bool,
}

impl Label {
    const UNREACHED: Label = Label {
        value: f64::INFINITY,
        clock: f64::INFINITY,
        predecessor: None,
        settled: false,
    };

    pub fn is_reached(&self) -> bool {
        self.value.is_finite()
    }
}

/// Frontier ordering: smallest label first, then smallest node id, which is
/// the order a linear scan for the minimum would pick.
#[derive(Debug, Clone, Copy)]
struct SearchPriority {
    value: f64,
    node: NodeID,
}

impl Ord for SearchPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for SearchPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchPriority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchPriority {}

/// Labels produced by one search run. Owned by the query, the graph is
/// never touched.
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: NodeID,
    labels: Vec<Label>,
    settled_order: Vec<NodeID>,
}

impl SearchTree {
    pub fn source(&self) -> NodeID {
        self.source
    }

    pub fn label(&self, id: NodeID) -> Option<&Label> {
        self.labels.get(id.0)
    }

    /// Nodes in the order they were settled.
    pub fn settled_order(&self) -> &[NodeID] {
        &self.settled_order
    }

    pub fn settled_count(&self) -> usize {
        self.settled_order.len()
    }
}

/// Dijkstra-style label-setting search from `source`, where the traveller
/// stands at clock time `start_clock`.
///
/// Stops as soon as `target` is settled, or when the frontier runs dry.
pub fn label_setting(
    graph: &Graph,
    objective: Objective,
    source: NodeID,
    start_clock: f64,
    target: Option<NodeID>,
) -> SearchTree {
    let mut labels = vec![Label::UNREACHED; graph.node_count()];
    let mut settled_order = Vec::new();
    let mut pq = PriorityQueue::<NodeID, Reverse<SearchPriority>>::new();

    if source.0 >= labels.len() {
        return SearchTree {
            source,
            labels,
            settled_order,
        };
    }
    let initial = objective.initial_label(start_clock);
    labels[source.0].value = initial;
    labels[source.0].clock = start_clock;
    pq.push(
        source,
        Reverse(SearchPriority {
            value: initial,
            node: source,
        }),
    );

    while let Some((id, _)) = pq.pop() {
        let current = &mut labels[id.0];
        current.settled = true;
        let (value, clock) = (current.value, current.clock);
        settled_order.push(id);

        if target == Some(id) {
            break;
        }

        for (idx, edge) in graph.edges(id).iter().enumerate() {
            let next = edge.destination;
            if labels[next.0].settled {
                continue;
            }

            let Some(step) = objective.step(clock, edge) else {
                continue;
            };
            let candidate = objective.relax(value, edge, &step);

            if candidate < labels[next.0].value {
                labels[next.0] = Label {
                    value: candidate,
                    clock: step.arrival,
                    predecessor: Some((id, idx)),
                    settled: false,
                };
                pq.push(
                    next,
                    Reverse(SearchPriority {
                        value: candidate,
                        node: next,
                    }),
                );
            }
        }
    }

    debug!(
        objective = objective.name(),
        settled = settled_order.len(),
        "label-setting search done"
    );

    SearchTree {
        source,
        labels,
        settled_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{EdgeData, LatLng, Schedule, TransportMode};

    fn line_graph() -> (Graph, Vec<NodeID>) {
        // 0 -> 1 -> 2 by car, 0 -> 2 directly by an expensive taxi.
        let mut g = Graph::new();
        let car = g
            .add_mode(TransportMode {
                name: "Car".to_string(),
                fare_rate: 1.0,
                speed: 60.0,
                schedule: Schedule::UNSCHEDULED,
            })
            .unwrap();
        let ids: Vec<NodeID> = (0..3)
            .map(|i| g.intern_node(LatLng::new(0.0, f64::from(i) * 0.01)).unwrap())
            .collect();
        let edge = |to: NodeID, length: f64, fare_rate: f64| EdgeData {
            destination: to,
            length,
            mode: car,
            fare_rate,
            speed: 60.0,
            schedule: Schedule::UNSCHEDULED,
        };
        g.add_edge(ids[0], edge(ids[1], 1.0, 1.0)).unwrap();
        g.add_edge(ids[1], edge(ids[2], 1.0, 1.0)).unwrap();
        g.add_edge(ids[0], edge(ids[2], 1.5, 10.0)).unwrap();
        (g, ids)
    }

    #[test]
    fn distance_prefers_short_edge() {
        let (g, ids) = line_graph();
        let tree = label_setting(&g, Objective::ShortestDistance, ids[0], 0.0, None);
        let label = tree.label(ids[2]).unwrap();
        assert_eq!(label.value, 1.5);
        assert_eq!(label.predecessor, Some((ids[0], 1)));
        assert!((label.clock - 1.5).abs() < 1e-12);
    }

    #[test]
    fn fare_prefers_cheap_chain() {
        let (g, ids) = line_graph();
        let tree = label_setting(&g, Objective::CheapestFare, ids[0], 0.0, None);
        let label = tree.label(ids[2]).unwrap();
        assert_eq!(label.value, 2.0);
        assert_eq!(label.predecessor, Some((ids[1], 0)));
    }

    #[test]
    fn settles_each_node_once_in_order() {
        let (g, ids) = line_graph();
        let tree = label_setting(&g, Objective::CheapestFare, ids[0], 0.0, None);
        assert_eq!(tree.settled_order(), &[ids[0], ids[1], ids[2]]);

        let values: Vec<f64> = tree
            .settled_order()
            .iter()
            .map(|id| tree.label(*id).unwrap().value)
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn stops_at_target() {
        let (g, ids) = line_graph();
        let tree = label_setting(&g, Objective::CheapestFare, ids[0], 0.0, Some(ids[1]));
        assert!(tree.label(ids[1]).unwrap().settled);
        assert!(!tree.label(ids[2]).unwrap().settled);
    }

    #[test]
    fn ties_settle_lowest_id_first() {
        let mut g = Graph::new();
        let car = g
            .add_mode(TransportMode {
                name: "Car".to_string(),
                fare_rate: 1.0,
                speed: 60.0,
                schedule: Schedule::UNSCHEDULED,
            })
            .unwrap();
        let s = g.intern_node(LatLng::new(0.0, 0.0)).unwrap();
        let a = g.intern_node(LatLng::new(0.0, 1.0)).unwrap();
        let b = g.intern_node(LatLng::new(0.0, -1.0)).unwrap();
        // b is discovered before a but has the same label.
        g.connect(s, b, car).unwrap();
        g.connect(s, a, car).unwrap();

        let tree = label_setting(&g, Objective::ShortestDistance, s, 0.0, None);
        assert_eq!(tree.settled_order(), &[s, a, b]);
    }

    #[test]
    fn unknown_source_yields_empty_tree() {
        let (g, _) = line_graph();
        let tree = label_setting(&g, Objective::ShortestDistance, NodeID(99), 0.0, None);
        assert_eq!(tree.settled_count(), 0);
    }

    #[test]
    fn unreachable_nodes_keep_infinite_labels() {
        let (g, ids) = line_graph();
        let tree = label_setting(&g, Objective::EarliestArrival, ids[2], 0.0, None);
        assert!(!tree.label(ids[0]).unwrap().is_reached());
        assert_eq!(tree.settled_count(), 1);
    }
}
