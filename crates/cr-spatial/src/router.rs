//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The nearest-facility router calls path searches through the
//! [`ShortestPath`] trait, so applications can swap in another engine
//! (contraction hierarchies, A*) without touching the facility logic.  The
//! default [`DijkstraRouter`] walks the graph from scratch on every call.
//!
//! # Weights and units
//!
//! A search minimises one edge attribute, chosen by [`Weight`]:
//!
//! | Weight        | Edge field        | Reported unit |
//! |---------------|-------------------|---------------|
//! | `Length`      | `edge_length_m`   | metres        |
//! | `TravelTime`  | `edge_travel_ms`  | seconds       |
//!
//! Costs are accumulated in `f64`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use cr_core::{EdgeId, GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::SpatialResult;

// ── Weight / PathLength ───────────────────────────────────────────────────────

/// Edge attribute minimised by a shortest-path search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weight {
    /// Physical length in metres.
    Length,
    /// Car travel time in seconds.
    TravelTime,
}

impl Weight {
    /// Cost of traversing `edge` under this weight.
    #[inline]
    pub fn edge_cost(self, network: &RoadNetwork, edge: EdgeId) -> f64 {
        match self {
            Weight::Length => network.edge_length_m[edge.index()] as f64,
            Weight::TravelTime => network.edge_travel_ms[edge.index()] as f64 / 1_000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weight::Length => "length",
            Weight::TravelTime => "travel_time",
        }
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a shortest-path-length query.
///
/// A missing path is an ordinary outcome, not an error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathLength {
    /// Minimum total weight over all paths.
    Reachable(f64),
    /// No path exists from source to target.
    Unreachable,
}

impl PathLength {
    /// The path length, or `None` if unreachable.
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            PathLength::Reachable(v) => Some(v),
            PathLength::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, PathLength::Reachable(_))
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered list of `EdgeId`s and the total
/// cost under the weight that was minimised.
#[derive(Debug, Clone)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Weight the route minimises.
    pub weight: Weight,
    /// Sum of edge costs along the route (metres or seconds).
    pub total_cost: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of edge lengths along the route, whatever weight was minimised.
    pub fn length_m(&self, network: &RoadNetwork) -> f64 {
        self.edges.iter().map(|&e| Weight::Length.edge_cost(network, e)).sum()
    }

    /// Sum of edge travel times along the route, in seconds.
    pub fn travel_secs(&self, network: &RoadNetwork) -> f64 {
        self.edges.iter().map(|&e| Weight::TravelTime.edge_cost(network, e)).sum()
    }

    /// Node positions visited by the route, source first.  Empty for a
    /// trivial route.
    pub fn geometry(&self, network: &RoadNetwork) -> Vec<GeoPoint> {
        let Some(&first) = self.edges.first() else {
            return Vec::new();
        };
        let mut points = Vec::with_capacity(self.edges.len() + 1);
        points.push(network.node_pos[network.edge_from[first.index()].index()]);
        points.extend(
            self.edges
                .iter()
                .map(|e| network.node_pos[network.edge_to[e.index()].index()]),
        );
        points
    }
}

// ── ShortestPath trait ────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Both methods fail with [`SpatialError::NodeNotFound`](crate::SpatialError::NodeNotFound)
/// when `from` or `to` is not part of `network`.  `from == to` is a
/// zero-length path.
pub trait ShortestPath: Send + Sync {
    /// Minimum total `weight` over all paths from `from` to `to`.
    fn path_length(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> SpatialResult<PathLength>;

    /// The minimising route itself, or `None` if no path exists.
    fn route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> SpatialResult<Option<Route>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
///
/// Correct because every edge weight is non-negative (enforced by
/// [`RoadNetworkBuilder`](crate::RoadNetworkBuilder)).
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl ShortestPath for DijkstraRouter {
    fn path_length(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> SpatialResult<PathLength> {
        Ok(match dijkstra(network, from, to, weight)? {
            Some(search) => PathLength::Reachable(search.cost),
            None => PathLength::Unreachable,
        })
    }

    fn route(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> SpatialResult<Option<Route>> {
        Ok(dijkstra(network, from, to, weight)?
            .map(|search| reconstruct(network, &search.prev_edge, to, weight, search.cost)))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key: an `f64` cost with a total order.  Costs are finite and
/// non-negative, so `total_cmp` agrees with numeric order.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Search {
    cost: f64,
    prev_edge: Vec<EdgeId>,
}

fn dijkstra(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    weight: Weight,
) -> SpatialResult<Option<Search>> {
    network.check_node(from)?;
    network.check_node(to)?;

    let n = network.node_count();
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    if from == to {
        return Ok(Some(Search { cost: 0.0, prev_edge }));
    }

    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    dist[from.index()] = 0.0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(Some(Search { cost, prev_edge }));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + weight.edge_cost(network, edge);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Ok(None)
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    to: NodeId,
    weight: Weight,
    total_cost: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Route { edges, weight, total_cost }
}
