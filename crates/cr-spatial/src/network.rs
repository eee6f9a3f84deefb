//! Road network representation and builder.
//!
//! # Data layout
//!
//! Edges are stored column-wise and grouped by source node, so the
//! outgoing edges of node `n` are the `EdgeId` range
//!
//! ```text
//! node_out_start[n] .. node_out_start[n + 1]
//! ```
//!
//! into `edge_from`, `edge_to`, `edge_length_m` and `edge_travel_ms`.
//!
//! # Weights
//!
//! Every edge carries a length in metres and a travel time in milliseconds.
//! Both are non-negative: lengths are checked when the edge is added, and
//! travel times are unsigned.
//!
//! # Spatial index
//!
//! Node positions are bulk-loaded into an `rstar` R-tree keyed on
//! `[lat, lon]`.  Facility locations and query coordinates are snapped to
//! road nodes through it.

use rstar::RTree;
use rstar::primitives::GeomWithData;

use cr_core::{EdgeId, GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

/// R-tree entry: `[lat, lon]` tagged with its node.  Distances are squared
/// degrees, which orders nodes correctly at city scale.
type NodeEntry = GeomWithData<[f32; 2], NodeId>;

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph with a spatial index for snapping.
///
/// Fields are `pub` so routing code can index them directly.  Build one with
/// [`RoadNetworkBuilder`]; a built network is never mutated.
pub struct RoadNetwork {
    /// Position of each node, indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Start of each node's edge range; `node_count + 1` entries.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.  Route reconstruction walks this backwards.
    pub edge_from: Vec<NodeId>,

    pub edge_to: Vec<NodeId>,

    /// Metres.
    pub edge_length_m: Vec<f32>,

    /// Milliseconds by car.
    pub edge_travel_ms: Vec<u32>,

    index: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// A network with no nodes.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` is a node of this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// `Ok(())` if `node` exists, [`SpatialError::NodeNotFound`] otherwise.
    #[inline]
    pub fn check_node(&self, node: NodeId) -> SpatialResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(SpatialError::NodeNotFound(node))
        }
    }

    /// Position of `node`, or `None` if it is not in the network.
    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// Edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let first = self.node_out_start[node.index()];
        let last = self.node_out_start[node.index() + 1];
        (first..last).map(EdgeId)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Closest node to `pos`.  `None` only for an empty network.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.index.nearest_neighbor(&[pos.lat, pos.lon]).map(|e| e.data)
    }

    /// Up to `k` nodes ordered from nearest to farthest.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.index
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.data)
            .collect()
    }

    /// All nodes within `radius_m` metres (great-circle) of `pos`, in
    /// ascending `NodeId` order.
    pub fn nodes_within_m(&self, pos: GeoPoint, radius_m: f32) -> Vec<NodeId> {
        let r_deg = pos.degree_radius(radius_m);
        let mut found: Vec<NodeId> = self
            .index
            .locate_within_distance([pos.lat, pos.lon], r_deg * r_deg)
            .map(|e| e.data)
            .filter(|n| self.node_pos[n.index()].distance_m(pos) <= radius_m)
            .collect();
        found.sort_unstable();
        found
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Collects nodes and edges, then freezes them with [`build`](Self::build).
///
/// Nodes must be added before the edges that reference them.
///
/// # Example
///
/// ```
/// use cr_core::GeoPoint;
/// use cr_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(53.219, 6.566));
/// let c = b.add_node(GeoPoint::new(53.222, 6.575));
/// b.add_road(a, c, 700.0, 50_000).unwrap(); // 700 m, 50 s
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // one per direction
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes: Vec<GeoPoint>,
    edges: Vec<PendingEdge>,
}

struct PendingEdge {
    from:      NodeId,
    to:        NodeId,
    length_m:  f32,
    travel_ms: u32,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `nodes` nodes and `edges` directed edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node; ids are handed out sequentially from 0.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        self.nodes.push(pos);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Add one directed edge.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`] if either endpoint has not been added,
    /// [`SpatialError::InvalidWeight`] for a negative or non-finite length.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length_m: f32,
        travel_ms: u32,
    ) -> SpatialResult<()> {
        if let Some(&missing) = [from, to].iter().find(|n| n.index() >= self.nodes.len()) {
            return Err(SpatialError::NodeNotFound(missing));
        }
        if !(length_m.is_finite() && length_m >= 0.0) {
            return Err(SpatialError::InvalidWeight { from, to, length_m });
        }
        self.edges.push(PendingEdge { from, to, length_m, travel_ms });
        Ok(())
    }

    /// Add a two-way road as a pair of directed edges.
    pub fn add_road(
        &mut self,
        a: NodeId,
        b: NodeId,
        length_m: f32,
        travel_ms: u32,
    ) -> SpatialResult<()> {
        self.add_directed_edge(a, b, length_m, travel_ms)?;
        self.add_directed_edge(b, a, length_m, travel_ms)
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Group edges by source node and load the R-tree.
    ///
    /// Edges of one node keep the order they were added in.
    pub fn build(self) -> RoadNetwork {
        let Self { nodes, mut edges } = self;
        edges.sort_by_key(|e| e.from.0);

        let mut node_out_start = vec![0u32; nodes.len() + 1];
        let mut edge_from = Vec::with_capacity(edges.len());
        let mut edge_to = Vec::with_capacity(edges.len());
        let mut edge_length_m = Vec::with_capacity(edges.len());
        let mut edge_travel_ms = Vec::with_capacity(edges.len());

        for e in &edges {
            node_out_start[e.from.index() + 1] += 1;
            edge_from.push(e.from);
            edge_to.push(e.to);
            edge_length_m.push(e.length_m);
            edge_travel_ms.push(e.travel_ms);
        }
        // Per-node counts into running offsets.
        for i in 1..node_out_start.len() {
            node_out_start[i] += node_out_start[i - 1];
        }

        let index = RTree::bulk_load(
            nodes
                .iter()
                .enumerate()
                .map(|(i, p)| NodeEntry::new([p.lat, p.lon], NodeId(i as u32)))
                .collect(),
        );

        log::debug!("built road network: {} nodes, {} edges", nodes.len(), edges.len());

        RoadNetwork {
            node_pos: nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_travel_ms,
            index,
        }
    }
}
