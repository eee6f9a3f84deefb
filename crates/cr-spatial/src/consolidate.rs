//! Intersection consolidation.
//!
//! OSM draws a divided-road junction as a cluster of nodes a few metres
//! apart.  [`consolidate_intersections`] merges every group of nodes that
//! are (transitively) within a tolerance of each other into one node placed
//! at the group's mean position.  Dead ends are merged like any other node.
//!
//! Edges whose endpoints land in the same group disappear; every other edge
//! is remapped onto the merged nodes with its length and travel time kept.

use petgraph::unionfind::UnionFind;

use cr_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

/// A consolidated network plus the mapping from the old node ids.
pub struct Consolidated {
    pub network: RoadNetwork,
    /// `node_map[old.index()]` is the merged node that `old` became.
    pub node_map: Vec<NodeId>,
}

impl Consolidated {
    /// Merged node for an id of the original network.
    pub fn map_node(&self, old: NodeId) -> Option<NodeId> {
        self.node_map.get(old.index()).copied()
    }
}

/// Merge nodes closer than `tolerance_m` metres.
///
/// New node ids follow the order in which each group's lowest old id
/// appears, so the result is deterministic.  A tolerance of `0` only merges
/// nodes at identical positions.
///
/// # Errors
///
/// [`SpatialError::InvalidTolerance`] for a negative or non-finite tolerance.
pub fn consolidate_intersections(
    network: &RoadNetwork,
    tolerance_m: f32,
) -> SpatialResult<Consolidated> {
    if !(tolerance_m.is_finite() && tolerance_m >= 0.0) {
        return Err(SpatialError::InvalidTolerance(tolerance_m));
    }

    let n = network.node_count();
    let mut groups = UnionFind::<usize>::new(n);
    for (i, &pos) in network.node_pos.iter().enumerate() {
        for other in network.nodes_within_m(pos, tolerance_m) {
            if other.index() > i {
                groups.union(i, other.index());
            }
        }
    }
    let labels = groups.into_labeling();

    // Assign new ids in order of first appearance of each group.
    let mut group_new_id = vec![NodeId::INVALID; n];
    let mut members: Vec<Vec<GeoPoint>> = Vec::new();
    let mut node_map = Vec::with_capacity(n);
    for (i, &root) in labels.iter().enumerate() {
        if group_new_id[root] == NodeId::INVALID {
            group_new_id[root] = NodeId(members.len() as u32);
            members.push(Vec::new());
        }
        let new_id = group_new_id[root];
        members[new_id.index()].push(network.node_pos[i]);
        node_map.push(new_id);
    }

    let mut builder = RoadNetworkBuilder::with_capacity(members.len(), network.edge_count());
    for points in &members {
        // Every group has at least one member.
        let pos = GeoPoint::mean(points).unwrap_or(points[0]);
        builder.add_node(pos);
    }

    let mut dropped = 0usize;
    for e in 0..network.edge_count() {
        let from = node_map[network.edge_from[e].index()];
        let to = node_map[network.edge_to[e].index()];
        if from == to {
            dropped += 1;
            continue;
        }
        builder.add_directed_edge(from, to, network.edge_length_m[e], network.edge_travel_ms[e])?;
    }

    log::debug!(
        "consolidated {n} nodes into {} at {tolerance_m} m tolerance ({dropped} internal edges dropped)",
        members.len()
    );

    Ok(Consolidated { network: builder.build(), node_map })
}
