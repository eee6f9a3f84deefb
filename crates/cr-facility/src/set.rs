//! The facility set: road nodes that stand for real-world facilities.

use std::collections::HashSet;

use cr_core::{GeoPoint, NodeId};
use cr_spatial::{Poi, RoadNetwork};

use crate::{FacilityError, FacilityResult};

/// One facility attached to the road network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilitySite {
    /// Road node the facility is reached through.
    pub node: NodeId,
    pub name: Option<String>,
    /// Position of the facility itself (not of its road node).
    pub pos: GeoPoint,
}

impl FacilitySite {
    /// Name for display, `"unnamed"` when the source had no name.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// Ordered, node-deduplicated collection of facilities.
///
/// Order matters: when two facilities are equally near, the one that comes
/// first wins.  Built once against a network and never mutated.
#[derive(Clone, Debug, Default)]
pub struct FacilitySet {
    sites: Vec<FacilitySite>,
}

impl FacilitySet {
    /// Facilities located exactly at the given road nodes.
    pub fn from_nodes(
        network: &RoadNetwork,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> FacilityResult<Self> {
        let sites = nodes
            .into_iter()
            .map(|node| {
                let pos = network.position(node).ok_or(FacilityError::InvalidNode(node))?;
                Ok(FacilitySite { node, name: None, pos })
            })
            .collect::<FacilityResult<Vec<_>>>()?;
        Self::from_sites(network, sites)
    }

    /// Snap each point of interest to its nearest road node.
    ///
    /// Several points of interest that snap to the same node become one
    /// facility (the first one listed).
    pub fn from_pois(network: &RoadNetwork, pois: &[Poi]) -> FacilityResult<Self> {
        let sites = pois
            .iter()
            .map(|poi| {
                let node = network.snap_to_node(poi.pos).ok_or(FacilityError::EmptyNetwork)?;
                Ok(FacilitySite { node, name: poi.name.clone(), pos: poi.pos })
            })
            .collect::<FacilityResult<Vec<_>>>()?;
        Self::from_sites(network, sites)
    }

    /// Validate and deduplicate prepared sites, keeping first occurrences.
    pub fn from_sites(
        network: &RoadNetwork,
        sites: impl IntoIterator<Item = FacilitySite>,
    ) -> FacilityResult<Self> {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for site in sites {
            if !network.contains(site.node) {
                return Err(FacilityError::InvalidNode(site.node));
            }
            if seen.insert(site.node) {
                kept.push(site);
            } else {
                log::debug!(
                    "facility {:?} shares node {} with an earlier facility; dropped",
                    site.name,
                    site.node
                );
            }
        }
        Ok(Self { sites: kept })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites in set order.
    pub fn iter(&self) -> impl Iterator<Item = &FacilitySite> + '_ {
        self.sites.iter()
    }

    /// Road nodes in set order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sites.iter().map(|s| s.node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.sites.iter().any(|s| s.node == node)
    }

    /// The site attached to `node`, if any.
    pub fn get(&self, node: NodeId) -> Option<&FacilitySite> {
        self.sites.iter().find(|s| s.node == node)
    }
}
