//! The nearest-facility router.
//!
//! For a query node the router runs two independent shortest-path searches
//! to every facility: one minimising length, one minimising travel time.
//! The facility is chosen by distance alone; the reported time is the
//! fastest time to *that* facility, which may belong to a different path
//! than the shortest one.
//!
//! Nothing is cached between queries.  Each query costs
//! `2 × |facilities|` searches, which is fine for tens of facilities.

use cr_core::{GeoPoint, NodeId};
use cr_spatial::{DijkstraRouter, PathLength, RoadNetwork, Route, ShortestPath, Weight};

use crate::{AirDistance, Assessment, FacilityError, FacilityResult, FacilitySet, Reach};

/// Read-only query interface over a network and a facility set.
pub struct NearestFacilityRouter<'a, R: ShortestPath = DijkstraRouter> {
    network: &'a RoadNetwork,
    facilities: &'a FacilitySet,
    engine: R,
}

impl<'a> NearestFacilityRouter<'a> {
    /// Router backed by [`DijkstraRouter`].
    pub fn new(network: &'a RoadNetwork, facilities: &'a FacilitySet) -> Self {
        Self::with_engine(network, facilities, DijkstraRouter)
    }
}

impl<'a, R: ShortestPath> NearestFacilityRouter<'a, R> {
    pub fn with_engine(network: &'a RoadNetwork, facilities: &'a FacilitySet, engine: R) -> Self {
        Self { network, facilities, engine }
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    pub fn facilities(&self) -> &'a FacilitySet {
        self.facilities
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    /// Nearest facility to `query` by road distance.
    ///
    /// Facilities equal to `query` and facilities with no path from `query`
    /// are skipped.  The first facility in set order wins a distance tie.
    ///
    /// # Errors
    ///
    /// [`FacilityError::InvalidNode`] if `query` is not in the network.
    pub fn nearest_facility(&self, query: NodeId) -> FacilityResult<Reach> {
        if !self.network.contains(query) {
            return Err(FacilityError::InvalidNode(query));
        }

        let mut best = Reach::Unreachable;
        for facility in self.facilities.nodes() {
            if facility == query {
                continue;
            }

            let distance = self.engine.path_length(self.network, query, facility, Weight::Length)?;
            let time = self.engine.path_length(self.network, query, facility, Weight::TravelTime)?;

            let (PathLength::Reachable(distance_m), PathLength::Reachable(travel_secs)) =
                (distance, time)
            else {
                log::debug!("no path from {query} to facility {facility}; skipped");
                continue;
            };

            if !best.is_reachable() || distance_m < best.distance_m() {
                best = Reach::Reachable { facility, distance_m, travel_secs };
            }
        }
        Ok(best)
    }

    /// Assess each query node in order, logging one line per node.
    pub fn assess(&self, queries: &[NodeId]) -> FacilityResult<Vec<Assessment>> {
        let mut out = Vec::with_capacity(queries.len());
        for &query in queries {
            let reach = self.nearest_facility(query)?;
            match reach {
                Reach::Reachable { facility, distance_m, travel_secs } => log::info!(
                    "node {query}: nearest facility at {facility} - distance {distance_m:.2} m, time {:.2} min",
                    travel_secs / 60.0
                ),
                Reach::Unreachable => log::warn!("no valid path found for node {query}"),
            }
            out.push(Assessment {
                query,
                pos: self.network.node_pos[query.index()],
                reach,
            });
        }

        let reached = out.iter().filter(|a| a.reach.is_reachable()).count();
        log::info!("assessed {} nodes, {reached} reach a facility", out.len());
        Ok(out)
    }

    /// Snap `pos` to its nearest road node and assess that node.
    ///
    /// # Errors
    ///
    /// [`FacilityError::EmptyNetwork`] if there is nothing to snap to.
    pub fn assess_point(&self, pos: GeoPoint) -> FacilityResult<Assessment> {
        let query = self.network.snap_to_node(pos).ok_or(FacilityError::EmptyNetwork)?;
        Ok(Assessment {
            query,
            pos: self.network.node_pos[query.index()],
            reach: self.nearest_facility(query)?,
        })
    }

    /// Nearest facility in a straight line from `pos`, measured to each
    /// facility's own position.  `None` if the set is empty.
    pub fn nearest_by_air(&self, pos: GeoPoint) -> Option<AirDistance> {
        let mut best: Option<AirDistance> = None;
        for site in self.facilities.iter() {
            let distance_m = pos.distance_m(site.pos);
            if best.is_none_or(|b| distance_m < b.distance_m) {
                best = Some(AirDistance { facility: site.node, distance_m });
            }
        }
        best
    }

    /// Shortest-distance route from `query` to its nearest facility, or
    /// `None` when no facility is reachable.
    pub fn route_to_nearest(&self, query: NodeId) -> FacilityResult<Option<Route>> {
        match self.nearest_facility(query)?.facility() {
            Some(facility) => {
                Ok(self.engine.route(self.network, query, facility, Weight::Length)?)
            }
            None => Ok(None),
        }
    }
}
