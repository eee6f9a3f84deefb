//! Plain data row types written by output backends.

use cr_core::GeoPoint;
use cr_facility::{Assessment, FacilitySite};

/// One facility.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRow {
    pub facility_node: u32,
    pub name:          Option<String>,
    pub lat:           f32,
    pub lon:           f32,
}

impl From<&FacilitySite> for FacilityRow {
    fn from(site: &FacilitySite) -> Self {
        Self {
            facility_node: site.node.0,
            name:          site.name.clone(),
            lat:           site.pos.lat,
            lon:           site.pos.lon,
        }
    }
}

/// One assessed query node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentRow {
    pub query_node:    u32,
    pub lat:           f32,
    pub lon:           f32,
    pub reachable:     bool,
    /// `None` when no facility is reachable.
    pub facility_node: Option<u32>,
    /// `0.0` when no facility is reachable.
    pub distance_m:    f64,
    /// `0.0` when no facility is reachable.
    pub travel_secs:   f64,
}

impl From<&Assessment> for AssessmentRow {
    fn from(a: &Assessment) -> Self {
        Self {
            query_node:    a.query.0,
            lat:           a.pos.lat,
            lon:           a.pos.lon,
            reachable:     a.reach.is_reachable(),
            facility_node: a.reach.facility().map(|n| n.0),
            distance_m:    a.reach.distance_m(),
            travel_secs:   a.reach.travel_secs(),
        }
    }
}

/// Route geometry from a query node to its facility.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub query_node:    u32,
    pub facility_node: u32,
    pub distance_m:    f64,
    pub path:          Vec<GeoPoint>,
}
