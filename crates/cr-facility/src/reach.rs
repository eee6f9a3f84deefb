//! Result types of nearest-facility queries.

use cr_core::{GeoPoint, NodeId};

/// Nearest facility from a query node, or the "nothing reachable" sentinel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reach {
    /// `facility` has the minimum road distance; `travel_secs` is the
    /// shortest travel time to that same facility.
    Reachable {
        facility: NodeId,
        distance_m: f64,
        travel_secs: f64,
    },
    /// No facility other than the query node itself can be reached.
    Unreachable,
}

impl Reach {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reach::Reachable { .. })
    }

    /// The selected facility; `None` when unreachable.
    #[inline]
    pub fn facility(&self) -> Option<NodeId> {
        match *self {
            Reach::Reachable { facility, .. } => Some(facility),
            Reach::Unreachable => None,
        }
    }

    /// Road distance in metres; `0.0` when unreachable.
    #[inline]
    pub fn distance_m(&self) -> f64 {
        match *self {
            Reach::Reachable { distance_m, .. } => distance_m,
            Reach::Unreachable => 0.0,
        }
    }

    /// Travel time in seconds; `0.0` when unreachable.
    #[inline]
    pub fn travel_secs(&self) -> f64 {
        match *self {
            Reach::Reachable { travel_secs, .. } => travel_secs,
            Reach::Unreachable => 0.0,
        }
    }

    /// Travel time in minutes; `0.0` when unreachable.
    #[inline]
    pub fn travel_minutes(&self) -> f64 {
        self.travel_secs() / 60.0
    }
}

impl std::fmt::Display for Reach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reach::Reachable { facility, distance_m, travel_secs } => write!(
                f,
                "nearest facility at {facility}: {distance_m:.2} m, {:.2} min",
                travel_secs / 60.0
            ),
            Reach::Unreachable => f.write_str("no facility reachable"),
        }
    }
}

/// One assessed query node.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assessment {
    pub query: NodeId,
    /// Position of the query node.
    pub pos: GeoPoint,
    pub reach: Reach,
}

/// Straight-line nearest facility.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirDistance {
    pub facility: NodeId,
    /// Great-circle distance to the facility's own position, in metres.
    pub distance_m: f32,
}
