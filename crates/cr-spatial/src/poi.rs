//! Points of interest (facilities before they are snapped to the network).

use cr_core::GeoPoint;

/// A mapped real-world location such as a hospital.
///
/// Polygon features are reduced to their centroid before they become a
/// `Poi`, so every point of interest is a single coordinate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    /// Source OSM element id (node or way), `0` for hand-made points.
    pub osm_id: i64,
    /// Value of the `name` tag, if present.
    pub name: Option<String>,
    pub pos: GeoPoint,
}

impl Poi {
    pub fn new(name: impl Into<String>, pos: GeoPoint) -> Self {
        Self { osm_id: 0, name: Some(name.into()), pos }
    }
}
