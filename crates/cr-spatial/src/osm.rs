//! OSM PBF loader: enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use cr_spatial::osm::load_from_pbf;
//!
//! let extract = load_from_pbf(Path::new("groningen.osm.pbf"), "hospital")?;
//! ```
//!
//! # What is loaded
//!
//! - **Roads**: only drivable `highway=*` ways (see [`car_speed_mps`]).
//!   One-way roads add a single directed edge (reversed for `oneway=-1`);
//!   two-way roads add both.
//! - **Points of interest**: nodes tagged `amenity=<amenity>` as-is, and ways
//!   tagged so at their polygon centroid.  Relations are skipped.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, GeoPoint>` for the
//! first pass (needed because ways reference node IDs by OSM integer ID).
//! The map is freed before the R-tree is built.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use geo::{Centroid, LineString, Polygon};
use osmpbf::{Element, ElementReader};

use cr_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{Poi, SpatialError};

// ── Public entry point ────────────────────────────────────────────────────────

/// Road network and matching points of interest read from one extract.
pub struct OsmExtract {
    pub network: RoadNetwork,
    pub pois: Vec<Poi>,
}

/// Load the drivable road network and all `amenity=<amenity>` features from
/// an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on file or parse errors.
pub fn load_from_pbf(path: &Path, amenity: &str) -> Result<OsmExtract, SpatialError> {
    // ── Phase 1: collect all OSM nodes, road ways and POIs in one pass ────
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();
    let mut pois: Vec<Poi> = Vec::new();
    let mut poi_ways: Vec<PoiWay> = Vec::new();
    let mut skipped_relations = 0usize;

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let pos = GeoPoint::new(n.lat() as f32, n.lon() as f32);
                all_nodes.insert(n.id(), pos);
                let tags: Vec<(&str, &str)> = n.tags().collect();
                if let Some(name) = poi_name(&tags, amenity) {
                    pois.push(Poi { osm_id: n.id(), name, pos });
                }
            }
            Element::DenseNode(n) => {
                let pos = GeoPoint::new(n.lat() as f32, n.lon() as f32);
                all_nodes.insert(n.id(), pos);
                let tags: Vec<(&str, &str)> = n.tags().collect();
                if let Some(name) = poi_name(&tags, amenity) {
                    pois.push(Poi { osm_id: n.id(), name, pos });
                }
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();

                if let Some(name) = poi_name(&tags, amenity) {
                    poi_ways.push(PoiWay { osm_id: w.id(), name, refs: w.refs().collect() });
                }

                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(hw) = highway
                    && let Some(speed_mps) = car_speed_mps(hw)
                {
                    let flow = traffic_flow(hw, &tags);
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, speed_mps, flow });
                }
            }
            Element::Relation(_) => skipped_relations += 1,
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: resolve way-shaped POIs to centroids ─────────────────────
    for way in poi_ways {
        match way_centroid(&way.refs, &all_nodes) {
            Some(pos) => pois.push(Poi { osm_id: way.osm_id, name: way.name, pos }),
            None => log::debug!("amenity way {} has no resolvable geometry; skipped", way.osm_id),
        }
    }

    // ── Phase 3: identify road-referenced node IDs ────────────────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 4: build network ────────────────────────────────────────────
    // Pre-allocate: ~2× road nodes for edges (rough estimate).
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Map OSM node IDs → our NodeIds, adding only road-relevant nodes.  Sorted
    // so that node numbering does not depend on hash order.
    let mut road_node_ids: Vec<i64> = road_node_ids.into_iter().collect();
    road_node_ids.sort_unstable();
    let mut osm_to_cr: HashMap<i64, NodeId> = HashMap::with_capacity(road_node_ids.len());

    for osm_id in &road_node_ids {
        if let Some(&pos) = all_nodes.get(osm_id) {
            let cr_id = builder.add_node(pos);
            osm_to_cr.insert(*osm_id, cr_id);
        }
    }

    // Road nodes are resolved; the full node map can go.
    drop(all_nodes);
    drop(road_node_ids);

    // Add directed edges from way node sequences.
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(&from), Some(&to)) = (osm_to_cr.get(&osm_a), osm_to_cr.get(&osm_b)) {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to));
                let travel_ms = (len_m / way.speed_mps * 1_000.0) as u32;

                match way.flow {
                    Flow::Both => builder.add_road(from, to, len_m, travel_ms)?,
                    Flow::Forward => builder.add_directed_edge(from, to, len_m, travel_ms)?,
                    Flow::Backward => builder.add_directed_edge(to, from, len_m, travel_ms)?,
                }
            }
        }
    }

    let network = builder.build();
    log::info!(
        "loaded {}: {} road nodes, {} edges, {} `amenity={amenity}` features ({skipped_relations} relations ignored)",
        path.display(),
        network.node_count(),
        network.edge_count(),
        pois.len(),
    );

    Ok(OsmExtract { network, pois })
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:      Vec<i64>,
    speed_mps: f32,
    flow:      Flow,
}

/// Directions a way may be driven in, relative to its node order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Both,
    Forward,
    Backward,
}

struct PoiWay {
    osm_id: i64,
    name:   Option<String>,
    refs:   Vec<i64>,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `Some(name)` if the element carries `amenity=<amenity>`.  The inner
/// option is the `name` tag.
fn poi_name(tags: &[(&str, &str)], amenity: &str) -> Option<Option<String>> {
    tags.iter()
        .any(|(k, v)| *k == "amenity" && *v == amenity)
        .then(|| {
            tags.iter()
                .find(|(k, _)| *k == "name")
                .map(|(_, v)| (*v).to_owned())
        })
}

/// Centroid of a way's geometry.  Closed rings are treated as polygons,
/// open ways as lines.
fn way_centroid(refs: &[i64], nodes: &HashMap<i64, GeoPoint>) -> Option<GeoPoint> {
    let coords: Vec<(f64, f64)> = refs
        .iter()
        .filter_map(|id| nodes.get(id))
        .map(|p| (p.lon as f64, p.lat as f64))
        .collect();
    if coords.is_empty() {
        return None;
    }

    let closed = refs.len() >= 4 && refs.first() == refs.last();
    let line = LineString::from(coords);
    let centroid = if closed {
        Polygon::new(line.clone(), vec![]).centroid().or_else(|| line.centroid())
    } else {
        line.centroid()
    };
    centroid.map(|p| GeoPoint::new(p.y() as f32, p.x() as f32))
}

/// Return the assumed car speed (m/s) for a road class, or `None` if this
/// `highway` value is not drivable by car.
///
/// Speeds are conservative urban defaults.
fn car_speed_mps(highway: &str) -> Option<f32> {
    match highway {
        "motorway" | "motorway_link"         => Some(27.8), // 100 km/h
        "trunk"    | "trunk_link"            => Some(22.2), // 80 km/h
        "primary"  | "primary_link"          => Some(13.9), // 50 km/h
        "secondary"| "secondary_link"        => Some(13.9), // 50 km/h
        "tertiary" | "tertiary_link"         => Some(11.1), // 40 km/h
        "residential" | "living_street"      => Some(8.3),  // 30 km/h
        "service"  | "unclassified"          => Some(5.6),  // 20 km/h
        // Explicitly non-car:
        "footway" | "path" | "cycleway" | "bridleway"
        | "pedestrian" | "steps" | "track"
        | "construction" | "proposed"        => None,
        // Unknown road type: cautious default.
        _                                    => Some(8.3),
    }
}

/// Driving directions of a road way.
///
/// An explicit `oneway` tag decides: `yes`/`1`/`true` is forward only,
/// `-1`/`reverse` is against the node order, `no`/`0`/`false` is both ways.
/// Without one, motorways, motorway links and roundabouts are forward only.
fn traffic_flow(highway: &str, tags: &[(&str, &str)]) -> Flow {
    let tag = |key: &str| tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
    match tag("oneway") {
        Some("yes" | "1" | "true") => Flow::Forward,
        Some("-1" | "reverse") => Flow::Backward,
        Some("no" | "0" | "false") => Flow::Both,
        _ if tag("junction") == Some("roundabout") => Flow::Forward,
        _ if matches!(highway, "motorway" | "motorway_link") => Flow::Forward,
        _ => Flow::Both,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footways_are_not_drivable() {
        assert!(car_speed_mps("footway").is_none());
        assert!(car_speed_mps("residential").is_some());
        assert!(car_speed_mps("some_new_class").is_some());
    }

    #[test]
    fn oneway_tags() {
        assert_eq!(traffic_flow("primary", &[("oneway", "yes")]), Flow::Forward);
        assert_eq!(traffic_flow("primary", &[("oneway", "-1")]), Flow::Backward);
        assert_eq!(traffic_flow("residential", &[("oneway", "no")]), Flow::Both);
        assert_eq!(traffic_flow("residential", &[]), Flow::Both);
    }

    #[test]
    fn implicit_oneways_yield_to_explicit_tag() {
        assert_eq!(traffic_flow("primary", &[("junction", "roundabout")]), Flow::Forward);
        assert_eq!(traffic_flow("motorway", &[]), Flow::Forward);
        assert_eq!(traffic_flow("motorway_link", &[("oneway", "no")]), Flow::Both);
        assert_eq!(
            traffic_flow("secondary", &[("junction", "roundabout"), ("oneway", "no")]),
            Flow::Both
        );
        assert_eq!(traffic_flow("motorway", &[("oneway", "-1")]), Flow::Backward);
    }

    #[test]
    fn poi_name_matches_amenity() {
        let tags = [("amenity", "hospital"), ("name", "UMCG")];
        assert_eq!(poi_name(&tags, "hospital"), Some(Some("UMCG".to_owned())));
        assert_eq!(poi_name(&tags, "clinic"), None);
        assert_eq!(poi_name(&[("amenity", "hospital")], "hospital"), Some(None));
    }

    #[test]
    fn closed_way_centroid_is_inside_square() {
        let mut nodes = HashMap::new();
        nodes.insert(1, GeoPoint::new(53.0, 6.0));
        nodes.insert(2, GeoPoint::new(53.0, 6.2));
        nodes.insert(3, GeoPoint::new(53.2, 6.2));
        nodes.insert(4, GeoPoint::new(53.2, 6.0));
        let c = way_centroid(&[1, 2, 3, 4, 1], &nodes).unwrap();
        assert!((c.lat - 53.1).abs() < 1e-4, "{c}");
        assert!((c.lon - 6.1).abs() < 1e-4, "{c}");
    }

    #[test]
    fn unresolvable_way_has_no_centroid() {
        assert!(way_centroid(&[10, 11], &HashMap::new()).is_none());
    }
}
