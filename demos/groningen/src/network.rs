//! Synthetic Groningen road network.
//!
//! Fourteen junctions loosely placed on the city's ring road and radial
//! roads, plus two hospitals.  Used when no OSM extract is configured.

use anyhow::Result;

use cr_core::{GeoPoint, NodeId};
use cr_spatial::{Poi, RoadNetwork, RoadNetworkBuilder};

/// Add a two-way road whose length is the straight-line distance between
/// its endpoints, driven at `kmh`.
fn road(b: &mut RoadNetworkBuilder, a: NodeId, c: NodeId, kmh: f32) -> Result<()> {
    let length_m = b.node_pos(a).distance_m(b.node_pos(c));
    let travel_ms = (length_m / (kmh / 3.6) * 1_000.0) as u32;
    b.add_road(a, c, length_m, travel_ms)?;
    Ok(())
}

/// Build the network and the hospital points of interest.
pub fn build_network() -> Result<(RoadNetwork, Vec<Poi>)> {
    let mut b = RoadNetworkBuilder::new();

    // Centre.
    let grote_markt  = b.add_node(GeoPoint::new(53.2190, 6.5680));
    let hoofdstation = b.add_node(GeoPoint::new(53.2105, 6.5640));
    let zuiderdiep   = b.add_node(GeoPoint::new(53.2150, 6.5700));
    let oosterhaven  = b.add_node(GeoPoint::new(53.2160, 6.5790));

    // Ring road junctions.
    let ring_west    = b.add_node(GeoPoint::new(53.2190, 6.5350));
    let ring_north   = b.add_node(GeoPoint::new(53.2400, 6.5700));
    let ring_east    = b.add_node(GeoPoint::new(53.2200, 6.6050));
    let julianaplein = b.add_node(GeoPoint::new(53.2030, 6.5620));
    let europaplein  = b.add_node(GeoPoint::new(53.2040, 6.5850));

    // Outskirts.
    let paddepoel    = b.add_node(GeoPoint::new(53.2380, 6.5480));
    let helpman      = b.add_node(GeoPoint::new(53.1950, 6.5780));
    let hoogkerk     = b.add_node(GeoPoint::new(53.2150, 6.5000));
    let beijum       = b.add_node(GeoPoint::new(53.2450, 6.6050));

    // Haren ferry landing, not connected to any road.
    let _ferry       = b.add_node(GeoPoint::new(53.1700, 6.6200));

    // Inner city streets, 30 km/h.
    road(&mut b, grote_markt, zuiderdiep, 30.0)?;
    road(&mut b, grote_markt, oosterhaven, 30.0)?;
    road(&mut b, zuiderdiep, hoofdstation, 30.0)?;
    road(&mut b, zuiderdiep, oosterhaven, 30.0)?;

    // Radials, 50 km/h.
    road(&mut b, grote_markt, ring_north, 50.0)?;
    road(&mut b, grote_markt, ring_west, 50.0)?;
    road(&mut b, oosterhaven, ring_east, 50.0)?;
    road(&mut b, hoofdstation, julianaplein, 50.0)?;
    road(&mut b, oosterhaven, europaplein, 50.0)?;
    road(&mut b, julianaplein, helpman, 50.0)?;
    road(&mut b, ring_north, paddepoel, 50.0)?;
    road(&mut b, ring_east, beijum, 50.0)?;

    // Ring road, 80 km/h.
    road(&mut b, ring_west, ring_north, 80.0)?;
    road(&mut b, ring_north, ring_east, 80.0)?;
    road(&mut b, ring_east, europaplein, 80.0)?;
    road(&mut b, europaplein, julianaplein, 80.0)?;
    road(&mut b, julianaplein, ring_west, 80.0)?;
    road(&mut b, ring_west, hoogkerk, 80.0)?;

    let pois = vec![
        Poi::new("UMCG", GeoPoint::new(53.2220, 6.5760)),
        Poi::new("Martini Ziekenhuis", GeoPoint::new(53.1960, 6.5770)),
    ];

    Ok((b.build(), pois))
}
