//! groningen: nearest-hospital assessment for the city of Groningen.
//!
//! Samples road nodes, finds the nearest hospital from each one by road
//! distance and writes CSV and GeoJSON reports.
//!
//! ```text
//! groningen [config.json]
//! ```
//!
//! Without a config file the defaults of [`ReachConfig`] are used against a
//! synthetic city network.  Build with `--features osm` and set `pbf_path`
//! to run on a real extract.

mod network;

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};

use cr_core::{GeoPoint, ReachConfig, SampleRng};
use cr_facility::{Assessment, FacilitySet, NearestFacilityRouter, Reach};
use cr_output::{
    AssessmentRow, CsvWriter, FacilityRow, GeoJsonWriter, ReportWriter, RouteRow,
};
use cr_spatial::{Poi, RoadNetwork, consolidate_intersections};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Grote Markt, used for the point query printed at the end.
const CITY_CENTRE: GeoPoint = GeoPoint { lat: 53.2190, lon: 6.5680 };

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<ReachConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {path}"))?
        }
        None => ReachConfig {
            sample_size: 10,
            output_dir: "output/groningen".into(),
            export_routes: true,
            ..ReachConfig::default()
        },
    };
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "osm")]
fn load_extract(config: &ReachConfig) -> Result<(RoadNetwork, Vec<Poi>)> {
    match &config.pbf_path {
        Some(path) => {
            let extract = cr_spatial::osm::load_from_pbf(path, &config.amenity)
                .with_context(|| format!("loading {}", path.display()))?;
            Ok((extract.network, extract.pois))
        }
        None => network::build_network(),
    }
}

#[cfg(not(feature = "osm"))]
fn load_extract(config: &ReachConfig) -> Result<(RoadNetwork, Vec<Poi>)> {
    if let Some(path) = &config.pbf_path {
        anyhow::bail!("{} configured but built without the `osm` feature", path.display());
    }
    network::build_network()
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_table(assessments: &[Assessment], facilities: &FacilitySet) {
    println!("{:<8} {:<24} {:>12} {:>10}", "Node", "Facility", "Distance m", "Time min");
    println!("{}", "-".repeat(57));
    for a in assessments {
        match a.reach {
            Reach::Reachable { facility, distance_m, .. } => {
                let name = facilities.get(facility).map_or("unnamed", |s| s.label());
                println!(
                    "{:<8} {:<24} {:>12.2} {:>10.2}",
                    a.query.0,
                    name,
                    distance_m,
                    a.reach.travel_minutes(),
                );
            }
            Reach::Unreachable => {
                println!("{:<8} {:<24} {:>12} {:>10}", a.query.0, "-", "-", "-");
            }
        }
    }
}

fn write_reports(
    config: &ReachConfig,
    router: &NearestFacilityRouter<'_>,
    assessments: &[Assessment],
) -> Result<()> {
    let dir = config.output_dir.as_path();
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let facility_rows: Vec<FacilityRow> = router.facilities().iter().map(FacilityRow::from).collect();
    let assessment_rows: Vec<AssessmentRow> = assessments.iter().map(AssessmentRow::from).collect();

    let mut route_rows = Vec::new();
    if config.export_routes {
        for a in assessments {
            let Some(facility) = a.reach.facility() else { continue };
            if let Some(route) = router.route_to_nearest(a.query)? {
                route_rows.push(RouteRow {
                    query_node:    a.query.0,
                    facility_node: facility.0,
                    distance_m:    route.total_cost,
                    path:          route.geometry(router.network()),
                });
            }
        }
    }

    let mut writers: Vec<Box<dyn ReportWriter>> = vec![
        Box::new(CsvWriter::new(dir)?),
        Box::new(GeoJsonWriter::new(dir)),
    ];
    for w in &mut writers {
        w.write_facilities(&facility_rows)?;
        w.write_assessments(&assessment_rows)?;
        for row in &route_rows {
            w.write_route(row)?;
        }
        w.finish()?;
    }

    println!("Reports written to {}", dir.display());
    println!("  facilities.csv  : {} rows", facility_rows.len());
    println!("  assessments.csv : {} rows", assessment_rows.len());
    println!("  report.geojson  : {} routes", route_rows.len());
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = load_config()?;
    stderrlog::new()
        .modules(["groningen", "cr_core", "cr_spatial", "cr_facility", "cr_output"])
        .verbosity(config.verbosity + 1)
        .init()?;

    println!("=== groningen: nearest `amenity={}` ===", config.amenity);
    println!("Sample: {}  |  Seed: {}", config.sample_size, config.seed);
    println!();

    // 1. Road network and facility points.
    let (mut network, pois) = load_extract(&config)?;
    if let Some(tolerance_m) = config.consolidate_tolerance_m {
        let before = network.node_count();
        network = consolidate_intersections(&network, tolerance_m)?.network;
        println!("Consolidated {before} nodes into {} at {tolerance_m} m", network.node_count());
    }
    println!(
        "Road network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    // 2. Facilities.
    let facilities = FacilitySet::from_pois(&network, &pois)?;
    if facilities.is_empty() {
        log::warn!("no `amenity={}` features found; every node will be unreachable", config.amenity);
    }
    for site in facilities.iter() {
        println!("  facility {:<6} {}", site.node.0, site.label());
    }
    println!();

    // 3. Sample and assess.
    let queries = SampleRng::new(config.seed).sample_nodes(network.node_count(), config.sample_size);
    let router = NearestFacilityRouter::new(&network, &facilities);

    let t0 = Instant::now();
    let assessments = router.assess(&queries)?;
    let elapsed = t0.elapsed();
    println!("Assessed {} nodes in {:.3} s", assessments.len(), elapsed.as_secs_f64());
    println!();

    print_table(&assessments, &facilities);
    println!();

    // 4. Point query for the city centre.
    if !network.is_empty() {
        let centre = router.assess_point(CITY_CENTRE)?;
        println!("City centre ({CITY_CENTRE}): {}", centre.reach);
        if let Some(air) = router.nearest_by_air(CITY_CENTRE) {
            println!("  as the crow flies: {:.0} m to {}", air.distance_m, air.facility);
        }
        println!();
    }

    // 5. Reports.
    write_reports(&config, &router, &assessments)?;

    Ok(())
}
