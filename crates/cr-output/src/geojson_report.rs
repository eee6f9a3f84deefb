//! GeoJSON output backend.
//!
//! Collects every facility, assessment and route as a feature and writes one
//! `FeatureCollection` to `report.geojson` on [`finish`](ReportWriter::finish).
//! Coordinates are `[lon, lat]` as GeoJSON requires.  Each feature carries a
//! `kind` property: `facility`, `assessment` or `route`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection};
use serde_json::json;

use crate::writer::ReportWriter;
use crate::{AssessmentRow, FacilityRow, OutputResult, RouteRow};

pub struct GeoJsonWriter {
    path:     PathBuf,
    features: Vec<Feature>,
    finished: bool,
}

impl GeoJsonWriter {
    /// Prepare `report.geojson` in `dir`.  Nothing is written until
    /// [`finish`](ReportWriter::finish).
    pub fn new(dir: &Path) -> Self {
        Self {
            path:     dir.join("report.geojson"),
            features: Vec::new(),
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

fn point(lat: f32, lon: f32) -> serde_json::Value {
    json!({ "type": "Point", "coordinates": [lon as f64, lat as f64] })
}

impl ReportWriter for GeoJsonWriter {
    fn write_facilities(&mut self, rows: &[FacilityRow]) -> OutputResult<()> {
        for row in rows {
            let value = json!({
                "type": "Feature",
                "geometry": point(row.lat, row.lon),
                "properties": {
                    "kind": "facility",
                    "facility_node": row.facility_node,
                    "name": row.name.as_deref().unwrap_or("Hospital"),
                }
            });
            self.features.push(serde_json::from_value::<Feature>(value)?);
        }
        Ok(())
    }

    fn write_assessments(&mut self, rows: &[AssessmentRow]) -> OutputResult<()> {
        for row in rows {
            let value = json!({
                "type": "Feature",
                "geometry": point(row.lat, row.lon),
                "properties": {
                    "kind": "assessment",
                    "query_node": row.query_node,
                    "reachable": row.reachable,
                    "facility_node": row.facility_node,
                    "distance_m": row.distance_m,
                    "travel_minutes": row.travel_secs / 60.0,
                }
            });
            self.features.push(serde_json::from_value::<Feature>(value)?);
        }
        Ok(())
    }

    fn write_route(&mut self, row: &RouteRow) -> OutputResult<()> {
        // A LineString needs two positions; trivial routes are skipped.
        if row.path.len() < 2 {
            log::debug!("route from node {} has no geometry; skipped", row.query_node);
            return Ok(());
        }
        let coords: Vec<[f64; 2]> = row
            .path
            .iter()
            .map(|p| [p.lon as f64, p.lat as f64])
            .collect();
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coords },
            "properties": {
                "kind": "route",
                "query_node": row.query_node,
                "facility_node": row.facility_node,
                "distance_m": row.distance_m,
            }
        });
        self.features.push(serde_json::from_value::<Feature>(value)?);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }

        // Features stay buffered until the file is on disk, so a failed
        // finish can be retried.
        let collection = FeatureCollection {
            features: self.features.clone(),
            bbox: None,
            foreign_members: None,
        };
        let mut file = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut file, &collection)?;
        file.flush()?;

        self.finished = true;
        log::info!("wrote {} ({} features)", self.path.display(), self.features.len());
        Ok(())
    }
}
