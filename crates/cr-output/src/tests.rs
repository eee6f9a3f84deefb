//! Tests for cr-output.

#[cfg(test)]
mod helpers {
    use cr_core::GeoPoint;

    use crate::row::{AssessmentRow, FacilityRow, RouteRow};

    pub fn facility(node: u32, name: Option<&str>) -> FacilityRow {
        FacilityRow { facility_node: node, name: name.map(str::to_owned), lat: 53.22, lon: 6.57 }
    }

    pub fn reached(query: u32, facility: u32) -> AssessmentRow {
        AssessmentRow {
            query_node:    query,
            lat:           53.2,
            lon:           6.55,
            reachable:     true,
            facility_node: Some(facility),
            distance_m:    1234.567,
            travel_secs:   95.0,
        }
    }

    pub fn unreached(query: u32) -> AssessmentRow {
        AssessmentRow {
            query_node:    query,
            lat:           53.3,
            lon:           6.7,
            reachable:     false,
            facility_node: None,
            distance_m:    0.0,
            travel_secs:   0.0,
        }
    }

    pub fn route(query: u32, facility: u32, points: usize) -> RouteRow {
        RouteRow {
            query_node: query,
            facility_node: facility,
            distance_m: 500.0,
            path: (0..points).map(|i| GeoPoint::new(53.2, 6.55 + i as f32 * 0.001)).collect(),
        }
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv_report::CsvWriter;
    use crate::writer::ReportWriter;

    use super::helpers::{facility, reached, unreached};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("facilities.csv").exists());
        assert!(dir.path().join("assessments.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("facilities.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["facility_node", "name", "lat", "lon"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("assessments.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["query_node", "lat", "lon", "reachable", "facility_node", "distance_m", "travel_secs"]
        );
    }

    #[test]
    fn csv_facilities_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_facilities(&[facility(4, Some("UMCG")), facility(9, None)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("facilities.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "UMCG");
        assert_eq!(&rows[1][1], ""); // unnamed
    }

    #[test]
    fn csv_unreachable_row_uses_sentinel() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_assessments(&[reached(1, 4), unreached(2)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("assessments.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(&rows[0][3], "1");
        assert_eq!(&rows[0][4], "4");
        assert_eq!(&rows[0][5], "1234.57");
        assert_eq!(&rows[0][6], "95.00");

        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[1][3], "0");
        assert_eq!(&rows[1][4], "");
        assert_eq!(&rows[1][5], "0.00");
        assert_eq!(&rows[1][6], "0.00");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call must not panic or error
    }

    #[test]
    fn csv_ignores_routes() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_route(&super::helpers::route(1, 4, 3)).unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod geojson_tests {
    use tempfile::TempDir;

    use crate::geojson_report::GeoJsonWriter;
    use crate::writer::ReportWriter;

    use super::helpers::{facility, reached, route, unreached};

    fn read(dir: &TempDir) -> serde_json::Value {
        let text = std::fs::read_to_string(dir.path().join("report.geojson")).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn nothing_written_before_finish() {
        let dir = tempfile::tempdir().unwrap();
        let w = GeoJsonWriter::new(dir.path());
        assert!(!w.path().exists());
    }

    #[test]
    fn feature_collection_has_all_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = GeoJsonWriter::new(dir.path());
        w.write_facilities(&[facility(4, Some("UMCG"))]).unwrap();
        w.write_assessments(&[reached(1, 4), unreached(2)]).unwrap();
        w.write_route(&route(1, 4, 3)).unwrap();
        assert_eq!(w.feature_count(), 4);
        w.finish().unwrap();

        let doc = read(&dir);
        assert_eq!(doc["type"], "FeatureCollection");
        let features = doc["features"].as_array().unwrap();
        let kinds: Vec<_> = features
            .iter()
            .map(|f| f["properties"]["kind"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(kinds, ["facility", "assessment", "assessment", "route"]);

        // [lon, lat] order.
        let coords = &features[0]["geometry"]["coordinates"];
        assert!((coords[0].as_f64().unwrap() - 6.57).abs() < 1e-5);
        assert!((coords[1].as_f64().unwrap() - 53.22).abs() < 1e-5);

        assert_eq!(features[0]["properties"]["name"], "UMCG");
        assert_eq!(features[2]["properties"]["reachable"], false);
        assert!(features[2]["properties"]["facility_node"].is_null());
        assert_eq!(features[3]["geometry"]["type"], "LineString");
        assert_eq!(features[3]["geometry"]["coordinates"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unnamed_facility_gets_default_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = GeoJsonWriter::new(dir.path());
        w.write_facilities(&[facility(4, None)]).unwrap();
        w.finish().unwrap();
        assert_eq!(read(&dir)["features"][0]["properties"]["name"], "Hospital");
    }

    #[test]
    fn trivial_route_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = GeoJsonWriter::new(dir.path());
        w.write_route(&route(1, 1, 0)).unwrap();
        w.write_route(&route(1, 2, 1)).unwrap();
        assert_eq!(w.feature_count(), 0);
    }

    #[test]
    fn failed_finish_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("not_yet_created");
        let mut w = GeoJsonWriter::new(&target);
        w.write_facilities(&[facility(4, Some("UMCG"))]).unwrap();

        assert!(w.finish().is_err());
        assert_eq!(w.feature_count(), 1);
        assert!(!w.path().exists());

        std::fs::create_dir(&target).unwrap();
        w.finish().unwrap();
        let text = std::fs::read_to_string(w.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["features"].as_array().unwrap().len(), 1);
        assert_eq!(doc["features"][0]["properties"]["name"], "UMCG");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = GeoJsonWriter::new(dir.path());
        w.write_facilities(&[facility(4, None)]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        assert_eq!(read(&dir)["features"].as_array().unwrap().len(), 1);
    }
}

#[cfg(test)]
mod rows {
    use cr_core::{GeoPoint, NodeId};
    use cr_facility::{Assessment, FacilitySite, Reach};

    use crate::row::{AssessmentRow, FacilityRow};

    #[test]
    fn assessment_row_from_reachable() {
        let a = Assessment {
            query: NodeId(3),
            pos: GeoPoint::new(53.2, 6.5),
            reach: Reach::Reachable { facility: NodeId(8), distance_m: 410.0, travel_secs: 33.0 },
        };
        let row = AssessmentRow::from(&a);
        assert_eq!(row.query_node, 3);
        assert!(row.reachable);
        assert_eq!(row.facility_node, Some(8));
        assert_eq!(row.distance_m, 410.0);
        assert_eq!(row.travel_secs, 33.0);
    }

    #[test]
    fn assessment_row_from_unreachable() {
        let a = Assessment { query: NodeId(3), pos: GeoPoint::new(53.2, 6.5), reach: Reach::Unreachable };
        let row = AssessmentRow::from(&a);
        assert!(!row.reachable);
        assert_eq!(row.facility_node, None);
        assert_eq!(row.distance_m, 0.0);
    }

    #[test]
    fn facility_row_from_site() {
        let site = FacilitySite {
            node: NodeId(12),
            name: Some("Martini Ziekenhuis".into()),
            pos: GeoPoint::new(53.1795, 6.5485),
        };
        let row = FacilityRow::from(&site);
        assert_eq!(row.facility_node, 12);
        assert_eq!(row.name.as_deref(), Some("Martini Ziekenhuis"));
        assert_eq!(row.lat, 53.1795);
    }
}
