//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `facilities.csv`
//! - `assessments.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{AssessmentRow, FacilityRow, OutputResult};

/// Writes a run report to two CSV files.
pub struct CsvWriter {
    facilities:  Writer<File>,
    assessments: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut facilities = Writer::from_path(dir.join("facilities.csv"))?;
        facilities.write_record(["facility_node", "name", "lat", "lon"])?;

        let mut assessments = Writer::from_path(dir.join("assessments.csv"))?;
        assessments.write_record([
            "query_node",
            "lat",
            "lon",
            "reachable",
            "facility_node",
            "distance_m",
            "travel_secs",
        ])?;

        Ok(Self {
            facilities,
            assessments,
            finished: false,
        })
    }
}

impl ReportWriter for CsvWriter {
    fn write_facilities(&mut self, rows: &[FacilityRow]) -> OutputResult<()> {
        for row in rows {
            self.facilities.write_record(&[
                row.facility_node.to_string(),
                row.name.clone().unwrap_or_default(),
                row.lat.to_string(),
                row.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_assessments(&mut self, rows: &[AssessmentRow]) -> OutputResult<()> {
        for row in rows {
            self.assessments.write_record(&[
                row.query_node.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                (row.reachable as u8).to_string(),
                row.facility_node.map(|n| n.to_string()).unwrap_or_default(),
                format!("{:.2}", row.distance_m),
                format!("{:.2}", row.travel_secs),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.facilities.flush()?;
        self.assessments.flush()?;
        self.finished = true;
        Ok(())
    }
}
