//! The `ReportWriter` trait implemented by all backend writers.

use crate::{AssessmentRow, FacilityRow, OutputResult, RouteRow};

/// Trait implemented by the CSV and GeoJSON writers.
pub trait ReportWriter {
    /// Write the facility list.
    fn write_facilities(&mut self, rows: &[FacilityRow]) -> OutputResult<()>;

    /// Write a batch of assessed query nodes.
    fn write_assessments(&mut self, rows: &[AssessmentRow]) -> OutputResult<()>;

    /// Write one route.  Backends without geometry ignore it.
    fn write_route(&mut self, _row: &RouteRow) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
