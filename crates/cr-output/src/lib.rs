//! `cr-output`: report writers for nearest-facility runs.
//!
//! | Writer           | Files created                              |
//! |------------------|--------------------------------------------|
//! | [`CsvWriter`]    | `facilities.csv`, `assessments.csv`        |
//! | [`GeoJsonWriter`]| `report.geojson`                           |
//!
//! Both implement [`ReportWriter`].  Map rendering is left to whatever
//! viewer loads the GeoJSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cr_output::{CsvWriter, ReportWriter, AssessmentRow};
//!
//! let mut w = CsvWriter::new(Path::new("./output"))?;
//! w.write_assessments(&rows)?;
//! w.finish()?;
//! ```

pub mod csv_report;
pub mod error;
pub mod geojson_report;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv_report::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use geojson_report::GeoJsonWriter;
pub use row::{AssessmentRow, FacilityRow, RouteRow};
pub use writer::ReportWriter;
