//! Run configuration.
//!
//! Loaded from a JSON file by the application binary (with the `serde`
//! feature) or built in code from [`ReachConfig::default`].

use std::path::PathBuf;

use crate::{CoreError, CoreResult};

/// Parameters of one nearest-facility run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReachConfig {
    /// OSM PBF extract to load.  `None` means the application supplies its
    /// own network.
    pub pbf_path: Option<PathBuf>,

    /// Value of the `amenity=*` tag that marks a facility.  Default: `hospital`.
    pub amenity: String,

    /// How many road nodes to assess.  Default: 100.
    pub sample_size: usize,

    /// Seed for node sampling.  The same seed always picks the same nodes.
    pub seed: u64,

    /// Merge intersections closer than this many metres before routing.
    /// `None` leaves the network untouched.
    pub consolidate_tolerance_m: Option<f32>,

    /// Directory that receives CSV and GeoJSON reports.
    pub output_dir: PathBuf,

    /// Also export the route from each assessed node to its facility.
    pub export_routes: bool,

    /// Log verbosity: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub verbosity: usize,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            pbf_path: None,
            amenity: "hospital".to_owned(),
            sample_size: 100,
            seed: 42,
            consolidate_tolerance_m: None,
            output_dir: PathBuf::from("output"),
            export_routes: false,
            verbosity: 1,
        }
    }
}

impl ReachConfig {
    /// Reject values that would make the run meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.sample_size == 0 {
            return Err(CoreError::Config("sample_size must be at least 1".into()));
        }
        if self.amenity.trim().is_empty() {
            return Err(CoreError::Config("amenity must not be empty".into()));
        }
        if let Some(tol) = self.consolidate_tolerance_m
            && !(tol.is_finite() && tol >= 0.0)
        {
            return Err(CoreError::Config(format!(
                "consolidate_tolerance_m must be a non-negative number, got {tol}"
            )));
        }
        Ok(())
    }
}
