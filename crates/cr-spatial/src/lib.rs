//! `cr-spatial`: road network, spatial indexing, and shortest paths.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`network`]     | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`          |
//! | [`router`]      | `ShortestPath` trait, `Weight`, `PathLength`, `Route`, `DijkstraRouter` |
//! | [`consolidate`] | `consolidate_intersections`                                 |
//! | [`poi`]         | `Poi` (point of interest)                                   |
//! | [`osm`]         | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod consolidate;
pub mod error;
pub mod network;
pub mod poi;
pub mod router;

#[cfg(feature = "osm")]
pub mod osm;


pub use consolidate::{Consolidated, consolidate_intersections};
pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use poi::Poi;
pub use router::{DijkstraRouter, PathLength, Route, ShortestPath, Weight};
