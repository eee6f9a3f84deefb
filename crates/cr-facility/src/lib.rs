//! `cr-facility`: which facility is nearest by road?
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`set`]    | `FacilitySet`, `FacilitySite`                             |
//! | [`reach`]  | `Reach`, `Assessment`, `AirDistance`                      |
//! | [`router`] | `NearestFacilityRouter`                                   |
//! | [`error`]  | `FacilityError`, `FacilityResult<T>`                      |
//!
//! # Example
//!
//! ```
//! use cr_core::GeoPoint;
//! use cr_facility::{FacilitySet, NearestFacilityRouter};
//! use cr_spatial::RoadNetworkBuilder;
//!
//! let mut b = RoadNetworkBuilder::new();
//! let home = b.add_node(GeoPoint::new(53.20, 6.55));
//! let hospital = b.add_node(GeoPoint::new(53.22, 6.57));
//! b.add_road(home, hospital, 100.0, 50_000).unwrap();
//! let network = b.build();
//!
//! let facilities = FacilitySet::from_nodes(&network, [hospital]).unwrap();
//! let router = NearestFacilityRouter::new(&network, &facilities);
//! let reach = router.nearest_facility(home).unwrap();
//! assert_eq!(reach.facility(), Some(hospital));
//! assert_eq!(reach.distance_m(), 100.0);
//! assert_eq!(reach.travel_secs(), 50.0);
//! ```

pub mod error;
pub mod reach;
pub mod router;
pub mod set;


pub use error::{FacilityError, FacilityResult};
pub use reach::{AirDistance, Assessment, Reach};
pub use router::NearestFacilityRouter;
pub use set::{FacilitySet, FacilitySite};
