//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f32` (single-precision) latitude/longitude.  At the
//! equator this gives ~1 m precision, which is enough for snapping and
//! straight-line comparisons inside a city.

/// Metres spanned by one degree of arc on the haversine sphere.
pub const METRES_PER_DEGREE: f32 = 111_195.0;

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy: ±0.5 % (f32 rounding).
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        const R: f32 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Radius in degrees that is guaranteed to cover `radius_m` metres around
    /// this point in both axes.
    ///
    /// A degree of longitude shrinks with `cos(lat)`, so the longitude span is
    /// the larger one and is used for both.  Callers filter the candidates
    /// with [`distance_m`](Self::distance_m) afterwards.
    pub fn degree_radius(self, radius_m: f32) -> f32 {
        let cos_lat = self.lat.to_radians().cos().abs().max(0.01);
        // 1 % slack absorbs f32 rounding at the circle's edge.
        radius_m * 1.01 / (METRES_PER_DEGREE * cos_lat)
    }

    /// Arithmetic mean of a set of points.  Returns `None` for an empty slice.
    pub fn mean(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lat, lon) = points
            .iter()
            .fold((0.0f64, 0.0f64), |(la, lo), p| (la + p.lat as f64, lo + p.lon as f64));
        Some(GeoPoint::new((lat / n) as f32, (lon / n) as f32))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
