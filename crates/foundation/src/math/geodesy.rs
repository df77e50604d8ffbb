/// Mean Earth radius used for great-circle distances (meters).
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_009.0;

/// Geographic position in degrees and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            alt_m,
        }
    }

    /// Straight-line distance to `other`, see [`combined_distance`].
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        combined_distance(
            self.lat_deg,
            self.lon_deg,
            self.alt_m,
            other.lat_deg,
            other.lon_deg,
            other.alt_m,
        )
    }
}

/// Great-circle distance in meters between two lat/lon pairs given in degrees.
pub fn haversine_distance(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let sin_dlat = ((lat1 - lat2).abs() * 0.5).sin();
    let sin_dlon = ((lon1_deg - lon2_deg).abs().to_radians() * 0.5).sin();

    let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_MEAN_RADIUS_M * a.sqrt().asin()
}

/// Horizontal great-circle distance and altitude difference combined as the
/// legs of a right triangle.
///
/// NaN and infinite inputs propagate through the result.
pub fn combined_distance(
    lat1_deg: f64,
    lon1_deg: f64,
    alt1_m: f64,
    lat2_deg: f64,
    lon2_deg: f64,
    alt2_m: f64,
) -> f64 {
    let horizontal = haversine_distance(lat1_deg, lon1_deg, lat2_deg, lon2_deg);
    let vertical = alt1_m - alt2_m;
    (horizontal * horizontal + vertical * vertical).sqrt()
}
