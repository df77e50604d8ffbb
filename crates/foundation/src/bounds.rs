/// Axis-aligned 3D bounding box in catalog coordinates.
///
/// Component order follows the catalog convention: `[lat_deg, lon_deg, alt_m]`.
/// No ordering between `min` and `max` is enforced; inverted boxes still
/// yield a well-defined corner set and centroid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    /// The four horizontal corners, counter-clockwise starting at `min`.
    pub fn horizontal_corners(&self) -> [[f64; 2]; 4] {
        [
            [self.min[0], self.min[1]],
            [self.max[0], self.min[1]],
            [self.max[0], self.max[1]],
            [self.min[0], self.max[1]],
        ]
    }

    pub fn centroid(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}
