//! Spherical Lambert cylindrical equal-area projection.
//!
//! Only used for centroid computation: geometries are projected forward,
//! the planar centroid is taken, and the centroid is projected back to
//! lon/lat. Equal-area is what makes the planar centroid geometrically
//! meaningful for geographic coordinates.

use geo::Coord;

/// Authalic earth radius in meters. Any uniform scale cancels out across the
/// forward/inverse round trip, but real meters keep the plane readable.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Project a lon/lat degree coordinate onto the equal-area plane.
pub fn forward(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: EARTH_RADIUS_M * c.x.to_radians(),
        y: EARTH_RADIUS_M * c.y.to_radians().sin(),
    }
}

/// Project a planar coordinate back to lon/lat degrees.
pub fn inverse(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS_M).to_degrees(),
        y: (c.y / EARTH_RADIUS_M).clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Coord<f64>, b: Coord<f64>) {
        assert!((a.x - b.x).abs() < 1e-9, "x: {} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() < 1e-9, "y: {} vs {}", a.y, b.y);
    }

    #[test]
    fn test_origin_is_fixed() {
        assert_close(forward(Coord { x: 0.0, y: 0.0 }), Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_round_trip() {
        for (x, y) in [(16.6, 49.2), (-122.3, 47.6), (174.8, -36.9), (0.0, 89.9)] {
            let c = Coord { x, y };
            assert_close(inverse(forward(c)), c);
        }
    }

    #[test]
    fn test_area_compression_toward_poles() {
        // equal spacing in latitude shrinks in projected y as latitude grows
        let low = forward(Coord { x: 0.0, y: 10.0 }).y - forward(Coord { x: 0.0, y: 0.0 }).y;
        let high = forward(Coord { x: 0.0, y: 80.0 }).y - forward(Coord { x: 0.0, y: 70.0 }).y;
        assert!(high < low);
    }
}
