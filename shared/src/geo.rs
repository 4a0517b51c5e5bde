//! Geographic to screen coordinate transforms.
//!
//! The world map background is a rectangular Web-Mercator style image, so
//! markers are placed with the matching transform: linear in longitude,
//! Mercator-stretched in latitude.

use std::f64::consts::PI;

/// Latitudes beyond this are clamped before projecting; the Mercator
/// transform diverges at the poles.
pub const MAX_PROJECTABLE_LAT: f64 = 89.9;

/// Default margin, in pixels, by which the viewport is enlarged when
/// culling. Keeps markers just past the edge rendered so they don't pop in
/// while panning.
pub const VIEWPORT_PADDING: f64 = 50.0;

/// Project a geographic coordinate onto a `viewport_w` x `viewport_h`
/// pixel plane.
///
/// Longitude maps linearly to `x` in `[0, viewport_w]`. Latitude goes
/// through the Mercator transform and is clamped to ±[`MAX_PROJECTABLE_LAT`]
/// first, so the result is always finite.
pub fn project(lat: f64, lon: f64, viewport_w: f64, viewport_h: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_PROJECTABLE_LAT, MAX_PROJECTABLE_LAT);

    let x = (lon + 180.0) / 360.0 * viewport_w;

    let lat_rad = lat.to_radians();
    let merc_n = (PI / 4.0 + lat_rad / 2.0).tan().ln();
    let y = viewport_h / 2.0 - (viewport_w * merc_n) / (2.0 * PI);

    (x, y)
}

/// Whether a projected point falls inside the padded viewport. Bounds are
/// inclusive on both edges.
pub fn is_in_viewport(x: f64, y: f64, viewport_w: f64, viewport_h: f64, padding: f64) -> bool {
    x >= -padding && x <= viewport_w + padding && y >= -padding && y <= viewport_h + padding
}

/// Whether a raw spot coordinate is worth projecting at all. Defensive
/// filter: a bad record skips its own point, never the whole batch.
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_longitude_is_linear() {
        let (x, _) = project(0.0, -180.0, 800.0, 600.0);
        assert_eq!(x, 0.0);
        let (x, _) = project(0.0, 0.0, 800.0, 600.0);
        assert_eq!(x, 400.0);
        let (x, _) = project(0.0, 180.0, 800.0, 600.0);
        assert_eq!(x, 800.0);
    }

    #[test]
    fn test_project_equator_is_vertical_center() {
        let (_, y) = project(0.0, 12.0, 800.0, 600.0);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_northern_latitudes_go_up() {
        let (_, equator_y) = project(0.0, 0.0, 800.0, 600.0);
        let (_, north_y) = project(45.0, 0.0, 800.0, 600.0);
        let (_, south_y) = project(-45.0, 0.0, 800.0, 600.0);
        // Screen y grows downward.
        assert!(north_y < equator_y);
        assert!(south_y > equator_y);
        // Mercator is symmetric about the equator.
        assert!((equator_y - north_y - (south_y - equator_y)).abs() < 1e-9);
    }

    #[test]
    fn test_project_is_finite_across_usable_range() {
        for lat in (-85..=85).step_by(5) {
            for lon in (-180..=180).step_by(15) {
                let (x, y) = project(lat as f64, lon as f64, 1024.0, 768.0);
                assert!(x.is_finite() && y.is_finite(), "lat={lat} lon={lon}");
                assert!(x >= 0.0 && x <= 1024.0);
            }
        }
    }

    #[test]
    fn test_project_clamps_poles() {
        let (_, y) = project(90.0, 0.0, 800.0, 600.0);
        assert!(y.is_finite());
        let (_, y) = project(-90.0, 0.0, 800.0, 600.0);
        assert!(y.is_finite());
    }

    #[test]
    fn test_viewport_bounds_are_inclusive() {
        assert!(is_in_viewport(-50.0, 0.0, 800.0, 600.0, 50.0));
        assert!(is_in_viewport(850.0, 0.0, 800.0, 600.0, 50.0));
        assert!(is_in_viewport(0.0, -50.0, 800.0, 600.0, 50.0));
        assert!(is_in_viewport(0.0, 650.0, 800.0, 600.0, 50.0));
        assert!(!is_in_viewport(-50.1, 0.0, 800.0, 600.0, 50.0));
        assert!(!is_in_viewport(850.1, 0.0, 800.0, 600.0, 50.0));
        assert!(!is_in_viewport(0.0, 650.1, 800.0, 600.0, 50.0));
    }

    #[test]
    fn test_invalid_coordinates_are_rejected() {
        assert!(is_valid_coordinate(43.5, -1.5));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::INFINITY));
        assert!(!is_valid_coordinate(91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, -180.5));
    }
}
