/// A fixed observation site on the map.
#[derive(Clone, Copy, Debug)]
pub struct City {
    pub name: &'static str,
    pub lat: f32,
    pub lon: f32,
}

/// Geographic rectangle the map view covers.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub lat_min: f32,
    pub lat_max: f32,
    pub lon_min: f32,
    pub lon_max: f32,
}

/// Bounding box for California.
pub const CALIFORNIA: Bounds = Bounds {
    lat_min: 32.0,
    lat_max: 42.0,
    lon_min: -124.0,
    lon_max: -114.0,
};

pub const CITIES: [City; 5] = [
    City { name: "Los Angeles", lat: 33.2202, lon: -120.5437 },
    City { name: "San Francisco", lat: 36.9749, lon: -122.4194 },
    City { name: "San Diego", lat: 31.8157, lon: -119.1611 },
    City { name: "Sacramento", lat: 38.5816, lon: -121.4944 },
    City { name: "Fresno", lat: 36.7378, lon: -119.7871 },
];

/// Maps a geographic position onto a `width` x `height` drawing surface.
///
/// Longitude scales linearly left to right; latitude is inverted so north is
/// at the top (screen y grows downward). Positions outside `bounds` project
/// outside the surface and are not clamped.
pub fn project(lat: f32, lon: f32, bounds: &Bounds, width: f32, height: f32) -> (f32, f32) {
    let x = (lon - bounds.lon_min) / (bounds.lon_max - bounds.lon_min) * width;
    let y = (bounds.lat_max - lat) / (bounds.lat_max - bounds.lat_min) * height;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds { lat_min: 32.0, lat_max: 42.0, lon_min: -124.0, lon_max: -114.0 };

    fn assert_close(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-4 && (actual.1 - expected.1).abs() < 1e-4,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn corners_map_to_surface_corners() {
        // South-west corner lands bottom-left, north-east corner top-right.
        assert_close(project(32.0, -124.0, &BOUNDS, 100.0, 100.0), (0.0, 100.0));
        assert_close(project(42.0, -114.0, &BOUNDS, 100.0, 100.0), (100.0, 0.0));
    }

    #[test]
    fn midpoint_interpolates_linearly() {
        assert_close(project(37.0, -119.0, &BOUNDS, 100.0, 100.0), (50.0, 50.0));
        assert_close(project(34.5, -121.5, &BOUNDS, 200.0, 400.0), (50.0, 300.0));
    }

    #[test]
    fn out_of_bounds_positions_are_not_clamped() {
        let (x, y) = project(22.0, -104.0, &BOUNDS, 100.0, 100.0);
        assert_close((x, y), (200.0, 200.0));
    }

    #[test]
    fn all_cities_project_inside_california() {
        for city in &CITIES {
            let (x, y) = project(city.lat, city.lon, &CALIFORNIA, 400.0, 400.0);
            // San Diego sits fractionally south of the box; allow a small margin.
            assert!(x > -10.0 && x < 410.0, "{} x={}", city.name, x);
            assert!(y > -10.0 && y < 410.0, "{} y={}", city.name, y);
        }
    }
}
