use geo::Line;
use unl_core::cell::{self, Direction};
use unl_core::{Elevation, ElevationType, UnlError};

/// Deterministic spread of positions away from bisection midpoints.
fn sample_positions(count: usize) -> Vec<(f64, f64)> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| (next() * 160.0 - 80.0, next() * 358.0 - 179.0))
        .collect()
}

#[test]
fn test_encode_matches_geohash_crate() {
    for (lat, lon) in sample_positions(500) {
        for precision in [1, 5, 9, 12] {
            let ours = cell::encode(lat, lon, precision).unwrap();
            let reference = geohash::encode(geohash::Coord { x: lon, y: lat }, precision).unwrap();
            assert_eq!(ours, reference, "({}, {}) at {}", lat, lon, precision);
        }
    }
}

#[test]
fn test_bounds_match_geohash_crate() {
    for (lat, lon) in sample_positions(200) {
        let id = cell::encode(lat, lon, 8).unwrap();
        let ours = cell::bounds(&id).unwrap();
        let reference = geohash::decode_bbox(&id).unwrap();
        assert_eq!(ours.sw.lon, reference.min().x);
        assert_eq!(ours.sw.lat, reference.min().y);
        assert_eq!(ours.ne.lon, reference.max().x);
        assert_eq!(ours.ne.lat, reference.max().y);
    }
}

#[test]
fn test_neighbours_match_geohash_crate() {
    for (lat, lon) in sample_positions(200) {
        let id = cell::encode(lat, lon, 7).unwrap();
        let ours = cell::neighbours(&id).unwrap();
        let reference = geohash::neighbors(&id).unwrap();
        assert_eq!(ours.n, reference.n);
        assert_eq!(ours.ne, reference.ne);
        assert_eq!(ours.e, reference.e);
        assert_eq!(ours.se, reference.se);
        assert_eq!(ours.s, reference.s);
        assert_eq!(ours.sw, reference.sw);
        assert_eq!(ours.w, reference.w);
        assert_eq!(ours.nw, reference.nw);
    }
}

#[test]
fn test_encode_then_decode_stays_in_cell() {
    for (lat, lon) in sample_positions(300) {
        let id = cell::encode(lat, lon, 10).unwrap();
        let decoded = cell::decode(&id).unwrap();
        assert!(decoded.bounds.contains(&unl_core::LatLon::new(lat, lon)));
        assert!(decoded.bounds.contains(&decoded.position()));
    }
}

#[test]
fn test_known_positions() {
    assert_eq!(cell::encode(52.205, 0.119, 7).unwrap(), "u120fxw");
    assert_eq!(cell::encode_auto(57.648, 10.41).unwrap(), "u4pruy");

    let decoded = cell::decode("u120fxw").unwrap();
    assert_eq!((decoded.lat, decoded.lon), (52.205, 0.1188));
}

#[test]
fn test_elevation_survives_every_operation() {
    let id = cell::encode_with_elevation(57.648, 10.41, None, Elevation::floor(3)).unwrap();
    assert_eq!(id, "u4pruy@3");

    let decoded = cell::decode(&id).unwrap();
    assert_eq!(decoded.elevation, Elevation::new(3, ElevationType::Floor));

    let north = cell::adjacent(&id, Direction::North).unwrap();
    assert!(north.ends_with("@3"));
    assert_eq!(cell::adjacent(&north, Direction::South).unwrap(), id);

    let below = cell::encode_with_elevation(57.648, 10.41, Some(6), Elevation::floor(-2)).unwrap();
    assert_eq!(cell::decode(&below).unwrap().elevation.value, -2);
}

#[test]
fn test_ground_elevation_has_no_suffix() {
    let id = cell::encode_with_elevation(57.648, 10.41, Some(6), Elevation::height_in_cm(0)).unwrap();
    assert_eq!(id, "u4pruy");
}

#[test]
fn test_directions_walk_around_a_cell() {
    let start = "u4pruydq";
    let mut current = start.to_string();
    for direction in [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ] {
        current = cell::adjacent(&current, direction).unwrap();
        assert_ne!(current, start);
    }
    assert_eq!(current, start);
}

#[test]
fn test_malformed_ids_are_rejected() {
    for bad in ["", "u4pra", "u4pr!", "u4pr@x", "u4pr@", "u4pr@1#2"] {
        assert!(
            matches!(cell::decode(bad), Err(UnlError::InvalidCellId(_))),
            "{:?}",
            bad
        );
    }
    assert!(matches!(
        cell::adjacent_str("u4pr", "up"),
        Err(UnlError::InvalidDirection(_))
    ));
}

#[test]
fn test_grid_lines_cover_area() {
    let area = cell::bounds("u4pr").unwrap();
    let lines = cell::grid_lines(&area, 5).unwrap();
    // 4 rows by 8 columns, each closing edge included
    let (horizontal, vertical): (Vec<&Line<f64>>, Vec<&Line<f64>>) =
        lines.iter().partition(|line| line.start.y == line.end.y);
    assert_eq!(horizontal.len(), 4);
    assert_eq!(vertical.len(), 8);
    assert_eq!(horizontal.last().unwrap().start.y, area.ne.lat);
    assert_eq!(vertical.last().unwrap().start.x, area.ne.lon);
    for line in &lines {
        assert!(line.start.x >= area.sw.lon && line.end.x <= area.ne.lon);
        assert!(line.start.y >= area.sw.lat && line.end.y <= area.ne.lat);
    }
}
