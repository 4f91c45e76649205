//! Validation for coordinates, precisions and polygon input.

use crate::cell::MAX_PRECISION;
use crate::error::{Result, UnlError};
use geo::Polygon;
use unl_types::LatLon;

/// Validates a latitude/longitude pair.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use unl_core::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(40.7128, -74.0060).is_ok());
///
/// // Invalid longitude
/// assert!(validate_coordinate(40.0, 200.0).is_err());
///
/// // Invalid latitude
/// assert!(validate_coordinate(95.0, -74.0).is_err());
/// ```
pub fn validate_coordinate(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(UnlError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(UnlError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(UnlError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(UnlError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Ok(())
}

/// Validates that `precision` lies in `1..=MAX_PRECISION`.
pub fn validate_precision(precision: usize) -> Result<()> {
    if !(1..=MAX_PRECISION).contains(&precision) {
        return Err(UnlError::PrecisionOutOfRange {
            precision,
            max: MAX_PRECISION,
        });
    }
    Ok(())
}

/// Validates multiple positions, reporting the first bad index.
///
/// # Examples
///
/// ```
/// use unl_core::compute::validation::validate_positions;
/// use unl_core::LatLon;
///
/// let points = vec![
///     LatLon::new(40.7, -74.0),
///     LatLon::new(40.8, -73.9),
///     LatLon::new(40.0, 999.0), // Invalid
/// ];
///
/// assert!(validate_positions(&points).is_err());
/// ```
pub fn validate_positions(points: &[LatLon]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_coordinate(point.lat, point.lon).map_err(|e| {
            UnlError::InvalidCoordinate(format!("Point at index {}: {}", idx, e))
        })?;
    }
    Ok(())
}

/// Validates all polygon coordinates (exterior and interior rings).
///
/// Coordinates are read as `x = lon`, `y = lat`.
///
/// # Examples
///
/// ```
/// use unl_core::compute::validation::validate_polygon;
/// use geo::{polygon, Polygon};
///
/// let poly: Polygon = polygon![
///     (x: -80.0, y: 35.0),
///     (x: -70.0, y: 35.0),
///     (x: -70.0, y: 45.0),
///     (x: -80.0, y: 45.0),
///     (x: -80.0, y: 35.0),
/// ];
///
/// assert!(validate_polygon(&poly).is_ok());
/// ```
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<()> {
    // closed ring: three corners plus the repeated first one
    if polygon.exterior().0.len() < 4 {
        return Err(UnlError::InvalidInput(format!(
            "Polygon exterior needs at least 3 distinct positions, got {} closed",
            polygon.exterior().0.len()
        )));
    }

    for (idx, coord) in polygon.exterior().coords().enumerate() {
        validate_coordinate(coord.y, coord.x).map_err(|e| {
            UnlError::InvalidCoordinate(format!("Exterior ring point at index {}: {}", idx, e))
        })?;
    }

    for (ring_idx, interior) in polygon.interiors().iter().enumerate() {
        for (idx, coord) in interior.coords().enumerate() {
            validate_coordinate(coord.y, coord.x).map_err(|e| {
                UnlError::InvalidCoordinate(format!(
                    "Interior ring {} point at index {}: {}",
                    ring_idx, idx, e
                ))
            })?;
        }
    }

    Ok(())
}
