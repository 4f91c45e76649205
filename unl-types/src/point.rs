use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees, latitude first.
///
/// Cell codecs think in `(lat, lon)` while `geo` geometry is `(x, y)`, so the
/// conversions below always map `x` to longitude and `y` to latitude.
///
/// # Examples
///
/// ```
/// use unl_types::point::LatLon;
///
/// let jutland = LatLon::new(57.648, 10.41);
/// let coord = jutland.to_coord();
/// assert_eq!(coord.x, 10.41);
/// assert_eq!(coord.y, 57.648);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a `geo::Coord` (`x = lon`, `y = lat`).
    pub fn to_coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    /// Convert to a `geo::Point` (`x = lon`, `y = lat`).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<Coord<f64>> for LatLon {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

impl From<Point<f64>> for LatLon {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

impl From<LatLon> for Coord<f64> {
    fn from(value: LatLon) -> Self {
        value.to_coord()
    }
}
