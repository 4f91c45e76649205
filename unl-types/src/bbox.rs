use crate::elevation::Elevation;
use crate::point::LatLon;
use geo::{Polygon, Rect};
use serde::{Deserialize, Serialize};

/// The south-west / north-east corners of a cell, plus the elevation of the
/// cell it was computed from.
///
/// Invariant: `sw.lat <= ne.lat` and `sw.lon <= ne.lon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw: LatLon,
    pub ne: LatLon,
    #[serde(default)]
    pub elevation: Elevation,
}

impl BoundingBox {
    /// Create a bounding box with ground elevation.
    ///
    /// # Examples
    ///
    /// ```
    /// use unl_types::bbox::BoundingBox;
    /// use unl_types::point::LatLon;
    ///
    /// let bbox = BoundingBox::new(LatLon::new(40.7, -74.0), LatLon::new(40.8, -73.9));
    /// assert!((bbox.width() - 0.1).abs() < 1e-9);
    /// ```
    pub fn new(sw: LatLon, ne: LatLon) -> Self {
        Self {
            sw,
            ne,
            elevation: Elevation::default(),
        }
    }

    pub fn with_elevation(mut self, elevation: Elevation) -> Self {
        self.elevation = elevation;
        self
    }

    /// Longitude extent in degrees.
    pub fn width(&self) -> f64 {
        self.ne.lon - self.sw.lon
    }

    /// Latitude extent in degrees.
    pub fn height(&self) -> f64 {
        self.ne.lat - self.sw.lat
    }

    /// Unrounded midpoint.
    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lon + self.ne.lon) / 2.0,
        )
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: &LatLon) -> bool {
        point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
            && point.lon >= self.sw.lon
            && point.lon <= self.ne.lon
    }

    /// Check if this bounding box touches or overlaps another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.ne.lon < other.sw.lon
            || self.sw.lon > other.ne.lon
            || self.ne.lat < other.sw.lat
            || self.sw.lat > other.ne.lat)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(self.sw.to_coord(), self.ne.to_coord())
    }

    /// The box as a closed `geo::Polygon` ring (counter-clockwise).
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
