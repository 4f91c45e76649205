//! Geometry backend abstraction for cluster decomposition
//!
//! The cluster engine only ever asks three questions about a polygon piece
//! and a cell rectangle. Backends answer them with different geometry
//! kernels while the traversal stays the same.

use super::geometry::{polygon_area, polygon_contains, polygon_intersection, polygons_disjoint};
use geo::{Area, BooleanOps, Contains, Intersects, MultiPolygon, Polygon};

/// Share of the piece area below which an intersection counts as empty
const EMPTY_AREA_RATIO: f64 = 1e-9;

/// Trait for geometry kernel implementations
///
/// The second operand is always a cell rectangle, so implementations may
/// treat it as convex.
pub trait GeometryBackend: Send + Sync {
    /// True when the piece and the cell share no point
    fn disjoint(&self, piece: &MultiPolygon<f64>, cell: &Polygon<f64>) -> bool;

    /// True when `inner` lies entirely within `outer`
    fn contains(&self, outer: &Polygon<f64>, inner: &Polygon<f64>) -> bool;

    /// The part of the piece inside the cell, `None` when it has no area
    fn intersect(&self, piece: &MultiPolygon<f64>, cell: &Polygon<f64>)
    -> Option<MultiPolygon<f64>>;
}

/// Built-in planar kernel
///
/// Ray casting and orientation tests from [`super::geometry`], with
/// Sutherland–Hodgman clipping against the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarGeometry;

impl GeometryBackend for PlanarGeometry {
    fn disjoint(&self, piece: &MultiPolygon<f64>, cell: &Polygon<f64>) -> bool {
        piece.iter().all(|part| polygons_disjoint(part, cell))
    }

    fn contains(&self, outer: &Polygon<f64>, inner: &Polygon<f64>) -> bool {
        polygon_contains(outer, inner)
    }

    fn intersect(
        &self,
        piece: &MultiPolygon<f64>,
        cell: &Polygon<f64>,
    ) -> Option<MultiPolygon<f64>> {
        let parts: Vec<Polygon<f64>> = piece
            .iter()
            .filter_map(|part| polygon_intersection(part, cell))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(MultiPolygon::new(parts))
        }
    }
}

/// Kernel backed by the `geo` crate's predicates and boolean operations
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoGeometry;

impl GeometryBackend for GeoGeometry {
    fn disjoint(&self, piece: &MultiPolygon<f64>, cell: &Polygon<f64>) -> bool {
        !piece.intersects(cell)
    }

    fn contains(&self, outer: &Polygon<f64>, inner: &Polygon<f64>) -> bool {
        outer.contains(inner)
    }

    fn intersect(
        &self,
        piece: &MultiPolygon<f64>,
        cell: &Polygon<f64>,
    ) -> Option<MultiPolygon<f64>> {
        let clipped = piece.intersection(cell);
        if clipped.0.is_empty()
            || clipped.unsigned_area() <= piece.unsigned_area() * EMPTY_AREA_RATIO
        {
            return None;
        }
        Some(clipped)
    }
}

/// Net area of every part; used to compare backends.
pub fn multi_polygon_area(piece: &MultiPolygon<f64>) -> f64 {
    piece.iter().map(polygon_area).sum()
}
