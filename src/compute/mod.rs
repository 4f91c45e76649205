//! Compute layer: validation, geometry kernels and cluster decomposition.
//!
//! - [`validation`]: coordinate, precision and polygon checks
//! - [`geometry`]: planar primitives (ray casting, clipping, containment)
//! - [`backend`]: the [`GeometryBackend`](backend::GeometryBackend) seam
//! - [`geojson`]: polygon input parsing and cell output
//! - [`cluster`]: the breadth-first polygon decomposition

pub mod backend;
pub mod cluster;
pub mod geojson;
pub mod geometry;
pub mod validation;
