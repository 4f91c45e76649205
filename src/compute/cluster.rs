//! Polygon to cell-cluster decomposition.
//!
//! A breadth-first walk over the cell tree: every cell touching the polygon
//! is either accepted (fully inside, or at the requested precision) or
//! subdivided. Before subdividing, the walk jumps straight to the deepest
//! cell that still holds the whole clipped piece, which skips the chain of
//! single-child levels a small polygon would otherwise cost.

use super::backend::{GeometryBackend, PlanarGeometry};
use super::geojson::PolygonInput;
use crate::cell::{ALPHABET, bounds, encode};
use crate::config::Config;
use crate::error::Result;
use crate::polyhash::{deflate, to_polyhash};
use geo::{MultiPolygon, Polygon};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use unl_types::{LatLon, PolyhashBlock};

/// A prefix still to be expanded and the part of the polygon inside it.
struct WorkItem {
    prefix: String,
    piece: MultiPolygon<f64>,
}

#[derive(Debug, Default)]
struct ClusterStats {
    polygons: usize,
    visited: usize,
    accepted: usize,
    settled: usize,
}

/// Cluster engine over a pluggable geometry kernel.
///
/// # Examples
///
/// ```
/// use unl_core::compute::cluster::Cluster;
/// use unl_core::cell::bounds;
///
/// // a polygon that is exactly one cell clusters to that cell
/// let cell = bounds("u4pr")?.to_polygon();
/// let cells = Cluster::new().cluster_cells(cell, 6)?;
/// assert_eq!(cells, vec!["u4pr".to_string()]);
/// # Ok::<(), unl_core::UnlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cluster<B: GeometryBackend = PlanarGeometry> {
    config: Config,
    backend: B,
}

impl Cluster<PlanarGeometry> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: GeometryBackend> Cluster<B> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Swap the geometry kernel, keeping the configuration.
    pub fn with_backend<C: GeometryBackend>(self, backend: C) -> Cluster<C> {
        Cluster {
            config: self.config,
            backend,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decompose a polygon into a delta-encoded cluster.
    ///
    /// # Errors
    ///
    /// `PrecisionOutOfRange` (under the reject policy) before any work,
    /// `InvalidInput`/`InvalidCoordinate` for malformed polygons.
    pub fn cluster(
        &self,
        input: impl Into<PolygonInput>,
        precision: usize,
    ) -> Result<Vec<PolyhashBlock>> {
        let cells = self.cluster_cells(input, precision)?;
        Ok(deflate(&cells))
    }

    /// Cells covering the polygon, sorted by length then lexicographically.
    pub fn cluster_cells(
        &self,
        input: impl Into<PolygonInput>,
        precision: usize,
    ) -> Result<Vec<String>> {
        let precision = self.config.resolve_precision(precision)?;
        let polygons = input.into().into_polygons()?;

        let mut stats = ClusterStats::default();
        let mut accepted = FxHashSet::default();
        for polygon in &polygons {
            stats.polygons += 1;
            self.decompose(polygon, precision, &mut accepted, &mut stats)?;
        }

        let mut cells: Vec<String> = accepted.into_iter().collect();
        cells.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        log::debug!(
            "Clustered {} polygon(s) at precision {}: {} cells accepted ({} unique), {} visited, {} settled early",
            stats.polygons,
            precision,
            stats.accepted,
            cells.len(),
            stats.visited,
            stats.settled
        );
        Ok(cells)
    }

    /// Encode points at the configured default precision and deflate them.
    pub fn polyhash(&self, points: &[LatLon]) -> Result<Vec<PolyhashBlock>> {
        let precision = self.config.resolve_precision(self.config.default_precision)?;
        to_polyhash(points, precision)
    }

    fn decompose(
        &self,
        polygon: &Polygon<f64>,
        precision: usize,
        accepted: &mut FxHashSet<String>,
        stats: &mut ClusterStats,
    ) -> Result<()> {
        let whole = MultiPolygon::new(vec![polygon.clone()]);
        let mut queue = VecDeque::new();
        queue.push_back(WorkItem {
            prefix: String::new(),
            piece: whole.clone(),
        });

        while let Some(item) = queue.pop_front() {
            for &symbol in ALPHABET.iter() {
                let mut child = String::with_capacity(item.prefix.len() + 1);
                child.push_str(&item.prefix);
                child.push(symbol as char);
                stats.visited += 1;

                let cell = bounds(&child)?.to_polygon();
                if self.backend.disjoint(&item.piece, &cell) {
                    continue;
                }

                if self.backend.contains(polygon, &cell) {
                    stats.accepted += 1;
                    accepted.insert(child);
                    continue;
                }

                if child.len() == precision {
                    // clipped pieces carry bridge edges along concave gaps
                    if self.backend.disjoint(&whole, &cell) {
                        continue;
                    }
                    stats.accepted += 1;
                    accepted.insert(child);
                    continue;
                }

                let Some(clipped) = self.backend.intersect(&item.piece, &cell) else {
                    continue;
                };

                let depth = child.len();
                let target = refine_target(child, &clipped, precision)?;
                if target.len() == precision {
                    // the whole piece sits inside one full-precision cell
                    stats.settled += 1;
                    log::trace!("Dropping piece settled in {}", target);
                    continue;
                }

                if target.len() > depth
                    && self.backend.contains(polygon, &bounds(&target)?.to_polygon())
                {
                    stats.accepted += 1;
                    accepted.insert(target);
                    continue;
                }

                queue.push_back(WorkItem {
                    prefix: target,
                    piece: clipped,
                });
            }
        }

        Ok(())
    }
}

/// Deepest prefix holding every vertex of the piece, never shallower than `child`.
fn refine_target(child: String, piece: &MultiPolygon<f64>, precision: usize) -> Result<String> {
    let mut lowest: Option<String> = None;
    let mut highest: Option<String> = None;

    for polygon in piece.iter() {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for coord in rings.flat_map(|ring| ring.coords()) {
            // clipping can overshoot the world edge by an ulp
            let id = encode(
                coord.y.clamp(-90.0, 90.0),
                coord.x.clamp(-180.0, 180.0),
                precision,
            )?;
            if lowest.as_ref().is_none_or(|low| id < *low) {
                lowest = Some(id.clone());
            }
            if highest.as_ref().is_none_or(|high| id > *high) {
                highest = Some(id);
            }
        }
    }

    let (Some(lowest), Some(highest)) = (lowest, highest) else {
        return Ok(child);
    };
    let common = lowest
        .bytes()
        .zip(highest.bytes())
        .take_while(|(a, b)| a == b)
        .count();

    if common < child.len() {
        Ok(child)
    } else {
        Ok(lowest[..common].to_string())
    }
}

/// Cluster with the default configuration and planar kernel.
///
/// # Examples
///
/// ```
/// use unl_core::to_cluster;
///
/// let ring = vec![[10.40, 57.64], [10.42, 57.64], [10.42, 57.66], [10.40, 57.66]];
/// let blocks = to_cluster(ring, 6)?;
/// assert!(!blocks.is_empty());
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn to_cluster(input: impl Into<PolygonInput>, precision: usize) -> Result<Vec<PolyhashBlock>> {
    Cluster::new().cluster(input, precision)
}
