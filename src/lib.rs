//! Location-ID cells, polygon clustering and polyhash compression.
//!
//! ```rust
//! use unl_core::{cell, polyhash, to_cluster, Elevation};
//!
//! let id = cell::encode_with_elevation(57.648, 10.41, Some(6), Elevation::height_in_cm(87))?;
//! assert_eq!(id, "u4pruy#87");
//!
//! let ring = vec![[10.40, 57.64], [10.42, 57.64], [10.42, 57.66], [10.40, 57.66]];
//! let cluster = to_cluster(ring, 6)?;
//! let compressed = polyhash::compress(&cluster)?;
//! assert_eq!(polyhash::decompress(&compressed)?, polyhash::inflate(&cluster)?);
//! # Ok::<(), unl_core::UnlError>(())
//! ```

pub mod cell;
pub mod compute;
pub mod config;
pub mod error;
pub mod polyhash;

pub use error::{Result, UnlError};

pub use geo::{MultiPolygon, Polygon};

pub use unl_types::{BoundingBox, Elevation, ElevationType, LatLon, ParsedCellId, PolyhashBlock};

pub use config::{Config, DEFAULT_PRECISION, PrecisionPolicy};

pub use cell::{
    DecodedCell, Direction, MAX_PRECISION, Neighbours, adjacent, bounds, decode, encode,
    encode_auto, encode_with_elevation, neighbours,
};

pub use compute::backend::{GeoGeometry, GeometryBackend, PlanarGeometry};
pub use compute::cluster::{Cluster, to_cluster};
pub use compute::geojson::{PolygonInput, cell_to_geojson};

pub use polyhash::{compress, decompress, deflate, inflate, to_coordinates, to_polyhash};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, UnlError};

    pub use geo::{MultiPolygon, Polygon};

    pub use crate::{BoundingBox, Elevation, ElevationType, LatLon, PolyhashBlock};

    pub use crate::cell::{Direction, adjacent, bounds, decode, encode, neighbours};

    pub use crate::{Cluster, Config, GeometryBackend, PolygonInput, to_cluster};

    pub use crate::polyhash::{compress, decompress, deflate, inflate};
}
