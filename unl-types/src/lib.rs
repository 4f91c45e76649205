//! # unl-types
//!
//! Core value types shared by the location-ID cell codec and its polyhash
//! encoders.
//!
//! - **Point types**: [`LatLon`](point::LatLon)
//! - **Bounds**: [`BoundingBox`](bbox::BoundingBox)
//! - **Elevation**: [`Elevation`](elevation::Elevation),
//!   [`ElevationType`](elevation::ElevationType), [`ParsedCellId`](elevation::ParsedCellId)
//! - **Polyhash**: [`PolyhashBlock`](polyhash::PolyhashBlock)
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! primitives where that makes sense (`x` is longitude, `y` is latitude).
//!
//! ## Examples
//!
//! ```rust
//! use unl_types::bbox::BoundingBox;
//! use unl_types::point::LatLon;
//!
//! let bbox = BoundingBox::new(LatLon::new(57.6, 10.4), LatLon::new(57.7, 10.5));
//! assert!(bbox.contains(&LatLon::new(57.648, 10.41)));
//! ```

pub mod bbox;
pub mod elevation;
pub mod point;
pub mod polyhash;

pub use bbox::BoundingBox;
pub use elevation::{Elevation, ElevationType, ParsedCellId};
pub use point::LatLon;
pub use polyhash::PolyhashBlock;
