//! Location-ID cell codec.
//!
//! A cell id is the base-32 rendering of an interleaved quad-tree path:
//! longitude and latitude are bisected alternately (longitude first) and each
//! bisection contributes one bit, five bits per character.
//!
//! ```rust
//! use unl_core::cell;
//!
//! let id = cell::encode(57.648, 10.41, 6)?;
//! assert_eq!(id, "u4pruy");
//!
//! let decoded = cell::decode(&id)?;
//! assert_eq!((decoded.lat, decoded.lon), (57.648, 10.41));
//! # Ok::<(), unl_core::UnlError>(())
//! ```

pub mod adjacency;
pub mod elevation;
pub mod grid;

pub use adjacency::{Direction, Neighbours, adjacent, adjacent_str, neighbours};
pub use elevation::{append_elevation, exclude_elevation};
pub use grid::{grid_lines, grid_lines_default};

use crate::compute::validation::{validate_coordinate, validate_precision};
use crate::error::{Result, UnlError};
use serde::{Deserialize, Serialize};
use unl_types::{BoundingBox, Elevation, LatLon};

/// The 32 cell symbols; `a`, `i`, `l` and `o` are left out.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest supported cell id.
pub const MAX_PRECISION: usize = 16;

/// Precisions tried by [`encode_auto`].
pub const AUTO_PRECISION_LIMIT: usize = 9;

const BITS_PER_CHAR: u32 = 5;
const INVALID: u8 = u8::MAX;

const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Index of a symbol in [`ALPHABET`].
#[inline]
pub fn char_index(symbol: u8) -> Option<u8> {
    match DECODE_TABLE.get(symbol as usize) {
        Some(&INVALID) | None => None,
        Some(&idx) => Some(idx),
    }
}

/// Symbol for an alphabet index (only the low 5 bits are used).
#[inline]
pub fn symbol(index: u8) -> char {
    ALPHABET[(index & 0x1f) as usize] as char
}

/// Checks that `cell_id` is a bare payload of 1..=16 alphabet symbols.
pub(crate) fn validate_payload(cell_id: &str) -> Result<()> {
    if cell_id.is_empty() {
        return Err(UnlError::InvalidCellId("cell id is empty".to_string()));
    }
    if cell_id.len() > MAX_PRECISION {
        return Err(UnlError::InvalidCellId(format!(
            "{} is longer than {} characters",
            cell_id, MAX_PRECISION
        )));
    }
    if let Some(bad) = cell_id.bytes().find(|b| char_index(*b).is_none()) {
        return Err(UnlError::InvalidCellId(format!(
            "{} contains invalid character {:?}",
            cell_id, bad as char
        )));
    }
    Ok(())
}

#[inline]
fn bisect(range: &mut (f64, f64), upper: bool) {
    let mid = (range.0 + range.1) / 2.0;
    if upper {
        range.0 = mid;
    } else {
        range.1 = mid;
    }
}

/// Encode a position to a cell id of `precision` characters.
///
/// # Errors
///
/// `InvalidCoordinate` for non-finite or out-of-range input and
/// `PrecisionOutOfRange` outside `1..=16`.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::encode;
///
/// assert_eq!(encode(52.205, 0.119, 7)?, "u120fxw");
/// assert!(encode(f64::NAN, 0.0, 7).is_err());
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String> {
    validate_coordinate(lat, lon)?;
    validate_precision(precision)?;

    let mut lat_range = (-90.0, 90.0);
    let mut lon_range = (-180.0, 180.0);
    let mut cell_id = String::with_capacity(precision);
    let mut even_bit = true;
    let mut bit = 0;
    let mut idx = 0u8;

    while cell_id.len() < precision {
        let (range, value) = if even_bit {
            (&mut lon_range, lon)
        } else {
            (&mut lat_range, lat)
        };
        let upper = value >= (range.0 + range.1) / 2.0;
        idx = (idx << 1) | upper as u8;
        bisect(range, upper);
        even_bit = !even_bit;

        bit += 1;
        if bit == BITS_PER_CHAR {
            cell_id.push(symbol(idx));
            bit = 0;
            idx = 0;
        }
    }

    Ok(cell_id)
}

/// Encode at the shortest precision (up to 9) whose decoded centre equals
/// the input exactly, falling back to precision 9.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::encode_auto;
///
/// // decoding "u4pruy" yields exactly (57.648, 10.41)
/// assert_eq!(encode_auto(57.648, 10.41)?, "u4pruy");
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn encode_auto(lat: f64, lon: f64) -> Result<String> {
    validate_coordinate(lat, lon)?;
    for precision in 1..=AUTO_PRECISION_LIMIT {
        let cell_id = encode(lat, lon, precision)?;
        let decoded = decode(&cell_id)?;
        if decoded.lat == lat && decoded.lon == lon {
            return Ok(cell_id);
        }
    }
    encode(lat, lon, AUTO_PRECISION_LIMIT)
}

/// Encode with an elevation tag; `None` precision infers it like [`encode_auto`].
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::encode_with_elevation;
/// use unl_core::Elevation;
///
/// let id = encode_with_elevation(57.648, 10.41, Some(6), Elevation::height_in_cm(87))?;
/// assert_eq!(id, "u4pruy#87");
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn encode_with_elevation(
    lat: f64,
    lon: f64,
    precision: Option<usize>,
    elevation: Elevation,
) -> Result<String> {
    let cell_id = match precision {
        Some(precision) => encode(lat, lon, precision)?,
        None => encode_auto(lat, lon)?,
    };
    Ok(append_elevation(&cell_id, elevation))
}

/// Centre of a cell plus its elevation and bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedCell {
    /// Latitude of the cell centre, rounded to the cell's resolution
    pub lat: f64,
    /// Longitude of the cell centre, rounded to the cell's resolution
    pub lon: f64,
    pub elevation: Elevation,
    pub bounds: BoundingBox,
}

impl DecodedCell {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Decode a cell id (with optional elevation suffix) to its centre.
///
/// The centre is rounded to `floor(2 - log10(Δ))` decimals where Δ is the
/// cell's extent on that axis, so the result carries no more digits than the
/// cell resolves.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::decode;
/// use unl_core::ElevationType;
///
/// let decoded = decode("6gkzwgjz#90")?;
/// assert_eq!((decoded.lat, decoded.lon), (-25.38262, -49.26561));
/// assert_eq!(decoded.elevation.value, 90);
/// assert_eq!(decoded.elevation.kind, ElevationType::HeightInCm);
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn decode(cell_id: &str) -> Result<DecodedCell> {
    let bounds = bounds(cell_id)?;
    let center = bounds.center();

    Ok(DecodedCell {
        lat: round_to_decimals(center.lat, resolution_decimals(bounds.height())),
        lon: round_to_decimals(center.lon, resolution_decimals(bounds.width())),
        elevation: bounds.elevation,
        bounds,
    })
}

/// South-west / north-east corners of a cell.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::bounds;
///
/// let b = bounds("u120fxw")?;
/// assert_eq!(b.sw.lat, 52.20428466796875);
/// assert_eq!(b.ne.lon, 0.119476318359375);
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn bounds(cell_id: &str) -> Result<BoundingBox> {
    let parsed = exclude_elevation(cell_id)?;
    validate_payload(&parsed.cell_id)?;

    let mut lat_range = (-90.0, 90.0);
    let mut lon_range = (-180.0, 180.0);
    let mut even_bit = true;

    for byte in parsed.cell_id.bytes() {
        let idx = char_index(byte).unwrap_or_default();
        for n in (0..BITS_PER_CHAR).rev() {
            let upper = (idx >> n) & 1 == 1;
            if even_bit {
                bisect(&mut lon_range, upper);
            } else {
                bisect(&mut lat_range, upper);
            }
            even_bit = !even_bit;
        }
    }

    Ok(BoundingBox::new(
        LatLon::new(lat_range.0, lon_range.0),
        LatLon::new(lat_range.1, lon_range.1),
    )
    .with_elevation(parsed.elevation))
}

/// Decimal places that match the information content of a cell extent.
fn resolution_decimals(extent: f64) -> usize {
    (2.0 - extent.log10()).floor().max(0.0) as usize
}

/// Round to `decimals` places, ties away from zero on the exact decimal value.
pub(crate) fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = if is_decimal_tie(value.abs(), decimals) {
        // one ulp past an exact tie rounds up without crossing the next boundary
        f64::from_bits(value.abs().to_bits() + 1)
    } else {
        value.abs()
    };
    let rounded: f64 = format!("{:.*}", decimals, magnitude)
        .parse()
        .unwrap_or(magnitude);
    rounded.copysign(value)
}

/// Whether `value * 10^decimals` has a fractional part of exactly one half.
///
/// With `value = m * 2^e` (m odd) that product is `m * 5^d * 2^(e + d)`, which
/// ends in exactly `.5` only when `e == -(d + 1)`.
fn is_decimal_tie(value: f64, decimals: usize) -> bool {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if mantissa == 0 || biased == 0x7ff {
        return false;
    }
    exponent + mantissa.trailing_zeros() as i64 == -(decimals as i64 + 1)
}
