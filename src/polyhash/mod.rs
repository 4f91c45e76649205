//! Prefix-delta encoding of ordered cell id lists ("polyhash").
//!
//! Consecutive ids in a cluster or a traced outline share long prefixes.
//! [`deflate`] stores each id as the characters that differ from the id before
//! it, grouped into blocks of equal precision; [`inflate`] reverses it.
//!
//! ```rust
//! use unl_core::polyhash::{deflate, inflate};
//! use unl_core::PolyhashBlock;
//!
//! let blocks = deflate(&["drsv", "drtjb", "drtj8", "drtj2", "drtj0"]);
//! assert_eq!(
//!     blocks,
//!     vec![
//!         PolyhashBlock::new(4, vec!["drsv".into()]),
//!         PolyhashBlock::new(5, vec!["tjb".into(), "8".into(), "2".into(), "0".into()]),
//!     ]
//! );
//! assert_eq!(inflate(&blocks)?, vec!["drsv", "drtjb", "drtj8", "drtj2", "drtj0"]);
//! # Ok::<(), unl_core::UnlError>(())
//! ```

pub mod binary;

pub use binary::{compress, compress_to_bytes, decompress, decompress_blocks, decompress_bytes};

use crate::cell::{decode, encode, round_to_decimals};
use crate::compute::validation::{validate_positions, validate_precision};
use crate::error::{Result, UnlError};
use unl_types::{LatLon, PolyhashBlock};

/// Decimal places kept by [`to_coordinates`].
const COORDINATE_DECIMALS: usize = 6;

#[inline]
/// Byte length of the shared prefix, ending on a char boundary of both.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Delta-encode an ordered list of cell ids.
///
/// Consecutive duplicates are dropped. A new block starts whenever the id
/// length changes. The very first id is stored whole; every later one keeps
/// only what follows its common prefix with the previous id, even across
/// blocks.
pub fn deflate<S: AsRef<str>>(cell_ids: &[S]) -> Vec<PolyhashBlock> {
    let mut blocks: Vec<PolyhashBlock> = Vec::new();
    let mut previous: Option<&str> = None;

    for current in cell_ids.iter().map(AsRef::as_ref) {
        match previous {
            None => blocks.push(PolyhashBlock::new(current.len(), vec![current.to_string()])),
            Some(head) if head == current => continue,
            Some(head) => {
                if head.len() != current.len() {
                    blocks.push(PolyhashBlock::new(current.len(), Vec::new()));
                }
                let common = common_prefix_len(head, current);
                if let Some(block) = blocks.last_mut() {
                    block.data.push(current[common..].to_string());
                }
            }
        }
        previous = Some(current);
    }

    blocks
}

/// Expand delta-encoded blocks back into full cell ids.
///
/// # Errors
///
/// `InvalidInput` when an entry cannot be expanded: the first entry is not a
/// whole id, a suffix is longer than its block precision, or the previous id
/// is too short to supply the missing prefix.
pub fn inflate(blocks: &[PolyhashBlock]) -> Result<Vec<String>> {
    let mut cell_ids: Vec<String> = Vec::with_capacity(blocks.iter().map(PolyhashBlock::len).sum());

    for block in blocks {
        for suffix in &block.data {
            let cell_id = match cell_ids.last() {
                None if suffix.len() == block.precision => suffix.clone(),
                None => {
                    return Err(UnlError::InvalidInput(format!(
                        "First entry {:?} is not a full id of precision {}",
                        suffix, block.precision
                    )));
                }
                Some(previous) => {
                    let keep = block.precision.checked_sub(suffix.len()).ok_or_else(|| {
                        UnlError::InvalidInput(format!(
                            "Entry {:?} is longer than its block precision {}",
                            suffix, block.precision
                        ))
                    })?;
                    let prefix = previous.get(..keep).ok_or_else(|| {
                        UnlError::InvalidInput(format!(
                            "Entry {:?} needs {} prefix characters but {:?} has {}",
                            suffix,
                            keep,
                            previous,
                            previous.len()
                        ))
                    })?;
                    format!("{}{}", prefix, suffix)
                }
            };
            cell_ids.push(cell_id);
        }
    }

    Ok(cell_ids)
}

/// Legacy grouping: one group per run of equal-length ids.
///
/// The first id of a group is stored whole and the rest as suffixes after
/// their common prefix with the previous id. A repeated id opens a new group.
///
/// # Examples
///
/// ```rust
/// use unl_core::polyhash::group_by_prefix;
///
/// let groups = group_by_prefix(&["drsv", "drtjb", "drtj8", "drtj2", "drtj0"]);
/// assert_eq!(groups, vec![vec!["drsv"], vec!["drtjb", "8", "2", "0"]]);
/// ```
pub fn group_by_prefix<S: AsRef<str>>(cell_ids: &[S]) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut previous: Option<&str> = None;

    for current in cell_ids.iter().map(AsRef::as_ref) {
        match (previous, groups.last_mut()) {
            (Some(head), Some(group)) if head != current && head.len() == current.len() => {
                group.push(current[common_prefix_len(head, current)..].to_string());
            }
            _ => groups.push(vec![current.to_string()]),
        }
        previous = Some(current);
    }

    groups
}

/// Encode an outline of points at `precision` and deflate it.
///
/// # Examples
///
/// ```rust
/// use unl_core::polyhash::{inflate, to_polyhash};
/// use unl_core::LatLon;
///
/// let blocks = to_polyhash(&[LatLon::new(42.9252986, -72.2794631)], 9)?;
/// assert_eq!(inflate(&blocks)?, vec!["drss5nr9y"]);
/// assert!(to_polyhash(&[], 19).is_err());
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn to_polyhash(points: &[LatLon], precision: usize) -> Result<Vec<PolyhashBlock>> {
    validate_precision(precision)?;
    validate_positions(points)?;

    let cell_ids = points
        .iter()
        .map(|point| encode(point.lat, point.lon, precision))
        .collect::<Result<Vec<_>>>()?;
    Ok(deflate(&cell_ids))
}

/// Cell centres of a polyhash, rounded to 6 decimal places.
pub fn to_coordinates(blocks: &[PolyhashBlock]) -> Result<Vec<LatLon>> {
    inflate(blocks)?
        .iter()
        .map(|cell_id| {
            let decoded = decode(cell_id)?;
            Ok(LatLon::new(
                round_to_decimals(decoded.lat, COORDINATE_DECIMALS),
                round_to_decimals(decoded.lon, COORDINATE_DECIMALS),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(precision: usize, data: &[&str]) -> PolyhashBlock {
        PolyhashBlock::new(precision, data.iter().map(|s| s.to_string()).collect())
    }

    const IDS: [&str; 5] = ["drsv", "drtjb", "drtj8", "drtj2", "drtj0"];

    #[test]
    fn test_deflate() {
        assert_eq!(
            deflate(&IDS),
            vec![block(4, &["drsv"]), block(5, &["tjb", "8", "2", "0"])]
        );
    }

    #[test]
    fn test_deflate_drops_consecutive_duplicates() {
        let blocks = deflate(&["drsv", "drsv", "drsy", "drsv"]);
        assert_eq!(blocks, vec![block(4, &["drsv", "y", "v"])]);
    }

    #[test]
    fn test_deflate_empty() {
        assert!(deflate::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_inflate() {
        let blocks = vec![block(4, &["drsv"]), block(5, &["tjb", "8", "2", "0"])];
        assert_eq!(inflate(&blocks).unwrap(), IDS);
    }

    #[test]
    fn test_inflate_deflate_mixed_lengths() {
        let ids = ["d", "dr", "drs", "drt", "u4pruy", "u4pruz", "e"];
        assert_eq!(inflate(&deflate(&ids)).unwrap(), ids);
    }

    #[test]
    fn test_inflate_rejects_bad_entries() {
        // first entry must be whole
        assert!(matches!(
            inflate(&[block(5, &["tjb"])]),
            Err(UnlError::InvalidInput(_))
        ));
        // suffix longer than the precision
        assert!(inflate(&[block(2, &["dr"]), block(3, &["abcd"])]).is_err());
        // previous id too short to borrow from
        assert!(inflate(&[block(1, &["d"]), block(5, &["x"])]).is_err());
    }

    #[test]
    fn test_group_by_prefix() {
        assert_eq!(
            group_by_prefix(&IDS),
            vec![vec!["drsv"], vec!["drtjb", "8", "2", "0"]]
        );
        assert_eq!(
            group_by_prefix(&["drsv", "drsv", "drsy"]),
            vec![vec!["drsv"], vec!["drsv", "y"]]
        );
    }

    #[test]
    fn test_to_polyhash_precision_limit() {
        assert_eq!(
            to_polyhash(&[], 19),
            Err(UnlError::PrecisionOutOfRange {
                precision: 19,
                max: 16
            })
        );
    }

    #[test]
    fn test_to_polyhash_rejects_bad_points() {
        let result = to_polyhash(&[LatLon::new(10.0, 10.0), LatLon::new(f64::NAN, 0.0)], 9);
        assert!(matches!(result, Err(UnlError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_to_coordinates() {
        let blocks = deflate(&["u4pruy", "6gkzwgjz"]);
        let points = to_coordinates(&blocks).unwrap();
        assert_eq!(
            points,
            vec![LatLon::new(57.648, 10.41), LatLon::new(-25.38262, -49.26561)]
        );
    }

    #[test]
    fn test_multibyte_ids_split_on_char_boundaries() {
        let ids = ["é", "è", "éa", "éb"];
        let blocks = deflate(&ids);
        assert_eq!(inflate(&blocks).unwrap(), ids);
        assert_eq!(common_prefix_len("é", "è"), 0);
        assert_eq!(common_prefix_len("éa", "éb"), 'é'.len_utf8());
        let groups = group_by_prefix(&ids);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), ids.len());
    }
}
