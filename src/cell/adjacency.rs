//! Neighbouring cells.
//!
//! Two 32-entry tables per direction (one per id length parity) map the last
//! symbol of a cell to the last symbol of its neighbour. Border symbols are
//! those whose neighbour lies under a different parent, in which case the
//! parent's neighbour is resolved first.

use super::{ALPHABET, char_index, validate_payload};
use crate::error::{Result, UnlError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::elevation::{append_elevation, exclude_elevation};

/// Compass direction for [`adjacent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    const fn table_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl FromStr for Direction {
    type Err = UnlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(Direction::North),
            "s" => Ok(Direction::South),
            "e" => Ok(Direction::East),
            "w" => Ok(Direction::West),
            _ => Err(UnlError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "n",
            Direction::South => "s",
            Direction::East => "e",
            Direction::West => "w",
        };
        f.write_str(s)
    }
}

// [direction][length parity]; indexed by Direction::table_index
const NEIGHBOUR_SYMBOLS: [[&str; 2]; 4] = [
    [
        "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
        "bc01fg45238967deuvhjyznpkmstqrwx",
    ],
    [
        "14365h7k9dcfesgujnmqp0r2twvyx8zb",
        "238967debc01fg45kmstqrwxuvhjyznp",
    ],
    [
        "bc01fg45238967deuvhjyznpkmstqrwx",
        "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
    ],
    [
        "238967debc01fg45kmstqrwxuvhjyznp",
        "14365h7k9dcfesgujnmqp0r2twvyx8zb",
    ],
];

const BORDER_SYMBOLS: [[&str; 2]; 4] = [
    ["prxz", "bcfguvyz"],
    ["028b", "0145hjnp"],
    ["bcfguvyz", "prxz"],
    ["0145hjnp", "028b"],
];

struct AdjacencyTables {
    /// alphabet index of last symbol -> alphabet index of neighbour symbol
    neighbour: [[[u8; 32]; 2]; 4],
    border: [[[bool; 32]; 2]; 4],
}

static TABLES: Lazy<AdjacencyTables> = Lazy::new(|| {
    let mut neighbour = [[[0u8; 32]; 2]; 4];
    let mut border = [[[false; 32]; 2]; 4];

    for dir in 0..4 {
        for parity in 0..2 {
            // position in the neighbour string is the index of the resulting symbol
            for (target, symbol) in NEIGHBOUR_SYMBOLS[dir][parity].bytes().enumerate() {
                if let Some(source) = char_index(symbol) {
                    neighbour[dir][parity][source as usize] = target as u8;
                }
            }
            for symbol in BORDER_SYMBOLS[dir][parity].bytes() {
                if let Some(source) = char_index(symbol) {
                    border[dir][parity][source as usize] = true;
                }
            }
        }
    }

    AdjacencyTables { neighbour, border }
});

fn adjacent_payload(payload: &str, direction: Direction) -> String {
    let Some((&last, parent)) = payload.as_bytes().split_last() else {
        return String::new();
    };
    // payload was validated, so every byte is ASCII and in the alphabet
    let parent = &payload[..parent.len()];
    let last = char_index(last).unwrap_or_default() as usize;
    let dir = direction.table_index();
    let parity = payload.len() % 2;

    let mut result = if TABLES.border[dir][parity][last] && !parent.is_empty() {
        adjacent_payload(parent, direction)
    } else {
        parent.to_string()
    };
    result.push(ALPHABET[TABLES.neighbour[dir][parity][last] as usize] as char);
    result
}

/// The cell next to `cell_id` in `direction`, keeping its elevation suffix.
///
/// Cells on the edge of the world wrap around.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::{adjacent, Direction};
///
/// assert_eq!(adjacent("ezzz@5", Direction::North)?, "gbpb@5");
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn adjacent(cell_id: &str, direction: Direction) -> Result<String> {
    let parsed = exclude_elevation(cell_id)?;
    validate_payload(&parsed.cell_id)?;

    let next = adjacent_payload(&parsed.cell_id, direction);
    Ok(append_elevation(&next, parsed.elevation))
}

/// [`adjacent`] with a textual direction (`n`, `s`, `e` or `w`).
///
/// # Errors
///
/// `InvalidCellId` for an empty or malformed id, `InvalidDirection` for any
/// other direction string.
pub fn adjacent_str(cell_id: &str, direction: &str) -> Result<String> {
    if cell_id.is_empty() {
        return Err(UnlError::InvalidCellId("cell id is empty".to_string()));
    }
    adjacent(cell_id, direction.parse()?)
}

/// All eight cells surrounding a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbours {
    pub n: String,
    pub ne: String,
    pub e: String,
    pub se: String,
    pub s: String,
    pub sw: String,
    pub w: String,
    pub nw: String,
}

/// The eight neighbours of a cell; diagonals go north/south first, then east/west.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::neighbours;
///
/// let around = neighbours("ezzz")?;
/// assert_eq!(around.ne, "u000");
/// assert_eq!(around.sw, "ezzw");
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn neighbours(cell_id: &str) -> Result<Neighbours> {
    let n = adjacent(cell_id, Direction::North)?;
    let s = adjacent(cell_id, Direction::South)?;

    Ok(Neighbours {
        ne: adjacent(&n, Direction::East)?,
        nw: adjacent(&n, Direction::West)?,
        se: adjacent(&s, Direction::East)?,
        sw: adjacent(&s, Direction::West)?,
        e: adjacent(cell_id, Direction::East)?,
        w: adjacent(cell_id, Direction::West)?,
        n,
        s,
    })
}
