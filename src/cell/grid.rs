//! Cell grid lines over a bounding box.

use super::{Direction, adjacent, bounds, encode};
use crate::config::DEFAULT_PRECISION;
use crate::error::Result;
use geo::{Coord, Line};
use unl_types::BoundingBox;

/// Horizontal and vertical cell edges crossing `area` at `precision`.
///
/// Starting from the cell holding the south-west corner, one line spanning
/// the full width is emitted for each cell north edge up to the box's north
/// side, then one line spanning the full height for each cell east edge up
/// to its east side. Coordinates are `(lon, lat)`.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::grid_lines;
/// use unl_core::{BoundingBox, LatLon};
///
/// let area = BoundingBox::new(LatLon::new(52.20, 0.11), LatLon::new(52.21, 0.12));
/// let lines = grid_lines(&area, 6)?;
/// assert!(!lines.is_empty());
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn grid_lines(area: &BoundingBox, precision: usize) -> Result<Vec<Line<f64>>> {
    let (lat_min, lon_min) = (area.sw.lat, area.sw.lon);
    let (lat_max, lon_max) = (area.ne.lat, area.ne.lon);

    let sw_cell = encode(lat_min, lon_min, precision)?;
    let sw_bounds = bounds(&sw_cell)?;
    let mut lines = Vec::new();

    let mut cell = sw_cell.clone();
    let mut north = sw_bounds.ne.lat;
    while north <= lat_max {
        lines.push(Line::new(
            Coord { x: lon_min, y: north },
            Coord { x: lon_max, y: north },
        ));
        cell = adjacent(&cell, Direction::North)?;
        let next = bounds(&cell)?.ne.lat;
        // the pole wraps back south
        if next <= north {
            break;
        }
        north = next;
    }

    let mut cell = sw_cell;
    let mut east = sw_bounds.ne.lon;
    while east <= lon_max {
        lines.push(Line::new(
            Coord { x: east, y: lat_min },
            Coord { x: east, y: lat_max },
        ));
        cell = adjacent(&cell, Direction::East)?;
        let next = bounds(&cell)?.ne.lon;
        // antimeridian wrap
        if next <= east {
            break;
        }
        east = next;
    }

    Ok(lines)
}

/// [`grid_lines`] at the default precision of 9.
pub fn grid_lines_default(area: &BoundingBox) -> Result<Vec<Line<f64>>> {
    grid_lines(area, DEFAULT_PRECISION)
}
