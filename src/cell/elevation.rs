//! Elevation suffix handling: `<cell>`, `<cell>@<floor>` or `<cell>#<height in cm>`.

use crate::error::{Result, UnlError};
use unl_types::{Elevation, ElevationType, ParsedCellId};

/// Split a raw cell id into its payload and elevation tag.
///
/// The payload is lower-cased; it is not checked against the alphabet here.
///
/// # Errors
///
/// `InvalidCellId` when both markers are present or the elevation is not an
/// integer.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::exclude_elevation;
/// use unl_core::Elevation;
///
/// let parsed = exclude_elevation("6gkzwgjz#87")?;
/// assert_eq!(parsed.cell_id, "6gkzwgjz");
/// assert_eq!(parsed.elevation, Elevation::height_in_cm(87));
/// # Ok::<(), unl_core::UnlError>(())
/// ```
pub fn exclude_elevation(raw: &str) -> Result<ParsedCellId> {
    if raw.contains('@') && raw.contains('#') {
        return Err(UnlError::InvalidCellId(format!(
            "{} carries both '@' and '#' elevation markers",
            raw
        )));
    }

    let Some(split) = raw.find(['@', '#']) else {
        return Ok(ParsedCellId::new(
            raw.to_ascii_lowercase(),
            Elevation::default(),
        ));
    };

    let (payload, suffix) = raw.split_at(split);
    let mut chars = suffix.chars();
    let kind = chars
        .next()
        .and_then(ElevationType::from_marker)
        .unwrap_or_default();
    let digits = chars.as_str();
    let value = digits.parse::<i64>().map_err(|_| {
        UnlError::InvalidCellId(format!("{} has a malformed elevation {:?}", raw, digits))
    })?;

    Ok(ParsedCellId::new(
        payload.to_ascii_lowercase(),
        Elevation::new(value, kind),
    ))
}

/// Attach an elevation suffix; a zero elevation leaves the id untouched.
///
/// # Examples
///
/// ```rust
/// use unl_core::cell::append_elevation;
/// use unl_core::Elevation;
///
/// assert_eq!(append_elevation("6gkzwgjz", Elevation::floor(5)), "6gkzwgjz@5");
/// assert_eq!(append_elevation("6gkzwgjz", Elevation::height_in_cm(-3)), "6gkzwgjz#-3");
/// assert_eq!(append_elevation("6gkzwgjz", Elevation::floor(0)), "6gkzwgjz");
/// ```
pub fn append_elevation(cell_id: &str, elevation: Elevation) -> String {
    if elevation.is_ground() {
        return cell_id.to_string();
    }
    format!("{}{}{}", cell_id, elevation.kind.marker(), elevation.value)
}
