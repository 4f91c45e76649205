use serde::{Deserialize, Serialize};

/// How an elevation suffix is interpreted.
///
/// The kind decides the marker character used in a cell id suffix:
/// `@` for floors and `#` for heights in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElevationType {
    /// Building floor number (`@` marker)
    #[default]
    #[serde(rename = "floor")]
    Floor,
    /// Height above ground in centimetres (`#` marker)
    #[serde(rename = "heightincm")]
    HeightInCm,
}

impl ElevationType {
    /// The suffix marker for this kind.
    pub const fn marker(self) -> char {
        match self {
            ElevationType::Floor => '@',
            ElevationType::HeightInCm => '#',
        }
    }

    /// Resolve a suffix marker back to its kind.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '@' => Some(ElevationType::Floor),
            '#' => Some(ElevationType::HeightInCm),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ElevationType::Floor => "floor",
            ElevationType::HeightInCm => "heightincm",
        }
    }
}

/// An elevation tag carried alongside a cell.
///
/// A zero value means "no elevation" and never produces a suffix.
///
/// # Examples
///
/// ```
/// use unl_types::elevation::{Elevation, ElevationType};
///
/// let third_floor = Elevation::floor(3);
/// assert_eq!(third_floor.kind, ElevationType::Floor);
/// assert!(!third_floor.is_ground());
/// assert!(Elevation::default().is_ground());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Elevation {
    pub value: i64,
    pub kind: ElevationType,
}

impl Elevation {
    pub fn new(value: i64, kind: ElevationType) -> Self {
        Self { value, kind }
    }

    pub fn floor(value: i64) -> Self {
        Self::new(value, ElevationType::Floor)
    }

    pub fn height_in_cm(value: i64) -> Self {
        Self::new(value, ElevationType::HeightInCm)
    }

    /// True when no suffix would be written for this elevation.
    pub fn is_ground(&self) -> bool {
        self.value == 0
    }
}

/// A cell id split into its alphabetic payload and elevation tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedCellId {
    pub cell_id: String,
    pub elevation: Elevation,
}

impl ParsedCellId {
    pub fn new(cell_id: impl Into<String>, elevation: Elevation) -> Self {
        Self {
            cell_id: cell_id.into(),
            elevation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(ElevationType::Floor.marker(), '@');
        assert_eq!(ElevationType::HeightInCm.marker(), '#');
        assert_eq!(ElevationType::from_marker('#'), Some(ElevationType::HeightInCm));
        assert_eq!(ElevationType::from_marker('!'), None);
    }

    #[test]
    fn test_elevation_type_serde_names() {
        let json = serde_json::to_string(&ElevationType::HeightInCm).unwrap();
        assert_eq!(json, "\"heightincm\"");
        let kind: ElevationType = serde_json::from_str("\"floor\"").unwrap();
        assert_eq!(kind, ElevationType::Floor);
    }

    #[test]
    fn test_default_is_ground_floor() {
        let e = Elevation::default();
        assert_eq!(e.value, 0);
        assert_eq!(e.kind, ElevationType::Floor);
        assert!(e.is_ground());
    }
}
