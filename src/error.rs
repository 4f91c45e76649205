//! Error types for cell codecs, clustering and polyhash compression.

use thiserror::Error;

/// Errors surfaced by every fallible operation in this crate.
///
/// All of them are terminal for the call that produced them: no operation
/// returns partial results alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnlError {
    /// Latitude/longitude not finite or outside the WGS84 domain
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinate(String),

    /// Cell id with a symbol outside the alphabet, a malformed elevation
    /// suffix, or an empty payload
    #[error("Invalid cell id: {0}")]
    InvalidCellId(String),

    /// Direction other than n, s, e or w
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("Precision {precision} out of range, supported range is 1..={max}")]
    PrecisionOutOfRange { precision: usize, max: usize },

    /// Malformed polygon, GeoJSON or polyhash input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed compressed polyhash stream
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, UnlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = UnlError::PrecisionOutOfRange {
            precision: 19,
            max: 16,
        };
        assert_eq!(
            err.to_string(),
            "Precision 19 out of range, supported range is 1..=16"
        );
        assert_eq!(
            UnlError::InvalidDirection("q".into()).to_string(),
            "Invalid direction: q"
        );
    }
}
