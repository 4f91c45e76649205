//! Configuration for clustering and polyhash encoding.
//!
//! Re-exports the value types from the `unl-types` crate for convenience.

use crate::cell::MAX_PRECISION;
use crate::error::{Result, UnlError};
use serde::de::Error;

pub use unl_types::bbox::BoundingBox;
pub use unl_types::elevation::{Elevation, ElevationType, ParsedCellId};
pub use unl_types::point::LatLon;
pub use unl_types::polyhash::PolyhashBlock;

/// Cell precision used when a caller does not supply one.
pub const DEFAULT_PRECISION: usize = 9;

/// What to do with a requested precision outside `1..=MAX_PRECISION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionPolicy {
    /// Fail with `PrecisionOutOfRange` before doing any work
    #[default]
    Reject,
    /// Clamp into range and log a warning
    Clamp,
}

/// Cluster and polyhash configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_precision")]
    pub default_precision: usize,

    #[serde(default)]
    pub precision_policy: PrecisionPolicy,
}

impl Config {
    const fn default_precision() -> usize {
        DEFAULT_PRECISION
    }

    pub fn with_default_precision(mut self, precision: usize) -> Self {
        assert!(
            (1..=MAX_PRECISION).contains(&precision),
            "Default precision must be between 1 and {}",
            MAX_PRECISION
        );
        self.default_precision = precision;
        self
    }

    pub fn with_precision_policy(mut self, policy: PrecisionPolicy) -> Self {
        self.precision_policy = policy;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(1..=MAX_PRECISION).contains(&self.default_precision) {
            return Err(format!(
                "Default precision must be between 1 and {}, got {}",
                MAX_PRECISION, self.default_precision
            ));
        }
        Ok(())
    }

    /// Apply the precision policy to a caller-supplied precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use unl_core::config::{Config, PrecisionPolicy};
    ///
    /// let strict = Config::default();
    /// assert!(strict.resolve_precision(19).is_err());
    ///
    /// let lenient = Config::default().with_precision_policy(PrecisionPolicy::Clamp);
    /// assert_eq!(lenient.resolve_precision(19).unwrap(), 16);
    /// ```
    pub fn resolve_precision(&self, precision: usize) -> Result<usize> {
        if (1..=MAX_PRECISION).contains(&precision) {
            return Ok(precision);
        }
        match self.precision_policy {
            PrecisionPolicy::Reject => Err(UnlError::PrecisionOutOfRange {
                precision,
                max: MAX_PRECISION,
            }),
            PrecisionPolicy::Clamp => {
                let clamped = precision.clamp(1, MAX_PRECISION);
                log::warn!(
                    "Precision {} out of range, clamping to {}",
                    precision,
                    clamped
                );
                Ok(clamped)
            }
        }
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Load a configuration file, picking the parser from the extension.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UnlError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&text).map_err(|e| UnlError::Config(e.to_string())),
            _ => Self::from_json(&text).map_err(|e| UnlError::Config(e.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_precision: Self::default_precision(),
            precision_policy: PrecisionPolicy::default(),
        }
    }
}
