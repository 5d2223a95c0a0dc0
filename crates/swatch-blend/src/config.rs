//! Engine tuning, loadable from TOML.
//!
//! Defaults reproduce the calibrated behavior; a config file only needs the
//! keys it overrides:
//!
//! ```toml
//! k = 7
//! multiply_floor = 0.85
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants for [`BlendInferenceEngine`](crate::BlendInferenceEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Neighbors aggregated by k-NN when a request does not say.
    pub k: usize,
    /// Samples fetched per retrieval tier.
    pub tier_limit: usize,
    /// Weight on the raw hue difference.
    pub hue_weight: f64,
    /// Weight on the chroma difference.
    pub chroma_weight: f64,
    /// Lightness weight when the sample is lighter than the target.
    pub lighter_weight: f64,
    /// Lightness weight otherwise.
    pub darker_weight: f64,
    /// Minimum opacity for an aggregated multiply guess.
    pub multiply_floor: f64,
    /// Targets darker than this L* are exempt from the multiply floor.
    pub multiply_floor_min_lightness: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k: 5,
            tier_limit: 500,
            hue_weight: 0.3,
            chroma_weight: 0.3,
            lighter_weight: 3.0,
            darker_weight: 2.7,
            multiply_floor: 0.9,
            multiply_floor_min_lightness: 20.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            return Err(invalid("k", "must be at least 1"));
        }
        if self.tier_limit == 0 {
            return Err(invalid("tier_limit", "must be at least 1"));
        }
        for (field, value) in [
            ("hue_weight", self.hue_weight),
            ("chroma_weight", self.chroma_weight),
            ("lighter_weight", self.lighter_weight),
            ("darker_weight", self.darker_weight),
            ("multiply_floor_min_lightness", self.multiply_floor_min_lightness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and >= 0, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.multiply_floor) {
            return Err(invalid(
                "multiply_floor",
                format!("must be within [0, 1], got {}", self.multiply_floor),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        message: message.into(),
    }
}
