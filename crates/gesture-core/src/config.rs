//! Component configuration and its attribute text form.
//!
//! Markup configures the components with property strings such as
//! `"enabled: true; rotationFactor: 5; minScale: 0.01; maxScale: 3"`.
//! Keys that are left out keep their defaults.

use crate::constants::{
    COMPACT_MAX_SCALE, COMPACT_MIN_SCALE, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE,
    DEFAULT_ROTATION_FACTOR,
};
use crate::error::GestureError;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct ConsumerConfig {
    pub enabled: bool,
    pub rotation_factor: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_factor: DEFAULT_ROTATION_FACTOR,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl ConsumerConfig {
    /// Bounds suited to small models placed on a printed marker.
    pub fn compact() -> Self {
        Self {
            min_scale: COMPACT_MIN_SCALE,
            max_scale: COMPACT_MAX_SCALE,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GestureError> {
        for (field, value) in [
            ("rotationFactor", self.rotation_factor),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
        ] {
            if !value.is_finite() {
                return Err(GestureError::NonFinite { field });
            }
        }
        if self.min_scale <= 0.0 {
            return Err(GestureError::NonPositiveScale {
                min: self.min_scale,
            });
        }
        if self.min_scale > self.max_scale {
            return Err(GestureError::InvalidScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }
}

impl FromStr for ConsumerConfig {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        for (key, value) in parse_properties(s)? {
            match key {
                "enabled" => config.enabled = parse_value(key, value)?,
                "rotationFactor" => config.rotation_factor = parse_value(key, value)?,
                "minScale" => config.min_scale = parse_value(key, value)?,
                "maxScale" => config.max_scale = parse_value(key, value)?,
                _ => {
                    return Err(GestureError::UnknownProperty {
                        key: key.to_string(),
                    })
                }
            }
        }
        config.validate()?;
        Ok(config)
    }
}

/// Where the detector listens for raw touches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectorConfig {
    /// CSS selector of the touch target; the owning element when `None`.
    pub element: Option<String>,
}

impl FromStr for DetectorConfig {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        for (key, value) in parse_properties(s)? {
            match key {
                "element" => {
                    config.element = Some(value.to_string()).filter(|v| !v.is_empty());
                }
                _ => {
                    return Err(GestureError::UnknownProperty {
                        key: key.to_string(),
                    })
                }
            }
        }
        Ok(config)
    }
}

/// Split `"a: 1; b: 2"` into trimmed `(key, value)` pairs.
///
/// Empty segments are skipped. Only the first `:` separates key from value,
/// so selectors like `a:hover` survive in values.
pub fn parse_properties(s: &str) -> Result<Vec<(&str, &str)>, GestureError> {
    s.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let malformed = || GestureError::MalformedProperty {
                segment: segment.to_string(),
            };
            let (key, value) = segment.split_once(':').ok_or_else(malformed)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(malformed());
            }
            Ok((key, value.trim()))
        })
        .collect()
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, GestureError> {
    value.parse().map_err(|_| GestureError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
