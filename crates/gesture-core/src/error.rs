use thiserror::Error;

/// Errors surfaced by configuration of the gesture layer.
///
/// Runtime input never fails: empty touch lists, large finger counts and
/// hidden markers are all absorbed by the detector and consumer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("scale bounds are inverted: min {min} > max {max}")]
    InvalidScaleBounds { min: f32, max: f32 },
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("minimum scale must be positive, got {min}")]
    NonPositiveScale { min: f32 },
    #[error("malformed property segment `{segment}` (expected `key: value`)")]
    MalformedProperty { segment: String },
    #[error("unknown property `{key}`")]
    UnknownProperty { key: String },
    #[error("invalid value `{value}` for property `{key}`")]
    InvalidValue { key: String, value: String },
}
