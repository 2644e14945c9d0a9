// Shared interaction tuning constants used by both web and native frontends.

// Rotation
pub const ROTATION_SENSITIVITY: f32 = 0.005; // radians per pixel before rotation_factor
pub const DEFAULT_ROTATION_FACTOR: f32 = 5.0;

// Pinch zoom: fixed step per move event, independent of pinch speed
pub const SCALE_STEP_UP: f32 = 1.05;
pub const SCALE_STEP_DOWN: f32 = 0.95;

// Scale bounds for the full-size viewer
pub const DEFAULT_MIN_SCALE: f32 = 0.01;
pub const DEFAULT_MAX_SCALE: f32 = 3.0;

// Scale bounds for the compact (small model) viewer
pub const COMPACT_MIN_SCALE: f32 = 0.005;
pub const COMPACT_MAX_SCALE: f32 = 0.2;

// Attribute names read by the web frontend
pub const DETECTOR_ATTRIBUTE: &str = "data-gesture-detector";
pub const HANDLER_ATTRIBUTE: &str = "data-gesture-handler";
