pub mod bus;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod contacts;
pub mod detector;
pub mod error;
pub mod event;
pub mod state;
pub mod touch;

pub use bus::{GestureBus, GestureFilter, Subscription};
pub use config::{parse_properties, ConsumerConfig, DetectorConfig};
pub use constants::*;
pub use consumer::{scale_multiplier, GestureConsumer, MarkerEvent};
pub use contacts::ContactTracker;
pub use detector::{GestureDetector, GestureStep};
pub use error::GestureError;
pub use event::{GestureDelta, GestureEvent, GestureKind};
pub use state::{SharedTransform, TransformState, TransformUniform};
pub use touch::{centroid, spread, Contacts, FingerBucket, RawTouchEvent, TouchPhase, TouchSample};
