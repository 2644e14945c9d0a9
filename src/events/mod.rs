pub mod marker;
pub mod touch;

pub use marker::MarkerListeners;
pub use touch::TouchAttachment;
