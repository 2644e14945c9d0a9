use crate::touch::{FingerBucket, TouchSample};
use glam::Vec2;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Start,
    Move,
    End,
}

impl GestureKind {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
        }
    }
}

/// Change between two consecutive samples of the same gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureDelta {
    pub position_change: Vec2,
    /// `None` for one-finger gestures, which have no spread.
    pub spread_change: Option<f32>,
    pub start_spread: Option<f32>,
    pub position: Vec2,
    pub spread: Option<f32>,
}

impl GestureDelta {
    pub fn between(previous: &TouchSample, current: &TouchSample) -> Self {
        let spread_change = match (current.spread, previous.spread) {
            (Some(now), Some(before)) => Some(now - before),
            _ => None,
        };
        Self {
            position_change: current.position - previous.position,
            spread_change,
            start_spread: current.start_spread,
            position: current.position,
            spread: current.spread,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    Start {
        bucket: FingerBucket,
        sample: TouchSample,
    },
    Move {
        bucket: FingerBucket,
        delta: GestureDelta,
    },
    End {
        bucket: FingerBucket,
        sample: TouchSample,
    },
}

impl GestureEvent {
    #[inline]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Start { .. } => GestureKind::Start,
            Self::Move { .. } => GestureKind::Move,
            Self::End { .. } => GestureKind::End,
        }
    }

    #[inline]
    pub fn bucket(&self) -> FingerBucket {
        match self {
            Self::Start { bucket, .. } | Self::Move { bucket, .. } | Self::End { bucket, .. } => {
                *bucket
            }
        }
    }

    /// Legacy event name, e.g. `onefingermove` or `manyfingerend`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}finger{}", self.bucket().prefix(), self.kind().suffix())
    }
}
