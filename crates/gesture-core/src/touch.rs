//! Raw touch input and the per-event samples derived from it.
//!
//! A [`TouchSample`] summarizes one raw event: how many fingers are down,
//! where their centroid is and, for two or more fingers, how far apart the
//! first two are. Samples never change after construction; the detector
//! replaces the stored sample on every event.

use glam::Vec2;
use instant::Instant;
use smallvec::SmallVec;
use std::fmt;

/// Contact list for one raw event, in stream order.
pub type Contacts = SmallVec<[Vec2; 4]>;

/// Which platform notification produced a raw event.
///
/// Informational only: the detector looks at the contact list, not the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Begin,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawTouchEvent {
    pub phase: TouchPhase,
    pub contacts: Contacts,
}

impl RawTouchEvent {
    pub fn new(phase: TouchPhase, contacts: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            phase,
            contacts: contacts.into_iter().collect(),
        }
    }
}

/// Finger-count classification used to tag gesture events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FingerBucket {
    One,
    Two,
    Three,
    Many,
}

impl FingerBucket {
    /// `None` for zero contacts, `Many` for four or more.
    pub fn from_count(touch_count: usize) -> Option<Self> {
        match touch_count {
            0 => None,
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => Some(Self::Many),
        }
    }

    /// Lowercase prefix used by the legacy event names (`"two"` in `twofingermove`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Many => "many",
        }
    }
}

impl fmt::Display for FingerBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TouchSample {
    pub touch_count: usize,
    bucket: FingerBucket,
    /// Centroid of all contacts.
    pub position: Vec2,
    /// Distance between the first two contacts; `None` below two fingers.
    pub spread: Option<f32>,
    pub start_time: Option<Instant>,
    pub start_position: Option<Vec2>,
    pub start_spread: Option<f32>,
}

impl TouchSample {
    /// Build a sample from the contacts of one raw event.
    ///
    /// Returns `None` when no contacts are active: an empty list means the
    /// absence of a gesture, not a sample.
    pub fn from_contacts(contacts: &[Vec2]) -> Option<Self> {
        let bucket = FingerBucket::from_count(contacts.len())?;
        Some(Self {
            touch_count: contacts.len(),
            bucket,
            position: centroid(contacts),
            spread: spread(contacts),
            start_time: None,
            start_position: None,
            start_spread: None,
        })
    }

    pub fn bucket(&self) -> FingerBucket {
        self.bucket
    }

    /// Stamp the start fields from this sample itself.
    pub(crate) fn mark_started(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.start_position = Some(self.position);
        self.start_spread = self.spread;
    }

    /// Inherit the start fields of the gesture this sample continues.
    pub(crate) fn continue_from(&mut self, previous: &TouchSample) {
        self.start_time = previous.start_time;
        self.start_position = previous.start_position;
        self.start_spread = previous.start_spread;
    }
}

/// Arithmetic mean of the contact coordinates. Zero for an empty slice.
#[inline]
pub fn centroid(contacts: &[Vec2]) -> Vec2 {
    if contacts.is_empty() {
        return Vec2::ZERO;
    }
    let sum: Vec2 = contacts.iter().copied().sum();
    sum / contacts.len() as f32
}

/// Euclidean distance between the first two contacts in stream order.
#[inline]
pub fn spread(contacts: &[Vec2]) -> Option<f32> {
    match contacts {
        [a, b, ..] => Some(a.distance(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_mapping_folds_large_counts() {
        assert_eq!(FingerBucket::from_count(0), None);
        assert_eq!(FingerBucket::from_count(1), Some(FingerBucket::One));
        assert_eq!(FingerBucket::from_count(3), Some(FingerBucket::Three));
        assert_eq!(FingerBucket::from_count(4), Some(FingerBucket::Many));
        assert_eq!(FingerBucket::from_count(10), Some(FingerBucket::Many));
    }

    #[test]
    fn sample_bucket_is_fixed_by_its_contacts() {
        assert!(TouchSample::from_contacts(&[]).is_none());
        for n in 1..=6 {
            let sample = TouchSample::from_contacts(&vec![Vec2::ZERO; n]).unwrap();
            assert_eq!(Some(sample.bucket()), FingerBucket::from_count(n));
        }
    }

    #[test]
    fn spread_uses_only_first_two_contacts() {
        let contacts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(100.0, 100.0),
        ];
        assert_eq!(spread(&contacts), Some(5.0));
        assert_eq!(spread(&contacts[..1]), None);
    }
}
