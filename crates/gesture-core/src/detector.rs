//! Raw touch stream to semantic gesture events.
//!
//! The detector compares each raw event with the one before it. A change in
//! finger count ends the running gesture and starts a new one within the
//! same step (end first, then start); an unchanged count is a move. The only
//! state kept is the previous sample.

use crate::bus::GestureBus;
use crate::event::{GestureDelta, GestureEvent};
use crate::touch::{RawTouchEvent, TouchSample};
use glam::Vec2;
use instant::Instant;
use smallvec::SmallVec;

/// Events produced by one raw event: at most an end plus a start, or one move.
pub type GestureStep = SmallVec<[GestureEvent; 2]>;

pub struct GestureDetector {
    bus: GestureBus,
    previous: Option<TouchSample>,
}

impl GestureDetector {
    pub fn new(bus: GestureBus) -> Self {
        Self {
            bus,
            previous: None,
        }
    }

    /// The sample of the gesture currently in progress, if any.
    pub fn in_progress(&self) -> Option<&TouchSample> {
        self.previous.as_ref()
    }

    /// Sample a raw event and publish the resulting gesture events.
    pub fn handle(&mut self, raw: &RawTouchEvent) {
        let step = self.sample(&raw.contacts);
        if step.is_empty() {
            log::trace!("[gesture] {:?} with no gesture change", raw.phase);
        }
        for event in &step {
            self.bus.publish(event);
        }
    }

    pub fn sample(&mut self, contacts: &[Vec2]) -> GestureStep {
        self.sample_at(contacts, Instant::now())
    }

    /// Advance the state machine by one raw event observed at `now`.
    pub fn sample_at(&mut self, contacts: &[Vec2], now: Instant) -> GestureStep {
        let mut step = GestureStep::new();
        let mut current = TouchSample::from_contacts(contacts);

        let continues = matches!(
            (&self.previous, &current),
            (Some(prev), Some(cur)) if prev.touch_count == cur.touch_count
        );

        if !continues {
            if let Some(prev) = self.previous.take() {
                log::debug!(
                    "[gesture] {}fingerend at ({:.1},{:.1})",
                    prev.bucket(),
                    prev.position.x,
                    prev.position.y
                );
                step.push(GestureEvent::End {
                    bucket: prev.bucket(),
                    sample: prev,
                });
            }
            if let Some(mut cur) = current.take() {
                cur.mark_started(now);
                log::debug!(
                    "[gesture] {}fingerstart touches={} spread={:?}",
                    cur.bucket(),
                    cur.touch_count,
                    cur.spread
                );
                step.push(GestureEvent::Start {
                    bucket: cur.bucket(),
                    sample: cur.clone(),
                });
                self.previous = Some(cur);
            }
            return step;
        }

        if let (Some(prev), Some(mut cur)) = (self.previous.take(), current) {
            cur.continue_from(&prev);
            let delta = GestureDelta::between(&prev, &cur);
            log::trace!(
                "[gesture] {}fingermove d=({:.2},{:.2}) dspread={:?}",
                cur.bucket(),
                delta.position_change.x,
                delta.position_change.y,
                delta.spread_change
            );
            step.push(GestureEvent::Move {
                bucket: cur.bucket(),
                delta,
            });
            self.previous = Some(cur);
        }
        step
    }

    /// Forget the gesture in progress without emitting an end.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GestureKind;
    use crate::touch::FingerBucket;

    fn kinds(step: &GestureStep) -> Vec<(GestureKind, FingerBucket)> {
        step.iter().map(|e| (e.kind(), e.bucket())).collect()
    }

    #[test]
    fn empty_event_without_gesture_emits_nothing() {
        let mut det = GestureDetector::new(GestureBus::new());
        assert!(det.sample(&[]).is_empty());
        assert!(det.in_progress().is_none());
    }

    #[test]
    fn finger_count_change_ends_then_starts() {
        let mut det = GestureDetector::new(GestureBus::new());
        det.sample(&[Vec2::new(1.0, 1.0)]);
        let step = det.sample(&[Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0)]);
        assert_eq!(
            kinds(&step),
            vec![
                (GestureKind::End, FingerBucket::One),
                (GestureKind::Start, FingerBucket::Two)
            ]
        );
        assert_eq!(det.in_progress().map(|s| s.touch_count), Some(2));
    }

    #[test]
    fn reset_drops_state_silently() {
        let mut det = GestureDetector::new(GestureBus::new());
        det.sample(&[Vec2::ZERO]);
        det.reset();
        assert!(det.sample(&[]).is_empty());
    }
}
