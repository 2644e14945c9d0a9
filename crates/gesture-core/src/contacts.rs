//! Per-contact touch notifications to whole-list raw events.
//!
//! Browsers hand over the full list of active touches with every event.
//! Windowing systems such as winit report one contact at a time instead, so
//! this tracker keeps the active set and rebuilds the list after each update.

use crate::touch::{Contacts, RawTouchEvent, TouchPhase};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Debug, Default)]
pub struct ContactTracker {
    // (platform id, position), oldest contact first
    active: SmallVec<[(u64, Vec2); 4]>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one contact update and return the resulting raw event.
    ///
    /// Begin adds the contact (or moves it if the id is already known), Move
    /// updates its position, End and Cancel remove it. A move for an unknown
    /// id is treated as a begin, since the platform may have dropped it.
    pub fn update(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> RawTouchEvent {
        let slot = self.active.iter().position(|(known, _)| *known == id);
        match (phase, slot) {
            (TouchPhase::Begin | TouchPhase::Move, Some(i)) => self.active[i].1 = position,
            (TouchPhase::Begin | TouchPhase::Move, None) => self.active.push((id, position)),
            (TouchPhase::End | TouchPhase::Cancel, Some(i)) => {
                self.active.remove(i);
            }
            (TouchPhase::End | TouchPhase::Cancel, None) => {
                log::trace!("[contacts] {:?} for unknown contact {}", phase, id);
            }
        }
        RawTouchEvent {
            phase,
            contacts: self.contacts(),
        }
    }

    pub fn contacts(&self) -> Contacts {
        self.active.iter().map(|(_, p)| *p).collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop every contact, e.g. when the window loses focus.
    pub fn clear(&mut self) -> RawTouchEvent {
        self.active.clear();
        RawTouchEvent {
            phase: TouchPhase::Cancel,
            contacts: Contacts::new(),
        }
    }
}
