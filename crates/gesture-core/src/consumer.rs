//! Gesture events to object rotation and scale.
//!
//! One-finger drags rotate the object, two-finger pinches zoom it in fixed
//! 5% steps. Mutations only happen while the tracked marker is visible, so
//! the object cannot drift while its anchor is off-screen.

use crate::bus::{GestureBus, GestureFilter, Subscription};
use crate::config::ConsumerConfig;
use crate::constants::{ROTATION_SENSITIVITY, SCALE_STEP_DOWN, SCALE_STEP_UP};
use crate::error::GestureError;
use crate::event::{GestureEvent, GestureKind};
use crate::state::SharedTransform;
use crate::touch::FingerBucket;
use std::cell::RefCell;
use std::rc::Rc;

/// Notifications from the marker tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerEvent {
    Found,
    Lost,
}

/// Zoom step for one pinch move. Only the sign of the spread change counts.
#[inline]
pub fn scale_multiplier(spread_change: f32) -> f32 {
    if spread_change > 0.0 {
        SCALE_STEP_UP
    } else if spread_change < 0.0 {
        SCALE_STEP_DOWN
    } else {
        1.0
    }
}

struct ConsumerState {
    config: ConsumerConfig,
    visible: bool,
    transform: SharedTransform,
}

impl ConsumerState {
    fn handle_rotation(&self, event: &GestureEvent) {
        let GestureEvent::Move { delta, .. } = event else {
            return;
        };
        if !self.visible {
            return;
        }
        let step = self.config.rotation_factor * ROTATION_SENSITIVITY;
        self.transform
            .borrow_mut()
            .rotate_by(delta.position_change * step);
    }

    fn handle_scale(&self, event: &GestureEvent) {
        let GestureEvent::Move { delta, .. } = event else {
            return;
        };
        if !self.visible {
            return;
        }
        let Some(spread_change) = delta.spread_change else {
            return;
        };
        let multiplier = scale_multiplier(spread_change);
        let mut transform = self.transform.borrow_mut();
        if transform.scale_by(multiplier, self.config.min_scale, self.config.max_scale) {
            log::debug!(
                "[handler] scale clamped to ({:.4},{:.4},{:.4})",
                transform.scale.x,
                transform.scale.y,
                transform.scale.z
            );
        }
    }
}

/// Applies gesture moves from a [`GestureBus`] to a shared transform.
///
/// Listens to one-finger and two-finger moves while enabled. Dropping the
/// consumer (or calling [`dispose`](Self::dispose)) removes both listeners.
pub struct GestureConsumer {
    bus: GestureBus,
    state: Rc<RefCell<ConsumerState>>,
    subscriptions: Option<[Subscription; 2]>,
}

impl GestureConsumer {
    pub fn new(
        bus: GestureBus,
        transform: SharedTransform,
        config: ConsumerConfig,
    ) -> Result<Self, GestureError> {
        config.validate()?;
        let enabled = config.enabled;
        let mut consumer = Self {
            bus,
            state: Rc::new(RefCell::new(ConsumerState {
                config,
                visible: false,
                transform,
            })),
            subscriptions: None,
        };
        consumer.set_subscribed(enabled);
        Ok(consumer)
    }

    /// Replace the configuration. Invalid bounds are rejected and the
    /// previous configuration stays in effect.
    pub fn configure(&mut self, config: ConsumerConfig) -> Result<(), GestureError> {
        config.validate()?;
        let enabled = config.enabled;
        self.state.borrow_mut().config = config;
        self.set_subscribed(enabled);
        Ok(())
    }

    pub fn config(&self) -> ConsumerConfig {
        self.state.borrow().config.clone()
    }

    pub fn on_marker(&self, event: MarkerEvent) {
        let visible = event == MarkerEvent::Found;
        if self.is_visible() != visible {
            log::info!("[handler] marker {:?}", event);
        }
        self.set_visible(visible);
    }

    pub fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Release every subscription held on the bus.
    pub fn dispose(mut self) {
        self.set_subscribed(false);
    }

    fn set_subscribed(&mut self, enabled: bool) {
        match (enabled, self.subscriptions.is_some()) {
            (true, false) => {
                let rotation = {
                    let state = Rc::clone(&self.state);
                    self.bus.subscribe(
                        GestureFilter::exact(GestureKind::Move, FingerBucket::One),
                        move |event| state.borrow().handle_rotation(event),
                    )
                };
                let scale = {
                    let state = Rc::clone(&self.state);
                    self.bus.subscribe(
                        GestureFilter::exact(GestureKind::Move, FingerBucket::Two),
                        move |event| state.borrow().handle_scale(event),
                    )
                };
                self.subscriptions = Some([rotation, scale]);
                log::info!("[handler] listening for rotation and scale gestures");
            }
            (false, true) => {
                self.subscriptions = None;
                log::info!("[handler] stopped listening for gestures");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_depends_only_on_sign() {
        assert_eq!(scale_multiplier(0.001), 1.05);
        assert_eq!(scale_multiplier(250.0), 1.05);
        assert_eq!(scale_multiplier(-0.001), 0.95);
        assert_eq!(scale_multiplier(-250.0), 0.95);
        assert_eq!(scale_multiplier(0.0), 1.0);
    }
}
