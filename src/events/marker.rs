use crate::dom::EventListener;
use gesture_core::{GestureConsumer, MarkerEvent};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// `markerFound` / `markerLost` listeners forwarding to every consumer.
///
/// `source` must be an ancestor of the markers (the scene or the document),
/// since the events are dispatched on the marker and bubble up.
pub struct MarkerListeners {
    _found: EventListener,
    _lost: EventListener,
}

impl MarkerListeners {
    pub fn wire(
        source: &web::EventTarget,
        consumers: Rc<RefCell<Vec<GestureConsumer>>>,
    ) -> anyhow::Result<Self> {
        let forward = |event: MarkerEvent| {
            let consumers = consumers.clone();
            move |_: web::Event| {
                for consumer in consumers.borrow().iter() {
                    consumer.on_marker(event);
                }
            }
        };
        Ok(Self {
            _found: EventListener::new(source, "markerFound", forward(MarkerEvent::Found))?,
            _lost: EventListener::new(source, "markerLost", forward(MarkerEvent::Lost))?,
        })
    }
}
