use crate::dom::{self, EventListener};
use gesture_core::{GestureDetector, RawTouchEvent, TouchPhase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const TOUCH_EVENTS: [(&str, TouchPhase); 4] = [
    ("touchstart", TouchPhase::Begin),
    ("touchmove", TouchPhase::Move),
    ("touchend", TouchPhase::End),
    ("touchcancel", TouchPhase::Cancel),
];

/// Raw touch listeners feeding one detector.
///
/// Dropping the attachment removes every listener from the target and
/// forgets any gesture in progress.
pub struct TouchAttachment {
    detector: Rc<RefCell<GestureDetector>>,
    _listeners: Vec<EventListener>,
}

impl TouchAttachment {
    pub fn attach(
        target: &web::Element,
        detector: Rc<RefCell<GestureDetector>>,
    ) -> anyhow::Result<Self> {
        let listeners = TOUCH_EVENTS
            .iter()
            .map(|&(name, phase)| {
                let detector = detector.clone();
                EventListener::new(target, name, move |ev: web::Event| {
                    let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
                        return;
                    };
                    let raw = RawTouchEvent {
                        phase,
                        contacts: dom::touch_contacts(ev),
                    };
                    detector.borrow_mut().handle(&raw);
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!(
            "[touch] attached to <{}>",
            target.tag_name().to_ascii_lowercase()
        );
        Ok(Self {
            detector,
            _listeners: listeners,
        })
    }
}

impl Drop for TouchAttachment {
    fn drop(&mut self) {
        self.detector.borrow_mut().reset();
        log::info!("[touch] detached");
    }
}
