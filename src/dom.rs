use gesture_core::{Contacts, GestureError};
use glam::Vec2;
use std::str::FromStr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// A DOM listener that is removed again when this value is dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(
                event,
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
            )
            .map_err(|e| anyhow::anyhow!("add {event} listener: {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let callback = self.closure.as_ref().unchecked_ref::<js_sys::Function>();
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, callback)
        {
            log::warn!("[dom] removing {} listener failed: {:?}", self.event, e);
        }
    }
}

/// Resolve the element named by `selector`, falling back to `owner`.
///
/// Missing, invalid or unmatched selectors never fail: the owner is the
/// default touch target.
pub fn resolve_target(
    document: &web::Document,
    selector: Option<&str>,
    owner: &web::Element,
) -> web::Element {
    let Some(selector) = selector.filter(|s| !s.trim().is_empty()) else {
        return owner.clone();
    };
    match document.query_selector(selector) {
        Ok(Some(el)) => el,
        Ok(None) => {
            log::warn!("[dom] no element matches {selector}, using owner");
            owner.clone()
        }
        Err(e) => {
            log::warn!("[dom] invalid selector {selector}: {:?}", e);
            owner.clone()
        }
    }
}

/// Parse a component configuration from `attribute`, using defaults when the
/// attribute is absent or malformed.
pub fn read_config<T>(element: &web::Element, attribute: &str) -> T
where
    T: FromStr<Err = GestureError> + Default,
{
    let Some(text) = element.get_attribute(attribute) else {
        return T::default();
    };
    text.parse().unwrap_or_else(|e: GestureError| {
        log::warn!("[dom] {attribute}=\"{text}\": {e}; using defaults");
        T::default()
    })
}

/// Active touches of an event in list order, in client coordinates.
pub fn touch_contacts(ev: &web::TouchEvent) -> Contacts {
    let touches = ev.touches();
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

/// All elements carrying `attribute`, in document order.
pub fn elements_with_attribute(
    document: &web::Document,
    attribute: &str,
) -> anyhow::Result<Vec<web::HtmlElement>> {
    let nodes = document
        .query_selector_all(&format!("[{attribute}]"))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect())
}
