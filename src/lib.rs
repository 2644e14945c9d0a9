#![cfg(target_arch = "wasm32")]
use gesture_core::{
    ConsumerConfig, DetectorConfig, GestureBus, GestureConsumer, GestureDetector, GestureFilter,
    GestureKind, SharedTransform, Subscription, TransformState, DETECTOR_ATTRIBUTE,
    HANDLER_ATTRIBUTE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod events;
mod roles;
mod transform_text;

use roles::{Host, Roles};
use transform_text::WriteBack;

/// One manipulated element: its transform and the listener that writes it back.
struct ModelBinding {
    _transform: SharedTransform,
    _writer: Subscription,
}

impl ModelBinding {
    /// Call after the element's consumer subscribed, so moves are written
    /// once the consumer has applied them.
    fn bind(bus: &GestureBus, element: web::HtmlElement, transform: SharedTransform) -> Self {
        let mode = WriteBack::for_tag(&element.tag_name());
        write_transform(&element, mode, &transform.borrow());
        let writer = {
            let transform = transform.clone();
            bus.subscribe(
                GestureFilter {
                    kind: Some(GestureKind::Move),
                    bucket: None,
                },
                move |_| write_transform(&element, mode, &transform.borrow()),
            )
        };
        Self {
            _transform: transform,
            _writer: writer,
        }
    }
}

/// Starting transform of a handler element, as its renderer currently has it.
fn initial_transform(element: &web::HtmlElement) -> TransformState {
    match WriteBack::for_tag(&element.tag_name()) {
        WriteBack::Entity => transform_text::entity_transform(
            element.get_attribute("rotation").as_deref(),
            element.get_attribute("scale").as_deref(),
        ),
        WriteBack::Css => TransformState::default(),
    }
}

fn write_transform(element: &web::HtmlElement, mode: WriteBack, state: &TransformState) {
    let result = match mode {
        WriteBack::Entity => element
            .set_attribute("rotation", &transform_text::rotation_attribute(state))
            .and_then(|_| element.set_attribute("scale", &transform_text::scale_attribute(state))),
        WriteBack::Css => element
            .style()
            .set_property("transform", &transform_text::css_matrix3d(state)),
    };
    if let Err(e) = result {
        log::warn!("[render] write {:?} transform: {:?}", mode, e);
    }
}

/// Everything alive while gestures are attached. Dropping it detaches.
struct GestureApp {
    // field order is drop order: listeners go first
    _touch: events::TouchAttachment,
    _markers: events::MarkerListeners,
    _models: Vec<ModelBinding>,
    _consumers: Rc<RefCell<Vec<GestureConsumer>>>,
}

thread_local! {
    static APP: RefCell<Option<GestureApp>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ar-gesture-web starting");

    match init() {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => log::error!("init error: {:?}", e),
    }
    Ok(())
}

/// Remove every listener and release the transforms.
#[wasm_bindgen]
pub fn stop() {
    if APP.with(|slot| slot.borrow_mut().take()).is_some() {
        log::info!("ar-gesture-web stopped");
    }
}

fn init() -> anyhow::Result<GestureApp> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let detector_el = dom::elements_with_attribute(&document, DETECTOR_ATTRIBUTE)?
        .into_iter()
        .next();
    let scene = document
        .query_selector("a-scene")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let roles = Roles::resolve(detector_el.is_some(), scene.is_some());

    let host = |host: Host| -> Option<web::EventTarget> {
        match host {
            Host::Detector => detector_el.clone().map(Into::into),
            Host::Scene => scene.clone().map(Into::into),
            Host::Body => document.body().map(Into::into),
            Host::Document => Some(document.clone().into()),
        }
    };
    let owner: web::Element = host(roles.owner)
        .and_then(|t| t.dyn_into().ok())
        .ok_or_else(|| anyhow::anyhow!("no {:?} element for the detector", roles.owner))?;
    let marker_source = host(roles.markers)
        .ok_or_else(|| anyhow::anyhow!("no {:?} for marker events", roles.markers))?;
    log::debug!("[init] {:?}", roles);

    let detector_config: DetectorConfig = dom::read_config(&owner, DETECTOR_ATTRIBUTE);
    let target = dom::resolve_target(&document, detector_config.element.as_deref(), &owner);

    let bus = GestureBus::new();
    let detector = Rc::new(RefCell::new(GestureDetector::new(bus.clone())));

    let consumers = Rc::new(RefCell::new(Vec::new()));
    let mut models = Vec::new();
    for element in dom::elements_with_attribute(&document, HANDLER_ATTRIBUTE)? {
        let config: ConsumerConfig = dom::read_config(&element, HANDLER_ATTRIBUTE);
        let transform = initial_transform(&element).shared();
        let consumer = GestureConsumer::new(bus.clone(), transform.clone(), config)?;
        consumers.borrow_mut().push(consumer);
        models.push(ModelBinding::bind(&bus, element, transform));
    }
    if models.is_empty() {
        log::warn!("[init] no [{HANDLER_ATTRIBUTE}] elements; gestures have nothing to move");
    }

    let touch = events::TouchAttachment::attach(&target, detector)?;
    let markers = events::MarkerListeners::wire(&marker_source, consumers.clone())?;
    log::info!("[init] {} gesture handler(s) ready", models.len());

    Ok(GestureApp {
        _touch: touch,
        _markers: markers,
        _models: models,
        _consumers: consumers,
    })
}
