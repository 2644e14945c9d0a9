use winit::{event::*, event_loop::EventLoop, keyboard::Key, window::WindowBuilder};

use gesture_core::{
    ConsumerConfig, ContactTracker, GestureBus, GestureConsumer, GestureDetector, MarkerEvent,
    RawTouchEvent, SharedTransform, TouchPhase, TransformState,
};
use glam::Vec2;

// Mouse stands in for one extra contact so the harness works without a touchscreen.
const MOUSE_CONTACT_ID: u64 = u64::MAX;
// Half distance of the synthetic pinch produced by the scroll wheel, in pixels.
const WHEEL_PINCH_HALF_SPREAD: f32 = 60.0;
const WHEEL_PINCH_STEP: f32 = 8.0;

struct Harness {
    tracker: ContactTracker,
    detector: GestureDetector,
    consumer: GestureConsumer,
    transform: SharedTransform,
    cursor: Vec2,
    mouse_down: bool,
    compact: bool,
}

impl Harness {
    fn new() -> anyhow::Result<Self> {
        let bus = GestureBus::new();
        let transform = TransformState::with_uniform_scale(0.1).shared();
        let consumer =
            GestureConsumer::new(bus.clone(), transform.clone(), ConsumerConfig::compact())?;
        Ok(Self {
            tracker: ContactTracker::new(),
            detector: GestureDetector::new(bus),
            consumer,
            transform,
            cursor: Vec2::ZERO,
            mouse_down: false,
            compact: true,
        })
    }

    fn feed(&mut self, raw: RawTouchEvent) {
        self.detector.handle(&raw);
        if raw.phase != TouchPhase::Move {
            self.report();
        }
    }

    fn touch(&mut self, touch: Touch) {
        let phase = match touch.phase {
            winit::event::TouchPhase::Started => TouchPhase::Begin,
            winit::event::TouchPhase::Moved => TouchPhase::Move,
            winit::event::TouchPhase::Ended => TouchPhase::End,
            winit::event::TouchPhase::Cancelled => TouchPhase::Cancel,
        };
        let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        let raw = self.tracker.update(touch.id, phase, pos);
        self.feed(raw);
    }

    fn cursor_moved(&mut self, pos: Vec2) {
        self.cursor = pos;
        if self.mouse_down {
            let raw = self.tracker.update(MOUSE_CONTACT_ID, TouchPhase::Move, pos);
            self.feed(raw);
        }
    }

    fn mouse_button(&mut self, pressed: bool) {
        if pressed == self.mouse_down {
            return;
        }
        self.mouse_down = pressed;
        let phase = if pressed {
            TouchPhase::Begin
        } else {
            TouchPhase::End
        };
        let raw = self.tracker.update(MOUSE_CONTACT_ID, phase, self.cursor);
        self.feed(raw);
    }

    /// Replay a wheel notch as a short two-finger pinch around the cursor.
    fn wheel(&mut self, lines: f32) {
        if !self.tracker.is_empty() || lines == 0.0 {
            return;
        }
        let half = WHEEL_PINCH_HALF_SPREAD;
        let next = half + WHEEL_PINCH_STEP * lines.signum();
        let pair = |h: f32| [self.cursor - Vec2::new(h, 0.0), self.cursor + Vec2::new(h, 0.0)];
        let (from, to) = (pair(half), pair(next));
        self.detector.handle(&RawTouchEvent::new(TouchPhase::Begin, from));
        self.detector.handle(&RawTouchEvent::new(TouchPhase::Move, to));
        self.detector.handle(&RawTouchEvent::new(TouchPhase::End, [Vec2::ZERO; 0]));
        self.report();
    }

    fn key(&mut self, key: Key<&str>) {
        match key {
            Key::Character("m") | Key::Character("M") => {
                let event = if self.consumer.is_visible() {
                    MarkerEvent::Lost
                } else {
                    MarkerEvent::Found
                };
                self.consumer.on_marker(event);
            }
            Key::Character("e") | Key::Character("E") => {
                let mut config = self.consumer.config();
                config.enabled = !config.enabled;
                self.reconfigure(config);
            }
            Key::Character("c") | Key::Character("C") => {
                self.compact = !self.compact;
                let enabled = self.consumer.config().enabled;
                let preset = if self.compact {
                    ConsumerConfig::compact()
                } else {
                    ConsumerConfig::default()
                };
                self.reconfigure(ConsumerConfig { enabled, ..preset });
            }
            Key::Character("r") | Key::Character("R") => {
                *self.transform.borrow_mut() = TransformState::with_uniform_scale(0.1);
                log::info!("[keys] transform reset");
            }
            _ => return,
        }
        self.report();
    }

    fn reconfigure(&mut self, config: ConsumerConfig) {
        if let Err(e) = self.consumer.configure(config) {
            log::error!("[keys] configure rejected: {e}");
        }
    }

    fn focus_lost(&mut self) {
        self.mouse_down = false;
        let raw = self.tracker.clear();
        self.feed(raw);
    }

    fn report(&self) {
        let t = self.transform.borrow();
        let config = self.consumer.config();
        log::info!(
            "[state] visible={} enabled={} bounds=[{}, {}] yaw={:.3} pitch={:.3} scale={:.4}",
            self.consumer.is_visible(),
            config.enabled,
            config.min_scale,
            config.max_scale,
            t.rotation.y,
            t.rotation.x,
            t.scale.x
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut harness = Harness::new()?;
    log::info!("keys: m = marker found/lost, e = enable/disable, c = compact/full bounds, r = reset");
    log::info!("drag with one finger or the mouse to rotate; pinch or scroll to zoom");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("AR gesture harness (native)")
        .build(&event_loop)?;
    log::info!("window {:?} ready", window.id());

    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Touch(touch) => harness.touch(touch),
            WindowEvent::CursorMoved { position, .. } => {
                harness.cursor_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => harness.mouse_button(state == ElementState::Pressed),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                harness.wheel(lines);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                harness.key(event.logical_key.as_ref())
            }
            WindowEvent::Focused(false) => harness.focus_lost(),
            _ => {}
        }
    })?;
    Ok(())
}
