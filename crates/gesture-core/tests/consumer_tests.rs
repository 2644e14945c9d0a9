// Host-side tests for gesture-driven rotation and scale.

use gesture_core::*;
use glam::{Vec2, Vec3};

struct Rig {
    detector: GestureDetector,
    consumer: GestureConsumer,
    transform: SharedTransform,
}

fn rig(config: ConsumerConfig, initial: TransformState) -> Rig {
    let bus = GestureBus::new();
    let transform = initial.shared();
    let consumer = GestureConsumer::new(bus.clone(), transform.clone(), config).unwrap();
    Rig {
        detector: GestureDetector::new(bus),
        consumer,
        transform,
    }
}

impl Rig {
    fn touch(&mut self, contacts: &[Vec2]) {
        self.detector
            .handle(&RawTouchEvent::new(TouchPhase::Move, contacts.iter().copied()));
    }

    fn pinch(&mut self, from: f32, to: f32) {
        self.touch(&[Vec2::ZERO, Vec2::new(from, 0.0)]);
        self.touch(&[Vec2::ZERO, Vec2::new(to, 0.0)]);
        self.touch(&[]);
    }

    fn scale(&self) -> Vec3 {
        self.transform.borrow().scale
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn one_finger_drag_rotates_yaw_and_pitch() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.on_marker(MarkerEvent::Found);
    r.touch(&[Vec2::new(100.0, 100.0)]);
    r.touch(&[Vec2::new(110.0, 96.0)]);

    let rot = r.transform.borrow().rotation;
    // 10px * factor 5 * 0.005 = 0.25 rad yaw, -4px -> -0.1 rad pitch
    assert!(approx(rot.y, 0.25), "yaw {}", rot.y);
    assert!(approx(rot.x, -0.1), "pitch {}", rot.x);
    assert_eq!(rot.z, 0.0);
    assert_eq!(r.scale(), Vec3::ONE);
}

#[test]
fn rotation_accumulates_without_clamping() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.set_visible(true);
    r.touch(&[Vec2::ZERO]);
    for i in 1..=100 {
        r.touch(&[Vec2::new(i as f32 * 10.0, 0.0)]);
    }
    let yaw = r.transform.borrow().rotation.y;
    assert!(approx(yaw, 25.0), "yaw {yaw}");
}

#[test]
fn pinch_steps_scale_by_five_percent() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.set_visible(true);
    r.pinch(10.0, 20.0);
    assert!(approx(r.scale().x, 1.05));
    // magnitude does not matter
    r.pinch(10.0, 10.5);
    assert!(approx(r.scale().x, 1.05 * 1.05));
    r.pinch(200.0, 10.0);
    assert!(approx(r.scale().x, 1.05 * 1.05 * 0.95));
    let s = r.scale();
    assert!(s.x == s.y && s.y == s.z, "axes diverged: {s:?}");
}

#[test]
fn zero_spread_change_keeps_scale() {
    let mut r = rig(ConsumerConfig::default(), TransformState::with_uniform_scale(0.5));
    r.consumer.set_visible(true);
    r.touch(&[Vec2::ZERO, Vec2::new(10.0, 0.0)]);
    r.touch(&[Vec2::new(5.0, 5.0), Vec2::new(15.0, 5.0)]);
    assert_eq!(r.scale(), Vec3::splat(0.5));
}

#[test]
fn compact_bounds_clamp_exactly_at_max() {
    let mut r = rig(ConsumerConfig::compact(), TransformState::with_uniform_scale(0.19));
    r.consumer.set_visible(true);

    r.pinch(10.0, 20.0);
    assert!(approx(r.scale().x, 0.1995), "scale {}", r.scale().x);

    r.pinch(10.0, 20.0);
    assert_eq!(r.scale(), Vec3::splat(0.2));

    // idempotent at the boundary
    for _ in 0..50 {
        r.pinch(10.0, 20.0);
    }
    assert_eq!(r.scale(), Vec3::splat(0.2));
}

#[test]
fn repeated_shrinking_stops_at_min() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.set_visible(true);
    for _ in 0..500 {
        r.pinch(20.0, 10.0);
    }
    assert_eq!(r.scale(), Vec3::splat(DEFAULT_MIN_SCALE));
}

#[test]
fn hidden_marker_blocks_all_mutation() {
    let initial = TransformState::with_uniform_scale(0.3);
    let mut r = rig(ConsumerConfig::default(), initial.clone());
    assert!(!r.consumer.is_visible());

    r.touch(&[Vec2::ZERO]);
    r.touch(&[Vec2::new(50.0, 50.0)]);
    r.pinch(10.0, 40.0);
    assert_eq!(*r.transform.borrow(), initial);

    r.consumer.on_marker(MarkerEvent::Found);
    r.consumer.on_marker(MarkerEvent::Lost);
    r.pinch(10.0, 40.0);
    assert_eq!(*r.transform.borrow(), initial);
}

#[test]
fn three_and_many_finger_moves_are_ignored() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.set_visible(true);
    let three = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
    r.touch(&three);
    r.touch(&three.map(|p| p * 2.0));
    r.touch(&[Vec2::ZERO; 5]);
    r.touch(&[Vec2::ONE; 5]);
    assert_eq!(*r.transform.borrow(), TransformState::default());
}

#[test]
fn disabling_releases_subscriptions_and_reenabling_restores_them() {
    let bus = GestureBus::new();
    let transform = TransformState::default().shared();
    let mut consumer =
        GestureConsumer::new(bus.clone(), transform.clone(), ConsumerConfig::default()).unwrap();
    assert_eq!(bus.listener_count(), 2);

    // configuring twice while enabled does not subscribe twice
    consumer.configure(ConsumerConfig::default()).unwrap();
    assert_eq!(bus.listener_count(), 2);

    consumer
        .configure(ConsumerConfig {
            enabled: false,
            ..ConsumerConfig::default()
        })
        .unwrap();
    assert!(!consumer.is_subscribed());
    assert!(bus.is_empty());

    consumer.set_visible(true);
    let mut detector = GestureDetector::new(bus.clone());
    detector.handle(&RawTouchEvent::new(TouchPhase::Begin, [Vec2::ZERO]));
    detector.handle(&RawTouchEvent::new(TouchPhase::Move, [Vec2::new(40.0, 0.0)]));
    assert_eq!(*transform.borrow(), TransformState::default());

    consumer.configure(ConsumerConfig::default()).unwrap();
    assert_eq!(bus.listener_count(), 2);
    detector.handle(&RawTouchEvent::new(TouchPhase::Move, [Vec2::new(80.0, 0.0)]));
    assert!(transform.borrow().rotation.y > 0.0);

    consumer.dispose();
    assert!(bus.is_empty());
}

#[test]
fn reconfiguring_while_enabled_applies_each_move_once() {
    let mut r = rig(ConsumerConfig::default(), TransformState::default());
    r.consumer.on_marker(MarkerEvent::Found);
    for max_scale in [2.0, 2.5, 3.0] {
        r.consumer
            .configure(ConsumerConfig {
                max_scale,
                ..ConsumerConfig::default()
            })
            .unwrap();
    }
    assert!(r.consumer.is_subscribed());

    r.touch(&[Vec2::new(0.0, 0.0)]);
    r.touch(&[Vec2::new(20.0, 0.0)]);
    // a single listener: 20px * 5 * 0.005
    assert!(approx(r.transform.borrow().rotation.y, 0.5));

    r.touch(&[]);
    r.pinch(10.0, 30.0);
    assert!(approx(r.scale().x, 1.05), "scale {}", r.scale().x);
}

#[test]
fn dropping_consumer_unsubscribes() {
    let bus = GestureBus::new();
    {
        let _consumer = GestureConsumer::new(
            bus.clone(),
            TransformState::default().shared(),
            ConsumerConfig::compact(),
        )
        .unwrap();
        assert_eq!(bus.listener_count(), 2);
    }
    assert!(bus.is_empty());
}

#[test]
fn invalid_configuration_keeps_previous() {
    let bus = GestureBus::new();
    let mut consumer = GestureConsumer::new(
        bus.clone(),
        TransformState::default().shared(),
        ConsumerConfig::compact(),
    )
    .unwrap();
    let err = consumer
        .configure(ConsumerConfig {
            min_scale: 2.0,
            max_scale: 1.0,
            enabled: false,
            ..ConsumerConfig::default()
        })
        .unwrap_err();
    assert_eq!(err, GestureError::InvalidScaleBounds { min: 2.0, max: 1.0 });
    assert_eq!(consumer.config(), ConsumerConfig::compact());
    assert!(consumer.is_subscribed());

    let bad = ConsumerConfig {
        min_scale: 0.0,
        ..ConsumerConfig::default()
    };
    assert!(GestureConsumer::new(bus, TransformState::default().shared(), bad).is_err());
}

#[test]
fn rotation_factor_scales_rotation() {
    let config = ConsumerConfig {
        rotation_factor: 1.0,
        ..ConsumerConfig::default()
    };
    let mut r = rig(config, TransformState::default());
    r.consumer.set_visible(true);
    r.touch(&[Vec2::ZERO]);
    r.touch(&[Vec2::new(0.0, 20.0)]);
    let rot = r.transform.borrow().rotation;
    assert!(approx(rot.x, 0.1), "pitch {}", rot.x);
    assert_eq!(rot.y, 0.0);
}

#[test]
fn uniform_matches_model_matrix() {
    let mut state = TransformState::with_uniform_scale(2.0);
    state.rotate_by(Vec2::new(0.3, -0.2));
    let uniform = TransformUniform::from(&state);
    assert_eq!(uniform.to_cols_array(), state.model_matrix().to_cols_array());
    assert_eq!(bytemuck::bytes_of(&uniform).len(), 64);
}
