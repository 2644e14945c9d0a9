//! Transform state of the manipulated object.
//!
//! Whoever draws the model reads this state; gesture handlers write pitch,
//! yaw and scale into it through a [`SharedTransform`]. The model matrix and
//! the GPU-ready [`TransformUniform`] are derived on demand.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle shared between the renderer (reader) and the gesture consumer (writer).
pub type SharedTransform = Rc<RefCell<TransformState>>;

/// Rotation as XYZ Euler angles in radians plus a per-axis scale.
///
/// Gestures only ever touch pitch (`rotation.x`) and yaw (`rotation.y`), and
/// always scale the three axes by the same factor.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TransformState {
    pub fn with_uniform_scale(scale: f32) -> Self {
        Self {
            scale: Vec3::splat(scale),
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedTransform {
        Rc::new(RefCell::new(self))
    }

    /// Add yaw (`angles.x`) and pitch (`angles.y`), in radians.
    #[inline]
    pub fn rotate_by(&mut self, angles: Vec2) {
        self.rotation.y += angles.x;
        self.rotation.x += angles.y;
    }

    /// Multiply every axis by `multiplier`, then clamp each into `[min, max]`.
    ///
    /// Returns `true` when at least one axis hit a bound.
    pub fn scale_by(&mut self, multiplier: f32, min: f32, max: f32) -> bool {
        let scaled = self.scale * multiplier;
        let clamped = scaled.clamp(Vec3::splat(min), Vec3::splat(max));
        self.scale = clamped;
        clamped != scaled
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// Column-major model matrix laid out for direct upload to a GPU buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
}

impl From<&TransformState> for TransformUniform {
    fn from(state: &TransformState) -> Self {
        Self {
            model: state.model_matrix().to_cols_array_2d(),
        }
    }
}

impl TransformUniform {
    /// Flat column-major view, the order CSS `matrix3d()` expects.
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(self.model)
    }
}
