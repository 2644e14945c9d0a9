use gesture_core::{TransformState, TransformUniform};
use glam::Vec3;

/// How a handler element's renderer reads its transform back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteBack {
    /// A-Frame entity: `rotation` (degrees) and `scale` component attributes.
    Entity,
    /// Plain DOM element: inline CSS `transform`.
    Css,
}

impl WriteBack {
    /// A-Frame primitives and entities are the `a-*` custom elements.
    pub fn for_tag(tag: &str) -> Self {
        let prefixed = tag.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("a-"));
        if prefixed && tag.len() > 2 {
            Self::Entity
        } else {
            Self::Css
        }
    }
}

/// Value of an entity's `rotation` attribute: XYZ Euler angles in degrees.
pub fn rotation_attribute(state: &TransformState) -> String {
    let deg = state.rotation * 180.0 / std::f32::consts::PI;
    vec3_attribute([deg.x, deg.y, deg.z])
}

/// Value of an entity's `scale` attribute.
pub fn scale_attribute(state: &TransformState) -> String {
    vec3_attribute(state.scale.to_array())
}

/// Seed a transform from an entity's authored `rotation` and `scale`.
///
/// Missing or unparsable attributes keep the identity value for that part.
pub fn entity_transform(rotation: Option<&str>, scale: Option<&str>) -> TransformState {
    let mut state = TransformState::default();
    if let Some(deg) = rotation.and_then(parse_vec3) {
        state.rotation = deg * std::f32::consts::PI / 180.0;
    }
    if let Some(scale) = scale.and_then(parse_vec3) {
        state.scale = scale;
    }
    state
}

fn parse_vec3(text: &str) -> Option<Vec3> {
    let mut parts = text.split_whitespace().map(|p| p.parse::<f32>().ok());
    let v = Vec3::new(parts.next()??, parts.next()??, parts.next()??);
    (parts.next().is_none() && v.is_finite()).then_some(v)
}

fn vec3_attribute(v: [f32; 3]) -> String {
    v.iter()
        .map(|c| format_component(*c))
        .collect::<Vec<_>>()
        .join(" ")
}

/// CSS `matrix3d()` for a transform, column-major like the uniform it wraps.
pub fn css_matrix3d(state: &TransformState) -> String {
    let cols = TransformUniform::from(state).to_cols_array();
    let body = cols
        .iter()
        .map(|v| format_component(*v))
        .collect::<Vec<_>>()
        .join(",");
    format!("matrix3d({body})")
}

#[inline]
fn format_component(v: f32) -> String {
    // a single NaN would invalidate the whole declaration
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.6}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}
