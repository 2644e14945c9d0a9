/// Which page element plays each part of the gesture wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Host {
    /// The element carrying the detector attribute.
    Detector,
    /// `<a-scene>`.
    Scene,
    Body,
    Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roles {
    /// Owns the detector configuration and is the default touch target.
    pub owner: Host,
    /// Receives `markerFound` / `markerLost`. Markers live under the scene,
    /// so this never depends on where the detector was placed.
    pub markers: Host,
}

impl Roles {
    pub fn resolve(has_detector: bool, has_scene: bool) -> Self {
        let scene_or = |fallback| if has_scene { Host::Scene } else { fallback };
        let owner = if has_detector {
            Host::Detector
        } else {
            scene_or(Host::Body)
        };
        Self {
            owner,
            markers: scene_or(Host::Document),
        }
    }
}
