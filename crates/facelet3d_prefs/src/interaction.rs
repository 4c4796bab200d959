use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Distance in pixels that a drag must exceed to turn a layer.
    pub twist_drag_threshold: f32,
    /// Camera orbit speed in radians per pixel.
    pub orbit_sensitivity: f32,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            twist_drag_threshold: facelet3d::DEFAULT_TWIST_DRAG_THRESHOLD,
            orbit_sensitivity: facelet3d::DEFAULT_ORBIT_SENSITIVITY,
        }
    }
}
