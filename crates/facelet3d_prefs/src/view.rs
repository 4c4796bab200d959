use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewPreferences {
    pub camera_distance: f32,
    pub fov_degrees: f32,
    /// Initial camera elevation in radians.
    pub initial_pitch: f32,
    /// Initial camera azimuth in radians.
    pub initial_yaw: f32,
}
impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            camera_distance: facelet3d::DEFAULT_CAMERA_DISTANCE,
            fov_degrees: facelet3d::DEFAULT_FOV.0,
            initial_pitch: facelet3d::DEFAULT_PITCH,
            initial_yaw: facelet3d::DEFAULT_YAW,
        }
    }
}
