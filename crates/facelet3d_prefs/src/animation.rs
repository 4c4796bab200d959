use std::time::Duration;

use facelet3d::interpolate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of each turn in seconds.
    pub twist_duration: f32,
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: facelet3d::DEFAULT_TWIST_DURATION.as_secs_f32(),
            twist_interpolation: InterpolateFn::default(),
        }
    }
}
impl AnimationPreferences {
    /// Returns the turn duration, falling back to the default if the
    /// preference is negative or not a number.
    pub fn twist_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.twist_duration).unwrap_or_else(|e| {
            log::warn!("bad twist duration {}: {e}", self.twist_duration);
            facelet3d::DEFAULT_TWIST_DURATION
        })
    }
}

/// Easing curve for turn animations.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterpolateFn {
    Linear,
    #[default]
    QuadraticInOut,
    Cosine,
    CosineAccel,
    CosineDecel,
}
impl InterpolateFn {
    /// Returns the function that computes this curve.
    pub fn function(self) -> interpolate::InterpolateFn {
        match self {
            Self::Linear => interpolate::LINEAR,
            Self::QuadraticInOut => interpolate::QUADRATIC_IN_OUT,
            Self::Cosine => interpolate::COSINE,
            Self::CosineAccel => interpolate::COSINE_ACCEL,
            Self::CosineDecel => interpolate::COSINE_DECEL,
        }
    }
}
