//! User preferences for the cube viewer.
//!
//! Preferences are layered: the built-in defaults from `default.yaml` come
//! first, and the user's preferences file overrides any keys it sets.

#![allow(missing_docs)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum;

use std::path::Path;

use cgmath::Deg;
use eyre::Result;
use facelet3d::ViewSettings;
use serde::{Deserialize, Serialize};

mod animation;
mod colors;
mod interaction;
pub mod persist;
mod view;

pub use animation::*;
pub use colors::*;
pub use interaction::*;
pub use view::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences = serde_norway::from_str(DEFAULT_PREFS_STR)
        .unwrap_or_else(|e| {
            log::error!("Error parsing default preferences: {e}");
            Preferences::default()
        });
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub view: ViewPreferences,
    pub colors: ColorPreferences,
}

impl Preferences {
    /// Loads preferences, layering the user preferences file over the
    /// defaults. If `path` is `None`, the file in the platform's config
    /// directory is used if it exists.
    ///
    /// If loading fails, the default preferences are returned.
    pub fn load(path: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        // Load default preferences.
        let default_config_source = config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT);
        let mut config = config::Config::builder().add_source(default_config_source);

        // Load user preferences.
        match persist::user_config_source(path) {
            Ok(config_source) => config = config.add_source(config_source),
            Err(e) => log::warn!("Error loading user preferences: {e}"),
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                DEFAULT_PREFS.clone()
            })
    }

    /// Saves preferences to `path`, or to the default preferences file if
    /// `path` is `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => persist::save(path, self),
            None => persist::save(&persist::prefs_file()?, self),
        }
    }

    /// Returns the preferences as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns settings for a [`facelet3d::CubeView`].
    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            twist_duration: self.animation.twist_duration(),
            interpolate: self.animation.twist_interpolation.function(),
            twist_drag_threshold: self.interaction.twist_drag_threshold,
            orbit_sensitivity: self.interaction.orbit_sensitivity,
            camera_distance: self.view.camera_distance,
            fov: Deg(self.view.fov_degrees),
            initial_pitch: self.view.initial_pitch,
            initial_yaw: self.view.initial_yaw,
            palette: self.colors.palette(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use facelet3d::{Face, Rgb};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs_file_matches_defaults() {
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        let mut prefs = Preferences::default();
        prefs.animation.twist_duration = 0.5;
        prefs.animation.twist_interpolation = InterpolateFn::Cosine;
        prefs.colors.f = Rgb { rgb: [1, 2, 3] };
        prefs.save(Some(&path)).unwrap();

        assert_eq!(Preferences::load(Some(&path)), prefs);
    }

    #[test]
    fn test_partial_user_prefs_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "interaction:\n  orbit_sensitivity: 0.02\ncolors:\n  u: \"#000\"\n")
            .unwrap();

        let prefs = Preferences::load(Some(&path));
        assert_eq!(prefs.interaction.orbit_sensitivity, 0.02);
        assert_eq!(
            prefs.interaction.twist_drag_threshold,
            facelet3d::DEFAULT_TWIST_DRAG_THRESHOLD,
        );
        assert_eq!(prefs.animation, AnimationPreferences::default());

        let settings = prefs.view_settings();
        assert_eq!(settings.palette[Face::U], Rgb { rgb: [0, 0, 0] });
        assert_eq!(settings.palette[Face::R], ColorPreferences::default().r);
    }

    #[test]
    fn test_bad_user_prefs_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "colors:\n  u: not a color\n").unwrap();
        assert_eq!(Preferences::load(Some(&path)), Preferences::default());

        let missing = dir.path().join("missing.yaml");
        assert_eq!(Preferences::load(Some(&missing)), Preferences::default());
    }

    #[test]
    fn test_negative_twist_duration_uses_default() {
        let mut prefs = Preferences::default();
        prefs.animation.twist_duration = -1.0;
        assert_eq!(
            prefs.view_settings().twist_duration,
            facelet3d::DEFAULT_TWIST_DURATION,
        );
        prefs.animation.twist_duration = 0.1;
        assert_eq!(
            prefs.view_settings().twist_duration,
            Duration::from_secs_f32(0.1),
        );
    }

    #[test]
    fn test_yaml_uses_snake_case_names() {
        let yaml = Preferences::default().to_yaml().unwrap();
        assert!(yaml.contains("twist_interpolation: quadratic_in_out"));
        assert!(yaml.contains("fov_degrees: 75"));
    }

    #[test]
    fn test_every_interpolation_ends_at_one() {
        use strum::IntoEnumIterator;

        for f in InterpolateFn::iter() {
            assert!((f.function()(1.0) - 1.0).abs() < 1e-6, "{f}");
        }
    }
}
