//! Scene configuration and view toggles.
//!
//! Defines SceneConfig (planet count, clock scale, camera home pose and
//! transition parameters) and the per-frame drawing flags. The config is
//! read from `assets/scene.json`, embedded at build time; missing keys
//! keep their defaults.

use crate::camera::{CameraPose, TransitionPolicy};
use crate::easing::Easing;
use crate::planets::PLANET_COUNT;
use crate::time::DEFAULT_TIME_SCALE;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../assets/scene.json");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("scene config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene config field `{field}` {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub planet_count: usize,
    pub time_scale: f64,
    pub home: CameraPose,
    pub fov_y_deg: f64,
    pub transition_duration: f64,
    pub transition_policy: TransitionPolicy,
    pub transition_easing: Easing,
    /// Distance from a focused planet along its outward direction.
    pub focus_distance: f64,
    /// Extra height above a focused planet.
    pub focus_lift: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub particle_count: usize,
    pub particle_seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            planet_count: PLANET_COUNT,
            time_scale: DEFAULT_TIME_SCALE,
            home: CameraPose::new(Point3::new(25.0, 15.0, 25.0), Point3::origin()),
            fov_y_deg: 45.0,
            transition_duration: 2.0,
            transition_policy: TransitionPolicy::Ignore,
            transition_easing: Easing::InOutCubic,
            focus_distance: 8.0,
            focus_lift: 3.0,
            min_distance: 5.0,
            max_distance: 70.0,
            particle_count: 500,
            particle_seed: 0x0b17_a15e,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    /// Embedded config, or the defaults when the asset is broken.
    pub fn load() -> Self {
        match Self::embedded() {
            Ok(config) => {
                log::info!("Loaded scene config ({} planets)", config.planet_count);
                config
            }
            Err(e) => {
                log::warn!("{e}; falling back to default scene config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if !(self.time_scale >= 0.0) {
            return invalid("time_scale", "must be zero or positive");
        }
        if !(self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return invalid("fov_y_deg", "must be between 0 and 180 degrees");
        }
        if !self.transition_duration.is_finite() {
            return invalid("transition_duration", "must be finite");
        }
        if !(self.min_distance > 0.0 && self.min_distance <= self.max_distance) {
            return invalid("min_distance", "must be positive and not above max_distance");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewFlags {
    pub show_orbits: bool,
    pub show_particles: bool,
    pub show_labels: bool,
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            show_orbits: false,
            show_particles: true,
            show_labels: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let config = SceneConfig::embedded().unwrap();
        assert_eq!(config.planet_count, 50);
        assert_eq!(config.transition_policy, TransitionPolicy::Ignore);
        assert_eq!(SceneConfig::load(), config);
    }

    #[test]
    fn rejects_out_of_range_values() {
        for json in [
            r#"{"time_scale": -1.0}"#,
            r#"{"fov_y_deg": 0.0}"#,
            r#"{"min_distance": 80.0, "max_distance": 70.0}"#,
        ] {
            assert!(matches!(SceneConfig::from_json(json), Err(ConfigError::Invalid { .. })), "{json}");
        }
        assert!(matches!(SceneConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{"time_scale": 1.0, "transition_policy": "Restart"}"#).unwrap();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.transition_policy, TransitionPolicy::Restart);
        assert_eq!(config.planet_count, 50);
        assert_eq!(config.home, SceneConfig::default().home);
    }
}
