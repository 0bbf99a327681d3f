//! Data-driven game configuration
//!
//! Defaults mirror `consts`; a JSON file may override any subset of fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::progression::MapLayoutConfig;

/// Shot tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTuning {
    /// Launch speed at full power (velocity change, m/s)
    pub max_force: f32,
    /// Minimum swipe length in pixels for a release to launch
    pub min_swipe_distance: f32,
    /// Time between preview samples (seconds)
    pub trajectory_dt: f32,
    /// Number of preview samples
    pub trajectory_steps: usize,
    /// Ball distance in front of the camera
    pub ball_distance: f32,
    /// Seconds before the next ball spawns
    pub respawn_delay: f32,
    pub gravity: Vec3,
    /// Points awarded per basket
    pub points_per_basket: u32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            max_force: MAX_FORCE,
            min_swipe_distance: MIN_SWIPE_DISTANCE,
            trajectory_dt: TRAJECTORY_DT,
            trajectory_steps: TRAJECTORY_STEPS,
            ball_distance: BALL_DISTANCE,
            respawn_delay: RESPAWN_DELAY,
            gravity: crate::default_gravity(),
            points_per_basket: POINTS_PER_BASKET,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Scenes ===
    pub game_scene: String,
    /// Fallback scene for levels without their own
    pub demo_scene: String,

    // === Loading ===
    pub minimum_splash_time: f32,

    // === Progression ===
    pub base_experience_requirement: u32,
    pub initial_unlocked_levels: u32,
    pub levels_per_season: u32,

    pub shot: ShotTuning,
    pub map: MapLayoutConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_scene: "GameScene".to_string(),
            demo_scene: "demo".to_string(),
            minimum_splash_time: MINIMUM_SPLASH_TIME,
            base_experience_requirement: BASE_EXPERIENCE_REQUIREMENT,
            initial_unlocked_levels: INITIAL_UNLOCKED_LEVELS,
            levels_per_season: LEVELS_PER_SEASON,
            shot: ShotTuning::default(),
            map: MapLayoutConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a config file, falling back to defaults if absent or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would break invariants downstream
    fn sanitized(mut self) -> Self {
        self.base_experience_requirement = self.base_experience_requirement.max(1);
        self.initial_unlocked_levels = self.initial_unlocked_levels.max(1);
        self.levels_per_season = self.levels_per_season.max(1);
        self.shot.max_force = self.shot.max_force.max(0.0);
        self.shot.min_swipe_distance = self.shot.min_swipe_distance.max(0.0);
        self.shot.respawn_delay = self.shot.respawn_delay.max(0.0);
        self
    }
}
