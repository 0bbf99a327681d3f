//! Basket Legend - swipe-to-shoot basketball with a season meta-game
//!
//! Core modules:
//! - `progression`: Player profile, level/season catalogs, unlock cascade
//! - `shot`: Swipe-to-force mapping, trajectory preview, basket scoring
//! - `flow`: Screen state machine (menu, settings, level select, gameplay)
//! - `boot`: Splash loading stages
//! - `schedule`: Deferred tasks on a monotonic clock
//! - `persistence`: Typed key/value storage
//! - `settings`: Volume, quality and display preferences
//! - `collab`: Interfaces to physics, UI, scene, and audio collaborators
//! - `app`: Application context wiring everything together
//! - `platform`: Logger setup, time, and the browser entry point

pub mod app;
pub mod boot;
pub mod collab;
pub mod config;
pub mod error;
pub mod flow;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod schedule;
pub mod settings;
pub mod shot;

pub use app::AppContext;
pub use config::GameConfig;
pub use error::GameError;
pub use settings::{QualityPreset, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Experience needed per player level (threshold = level * this)
    pub const BASE_EXPERIENCE_REQUIREMENT: u32 = 100;
    /// Levels unlocked on a fresh profile
    pub const INITIAL_UNLOCKED_LEVELS: u32 = 1;
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
    pub const DEFAULT_PLAYER_LEVEL: u32 = 1;
    /// Levels per season used for numbering authored content
    pub const LEVELS_PER_SEASON: u32 = 20;

    /// Shot tuning
    pub const MAX_FORCE: f32 = 25.0;
    /// Pixels the pointer must travel before a release counts as a shot
    pub const MIN_SWIPE_DISTANCE: f32 = 50.0;
    /// Swipe length (pixels) that maps to full power
    pub const FULL_POWER_SWIPE: f32 = 100.0;
    pub const MIN_POWER: f32 = 0.3;
    pub const MAX_POWER: f32 = 1.0;
    /// Sideways influence of a horizontal swipe
    pub const SWIPE_SIDE_FACTOR: f32 = 0.5;
    /// Upward influence of a vertical swipe, plus the constant lift
    pub const SWIPE_LIFT_FACTOR: f32 = 0.3;
    pub const BASE_LIFT: f32 = 0.3;
    /// Spin torque per pixel of swipe
    pub const SPIN_PER_PIXEL: f32 = 0.1;

    /// Trajectory preview sampling
    pub const TRAJECTORY_DT: f32 = 0.1;
    pub const TRAJECTORY_STEPS: usize = 30;
    /// Standard gravity (m/s², negative Y)
    pub const GRAVITY_Y: f32 = -9.81;

    /// Ball placement relative to the camera
    pub const BALL_DISTANCE: f32 = 2.0;
    pub const BALL_DROP_BELOW_CAMERA: f32 = 0.2;
    /// Seconds before a new ball replaces a released one
    pub const RESPAWN_DELAY: f32 = 3.0;

    /// Points per basket
    pub const POINTS_PER_BASKET: u32 = 2;

    /// Minimum time the splash screen stays up (seconds)
    pub const MINIMUM_SPLASH_TIME: f32 = 2.0;
}

/// Default world gravity vector
#[inline]
pub fn default_gravity() -> Vec3 {
    Vec3::new(0.0, consts::GRAVITY_Y, 0.0)
}

/// Level number for the `index`-th (0-based) level of a season
#[inline]
pub fn level_number_for(season_number: u32, index: u32, levels_per_season: u32) -> u32 {
    (season_number.saturating_sub(1)) * levels_per_season + index + 1
}
