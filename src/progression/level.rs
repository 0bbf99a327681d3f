//! Level descriptors

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Level flavor (presentation and content authoring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelKind {
    #[default]
    Normal,
    Boss,
    Bonus,
    Challenge,
}

/// One playable level and its best result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Unique, 1-based
    pub level_number: u32,
    pub season_number: u32,
    pub display_name: String,
    /// Scene to load; `None` falls back to the demo scene
    #[serde(default)]
    pub scene: Option<String>,
    #[serde(default)]
    pub kind: LevelKind,
    #[serde(default)]
    pub description: String,

    // === Requirements ===
    #[serde(default)]
    pub required_player_level: u32,
    #[serde(default)]
    pub previous_level_to_unlock: u32,

    // === Rewards ===
    /// Experience per star earned
    pub experience_reward: u32,
    /// Maximum attainable stars
    pub stars_to_earn: u32,
    /// Best stars ever earned (0 = never completed)
    #[serde(default)]
    pub stars_earned: u32,

    /// Position on the level-select map (assigned by the map layout)
    #[serde(default, skip_serializing)]
    pub map_position: Vec2,
}

impl LevelDescriptor {
    pub fn new(level_number: u32, season_number: u32, display_name: impl Into<String>) -> Self {
        Self {
            level_number,
            season_number,
            display_name: display_name.into(),
            scene: None,
            kind: LevelKind::Normal,
            description: String::new(),
            required_player_level: 1,
            previous_level_to_unlock: level_number.saturating_sub(1),
            experience_reward: 0,
            stars_to_earn: 3,
            stars_earned: 0,
            map_position: Vec2::ZERO,
        }
    }

    pub fn with_reward(mut self, experience_reward: u32, stars_to_earn: u32) -> Self {
        self.experience_reward = experience_reward;
        self.stars_to_earn = stars_to_earn;
        self
    }

    pub fn with_kind(mut self, kind: LevelKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    /// Completed at least once
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.stars_earned > 0
    }

    /// Keep the better of the stored and new star count.
    /// Returns true if the stored value went up.
    pub fn record_stars(&mut self, stars: u32) -> bool {
        if stars > self.stars_earned {
            self.stars_earned = stars;
            true
        } else {
            false
        }
    }

    /// Scene to load for this level
    pub fn scene_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.scene.as_deref() {
            Some(scene) if !scene.is_empty() => scene,
            _ => fallback,
        }
    }
}
