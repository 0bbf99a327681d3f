//! Season descriptors: an ordered group of levels behind a shared unlock gate

use serde::{Deserialize, Serialize};

use super::level::LevelDescriptor;
use crate::level_number_for;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDescriptor {
    /// Unique, 1-based
    pub season_number: u32,
    pub display_name: String,
    pub levels_per_season: u32,
    /// Levels in play order
    pub levels: Vec<LevelDescriptor>,
    #[serde(default)]
    pub completion_reward: u32,
    #[serde(default)]
    pub description: String,
    /// Cached unlock state, recomputed on load and after each unlock cascade
    #[serde(skip)]
    pub unlocked: bool,
}

impl SeasonDescriptor {
    pub fn new(season_number: u32, display_name: impl Into<String>, levels_per_season: u32) -> Self {
        Self {
            season_number,
            display_name: display_name.into(),
            levels_per_season,
            levels: Vec::new(),
            completion_reward: 0,
            description: String::new(),
            unlocked: false,
        }
    }

    /// Every level has at least one star. Vacuously true with no levels.
    pub fn is_completed(&self) -> bool {
        self.levels.iter().all(LevelDescriptor::is_completed)
    }

    /// Number of levels with at least one star
    pub fn progress(&self) -> u32 {
        self.levels.iter().filter(|l| l.is_completed()).count() as u32
    }

    /// Fraction of levels completed (0.0 for an empty season)
    pub fn progress_fraction(&self) -> f32 {
        if self.levels.is_empty() {
            0.0
        } else {
            self.progress() as f32 / self.levels.len() as f32
        }
    }

    pub fn contains_level(&self, level_number: u32) -> bool {
        self.levels.iter().any(|l| l.level_number == level_number)
    }

    pub fn level(&self, level_number: u32) -> Option<&LevelDescriptor> {
        self.levels.iter().find(|l| l.level_number == level_number)
    }

    pub fn level_mut(&mut self, level_number: u32) -> Option<&mut LevelDescriptor> {
        self.levels.iter_mut().find(|l| l.level_number == level_number)
    }

    /// Re-derive level and season numbers from list order
    pub fn renumber(&mut self) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            level.level_number =
                level_number_for(self.season_number, i as u32, self.levels_per_season);
            level.season_number = self.season_number;
        }
    }
}
