//! Player profile and the store that owns it
//!
//! The profile is persisted field-by-field under fixed keys. Every public
//! mutation writes through and flushes; the `apply_*` variants mutate memory
//! only so the unlock cascade can commit several changes at once.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

const PLAYER_NAME_KEY: &str = "PlayerName";
const PLAYER_LEVEL_KEY: &str = "PlayerLevel";
const EXPERIENCE_KEY: &str = "Experience";
const UNLOCKED_LEVELS_KEY: &str = "UnlockedLevels";

/// Persistent player progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Player level (>= 1)
    pub level: u32,
    /// Experience toward the next level
    pub experience: u32,
    /// Highest unlocked level number (>= 1, never decreases)
    pub unlocked_levels: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            level: DEFAULT_PLAYER_LEVEL,
            experience: 0,
            unlocked_levels: INITIAL_UNLOCKED_LEVELS,
        }
    }
}

/// Owns the player profile and its progression arithmetic
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    profile: PlayerProfile,
    /// Experience per level (threshold = level * this)
    base_requirement: u32,
    initial_unlocked: u32,
}

impl Default for ProgressionStore {
    fn default() -> Self {
        Self::new(BASE_EXPERIENCE_REQUIREMENT, INITIAL_UNLOCKED_LEVELS)
    }
}

impl ProgressionStore {
    /// Fresh profile with default values
    pub fn new(base_requirement: u32, initial_unlocked: u32) -> Self {
        let initial_unlocked = initial_unlocked.max(1);
        Self {
            profile: PlayerProfile {
                unlocked_levels: initial_unlocked,
                ..PlayerProfile::default()
            },
            base_requirement: base_requirement.max(1),
            initial_unlocked,
        }
    }

    /// Load the profile from `store`, defaulting any missing field
    pub fn load(store: &dyn KeyValueStore, base_requirement: u32, initial_unlocked: u32) -> Self {
        let mut progression = Self::new(base_requirement, initial_unlocked);
        progression.reload(store);
        progression
    }

    /// Re-read every field from `store`
    pub fn reload(&mut self, store: &dyn KeyValueStore) {
        self.profile = PlayerProfile {
            name: store.get_string(PLAYER_NAME_KEY, DEFAULT_PLAYER_NAME),
            level: store.get_u32(PLAYER_LEVEL_KEY, DEFAULT_PLAYER_LEVEL).max(1),
            experience: store.get_u32(EXPERIENCE_KEY, 0),
            unlocked_levels: store
                .get_u32(UNLOCKED_LEVELS_KEY, self.initial_unlocked)
                .max(1),
        };
        log::info!(
            "Loaded profile '{}' (level {}, {} xp, {} levels unlocked)",
            self.profile.name,
            self.profile.level,
            self.profile.experience,
            self.profile.unlocked_levels
        );
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn base_requirement(&self) -> u32 {
        self.base_requirement
    }

    /// Stage every profile field in `store` without flushing
    pub fn write_to(&self, store: &mut dyn KeyValueStore) {
        store.set_string(PLAYER_NAME_KEY, &self.profile.name);
        store.set_u32(PLAYER_LEVEL_KEY, self.profile.level);
        store.set_u32(EXPERIENCE_KEY, self.profile.experience);
        store.set_u32(UNLOCKED_LEVELS_KEY, self.profile.unlocked_levels);
    }

    /// Write and flush. Storage failures are logged and otherwise ignored.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        self.write_to(store);
        if let Err(e) = store.flush() {
            log::warn!("Failed to save profile: {e}");
        }
    }

    /// Experience required to leave the current level
    pub fn experience_threshold(&self) -> u32 {
        self.profile.level.saturating_mul(self.base_requirement)
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_threshold()
            .saturating_sub(self.profile.experience)
    }

    pub fn is_level_unlocked(&self, level_number: u32) -> bool {
        level_number <= self.profile.unlocked_levels
    }

    /// Grant experience and persist. Returns true if the player leveled up.
    pub fn add_experience(&mut self, amount: u32, store: &mut dyn KeyValueStore) -> bool {
        let leveled = self.apply_experience(amount);
        self.save(store);
        leveled
    }

    /// Raise the unlock frontier to `level_number`; persists only on change
    pub fn unlock_level(&mut self, level_number: u32, store: &mut dyn KeyValueStore) -> bool {
        let changed = self.apply_unlock(level_number);
        if changed {
            self.save(store);
        }
        changed
    }

    pub fn set_name(&mut self, name: &str, store: &mut dyn KeyValueStore) {
        self.profile.name = name.to_string();
        self.save(store);
    }

    /// Add experience in memory with a single level-up check.
    ///
    /// Only one level is gained per call even if the grant would cover
    /// several thresholds; the surplus stays in `experience`.
    pub(crate) fn apply_experience(&mut self, amount: u32) -> bool {
        self.profile.experience = self.profile.experience.saturating_add(amount);

        let required = self.experience_threshold();
        if self.profile.experience >= required {
            self.profile.level += 1;
            self.profile.experience -= required;
            log::info!("Level up! Now level {}", self.profile.level);
            true
        } else {
            false
        }
    }

    pub(crate) fn apply_unlock(&mut self, level_number: u32) -> bool {
        if level_number > self.profile.unlocked_levels {
            log::debug!(
                "Unlock frontier {} -> {}",
                self.profile.unlocked_levels,
                level_number
            );
            self.profile.unlocked_levels = level_number;
            true
        } else {
            false
        }
    }
}
