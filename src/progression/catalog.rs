//! Level and season catalog
//!
//! Seasons own their levels; the level catalog is the flattened view in
//! season-then-level order. Unlock and completion status is derived from the
//! levels' star counts plus the player's unlock frontier.

use serde::{Deserialize, Serialize};

use super::level::{LevelDescriptor, LevelKind};
use super::profile::PlayerProfile;
use super::season::SeasonDescriptor;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::persistence::KeyValueStore;

/// Storage key for a level's best star count
fn stars_key(level_number: u32) -> String {
    format!("LevelStars_{level_number}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    seasons: Vec<SeasonDescriptor>,
}

impl Catalog {
    pub fn new(seasons: Vec<SeasonDescriptor>) -> Self {
        let catalog = Self { seasons };
        catalog.warn_on_duplicates();
        catalog
    }

    /// Parse authored content (a JSON array of seasons)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let seasons: Vec<SeasonDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(seasons))
    }

    /// Built-in content: three seasons of `levels_per_season` levels.
    ///
    /// Rewards grow through a season; every fifth level is a bonus level and
    /// the last level of a season is its boss.
    pub fn standard(config: &GameConfig) -> Self {
        const SEASON_NAMES: [&str; 3] = ["Rookie Season", "Pro Season", "Legend Season"];

        let per_season = config.levels_per_season;
        let seasons = SEASON_NAMES
            .iter()
            .zip(1u32..)
            .map(|(name, season_number)| {
                let mut season = SeasonDescriptor::new(season_number, *name, per_season);
                season.completion_reward = 500 * season_number;
                for i in 0..per_season {
                    let number = crate::level_number_for(season_number, i, per_season);
                    let kind = if i + 1 == per_season {
                        LevelKind::Boss
                    } else if (i + 1) % 5 == 0 {
                        LevelKind::Bonus
                    } else {
                        LevelKind::Normal
                    };
                    let mut level = LevelDescriptor::new(number, season_number, format!("Level {number}"))
                        .with_reward(10 * season_number + 2 * i, 3)
                        .with_kind(kind);
                    level.required_player_level = 1 + (number - 1) / 10;
                    season.levels.push(level);
                }
                season
            })
            .collect();
        Self::new(seasons)
    }

    fn warn_on_duplicates(&self) {
        let mut seen = std::collections::HashSet::new();
        for level in self.levels() {
            if !seen.insert(level.level_number) {
                log::warn!("Duplicate level number {} in catalog", level.level_number);
            }
        }
    }

    // === Lookups ===

    pub fn seasons(&self) -> &[SeasonDescriptor] {
        &self.seasons
    }

    /// All levels in season-then-level order
    pub fn levels(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.seasons.iter().flat_map(|s| s.levels.iter())
    }

    pub fn level(&self, level_number: u32) -> Option<&LevelDescriptor> {
        self.levels().find(|l| l.level_number == level_number)
    }

    pub fn level_mut(&mut self, level_number: u32) -> Option<&mut LevelDescriptor> {
        self.seasons
            .iter_mut()
            .flat_map(|s| s.levels.iter_mut())
            .find(|l| l.level_number == level_number)
    }

    pub fn season(&self, season_number: u32) -> Option<&SeasonDescriptor> {
        self.seasons.iter().find(|s| s.season_number == season_number)
    }

    fn season_mut(&mut self, season_number: u32) -> Option<&mut SeasonDescriptor> {
        self.seasons
            .iter_mut()
            .find(|s| s.season_number == season_number)
    }

    /// Season that owns `level_number`
    pub fn season_for_level(&self, level_number: u32) -> Option<&SeasonDescriptor> {
        self.seasons.iter().find(|s| s.contains_level(level_number))
    }

    // === Derived status ===

    pub fn is_level_unlocked(&self, profile: &PlayerProfile, level_number: u32) -> bool {
        level_number <= profile.unlocked_levels
    }

    /// Season 1 is always open; later seasons open once their predecessor is
    /// completed. A missing predecessor keeps the season locked.
    pub fn is_season_unlocked(&self, season_number: u32) -> bool {
        if season_number == 1 {
            return true;
        }
        match season_number.checked_sub(1).and_then(|prev| self.season(prev)) {
            Some(previous) => previous.is_completed(),
            None => false,
        }
    }

    /// False for seasons not in the catalog
    pub fn is_season_completed(&self, season_number: u32) -> bool {
        self.season(season_number)
            .is_some_and(SeasonDescriptor::is_completed)
    }

    pub fn season_progress(&self, season_number: u32) -> u32 {
        self.season(season_number).map_or(0, SeasonDescriptor::progress)
    }

    pub fn season_progress_fraction(&self, season_number: u32) -> f32 {
        self.season(season_number)
            .map_or(0.0, SeasonDescriptor::progress_fraction)
    }

    pub fn unlocked_levels<'a>(
        &'a self,
        profile: &'a PlayerProfile,
    ) -> impl Iterator<Item = &'a LevelDescriptor> + 'a {
        self.levels()
            .filter(move |l| l.level_number <= profile.unlocked_levels)
    }

    pub fn unlocked_seasons(&self) -> impl Iterator<Item = &SeasonDescriptor> {
        self.seasons
            .iter()
            .filter(|s| self.is_season_unlocked(s.season_number))
    }

    /// The resume point: first unlocked level (catalog order) without stars
    pub fn next_unlocked_level(&self, profile: &PlayerProfile) -> Option<&LevelDescriptor> {
        self.levels()
            .find(|l| l.level_number <= profile.unlocked_levels && l.stars_earned == 0)
    }

    // === Mutation ===

    /// Recompute every season's cached unlock flag
    pub fn refresh_season_flags(&mut self) {
        let flags: Vec<bool> = self
            .seasons
            .iter()
            .map(|s| self.is_season_unlocked(s.season_number))
            .collect();
        for (season, unlocked) in self.seasons.iter_mut().zip(flags) {
            season.unlocked = unlocked;
        }
    }

    /// Open the season after `completed_season` if it is now completed.
    /// Returns the newly unlocked season number.
    pub fn unlock_next_season(&mut self, completed_season: u32) -> Option<u32> {
        if !self.is_season_completed(completed_season) {
            return None;
        }
        let next = completed_season.checked_add(1)?;
        let season = self.season_mut(next)?;
        if season.unlocked {
            return None;
        }
        season.unlocked = true;
        log::info!("Season {next} unlocked");
        Some(next)
    }

    // === Persistence ===

    /// Merge saved star counts into the catalog (keeping the better value)
    /// and recompute season flags
    pub fn load_stars(&mut self, store: &dyn KeyValueStore) {
        for level in self.seasons.iter_mut().flat_map(|s| s.levels.iter_mut()) {
            let saved = store.get_u32(&stars_key(level.level_number), 0);
            level.record_stars(saved);
        }
        self.refresh_season_flags();
    }

    /// Stage a level's star count without flushing
    pub fn write_stars(&self, level_number: u32, store: &mut dyn KeyValueStore) {
        if let Some(level) = self.level(level_number) {
            store.set_u32(&stars_key(level_number), level.stars_earned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    /// Two seasons of three levels each
    fn small_catalog() -> Catalog {
        let config = GameConfig {
            levels_per_season: 3,
            ..GameConfig::default()
        };
        let mut catalog = Catalog::standard(&config);
        catalog.seasons.truncate(2);
        catalog
    }

    fn profile(unlocked: u32) -> PlayerProfile {
        PlayerProfile {
            unlocked_levels: unlocked,
            ..PlayerProfile::default()
        }
    }

    #[test]
    fn test_standard_catalog_numbering() {
        let catalog = Catalog::standard(&GameConfig::default());
        assert_eq!(catalog.seasons().len(), 3);
        assert_eq!(catalog.levels().count(), 60);
        assert_eq!(catalog.level(21).map(|l| l.season_number), Some(2));
        assert_eq!(catalog.level(20).map(|l| l.kind), Some(LevelKind::Boss));
        assert_eq!(catalog.level(5).map(|l| l.kind), Some(LevelKind::Bonus));
    }

    #[test]
    fn test_lookup_not_found() {
        let catalog = small_catalog();
        assert!(catalog.level(99).is_none());
        assert!(catalog.season(9).is_none());
        assert!(catalog.season_for_level(99).is_none());
        assert_eq!(catalog.season_progress(9), 0);
        assert!(!catalog.is_season_completed(9));
    }

    #[test]
    fn test_season_for_level() {
        let catalog = small_catalog();
        assert_eq!(catalog.season_for_level(4).map(|s| s.season_number), Some(2));
    }

    #[test]
    fn test_season_unlock_follows_previous_completion() {
        let mut catalog = small_catalog();
        assert!(catalog.is_season_unlocked(1));
        assert!(!catalog.is_season_unlocked(2));
        // Predecessor (season 3) isn't in the catalog
        assert!(!catalog.is_season_unlocked(4));

        for n in 1..=3 {
            catalog.level_mut(n).unwrap().stars_earned = 1;
        }
        assert!(catalog.is_season_completed(1));
        assert!(catalog.is_season_unlocked(2));
    }

    #[test]
    fn test_next_unlocked_level_is_first_unstarred() {
        let mut catalog = small_catalog();
        catalog.level_mut(1).unwrap().stars_earned = 2;
        let p = profile(3);
        assert_eq!(catalog.next_unlocked_level(&p).map(|l| l.level_number), Some(2));
    }

    #[test]
    fn test_next_unlocked_level_none_when_all_done() {
        let mut catalog = small_catalog();
        catalog.level_mut(1).unwrap().stars_earned = 1;
        catalog.level_mut(2).unwrap().stars_earned = 1;
        assert!(catalog.next_unlocked_level(&profile(2)).is_none());
    }

    #[test]
    fn test_unlocked_listings() {
        let catalog = small_catalog();
        let p = profile(2);
        let numbers: Vec<u32> = catalog.unlocked_levels(&p).map(|l| l.level_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(catalog.unlocked_seasons().count(), 1);
    }

    #[test]
    fn test_unlock_next_season_only_once() {
        let mut catalog = small_catalog();
        catalog.refresh_season_flags();
        assert_eq!(catalog.unlock_next_season(1), None);
        for n in 1..=3 {
            catalog.level_mut(n).unwrap().stars_earned = 3;
        }
        assert_eq!(catalog.unlock_next_season(1), Some(2));
        assert_eq!(catalog.unlock_next_season(1), None);
        // No season 3 in this catalog
        for n in 4..=6 {
            catalog.level_mut(n).unwrap().stars_earned = 3;
        }
        assert_eq!(catalog.unlock_next_season(2), None);
    }

    #[test]
    fn test_stars_persist_and_merge() {
        let mut store = MemoryStore::new();
        let mut catalog = small_catalog();
        catalog.level_mut(2).unwrap().stars_earned = 2;
        catalog.write_stars(2, &mut store);

        let mut fresh = small_catalog();
        fresh.load_stars(&store);
        assert_eq!(fresh.level(2).map(|l| l.stars_earned), Some(2));
        assert_eq!(fresh.level(1).map(|l| l.stars_earned), Some(0));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "season_number": 1,
                "display_name": "Street",
                "levels_per_season": 2,
                "levels": [
                    { "level_number": 1, "season_number": 1, "display_name": "A",
                      "experience_reward": 10, "stars_to_earn": 3 },
                    { "level_number": 2, "season_number": 1, "display_name": "B",
                      "experience_reward": 15, "stars_to_earn": 3, "scene": "Alley" }
                ]
            }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.levels().count(), 2);
        assert_eq!(catalog.level(2).and_then(|l| l.scene.clone()), Some("Alley".into()));
    }
}
