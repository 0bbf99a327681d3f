//! Level completion and the unlock cascade
//!
//! Completing a level runs five steps in order: record stars, advance the
//! unlock frontier, grant experience, then check whether the owning season is
//! now complete and open the next one. All steps mutate memory first; the
//! affected keys are then written and flushed together, so storage sees the
//! whole completion or none of it.

use super::catalog::Catalog;
use super::profile::ProgressionStore;
use crate::persistence::KeyValueStore;

/// What a completion changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionOutcome {
    pub level_number: u32,
    /// Best star count after the attempt
    pub best_stars: u32,
    /// The attempt beat the previous best
    pub stars_improved: bool,
    /// Level newly made reachable by this completion
    pub unlocked_level: Option<u32>,
    pub experience_granted: u32,
    pub leveled_up: bool,
    /// Season newly opened by this completion
    pub unlocked_season: Option<u32>,
}

/// Record a finished level. Returns `None` (and changes nothing) if the
/// level isn't in the catalog.
pub fn complete_level(
    catalog: &mut Catalog,
    progression: &mut ProgressionStore,
    store: &mut dyn KeyValueStore,
    level_number: u32,
    stars_earned: u32,
) -> Option<CompletionOutcome> {
    let Some(level) = catalog.level_mut(level_number) else {
        log::warn!("Completed unknown level {level_number}, ignoring");
        return None;
    };

    // 1. Stars (best result only)
    let stars_improved = level.record_stars(stars_earned);
    let best_stars = level.stars_earned;
    let experience_reward = level.experience_reward;
    let season_number = level.season_number;

    // 2. Frontier
    let unlocked_level = level_number
        .checked_add(1)
        .filter(|&next| progression.apply_unlock(next));

    // 3. Experience
    let experience_granted = experience_reward.saturating_mul(stars_earned);
    let leveled_up = progression.apply_experience(experience_granted);

    // 4. Season cascade
    let unlocked_season = if catalog.is_season_completed(season_number) {
        catalog.unlock_next_season(season_number)
    } else {
        None
    };

    // Single commit point
    catalog.write_stars(level_number, store);
    progression.save(store);

    log::info!(
        "Level {level_number} complete: {stars_earned} stars (best {best_stars}), +{experience_granted} xp"
    );

    Some(CompletionOutcome {
        level_number,
        best_stars,
        stars_improved,
        unlocked_level,
        experience_granted,
        leveled_up,
        unlocked_season,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::persistence::MemoryStore;

    struct Fixture {
        catalog: Catalog,
        progression: ProgressionStore,
        store: MemoryStore,
    }

    impl Fixture {
        /// Three seasons of three levels
        fn new() -> Self {
            let config = GameConfig {
                levels_per_season: 3,
                ..GameConfig::default()
            };
            let mut catalog = Catalog::standard(&config);
            catalog.refresh_season_flags();
            Self {
                catalog,
                progression: ProgressionStore::default(),
                store: MemoryStore::new(),
            }
        }

        fn complete(&mut self, level: u32, stars: u32) -> Option<CompletionOutcome> {
            complete_level(
                &mut self.catalog,
                &mut self.progression,
                &mut self.store,
                level,
                stars,
            )
        }
    }

    #[test]
    fn test_unknown_level_is_noop() {
        let mut f = Fixture::new();
        assert!(f.complete(999, 3).is_none());
        assert_eq!(f.store.flush_count(), 0);
        assert_eq!(f.progression.profile().unlocked_levels, 1);
    }

    #[test]
    fn test_completion_unlocks_next_and_grants_xp() {
        let mut f = Fixture::new();
        let reward = f.catalog.level(1).unwrap().experience_reward;
        let outcome = f.complete(1, 2).unwrap();

        assert_eq!(outcome.unlocked_level, Some(2));
        assert_eq!(outcome.experience_granted, reward * 2);
        assert!(outcome.stars_improved);
        assert!(f.progression.is_level_unlocked(2));
        assert_eq!(f.progression.profile().experience, reward * 2);
    }

    #[test]
    fn test_single_flush_per_completion() {
        let mut f = Fixture::new();
        f.complete(1, 3);
        assert_eq!(f.store.flush_count(), 1);
        assert_eq!(f.store.get_u32("LevelStars_1", 0), 3);
        assert_eq!(f.store.get_u32("UnlockedLevels", 0), 2);
    }

    #[test]
    fn test_replay_with_fewer_stars_keeps_best() {
        let mut f = Fixture::new();
        f.complete(1, 3);
        let outcome = f.complete(1, 1).unwrap();
        assert!(!outcome.stars_improved);
        assert_eq!(outcome.best_stars, 3);
        assert_eq!(f.catalog.level(1).unwrap().stars_earned, 3);
        // Frontier already past level 2
        assert_eq!(outcome.unlocked_level, None);
    }

    #[test]
    fn test_zero_stars_still_advances_frontier() {
        let mut f = Fixture::new();
        let outcome = f.complete(1, 0).unwrap();
        assert_eq!(outcome.unlocked_level, Some(2));
        assert_eq!(outcome.experience_granted, 0);
        assert!(!f.catalog.level(1).unwrap().is_completed());
    }

    #[test]
    fn test_finishing_season_unlocks_next() {
        let mut f = Fixture::new();
        assert!(!f.catalog.season(2).unwrap().unlocked);
        f.complete(1, 1);
        f.complete(2, 1);
        let outcome = f.complete(3, 1).unwrap();
        assert_eq!(outcome.unlocked_season, Some(2));
        assert!(f.catalog.season(2).unwrap().unlocked);
        assert!(f.catalog.is_season_unlocked(2));
        assert!(f.progression.is_level_unlocked(4));

        // Replaying doesn't re-report the unlock
        let again = f.complete(3, 2).unwrap();
        assert_eq!(again.unlocked_season, None);
    }

    #[test]
    fn test_last_season_completion_has_no_next() {
        let mut f = Fixture::new();
        for n in 1..=8 {
            f.complete(n, 1);
        }
        let last = f.complete(9, 1).unwrap();
        assert!(f.catalog.is_season_completed(3));
        assert!(f.catalog.season(4).is_none());
        assert_eq!(last.unlocked_season, None);
        // Frontier still moves past the final level
        assert_eq!(last.unlocked_level, Some(10));
    }

    #[test]
    fn test_highest_numbers_do_not_overflow() {
        let json = format!(
            r#"[{{ "season_number": {max}, "display_name": "Edge", "levels_per_season": 1,
                  "levels": [{{ "level_number": {max}, "season_number": {max},
                               "display_name": "Last", "experience_reward": 5,
                               "stars_to_earn": 3 }}] }}]"#,
            max = u32::MAX
        );
        let mut catalog = Catalog::from_json(&json).unwrap();
        let mut progression = ProgressionStore::default();
        let mut store = MemoryStore::new();

        let outcome = complete_level(&mut catalog, &mut progression, &mut store, u32::MAX, 2).unwrap();
        assert_eq!(outcome.best_stars, 2);
        assert_eq!(outcome.unlocked_level, None);
        assert_eq!(outcome.unlocked_season, None);
        assert_eq!(outcome.experience_granted, 10);
        assert_eq!(store.flush_count(), 1);
    }
}
