//! Basket detection
//!
//! A hoop's trigger volume reports every body that enters it. Entering while
//! moving downward counts as a basket. There is no per-shot debounce: a ball
//! that bounces back out and drops in again scores again.

use crate::collab::{AudioSink, Sound, TriggerEvent};
use crate::consts::POINTS_PER_BASKET;

/// Cumulative score across all hoops for the session
///
/// Level changes only clear the per-level basket tally. The session total
/// survives until an explicit `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    total: u32,
    baskets: u32,
    level_baskets: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn baskets(&self) -> u32 {
        self.baskets
    }

    /// Baskets made since the current level started
    pub fn level_baskets(&self) -> u32 {
        self.level_baskets
    }

    fn credit(&mut self, points: u32) {
        self.total = self.total.saturating_add(points);
        self.baskets = self.baskets.saturating_add(1);
        self.level_baskets = self.level_baskets.saturating_add(1);
    }

    pub fn start_level(&mut self) {
        self.level_baskets = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Per-hoop detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoopState {
    Idle,
    /// A basket registered this tick
    Scored,
}

#[derive(Debug, Clone)]
pub struct ScoreDetector {
    pub point_value: u32,
    state: HoopState,
}

impl Default for ScoreDetector {
    fn default() -> Self {
        Self::new(POINTS_PER_BASKET)
    }
}

impl ScoreDetector {
    pub fn new(point_value: u32) -> Self {
        Self {
            point_value,
            state: HoopState::Idle,
        }
    }

    pub fn state(&self) -> HoopState {
        self.state
    }

    /// Handle one trigger-enter event. Returns true if it counted as a basket.
    pub fn on_trigger_enter(
        &mut self,
        event: &TriggerEvent,
        board: &mut Scoreboard,
        audio: &mut dyn AudioSink,
    ) -> bool {
        if event.velocity.y >= 0.0 {
            log::debug!("Body {} entered hoop moving up, ignored", event.body);
            return false;
        }

        self.state = HoopState::Scored;
        board.credit(self.point_value);
        audio.play_one_shot(Sound::BasketScored);
        log::info!(
            "BASKET! +{} points. Total score: {}",
            self.point_value,
            board.total()
        );
        true
    }

    /// Handle every event delivered since the last tick, returning baskets made
    pub fn process_events(
        &mut self,
        events: &[TriggerEvent],
        board: &mut Scoreboard,
        audio: &mut dyn AudioSink,
    ) -> u32 {
        let mut made = 0;
        for event in events {
            if self.on_trigger_enter(event, board, audio) {
                made += 1;
            }
        }
        made
    }

    /// End of tick: Scored falls back to Idle
    pub fn tick(&mut self) {
        self.state = HoopState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::LogAudio;
    use glam::Vec3;

    fn event(vy: f32) -> TriggerEvent {
        TriggerEvent {
            body: 1,
            velocity: Vec3::new(0.0, vy, 2.0),
        }
    }

    #[test]
    fn test_downward_entry_scores() {
        let mut hoop = ScoreDetector::default();
        let mut board = Scoreboard::new();
        let mut audio = LogAudio::default();

        assert!(hoop.on_trigger_enter(&event(-3.0), &mut board, &mut audio));
        assert_eq!(board.total(), 2);
        assert_eq!(hoop.state(), HoopState::Scored);
        assert_eq!(audio.played, vec![Sound::BasketScored]);

        hoop.tick();
        assert_eq!(hoop.state(), HoopState::Idle);
    }

    #[test]
    fn test_upward_or_level_entry_ignored() {
        let mut hoop = ScoreDetector::default();
        let mut board = Scoreboard::new();
        let mut audio = LogAudio::default();
        assert!(!hoop.on_trigger_enter(&event(4.0), &mut board, &mut audio));
        assert!(!hoop.on_trigger_enter(&event(0.0), &mut board, &mut audio));
        assert_eq!(board.total(), 0);
        assert_eq!(hoop.state(), HoopState::Idle);
    }

    #[test]
    fn test_reentry_scores_again() {
        let mut hoop = ScoreDetector::new(3);
        let mut board = Scoreboard::new();
        let mut audio = LogAudio::default();
        let made = hoop.process_events(&[event(-1.0), event(2.0), event(-1.0)], &mut board, &mut audio);
        assert_eq!(made, 2);
        assert_eq!(board.total(), 6);
        assert_eq!(board.baskets(), 2);
    }

    #[test]
    fn test_empty_tick_is_fine() {
        let mut hoop = ScoreDetector::default();
        let mut board = Scoreboard::new();
        let mut audio = LogAudio::default();
        assert_eq!(hoop.process_events(&[], &mut board, &mut audio), 0);
        board.reset();
        assert_eq!(board.total(), 0);
    }

    #[test]
    fn test_start_level_keeps_session_total() {
        let mut hoop = ScoreDetector::default();
        let mut board = Scoreboard::new();
        let mut audio = LogAudio::default();
        hoop.process_events(&[event(-1.0)], &mut board, &mut audio);
        board.start_level();
        assert_eq!(board.total(), 2);
        assert_eq!(board.baskets(), 1);
        assert_eq!(board.level_baskets(), 0);

        hoop.process_events(&[event(-1.0)], &mut board, &mut audio);
        assert_eq!(board.total(), 4);
        assert_eq!(board.level_baskets(), 1);

        board.reset();
        assert_eq!(board, Scoreboard::default());
    }
}
