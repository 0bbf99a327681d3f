//! Screen flow
//!
//! Main menu, settings, level select and gameplay. Each state owns one UI
//! panel; entering shows it, leaving hides it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collab::{Panel, UiPanels};
use crate::error::GameError;

/// Top-level screen states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    MainMenu,
    Settings,
    LevelSelect,
    Gameplay,
}

impl GameState {
    pub const ALL: [GameState; 4] = [
        GameState::MainMenu,
        GameState::Settings,
        GameState::LevelSelect,
        GameState::Gameplay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GameState::MainMenu => "MainMenu",
            GameState::Settings => "Settings",
            GameState::LevelSelect => "LevelSelect",
            GameState::Gameplay => "Gameplay",
        }
    }

    pub fn panel(&self) -> Panel {
        match self {
            GameState::MainMenu => Panel::MainMenu,
            GameState::Settings => Panel::Settings,
            GameState::LevelSelect => Panel::LevelSelect,
            GameState::Gameplay => Panel::Gameplay,
        }
    }

    /// Full-screen states clear every other panel on entry
    fn clears_panels(&self) -> bool {
        matches!(self, GameState::MainMenu | GameState::Gameplay)
    }

    fn enter(&self, ui: &mut dyn UiPanels) {
        if self.clears_panels() {
            ui.hide_all_panels();
        }
        ui.show_panel(self.panel());
    }

    fn exit(&self, ui: &mut dyn UiPanels) {
        ui.hide_panel(self.panel());
    }

    fn update(&self, _dt: f32) {
        match self {
            GameState::MainMenu | GameState::Settings | GameState::LevelSelect => {}
            // Ball and hoop work runs in the app context for now
            GameState::Gameplay => {}
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameState {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| GameError::UnknownState(s.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct GameStateMachine {
    current: Option<GameState>,
    /// Seconds since the current state was entered
    time_in_state: f32,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` before `start`
    pub fn current(&self) -> Option<GameState> {
        self.current
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn is_in(&self, state: GameState) -> bool {
        self.current == Some(state)
    }

    pub fn start(&mut self, ui: &mut dyn UiPanels) {
        self.change_to(GameState::MainMenu, ui);
    }

    /// Transition by name. Unknown names are logged and leave the state alone.
    pub fn change_state(&mut self, name: &str, ui: &mut dyn UiPanels) -> Result<(), GameError> {
        match name.parse::<GameState>() {
            Ok(state) => {
                self.change_to(state, ui);
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                Err(e)
            }
        }
    }

    pub fn change_to(&mut self, state: GameState, ui: &mut dyn UiPanels) {
        if let Some(old) = self.current.take() {
            old.exit(ui);
        }
        log::info!("Changed state to: {state}");
        self.current = Some(state);
        self.time_in_state = 0.0;
        state.enter(ui);
    }

    /// Per-frame update, dispatched to the current state
    pub fn update(&mut self, dt: f32) {
        let Some(state) = self.current else {
            return;
        };
        self.time_in_state += dt.max(0.0);
        state.update(dt);
    }
}
