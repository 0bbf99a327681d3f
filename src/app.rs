//! Application context
//!
//! Owns all mutable game state: storage, profile, catalog, settings, screen
//! flow, the task queue and the active ball. Collaborators (physics, UI,
//! scenes, audio) are lent in per call through [`Collaborators`].
//!
//! A frame is driven by the host in this order:
//! 1. `handle_pointer` / `handle_triggers` for the input gathered this frame
//! 2. `tick(dt)`: clock, due tasks, state update
//! 3. `preview_points` for drawing the aim line

use glam::{Vec2, Vec3};

use crate::boot::{BootSequence, BootTask};
use crate::collab::{AudioSink, PhysicsWorld, PointerEvent, SceneLoader, Sound, TriggerEvent, UiPanels};
use crate::config::GameConfig;
use crate::flow::{GameState, GameStateMachine};
use crate::persistence::KeyValueStore;
use crate::progression::{Catalog, CompletionOutcome, PlayerProfile, ProgressionStore, complete_level};
use crate::schedule::{Clock, OwnerId, TaskScheduler};
use crate::settings::Settings;
use crate::shot::{BallController, BallTask, CameraBasis, ScoreDetector, Scoreboard, Shot};

/// Every deferred action the app can queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTask {
    Ball(BallTask),
    Boot(BootTask),
}

impl From<BallTask> for GameTask {
    fn from(task: BallTask) -> Self {
        GameTask::Ball(task)
    }
}

impl From<BootTask> for GameTask {
    fn from(task: BootTask) -> Self {
        GameTask::Boot(task)
    }
}

/// External collaborators lent to the app for one call
pub struct Collaborators<'a> {
    pub physics: &'a mut dyn PhysicsWorld,
    pub ui: &'a mut dyn UiPanels,
    pub scenes: &'a mut dyn SceneLoader,
    pub audio: &'a mut dyn AudioSink,
}

pub struct AppContext {
    config: GameConfig,
    store: Box<dyn KeyValueStore>,
    progression: ProgressionStore,
    catalog: Catalog,
    settings: Settings,
    flow: GameStateMachine,
    clock: Clock,
    tasks: TaskScheduler<GameTask>,
    boot: BootSequence,
    scoreboard: Scoreboard,
    hoop: ScoreDetector,
    ball: Option<BallController>,
    camera: CameraBasis,
    screen_size: Vec2,
    current_level: Option<u32>,
    /// Next ball owner id; 0 belongs to the boot sequence
    next_owner: OwnerId,
}

impl AppContext {
    /// Load profile, stars and settings from `store` over the built-in catalog
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let catalog = Catalog::standard(&config);
        Self::with_catalog(config, store, catalog)
    }

    pub fn with_catalog(config: GameConfig, store: Box<dyn KeyValueStore>, mut catalog: Catalog) -> Self {
        let progression = ProgressionStore::load(
            store.as_ref(),
            config.base_experience_requirement,
            config.initial_unlocked_levels,
        );
        catalog.load_stars(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let boot = BootSequence::new(config.game_scene.clone(), config.minimum_splash_time);
        let hoop = ScoreDetector::new(config.shot.points_per_basket);

        Self {
            config,
            store,
            progression,
            catalog,
            settings,
            flow: GameStateMachine::new(),
            clock: Clock::new(),
            tasks: TaskScheduler::new(),
            boot,
            scoreboard: Scoreboard::new(),
            hoop,
            ball: None,
            camera: CameraBasis::default(),
            screen_size: Vec2::new(1080.0, 1920.0),
            current_level: None,
            next_owner: 1,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Hand back the store, e.g. to reopen the game from the same save
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    pub fn profile(&self) -> &PlayerProfile {
        self.progression.profile()
    }

    pub fn progression(&self) -> &ProgressionStore {
        &self.progression
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change settings; every setter persists through the store
    pub fn edit_settings(&mut self, edit: impl FnOnce(&mut Settings, &mut dyn KeyValueStore)) {
        edit(&mut self.settings, self.store.as_mut());
    }

    pub fn state(&self) -> Option<GameState> {
        self.flow.current()
    }

    pub fn boot(&self) -> &BootSequence {
        &self.boot
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn ball(&self) -> Option<&BallController> {
        self.ball.as_ref()
    }

    pub fn current_level(&self) -> Option<u32> {
        self.current_level
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn set_camera(&mut self, camera: CameraBasis) {
        self.camera = camera;
        if let Some(ball) = &mut self.ball {
            ball.set_camera(camera);
        }
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
        if let Some(ball) = &mut self.ball {
            ball.set_screen_size(size);
        }
    }

    // === Commands ===

    /// Start the splash loading sequence. The main menu opens once it has
    /// loaded the game scene.
    pub fn begin_boot(&mut self) {
        self.boot.start(self.clock.now(), &mut self.tasks);
    }

    /// Enter the main menu
    pub fn start(&mut self, c: &mut Collaborators<'_>) {
        self.flow.start(c.ui);
    }

    pub fn play_clicked(&mut self, c: &mut Collaborators<'_>) {
        c.audio.play_one_shot(Sound::ButtonClick);
        self.change_to(GameState::LevelSelect, c);
    }

    pub fn settings_clicked(&mut self, c: &mut Collaborators<'_>) {
        c.audio.play_one_shot(Sound::ButtonClick);
        self.change_to(GameState::Settings, c);
    }

    pub fn back_to_main_menu(&mut self, c: &mut Collaborators<'_>) {
        c.audio.play_one_shot(Sound::ButtonClick);
        self.change_to(GameState::MainMenu, c);
    }

    /// Load a level and start playing it. Returns false for locked levels.
    ///
    /// Levels without their own scene, or missing from the catalog, play in
    /// the demo scene.
    pub fn level_selected(&mut self, level_number: u32, c: &mut Collaborators<'_>) -> bool {
        if !self.progression.is_level_unlocked(level_number) {
            log::warn!("Level {level_number} is locked");
            return false;
        }

        let demo = self.config.demo_scene.as_str();
        let scene = match self.catalog.level(level_number) {
            Some(level) => level.scene_or(demo),
            None => {
                log::warn!("Level {level_number} not in catalog, loading demo scene");
                demo
            }
        };
        c.scenes.load(scene, &mut |p| log::debug!("Level load {:.0}%", p * 100.0));

        self.current_level = Some(level_number);
        self.scoreboard.start_level();
        self.change_to(GameState::Gameplay, c);
        self.spawn_controller(c.physics);
        log::info!("Playing level {level_number}");
        true
    }

    /// Resume at the first unplayed unlocked level, or open level select if
    /// everything is starred
    pub fn continue_clicked(&mut self, c: &mut Collaborators<'_>) {
        let resume = self
            .catalog
            .next_unlocked_level(self.progression.profile())
            .map(|level| level.level_number);
        match resume {
            Some(level_number) => {
                self.level_selected(level_number, c);
            }
            None => self.play_clicked(c),
        }
    }

    /// Record a level result and persist it
    pub fn complete_level(&mut self, level_number: u32, stars_earned: u32) -> Option<CompletionOutcome> {
        complete_level(
            &mut self.catalog,
            &mut self.progression,
            self.store.as_mut(),
            level_number,
            stars_earned,
        )
    }

    /// End the current level with a star rating and go back to level select
    pub fn finish_level(&mut self, stars_earned: u32, c: &mut Collaborators<'_>) -> Option<CompletionOutcome> {
        let level_number = self.current_level.take()?;
        let outcome = self.complete_level(level_number, stars_earned);
        self.change_to(GameState::LevelSelect, c);
        outcome
    }

    /// Route pointer input to the ball while playing
    pub fn handle_pointer(&mut self, event: PointerEvent, c: &mut Collaborators<'_>) -> Option<Shot> {
        if !self.flow.is_in(GameState::Gameplay) {
            return None;
        }
        let ball = self.ball.as_mut()?;
        ball.handle_pointer(event, c.physics, &mut self.tasks, self.clock.now())
    }

    /// Feed hoop trigger events delivered since the last frame. Returns the
    /// number of baskets made.
    pub fn handle_triggers(&mut self, events: &[TriggerEvent], c: &mut Collaborators<'_>) -> u32 {
        if !self.flow.is_in(GameState::Gameplay) {
            return 0;
        }
        self.hoop.process_events(events, &mut self.scoreboard, c.audio)
    }

    /// Aim line for the current drag
    pub fn preview_points(&mut self, physics: &dyn PhysicsWorld) -> Option<&[Vec3]> {
        self.ball.as_mut()?.preview_points(physics)
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32, c: &mut Collaborators<'_>) {
        self.clock.advance(dt);
        let now = self.clock.now();

        for task in self.tasks.poll(now) {
            match task {
                GameTask::Ball(task) => match &mut self.ball {
                    Some(ball) => ball.run_task(task, c.physics),
                    None => log::debug!("Ball task {task:?} with no ball"),
                },
                GameTask::Boot(task) => {
                    if self.boot.run_task(task, now, &mut self.tasks, Some(&mut *c.scenes)) {
                        self.flow.start(c.ui);
                    }
                }
            }
        }

        self.flow.update(dt);
        self.hoop.tick();
    }

    fn change_to(&mut self, state: GameState, c: &mut Collaborators<'_>) {
        if self.flow.is_in(GameState::Gameplay) && state != GameState::Gameplay {
            self.drop_controller(c.physics);
        }
        self.flow.change_to(state, c.ui);
    }

    fn spawn_controller(&mut self, physics: &mut dyn PhysicsWorld) {
        self.drop_controller(physics);
        let owner = self.next_owner;
        self.next_owner += 1;
        let mut ball = BallController::new(
            owner,
            self.config.shot.clone(),
            self.camera,
            self.screen_size,
            u64::from(owner),
        );
        ball.spawn_ball(physics);
        self.ball = Some(ball);
    }

    fn drop_controller(&mut self, physics: &mut dyn PhysicsWorld) {
        if let Some(mut ball) = self.ball.take() {
            ball.destroy(physics, &mut self.tasks);
        }
    }
}
