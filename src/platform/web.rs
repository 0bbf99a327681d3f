//! Browser entry point
//!
//! `WebGame` wraps an [`AppContext`] with headless collaborators and exposes
//! the commands the HTML/JS front end needs. The page drives it from
//! `requestAnimationFrame` and pointer listeners.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::app::{AppContext, Collaborators};
use crate::collab::{BallisticWorld, InstantSceneLoader, LogAudio, PanelSet, PointerEvent, TriggerBox};
use crate::config::GameConfig;
use crate::persistence::LocalStorageStore;

const STORAGE_KEY: &str = "basket_legend_save";

/// Hoop trigger in front of the default camera
const HOOP_CENTER: glam::Vec3 = glam::Vec3::new(0.0, 3.05, 6.0);
const HOOP_HALF_EXTENTS: glam::Vec3 = glam::Vec3::new(0.25, 0.05, 0.25);

#[wasm_bindgen]
pub struct WebGame {
    app: AppContext,
    world: BallisticWorld,
    ui: PanelSet,
    scenes: InstantSceneLoader,
    audio: LogAudio,
    /// Timestamp of the previous frame (ms), 0 before the first
    last_time: f64,
}

impl WebGame {
    fn parts(&mut self) -> (&mut AppContext, Collaborators<'_>) {
        (
            &mut self.app,
            Collaborators {
                physics: &mut self.world,
                ui: &mut self.ui,
                scenes: &mut self.scenes,
                audio: &mut self.audio,
            },
        )
    }

    fn pointer(&mut self, event: PointerEvent) {
        let (app, mut c) = self.parts();
        app.handle_pointer(event, &mut c);
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        super::init_logging();
        log::info!("Basket Legend (web) starting...");

        let config = GameConfig::default();
        let mut world = BallisticWorld::new(config.shot.gravity);
        world.add_trigger(TriggerBox::around(HOOP_CENTER, HOOP_HALF_EXTENTS));

        let mut app = AppContext::new(config, Box::new(LocalStorageStore::open(STORAGE_KEY)));
        app.set_screen_size(Vec2::new(width, height));
        app.begin_boot();

        WebGame {
            app,
            world,
            ui: PanelSet::new(),
            scenes: InstantSceneLoader::default(),
            audio: LogAudio::default(),
            last_time: 0.0,
        }
    }

    /// One animation frame; `time_ms` is the rAF timestamp
    pub fn frame(&mut self, time_ms: f64) {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0).min(0.1) as f32
        } else {
            0.0
        };
        self.last_time = time_ms;

        let events = self.world.step(dt);
        let (app, mut c) = self.parts();
        app.handle_triggers(&events, &mut c);
        app.tick(dt, &mut c);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.app.set_screen_size(Vec2::new(width, height));
    }

    /// Pointer coordinates are in CSS pixels with Y down; shots use Y up
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let pos = Vec2::new(x, -y);
        self.pointer(PointerEvent::Press {
            pos,
            time: super::now_seconds(),
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer(PointerEvent::Move { pos: Vec2::new(x, -y) });
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        let pos = Vec2::new(x, -y);
        self.pointer(PointerEvent::Release {
            pos,
            time: super::now_seconds(),
        });
    }

    /// Flattened xyz triples for the aim line, empty when not aiming
    pub fn preview(&mut self) -> Vec<f32> {
        self.app
            .preview_points(&self.world)
            .map(|points| points.iter().flat_map(|p| p.to_array()).collect())
            .unwrap_or_default()
    }

    pub fn play_clicked(&mut self) {
        let (app, mut c) = self.parts();
        app.play_clicked(&mut c);
    }

    pub fn continue_clicked(&mut self) {
        let (app, mut c) = self.parts();
        app.continue_clicked(&mut c);
    }

    pub fn settings_clicked(&mut self) {
        let (app, mut c) = self.parts();
        app.settings_clicked(&mut c);
    }

    pub fn back_to_main_menu(&mut self) {
        let (app, mut c) = self.parts();
        app.back_to_main_menu(&mut c);
    }

    pub fn level_selected(&mut self, level_number: u32) -> bool {
        let (app, mut c) = self.parts();
        app.level_selected(level_number, &mut c)
    }

    pub fn finish_level(&mut self, stars: u32) {
        let (app, mut c) = self.parts();
        app.finish_level(stars, &mut c);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.app.edit_settings(|s, store| s.set_master_volume(volume, store));
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.app.edit_settings(|s, store| s.set_muted(muted, store));
    }

    /// Current screen name, empty while the splash is up
    pub fn state(&self) -> String {
        self.app.state().map(|s| s.name().to_string()).unwrap_or_default()
    }

    pub fn boot_progress(&self) -> f32 {
        self.app.boot().progress()
    }

    pub fn boot_message(&self) -> String {
        self.app.boot().message().to_string()
    }

    pub fn score(&self) -> u32 {
        self.app.scoreboard().total()
    }

    pub fn player_level(&self) -> u32 {
        self.app.profile().level
    }

    pub fn unlocked_levels(&self) -> u32 {
        self.app.profile().unlocked_levels
    }
}
