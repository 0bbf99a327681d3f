//! Basket Legend entry point
//!
//! Native builds run a scripted headless session against the JSON save file:
//! boot, resume the next level, take a shot through a hoop trigger and record
//! the result. The browser build starts from `platform::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use glam::{Vec2, Vec3};

    use basket_legend::app::{AppContext, Collaborators};
    use basket_legend::collab::{BallisticWorld, InstantSceneLoader, LogAudio, PanelSet, PointerEvent, TriggerBox};
    use basket_legend::flow::GameState;
    use basket_legend::persistence::JsonFileStore;
    use basket_legend::progression::layout_map;
    use basket_legend::shot::{CameraBasis, compute_force, simulate};
    use basket_legend::{GameConfig, platform};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const RIM_HEIGHT: f32 = 3.05;
    /// Swipe used for the demo shot (pixels, Y up)
    const DEMO_SWIPE: Vec2 = Vec2::new(0.0, 240.0);

    struct Host {
        world: BallisticWorld,
        ui: PanelSet,
        scenes: InstantSceneLoader,
        audio: LogAudio,
    }

    impl Host {
        fn collab(&mut self) -> Collaborators<'_> {
            Collaborators {
                physics: &mut self.world,
                ui: &mut self.ui,
                scenes: &mut self.scenes,
                audio: &mut self.audio,
            }
        }

        /// Step physics and the app together for `seconds`
        fn run(&mut self, app: &mut AppContext, seconds: f32) {
            let frames = (seconds / FRAME_DT).ceil() as u32;
            for _ in 0..frames {
                let events = self.world.step(FRAME_DT);
                app.handle_triggers(&events, &mut self.collab());
                app.tick(FRAME_DT, &mut self.collab());
            }
        }
    }

    /// Where the demo shot comes back down through rim height
    fn hoop_position(config: &GameConfig, origin: Vec3, screen: Vec2) -> Option<Vec3> {
        let launch = compute_force(DEMO_SWIPE, screen, &CameraBasis::default(), config.shot.max_force);
        let path = simulate(origin, launch, config.shot.gravity, 0.01, 500);
        path.windows(2)
            .find(|w| w[0].y > RIM_HEIGHT && w[1].y <= RIM_HEIGHT)
            .map(|w| w[1])
    }

    pub fn run() {
        platform::init_logging();
        log::info!("Basket Legend (native) starting...");

        let mut args = std::env::args().skip(1);
        let save_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("basket_legend_save.json"));
        let config = args
            .next()
            .map(|path| GameConfig::load_or_default(std::path::Path::new(&path)))
            .unwrap_or_default();

        let mut host = Host {
            world: BallisticWorld::new(config.shot.gravity),
            ui: PanelSet::new(),
            scenes: InstantSceneLoader::default(),
            audio: LogAudio::default(),
        };
        let mut app = AppContext::new(config.clone(), Box::new(JsonFileStore::open(&save_path)));

        let profile = app.profile();
        log::info!(
            "Profile '{}': level {} ({} / {} xp), {} levels unlocked",
            profile.name,
            profile.level,
            profile.experience,
            app.progression().experience_threshold(),
            profile.unlocked_levels
        );

        let mut map = app.catalog().clone();
        let layout = layout_map(&mut map, &config.map);
        for (season, y) in &layout.season_headers {
            log::info!(
                "Season {season} header at y={y:.0}, {}% complete",
                (map.season_progress_fraction(*season) * 100.0).round()
            );
        }

        // Splash
        app.begin_boot();
        while app.state().is_none() {
            host.run(&mut app, 0.1);
        }
        log::info!("Boot done at t={:.2}s", app.now());

        // Resume
        app.continue_clicked(&mut host.collab());
        if app.state() != Some(GameState::Gameplay) {
            log::info!("Every unlocked level already has stars, nothing to resume");
            return;
        }

        let Some(origin) = app.ball().map(|b| b.spawn_position()) else {
            log::warn!("No ball spawned");
            return;
        };
        match hoop_position(&config, origin, Vec2::new(1080.0, 1920.0)) {
            Some(hoop) => {
                log::info!("Hoop at {hoop:?}");
                host.world
                    .add_trigger(TriggerBox::around(hoop, Vec3::new(0.5, 0.3, 0.5)));
            }
            None => log::warn!("Demo shot never reaches rim height"),
        }

        // Shoot
        let press = Vec2::new(540.0, 300.0);
        app.handle_pointer(PointerEvent::Press { pos: press, time: app.now() }, &mut host.collab());
        app.handle_pointer(PointerEvent::Move { pos: press + DEMO_SWIPE * 0.5 }, &mut host.collab());
        if let Some(points) = app.preview_points(&host.world) {
            log::info!("Preview: {} points, ending at {:?}", points.len(), points.last());
        }
        let shot = app.handle_pointer(
            PointerEvent::Release {
                pos: press + DEMO_SWIPE,
                time: app.now() + 0.25,
            },
            &mut host.collab(),
        );
        if let Some(shot) = shot {
            log::info!("Launched at {:.1} m/s", shot.launch.length());
        }
        host.run(&mut app, 3.5);

        // Result
        let baskets = app.scoreboard().level_baskets();
        let stars = baskets.min(3);
        log::info!("Scored {} points ({baskets} baskets)", app.scoreboard().total());
        match app.finish_level(stars, &mut host.collab()) {
            Some(outcome) => log::info!("Level complete: {outcome:?}"),
            None => log::warn!("No level in progress"),
        }
        log::info!(
            "Player level {}, {} levels unlocked, saved to {}",
            app.profile().level,
            app.profile().unlocked_levels,
            save_path.display()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}
