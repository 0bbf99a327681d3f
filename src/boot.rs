//! Splash-screen boot sequence
//!
//! Walks a fixed list of loading stages, each held on screen for a moment,
//! then waits out the minimum splash time before asking the scene loader for
//! the game scene. Each step is a scheduled task so the frame loop never
//! blocks.

use crate::collab::SceneLoader;
use crate::schedule::{OwnerId, TaskScheduler};

/// Scheduler owner for boot tasks
pub const BOOT_OWNER: OwnerId = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootStage {
    pub progress: f32,
    pub message: &'static str,
    /// Seconds the stage stays up before the next one
    pub hold: f32,
}

pub const BOOT_STAGES: [BootStage; 4] = [
    BootStage {
        progress: 0.2,
        message: "Loading Player Data...",
        hold: 0.3,
    },
    BootStage {
        progress: 0.5,
        message: "Loading Game Settings...",
        hold: 0.3,
    },
    BootStage {
        progress: 0.8,
        message: "Preparing Game...",
        hold: 0.3,
    },
    BootStage {
        progress: 1.0,
        message: "Ready!",
        hold: 0.2,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootTask {
    /// Show stage `n`
    Stage(usize),
    /// Stages done; load the game scene once the splash has been up long enough
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Idle,
    Loading,
    Done,
}

#[derive(Debug)]
pub struct BootSequence {
    game_scene: String,
    minimum_splash_time: f32,
    started_at: f64,
    phase: BootPhase,
    progress: f32,
    message: &'static str,
}

impl BootSequence {
    pub fn new(game_scene: impl Into<String>, minimum_splash_time: f32) -> Self {
        Self {
            game_scene: game_scene.into(),
            minimum_splash_time,
            started_at: 0.0,
            phase: BootPhase::Idle,
            progress: 0.0,
            message: "",
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    /// Loading bar fraction
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Show the first stage and queue the rest
    pub fn start<T: From<BootTask>>(&mut self, now: f64, scheduler: &mut TaskScheduler<T>) {
        if self.phase != BootPhase::Idle {
            log::warn!("Boot sequence already started");
            return;
        }
        self.started_at = now;
        self.phase = BootPhase::Loading;
        self.run_task(BootTask::Stage(0), now, scheduler, None);
    }

    /// Run a due boot task. Returns true once the game scene has loaded.
    pub fn run_task<T: From<BootTask>>(
        &mut self,
        task: BootTask,
        now: f64,
        scheduler: &mut TaskScheduler<T>,
        loader: Option<&mut dyn SceneLoader>,
    ) -> bool {
        match task {
            BootTask::Stage(index) => {
                let Some(stage) = BOOT_STAGES.get(index) else {
                    return false;
                };
                self.progress = stage.progress;
                self.message = stage.message;
                log::info!("{} ({:.0}%)", stage.message, stage.progress * 100.0);

                let next = if index + 1 < BOOT_STAGES.len() {
                    BootTask::Stage(index + 1)
                } else {
                    BootTask::Finish
                };
                scheduler.schedule(now, stage.hold, Some(BOOT_OWNER), next.into());
                false
            }
            BootTask::Finish => {
                let elapsed = (now - self.started_at) as f32;
                if elapsed < self.minimum_splash_time {
                    let remaining = self.minimum_splash_time - elapsed;
                    scheduler.schedule(now, remaining, Some(BOOT_OWNER), BootTask::Finish.into());
                    return false;
                }
                let Some(loader) = loader else {
                    log::warn!("No scene loader, cannot leave splash");
                    return false;
                };
                loader.load(&self.game_scene, &mut |p| {
                    log::debug!("Scene load {:.0}%", p * 100.0);
                });
                self.phase = BootPhase::Done;
                log::info!("Boot finished after {elapsed:.2}s");
                true
            }
        }
    }

    /// Drop any pending boot steps
    pub fn abort<T>(&mut self, scheduler: &mut TaskScheduler<T>) {
        scheduler.cancel_owner(BOOT_OWNER);
        if self.phase == BootPhase::Loading {
            self.phase = BootPhase::Idle;
        }
    }
}
