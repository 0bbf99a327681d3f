//! Ball lifecycle: spawn → aim (drag) → release → respawn
//!
//! The ball rests kinematically in front of the camera until the player drags.
//! While dragging, the shot is recomputed from the current pointer and the
//! preview line is refreshed lazily. On release a long-enough swipe hands the
//! launch vector to physics and queues a respawn; a short one leaves the ball
//! where it was.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::force::{CameraBasis, compute_force, is_launchable, spin_torque};
use super::trajectory::Trajectory;
use crate::collab::{BodyId, PhysicsWorld, PointerEvent};
use crate::config::ShotTuning;
use crate::consts::BALL_DROP_BELOW_CAMERA;
use crate::schedule::{OwnerId, TaskHandle, TaskScheduler};

/// Deferred ball actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallTask {
    Respawn,
}

/// One drag-to-release gesture's shot
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub origin: Vec3,
    /// Velocity change applied on release
    pub launch: Vec3,
    pub swipe: Vec2,
    /// Far enough to fire on release
    pub launchable: bool,
}

impl Shot {
    /// Preview path from the ball outward
    pub fn trajectory(&self, tuning: &ShotTuning) -> Trajectory {
        Trajectory::preview(
            self.origin,
            self.launch,
            tuning.gravity,
            tuning.trajectory_dt,
            tuning.trajectory_steps,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    /// No ball spawned
    Empty,
    Resting,
    Aiming,
    InFlight,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Vec2,
    current: Vec2,
    started_at: f64,
}

#[derive(Debug)]
pub struct BallController {
    id: OwnerId,
    tuning: ShotTuning,
    camera: CameraBasis,
    screen_size: Vec2,
    ball: Option<BodyId>,
    in_flight: bool,
    drag: Option<Drag>,
    /// Cached preview; `None` until recomputed after the pointer moves
    preview: Option<Vec<Vec3>>,
    respawn: Option<TaskHandle>,
    rng: Pcg32,
}

impl BallController {
    pub fn new(id: OwnerId, tuning: ShotTuning, camera: CameraBasis, screen_size: Vec2, seed: u64) -> Self {
        Self {
            id,
            tuning,
            camera,
            screen_size,
            ball: None,
            in_flight: false,
            drag: None,
            preview: None,
            respawn: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn ball(&self) -> Option<BodyId> {
        self.ball
    }

    pub fn tuning(&self) -> &ShotTuning {
        &self.tuning
    }

    pub fn phase(&self) -> BallPhase {
        match (self.ball, self.in_flight, self.drag.is_some()) {
            (None, _, _) => BallPhase::Empty,
            (Some(_), true, _) => BallPhase::InFlight,
            (Some(_), false, true) => BallPhase::Aiming,
            (Some(_), false, false) => BallPhase::Resting,
        }
    }

    pub fn set_screen_size(&mut self, size: Vec2) {
        self.screen_size = size;
        self.preview = None;
    }

    pub fn set_camera(&mut self, camera: CameraBasis) {
        self.camera = camera;
        self.preview = None;
    }

    /// In front of the camera, slightly below eye level
    pub fn spawn_position(&self) -> Vec3 {
        let mut pos = self.camera.position + self.camera.forward * self.tuning.ball_distance;
        pos.y = self.camera.position.y - BALL_DROP_BELOW_CAMERA;
        pos
    }

    /// Replace any existing ball with a fresh one at rest
    pub fn spawn_ball(&mut self, physics: &mut dyn PhysicsWorld) -> BodyId {
        if let Some(old) = self.ball.take() {
            physics.despawn_body(old);
        }
        let body = physics.spawn_body(self.spawn_position());
        physics.set_kinematic(body, true);
        physics.set_use_gravity(body, false);

        self.ball = Some(body);
        self.in_flight = false;
        self.drag = None;
        self.preview = None;
        log::debug!("Spawned ball {body}");
        body
    }

    /// Begin a drag. Ignored without a resting ball.
    pub fn press(&mut self, pos: Vec2, time: f64) -> bool {
        if self.phase() != BallPhase::Resting {
            return false;
        }
        self.drag = Some(Drag {
            start: pos,
            current: pos,
            started_at: time,
        });
        self.preview = None;
        true
    }

    pub fn drag_to(&mut self, pos: Vec2) {
        if let Some(drag) = &mut self.drag {
            if drag.current != pos {
                drag.current = pos;
                self.preview = None;
            }
        }
    }

    /// The shot the current drag would fire
    pub fn current_shot(&self, physics: &dyn PhysicsWorld) -> Option<Shot> {
        let drag = self.drag?;
        let origin = physics.position(self.ball?)?;
        Some(self.shot_for(origin, drag.current - drag.start))
    }

    fn shot_for(&self, origin: Vec3, swipe: Vec2) -> Shot {
        Shot {
            origin,
            launch: compute_force(swipe, self.screen_size, &self.camera, self.tuning.max_force),
            swipe,
            launchable: is_launchable(swipe, self.tuning.min_swipe_distance),
        }
    }

    /// Preview positions for the current drag, recomputed only after the
    /// pointer moved
    pub fn preview_points(&mut self, physics: &dyn PhysicsWorld) -> Option<&[Vec3]> {
        if self.preview.is_none() {
            let shot = self.current_shot(physics)?;
            self.preview = Some(shot.trajectory(&self.tuning).collect());
        }
        self.preview.as_deref()
    }

    /// End the drag. Returns the fired shot, or `None` if nothing launched.
    pub fn release<T: From<BallTask>>(
        &mut self,
        pos: Vec2,
        time: f64,
        physics: &mut dyn PhysicsWorld,
        scheduler: &mut TaskScheduler<T>,
        now: f64,
    ) -> Option<Shot> {
        let drag = self.drag.take()?;
        self.preview = None;
        let ball = self.ball?;

        let Some(origin) = physics.position(ball) else {
            log::warn!("Ball {ball} missing from physics, dropping shot");
            self.ball = None;
            return None;
        };

        let shot = self.shot_for(origin, pos - drag.start);
        if !shot.launchable {
            physics.set_velocity(ball, Vec3::ZERO);
            log::debug!("Swipe too short ({:.1}px), ball stays", shot.swipe.length());
            return None;
        }

        physics.set_kinematic(ball, false);
        physics.set_use_gravity(ball, true);
        physics.apply_impulse(ball, shot.launch);
        physics.apply_torque(ball, spin_torque(shot.swipe, &mut self.rng));
        self.in_flight = true;

        if let Some(pending) = self.respawn.take() {
            scheduler.cancel(pending);
        }
        self.respawn = Some(scheduler.schedule(
            now,
            self.tuning.respawn_delay,
            Some(self.id),
            BallTask::Respawn.into(),
        ));

        log::info!(
            "Shot fired: force {:.2} after {:.2}s swipe",
            shot.launch.length(),
            time - drag.started_at
        );
        Some(shot)
    }

    /// Route a pointer event. Returns the shot if a release fired one.
    pub fn handle_pointer<T: From<BallTask>>(
        &mut self,
        event: PointerEvent,
        physics: &mut dyn PhysicsWorld,
        scheduler: &mut TaskScheduler<T>,
        now: f64,
    ) -> Option<Shot> {
        match event {
            PointerEvent::Press { pos, time } => {
                self.press(pos, time);
                None
            }
            PointerEvent::Move { pos } => {
                self.drag_to(pos);
                None
            }
            PointerEvent::Release { pos, time } => self.release(pos, time, physics, scheduler, now),
        }
    }

    pub fn run_task(&mut self, task: BallTask, physics: &mut dyn PhysicsWorld) {
        match task {
            BallTask::Respawn => {
                self.respawn = None;
                self.spawn_ball(physics);
            }
        }
    }

    /// Tear down: cancel pending tasks and remove the ball
    pub fn destroy<T>(&mut self, physics: &mut dyn PhysicsWorld, scheduler: &mut TaskScheduler<T>) {
        let cancelled = scheduler.cancel_owner(self.id);
        if cancelled > 0 {
            log::debug!("Cancelled {cancelled} pending ball task(s)");
        }
        self.respawn = None;
        if let Some(ball) = self.ball.take() {
            physics.despawn_body(ball);
        }
        self.drag = None;
        self.preview = None;
        self.in_flight = false;
    }
}
