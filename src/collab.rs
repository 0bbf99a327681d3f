//! Interfaces to external collaborators
//!
//! Physics, UI panels, scene loading and audio live outside the core. The core
//! talks to them through these traits; the simple implementations here back the
//! headless binary and the tests.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Physics body handle
pub type BodyId = u32;

/// Rigid-body physics owned by the host engine
pub trait PhysicsWorld {
    /// Create a body at `pos`, returning its handle
    fn spawn_body(&mut self, pos: Vec3) -> BodyId;
    fn despawn_body(&mut self, body: BodyId);
    fn position(&self, body: BodyId) -> Option<Vec3>;
    fn set_velocity(&mut self, body: BodyId, vel: Vec3);
    fn set_kinematic(&mut self, body: BodyId, kinematic: bool);
    fn set_use_gravity(&mut self, body: BodyId, enabled: bool);
    /// Instantaneous velocity change
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3);
    /// Instantaneous angular velocity change
    fn apply_torque(&mut self, body: BodyId, torque: Vec3);
}

/// A body entered a trigger volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub body: BodyId,
    /// Body velocity at the moment of entry
    pub velocity: Vec3,
}

/// Pointer input, screen space (pixels, Y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { pos: Vec2, time: f64 },
    Move { pos: Vec2 },
    Release { pos: Vec2, time: f64 },
}

/// UI panels owned by the screen states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    MainMenu,
    Settings,
    LevelSelect,
    Gameplay,
}

impl Panel {
    pub fn id(&self) -> &'static str {
        match self {
            Panel::MainMenu => "MainMenuPanel",
            Panel::Settings => "SettingsPanel",
            Panel::LevelSelect => "LevelSelectPanel",
            Panel::Gameplay => "GameplayPanel",
        }
    }
}

pub trait UiPanels {
    fn show_panel(&mut self, panel: Panel);
    fn hide_panel(&mut self, panel: Panel);
    fn hide_all_panels(&mut self);
    fn is_panel_visible(&self, panel: Panel) -> bool;
}

/// Scene loading. Completion is signalled by returning; `on_progress`
/// receives fractional progress in [0, 1] along the way.
pub trait SceneLoader {
    fn load(&mut self, scene: &str, on_progress: &mut dyn FnMut(f32));
    fn current_scene(&self) -> Option<&str>;
}

/// Sound clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    ButtonClick,
    BasketScored,
}

/// Fire-and-forget audio playback
pub trait AudioSink {
    fn play_one_shot(&mut self, sound: Sound);
}

// === Simple implementations ===

/// Panel visibility tracker
#[derive(Debug, Default)]
pub struct PanelSet {
    visible: Vec<Panel>,
}

impl PanelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &[Panel] {
        &self.visible
    }
}

impl UiPanels for PanelSet {
    fn show_panel(&mut self, panel: Panel) {
        if !self.visible.contains(&panel) {
            log::debug!("Show {}", panel.id());
            self.visible.push(panel);
        }
    }

    fn hide_panel(&mut self, panel: Panel) {
        self.visible.retain(|p| *p != panel);
    }

    fn hide_all_panels(&mut self) {
        self.visible.clear();
    }

    fn is_panel_visible(&self, panel: Panel) -> bool {
        self.visible.contains(&panel)
    }
}

/// Scene loader that completes instantly and remembers what was loaded
#[derive(Debug, Default)]
pub struct InstantSceneLoader {
    pub history: Vec<String>,
}

impl SceneLoader for InstantSceneLoader {
    fn load(&mut self, scene: &str, on_progress: &mut dyn FnMut(f32)) {
        log::info!("Loading scene '{scene}'");
        on_progress(1.0);
        self.history.push(scene.to_string());
    }

    fn current_scene(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

/// Audio sink that logs and records played clips
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: Vec<Sound>,
}

impl AudioSink for LogAudio {
    fn play_one_shot(&mut self, sound: Sound) {
        log::debug!("Play {sound:?}");
        self.played.push(sound);
    }
}

/// Axis-aligned trigger volume
#[derive(Debug, Clone, Copy)]
pub struct TriggerBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl TriggerBox {
    pub fn around(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

#[derive(Debug, Clone)]
struct Body {
    id: BodyId,
    pos: Vec3,
    vel: Vec3,
    angular_vel: Vec3,
    kinematic: bool,
    use_gravity: bool,
    /// Trigger indices the body was inside last step
    inside: Vec<usize>,
}

/// Point-mass physics: gravity, no collisions, trigger-enter detection.
///
/// Enough to carry a released ball through a hoop trigger in headless runs.
#[derive(Debug)]
pub struct BallisticWorld {
    gravity: Vec3,
    bodies: Vec<Body>,
    triggers: Vec<TriggerBox>,
    next_id: BodyId,
}

impl Default for BallisticWorld {
    fn default() -> Self {
        Self::new(crate::default_gravity())
    }
}

impl BallisticWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            triggers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_trigger(&mut self, trigger: TriggerBox) {
        self.triggers.push(trigger);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn velocity(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|b| b.vel)
    }

    pub fn angular_velocity(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|b| b.angular_vel)
    }

    pub fn is_kinematic(&self, body: BodyId) -> Option<bool> {
        self.body(body).map(|b| b.kinematic)
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Integrate one fixed step, returning trigger-enter events
    pub fn step(&mut self, dt: f32) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        for body in &mut self.bodies {
            if body.kinematic {
                continue;
            }
            if body.use_gravity {
                body.vel += self.gravity * dt;
            }
            body.pos += body.vel * dt;

            for (i, trigger) in self.triggers.iter().enumerate() {
                let now_inside = trigger.contains(body.pos);
                let was_inside = body.inside.contains(&i);
                if now_inside && !was_inside {
                    body.inside.push(i);
                    events.push(TriggerEvent {
                        body: body.id,
                        velocity: body.vel,
                    });
                } else if !now_inside && was_inside {
                    body.inside.retain(|&t| t != i);
                }
            }
        }
        events
    }
}

impl PhysicsWorld for BallisticWorld {
    fn spawn_body(&mut self, pos: Vec3) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            pos,
            vel: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
            kinematic: false,
            use_gravity: true,
            inside: Vec::new(),
        });
        id
    }

    fn despawn_body(&mut self, body: BodyId) {
        self.bodies.retain(|b| b.id != body);
    }

    fn position(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|b| b.pos)
    }

    fn set_velocity(&mut self, body: BodyId, vel: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.vel = vel;
        }
    }

    fn set_kinematic(&mut self, body: BodyId, kinematic: bool) {
        if let Some(b) = self.body_mut(body) {
            b.kinematic = kinematic;
        }
    }

    fn set_use_gravity(&mut self, body: BodyId, enabled: bool) {
        if let Some(b) = self.body_mut(body) {
            b.use_gravity = enabled;
        }
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.vel += impulse;
        }
    }

    fn apply_torque(&mut self, body: BodyId, torque: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.angular_vel += torque;
        }
    }
}
