//! Shot engine
//!
//! - `force`: swipe → launch vector, oriented by the camera
//! - `trajectory`: closed-form ballistic sampling for the preview line
//! - `controller`: one ball's spawn/aim/release/respawn cycle
//! - `score`: hoop trigger → basket detection

pub mod controller;
pub mod force;
pub mod score;
pub mod trajectory;

pub use controller::{BallController, BallPhase, BallTask, Shot};
pub use force::{CameraBasis, compute_force, is_launchable, power_fraction, spin_torque};
pub use score::{HoopState, ScoreDetector, Scoreboard};
pub use trajectory::{Trajectory, position_at, simulate};
