//! Progression meta-game
//!
//! Player experience and level, per-level star ratings, and the unlock rules
//! that chain levels into seasons:
//! - A level is playable once the unlock frontier reaches it
//! - Season 1 is always open; season N opens when season N-1 is fully starred
//! - Completing a level advances the frontier, grants experience, and may
//!   open the next season

pub mod catalog;
pub mod level;
pub mod map;
pub mod profile;
pub mod season;
pub mod unlock;

pub use catalog::Catalog;
pub use level::{LevelDescriptor, LevelKind};
pub use map::{MapLayout, MapLayoutConfig, MapPath, NodeStatus, layout_map, map_paths, node_status};
pub use profile::{PlayerProfile, ProgressionStore};
pub use season::SeasonDescriptor;
pub use unlock::{CompletionOutcome, complete_level};
