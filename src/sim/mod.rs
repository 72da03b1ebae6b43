//! Deterministic simulation module
//!
//! All runner gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (pool slot / spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod object;
pub mod player;
pub mod segment;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::{Difficulty, gap_probability, path_width, platform_probability};
pub use object::{Obstacle, Platform, WorldObject};
pub use player::{DeathCause, Player, PlayerState};
pub use segment::{PathSegment, SegmentPool};
pub use spawner::ObjectField;
pub use state::{Camera, GameEvent, GameState};
pub use tick::{TickInput, tick};
