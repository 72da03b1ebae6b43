//! Connect-Four mini-game
//!
//! A 7x6 board, two discs, a turn state machine with an animated drop and an
//! optional random computer opponent. Like the runner simulation this module
//! is deterministic for a given seed and has no rendering dependencies.

pub mod board;
pub mod drop;
pub mod game;

pub use board::{Board, COLUMNS, Disc, ROWS};
pub use drop::{DropAnimation, Easing};
pub use game::{Match, MatchEvent, Mode, Phase};
