//! Platform abstraction layer
//!
//! Everything the simulation needs from its host:
//! - Frame timing (variable frame deltas in, fixed steps out)
//! - Presentation (rendering, score and game-over display)

pub mod presenter;
pub mod time;

pub use presenter::{NullPresenter, Presenter};
pub use time::FrameClock;
