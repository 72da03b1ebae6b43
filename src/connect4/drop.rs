//! Disc drop animation
//!
//! Heights are in board cells: row `r` rests at `r + 0.5`, discs enter
//! from `DROP_START_HEIGHT`.

use super::board::{Disc, ROWS};

/// Seconds for a disc to fall into place
pub const DROP_DURATION: f32 = 1.0;
/// Height a disc appears at above the board
pub const DROP_START_HEIGHT: f32 = ROWS as f32 + 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity
    Linear,
    /// Slow end
    #[default]
    QuadOut,
}

impl Easing {
    /// Map normalized time `t` in [0, 1] to progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// A disc on its way down a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropAnimation {
    pub column: usize,
    /// Row the disc will occupy when it lands
    pub row: usize,
    pub disc: Disc,
    pub elapsed: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl DropAnimation {
    pub fn new(column: usize, row: usize, disc: Disc) -> Self {
        Self {
            column,
            row,
            disc,
            elapsed: 0.0,
            duration: DROP_DURATION,
            easing: Easing::QuadOut,
        }
    }

    pub fn rest_height(&self) -> f32 {
        self.row as f32 + 0.5
    }

    /// Current disc height
    pub fn height(&self) -> f32 {
        let t = self.easing.apply(self.progress());
        DROP_START_HEIGHT + (self.rest_height() - DROP_START_HEIGHT) * t
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Advance by `dt`; returns true once the disc has landed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
