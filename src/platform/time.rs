//! Fixed timestep accumulator

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame deltas into a whole number of fixed simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed time; returns how many fixed steps to run
    ///
    /// Long frames (tab switches, debugger pauses) are clamped so the
    /// simulation never tries to catch up on more than `max_substeps`.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_substeps {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    /// The fixed delta time
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).min(1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
