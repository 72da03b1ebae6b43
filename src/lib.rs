//! Neon Runner - gameplay cores for an endless runner and Connect-Four
//!
//! Core modules:
//! - `sim`: Deterministic runner simulation (difficulty, path, spawning, player physics)
//! - `connect4`: Connect-Four board, win detection and turn state machine
//! - `schedule`: Generation-tagged deferred actions
//! - `platform`: Presentation collaborator and frame clock
//! - `app`: Host-facing glue driving the runner each frame
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod connect4;
pub mod platform;
pub mod schedule;
pub mod sim;
pub mod tuning;

pub use app::RunnerApp;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Path width before shrinking starts
    pub const BASE_PATH_WIDTH: f32 = 10.0;
    /// Narrowest the path ever gets
    pub const MIN_PATH_WIDTH: f32 = 3.0;
    /// Score where shrinking begins
    pub const SHRINK_START_SCORE: f32 = 150.0;
    /// Score where the minimum width is reached
    pub const SHRINK_FULL_SCORE: f32 = 1200.0;
    /// Score where gaps can begin
    pub const GAP_START_SCORE: f32 = 300.0;
    /// Score where the maximum gap probability is reached
    pub const GAP_FULL_SCORE: f32 = 1500.0;
    /// Gap probability never exceeds this
    pub const MAX_GAP_PROBABILITY: f32 = 0.35;
    /// Platform vs obstacle probability at score 0
    pub const BASE_PLATFORM_PROBABILITY: f32 = 0.85;
    /// Added platform probability at saturation
    pub const PLATFORM_PROBABILITY_GAIN: f32 = 0.12;
    /// Score where platform probability stops growing
    pub const PLATFORM_SATURATION_SCORE: f32 = 1200.0;

    /// Length of one path segment along the travel axis
    pub const SEGMENT_LENGTH: f32 = 50.0;
    /// Segments in the recycled pool
    pub const INITIAL_SEGMENTS: usize = 10;
    /// Camera position on the travel axis
    pub const CAMERA_Z: f32 = 10.0;
    /// Objects are removed once this far past the camera
    pub const DESPAWN_MARGIN: f32 = 5.0;
    /// World scroll speed at the start of a run (units/s)
    pub const INITIAL_SPEED: f32 = 10.0;
    /// Scroll speed gained per second
    pub const SPEED_GAIN: f32 = 0.05;
    /// Score gained per second survived
    pub const SCORE_RATE: f32 = 10.0;

    /// Keep spawned objects this far inside the path edge
    pub const LATERAL_SPAWN_MARGIN: f32 = 0.8;
    /// Paths narrower than this get an extra center spawn attempt
    pub const NARROW_PATH_WIDTH: f32 = 6.0;
    /// Chance of the extra center spawn on a narrow path
    pub const NARROW_EXTRA_SPAWN_PROBABILITY: f32 = 0.75;
    /// Fraction of a gap segment covered by forced platforms
    pub const GAP_USABLE_FRACTION: f32 = 0.8;
    /// Minimum spacing between platforms laid across a gap
    pub const MIN_GAP_PLATFORM_DISTANCE: f32 = 6.0;
    /// Jitter added to the gap platform spacing, as a fraction of the minimum
    pub const GAP_PLATFORM_JITTER: f32 = 0.5;
    /// Lowest platform center height
    pub const PLATFORM_HEIGHT_MIN: f32 = 1.0;
    /// Platform center heights span `[MIN, MIN + RANGE)`
    pub const PLATFORM_HEIGHT_RANGE: f32 = 3.5;
    /// Platform box extents (x, y, z)
    pub const PLATFORM_SIZE: [f32; 3] = [2.0, 0.5, 2.0];
    /// Obstacle box extents (x, y, z)
    pub const OBSTACLE_SIZE: [f32; 3] = [1.0, 1.2, 1.0];
    /// Obstacles rest on the ground
    pub const OBSTACLE_HEIGHT: f32 = 0.6;
    /// First pool index that gets objects at game start
    pub const INITIAL_POPULATE_FROM: usize = 2;

    /// Player sphere radius; also the standing height of its center
    pub const PLAYER_RADIUS: f32 = 0.5;
    /// Vertical acceleration while airborne (units/s^2)
    pub const GRAVITY: f32 = -20.0;
    /// Upward velocity set on take-off (units/s)
    pub const JUMP_IMPULSE: f32 = 12.0;
    /// Falling below this height ends the run
    pub const DEATH_FLOOR: f32 = -15.0;
    /// Keep the player this far inside the path edge
    pub const POINTER_MARGIN: f32 = 0.6;
    /// Previous-frame feet may sit this far below a platform top and still land
    pub const LANDING_TOLERANCE_ABOVE: f32 = 0.05;
    /// Current-frame feet may sink this far below a platform top and still land
    pub const LANDING_TOLERANCE_BELOW: f32 = 0.15;
    /// Camera sits this far above the player
    pub const CAMERA_HEIGHT: f32 = 4.0;
    /// Fraction of the remaining height gap the camera closes per tick
    pub const CAMERA_FOLLOW: f32 = 0.1;

    /// Neon palette for platforms
    pub const NEON_COLORS: [u32; 5] = [0x00eaff, 0xff2bff, 0x9d4dff, 0xff5fa2, 0x007bff];
    /// Obstacle color (0xRRGGBB)
    pub const OBSTACLE_COLOR: u32 = 0xff0000;
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Progress of `value` through `[start, end]`, clamped to [0, 1]
///
/// Values below `start` give 0 and values past `end` give 1.
#[inline]
pub fn ramp(value: f32, start: f32, end: f32) -> f32 {
    if value <= start {
        return 0.0;
    }
    ((value - start) / (end - start)).min(1.0)
}

/// Convert HSL (all components in [0, 1]) to linear RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s == 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Unpack a `0xRRGGBB` color into [0, 1] channels
#[inline]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
