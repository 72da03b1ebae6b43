//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror [`crate::consts`];
//! a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Score-driven difficulty curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub base_path_width: f32,
    pub min_path_width: f32,
    pub shrink_start_score: f32,
    pub shrink_full_score: f32,
    pub gap_start_score: f32,
    pub gap_full_score: f32,
    pub max_gap_probability: f32,
    pub base_platform_probability: f32,
    pub platform_probability_gain: f32,
    pub platform_saturation_score: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            base_path_width: BASE_PATH_WIDTH,
            min_path_width: MIN_PATH_WIDTH,
            shrink_start_score: SHRINK_START_SCORE,
            shrink_full_score: SHRINK_FULL_SCORE,
            gap_start_score: GAP_START_SCORE,
            gap_full_score: GAP_FULL_SCORE,
            max_gap_probability: MAX_GAP_PROBABILITY,
            base_platform_probability: BASE_PLATFORM_PROBABILITY,
            platform_probability_gain: PLATFORM_PROBABILITY_GAIN,
            platform_saturation_score: PLATFORM_SATURATION_SCORE,
        }
    }
}

/// Path pool, scrolling and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackTuning {
    pub segment_length: f32,
    pub initial_segments: usize,
    pub camera_z: f32,
    pub despawn_margin: f32,
    pub initial_speed: f32,
    pub speed_gain: f32,
    pub score_rate: f32,
}

impl Default for TrackTuning {
    fn default() -> Self {
        Self {
            segment_length: SEGMENT_LENGTH,
            initial_segments: INITIAL_SEGMENTS,
            camera_z: CAMERA_Z,
            despawn_margin: DESPAWN_MARGIN,
            initial_speed: INITIAL_SPEED,
            speed_gain: SPEED_GAIN,
            score_rate: SCORE_RATE,
        }
    }
}

/// Platform and obstacle placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub lateral_margin: f32,
    pub narrow_path_width: f32,
    pub narrow_extra_spawn_probability: f32,
    pub gap_usable_fraction: f32,
    pub min_gap_platform_distance: f32,
    pub gap_platform_jitter: f32,
    pub platform_height_min: f32,
    pub platform_height_range: f32,
    pub platform_size: Vec3,
    pub obstacle_size: Vec3,
    pub obstacle_height: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            lateral_margin: LATERAL_SPAWN_MARGIN,
            narrow_path_width: NARROW_PATH_WIDTH,
            narrow_extra_spawn_probability: NARROW_EXTRA_SPAWN_PROBABILITY,
            gap_usable_fraction: GAP_USABLE_FRACTION,
            min_gap_platform_distance: MIN_GAP_PLATFORM_DISTANCE,
            gap_platform_jitter: GAP_PLATFORM_JITTER,
            platform_height_min: PLATFORM_HEIGHT_MIN,
            platform_height_range: PLATFORM_HEIGHT_RANGE,
            platform_size: Vec3::from_array(PLATFORM_SIZE),
            obstacle_size: Vec3::from_array(OBSTACLE_SIZE),
            obstacle_height: OBSTACLE_HEIGHT,
        }
    }
}

/// Player physics and camera follow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub death_floor: f32,
    pub pointer_margin: f32,
    pub landing_tolerance_above: f32,
    pub landing_tolerance_below: f32,
    pub camera_height: f32,
    pub camera_follow: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            death_floor: DEATH_FLOOR,
            pointer_margin: POINTER_MARGIN,
            landing_tolerance_above: LANDING_TOLERANCE_ABOVE,
            landing_tolerance_below: LANDING_TOLERANCE_BELOW,
            camera_height: CAMERA_HEIGHT,
            camera_follow: CAMERA_FOLLOW,
        }
    }
}

/// Complete runner tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: DifficultyTuning,
    pub track: TrackTuning,
    pub spawn: SpawnTuning,
    pub player: PlayerTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let d = &self.difficulty;
        check(d.min_path_width > 0.0, "difficulty.min_path_width", "must be positive")?;
        check(
            d.min_path_width <= d.base_path_width,
            "difficulty.min_path_width",
            "must not exceed base_path_width",
        )?;
        check(
            d.shrink_full_score > d.shrink_start_score,
            "difficulty.shrink_full_score",
            "must be greater than shrink_start_score",
        )?;
        check(
            d.gap_full_score > d.gap_start_score,
            "difficulty.gap_full_score",
            "must be greater than gap_start_score",
        )?;
        check(
            d.platform_saturation_score > 0.0,
            "difficulty.platform_saturation_score",
            "must be positive",
        )?;
        check(
            is_probability(d.max_gap_probability),
            "difficulty.max_gap_probability",
            "must be within [0, 1]",
        )?;
        check(
            is_probability(d.base_platform_probability)
                && is_probability(d.base_platform_probability + d.platform_probability_gain)
                && d.platform_probability_gain >= 0.0,
            "difficulty.platform_probability_gain",
            "platform probability must stay within [0, 1]",
        )?;

        let t = &self.track;
        check(t.segment_length > 0.0, "track.segment_length", "must be positive")?;
        check(t.initial_segments >= 2, "track.initial_segments", "must be at least 2")?;
        check(t.initial_speed >= 0.0, "track.initial_speed", "must not be negative")?;
        check(t.score_rate >= 0.0, "track.score_rate", "must not be negative")?;

        let s = &self.spawn;
        check(
            s.min_gap_platform_distance > 0.0,
            "spawn.min_gap_platform_distance",
            "must be positive",
        )?;
        check(s.gap_platform_jitter >= 0.0, "spawn.gap_platform_jitter", "must not be negative")?;
        check(
            s.gap_usable_fraction > 0.0 && s.gap_usable_fraction <= 1.0,
            "spawn.gap_usable_fraction",
            "must be within (0, 1]",
        )?;
        check(
            is_probability(s.narrow_extra_spawn_probability),
            "spawn.narrow_extra_spawn_probability",
            "must be within [0, 1]",
        )?;

        let p = &self.player;
        check(p.radius > 0.0, "player.radius", "must be positive")?;
        check(p.gravity < 0.0, "player.gravity", "must pull downward")?;
        check(p.jump_impulse > 0.0, "player.jump_impulse", "must be positive")?;
        Ok(())
    }
}

fn is_probability(p: f32) -> bool {
    (0.0..=1.0).contains(&p)
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}
