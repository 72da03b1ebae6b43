//! Score-driven difficulty curves
//!
//! Every function here is a pure function of the accumulated score. Nothing is
//! stored between calls; callers take a [`Difficulty`] snapshot when they need
//! several values for the same score.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;
use crate::{hsl_to_rgb, lerp, ramp};

/// Current path width
///
/// `base_path_width` until `shrink_start_score`, then linear down to
/// `min_path_width` at `shrink_full_score`, clamped there afterwards.
pub fn path_width(score: f32, tuning: &DifficultyTuning) -> f32 {
    let t = ramp(score, tuning.shrink_start_score, tuning.shrink_full_score);
    lerp(tuning.base_path_width, tuning.min_path_width, t)
}

/// Chance that a recycled segment becomes a gap
///
/// Zero below `gap_start_score`, ramps to `max_gap_probability` at `gap_full_score`.
pub fn gap_probability(score: f32, tuning: &DifficultyTuning) -> f32 {
    ramp(score, tuning.gap_start_score, tuning.gap_full_score) * tuning.max_gap_probability
}

/// Chance that a non-forced spawn is a platform rather than an obstacle
pub fn platform_probability(score: f32, tuning: &DifficultyTuning) -> f32 {
    let t = (score.max(0.0) / tuning.platform_saturation_score).min(1.0);
    tuning.base_platform_probability + t * tuning.platform_probability_gain
}

/// Width mapped onto [0, 1]: 0 at the narrowest, 1 at the base width
pub fn normalized_width(width: f32, tuning: &DifficultyTuning) -> f32 {
    let span = tuning.base_path_width - tuning.min_path_width;
    if span <= 0.0 {
        return 1.0;
    }
    ((width - tuning.min_path_width) / span).clamp(0.0, 1.0)
}

/// Surface color for a solid segment of the given width
///
/// Wide paths sit toward cyan, narrow paths shift to a hotter, brighter purple.
pub fn segment_color(width: f32, tuning: &DifficultyTuning) -> Vec3 {
    let t = normalized_width(width, tuning);
    hsl_to_rgb(0.72 - 0.22 * t, 0.85, 0.42 + 0.1 * (1.0 - t))
}

/// Difficulty values evaluated at a single score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub score: f32,
    pub path_width: f32,
    pub gap_probability: f32,
    pub platform_probability: f32,
}

impl Difficulty {
    pub fn at(score: f32, tuning: &DifficultyTuning) -> Self {
        Self {
            score,
            path_width: path_width(score, tuning),
            gap_probability: gap_probability(score, tuning),
            platform_probability: platform_probability(score, tuning),
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.path_width / 2.0
    }
}
