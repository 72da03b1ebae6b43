//! Path segments and the recycled segment pool
//!
//! The pool never grows or shrinks. A segment that scrolls past the camera is
//! teleported to the far end of the strip and reconfigured for the current
//! difficulty.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, segment_color};
use crate::tuning::Tuning;

/// A fixed-length strip of path along the travel axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Pool slot, stable for the lifetime of the pool
    pub id: u32,
    /// Center position on the travel axis
    pub z: f32,
    /// Walkable width
    pub width: f32,
    /// No walkable surface; only platforms cross it
    pub is_gap: bool,
    /// Surface color (meaningless for gaps)
    pub color: Vec3,
}

impl PathSegment {
    /// Gaps are hidden entirely
    #[inline]
    pub fn visible(&self) -> bool {
        !self.is_gap
    }

    /// Lateral scale relative to the base path mesh
    pub fn width_scale(&self, base_width: f32) -> f32 {
        self.width / base_width
    }

    /// Whether the surface of this segment lies under the point `(x, z)`
    pub fn supports(&self, x: f32, z: f32, segment_length: f32) -> bool {
        if self.is_gap {
            return false;
        }
        let half_len = segment_length / 2.0;
        let half_width = self.width / 2.0;
        z >= self.z - half_len && z <= self.z + half_len && x >= -half_width && x <= half_width
    }
}

/// Fixed-size pool of path segments covering the window ahead of the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPool {
    segments: Vec<PathSegment>,
    segment_length: f32,
    /// The most recently configured segment was a gap
    last_segment_was_gap: bool,
}

impl SegmentPool {
    /// Build a pool of solid, base-width segments at the given positions
    pub fn create(positions: impl IntoIterator<Item = f32>, tuning: &Tuning) -> Self {
        let width = tuning.difficulty.base_path_width;
        let color = segment_color(width, &tuning.difficulty);
        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(i, z)| PathSegment {
                id: i as u32,
                z,
                width,
                is_gap: false,
                color,
            })
            .collect();
        Self {
            segments,
            segment_length: tuning.track.segment_length,
            last_segment_was_gap: false,
        }
    }

    /// The starting layout: `initial_segments` solid segments receding from z = 0
    pub fn initial(tuning: &Tuning) -> Self {
        let len = tuning.track.segment_length;
        Self::create(
            (0..tuning.track.initial_segments).map(|i| -(i as f32) * len),
            tuning,
        )
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn get(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn last_segment_was_gap(&self) -> bool {
        self.last_segment_was_gap
    }

    /// Farthest position along the travel axis (most negative z)
    pub fn frontier(&self) -> Option<f32> {
        self.segments.iter().map(|s| s.z).reduce(f32::min)
    }

    /// Scroll every segment toward the camera
    pub fn advance(&mut self, dz: f32) {
        for segment in &mut self.segments {
            segment.z += dz;
        }
    }

    /// Whether any solid segment lies under `(x, z)`
    pub fn has_ground_at(&self, x: f32, z: f32) -> bool {
        self.segments
            .iter()
            .any(|s| s.supports(x, z, self.segment_length))
    }

    /// Segment whose span contains `z`, gap or not
    pub fn segment_at(&self, z: f32) -> Option<&PathSegment> {
        let half = self.segment_length / 2.0;
        self.segments
            .iter()
            .find(|s| z >= s.z - half && z <= s.z + half)
    }

    /// Move segment `index` to the frontier and reconfigure it
    ///
    /// The new position is one segment length beyond the farthest of the
    /// other segments, so the strip stays contiguous whatever order segments
    /// are recycled in. A gap is never placed right after another gap.
    pub fn recycle<R: Rng>(
        &mut self,
        index: usize,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<&PathSegment> {
        let current_z = self.segments.get(index)?.z;
        let farthest_other = self
            .segments
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, s)| s.z)
            .reduce(f32::min)
            .unwrap_or(current_z);

        let make_gap = !self.last_segment_was_gap
            && rng.random_bool(f64::from(difficulty.gap_probability.clamp(0.0, 1.0)));
        self.last_segment_was_gap = make_gap;

        let segment_length = self.segment_length;
        let segment = self.segments.get_mut(index)?;
        segment.z = farthest_other - segment_length;
        segment.width = difficulty.path_width;
        segment.is_gap = make_gap;
        if !make_gap {
            segment.color = segment_color(segment.width, &tuning.difficulty);
        }

        log::debug!(
            "Recycled segment {} to z={:.1} (width {:.2}, {})",
            segment.id,
            segment.z,
            segment.width,
            if make_gap { "gap" } else { "solid" }
        );
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gap_heavy_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.difficulty.max_gap_probability = 1.0;
        tuning
    }

    /// Recycle whichever segment is closest to the camera
    fn recycle_rearmost(
        pool: &mut SegmentPool,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> PathSegment {
        let rear = pool
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.z.total_cmp(&b.1.z))
            .map(|(i, _)| i)
            .unwrap_or(0);
        pool.recycle(rear, difficulty, tuning, rng)
            .cloned()
            .expect("rearmost index is in range")
    }

    #[test]
    fn test_initial_pool_is_solid_and_spaced() {
        let tuning = Tuning::default();
        let pool = SegmentPool::initial(&tuning);
        assert_eq!(pool.len(), 10);
        for (i, seg) in pool.iter().enumerate() {
            assert!(!seg.is_gap);
            assert!(seg.visible());
            assert_eq!(seg.width, 10.0);
            assert_eq!(seg.z, -(i as f32) * 50.0);
        }
        assert_eq!(pool.frontier(), Some(-450.0));
    }

    #[test]
    fn test_recycle_moves_to_frontier() {
        let tuning = Tuning::default();
        let mut pool = SegmentPool::initial(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);

        let seg = pool
            .recycle(0, &difficulty, &tuning, &mut rng)
            .cloned()
            .expect("index 0 exists");
        assert_eq!(seg.z, -500.0);
        assert!(!seg.is_gap, "no gaps at score 0");
    }

    #[test]
    fn test_recycle_applies_current_width() {
        let tuning = Tuning::default();
        let mut pool = SegmentPool::initial(&tuning);
        let mut rng = Pcg32::seed_from_u64(2);
        let difficulty = Difficulty::at(1200.0, &tuning.difficulty);

        let seg = recycle_rearmost(&mut pool, &difficulty, &tuning, &mut rng);
        assert!((seg.width - 3.0).abs() < 1e-5);
        assert!((seg.width_scale(10.0) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_recycle_out_of_range_is_none() {
        let tuning = Tuning::default();
        let mut pool = SegmentPool::initial(&tuning);
        let mut rng = Pcg32::seed_from_u64(3);
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        assert!(pool.recycle(99, &difficulty, &tuning, &mut rng).is_none());
    }

    #[test]
    fn test_gaps_alternate_at_certain_probability() {
        let tuning = gap_heavy_tuning();
        let mut pool = SegmentPool::initial(&tuning);
        let mut rng = Pcg32::seed_from_u64(4);
        let difficulty = Difficulty::at(5000.0, &tuning.difficulty);

        let kinds: Vec<bool> = (0..6)
            .map(|_| recycle_rearmost(&mut pool, &difficulty, &tuning, &mut rng).is_gap)
            .collect();
        assert_eq!(kinds, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_ground_lookup() {
        let tuning = Tuning::default();
        let mut pool = SegmentPool::initial(&tuning);
        assert!(pool.has_ground_at(0.0, 0.0));
        assert!(pool.has_ground_at(4.9, -10.0));
        assert!(!pool.has_ground_at(5.5, 0.0));

        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = gap_heavy_tuning();
        let difficulty = Difficulty::at(5000.0, &tuning.difficulty);
        let gap = pool
            .recycle(0, &difficulty, &tuning, &mut rng)
            .cloned()
            .expect("index 0 exists");
        assert!(gap.is_gap);
        assert!(!pool.has_ground_at(0.0, gap.z));
        assert_eq!(pool.segment_at(gap.z).map(|s| s.id), Some(gap.id));
    }

    proptest! {
        #[test]
        fn prop_no_consecutive_gaps(seed in any::<u64>(), score in 0.0f32..5000.0, count in 1usize..200) {
            let tuning = gap_heavy_tuning();
            let mut pool = SegmentPool::initial(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let difficulty = Difficulty::at(score, &tuning.difficulty);

            let mut previous_gap = false;
            for _ in 0..count {
                let seg = recycle_rearmost(&mut pool, &difficulty, &tuning, &mut rng);
                prop_assert!(!(previous_gap && seg.is_gap));
                previous_gap = seg.is_gap;
            }
        }

        #[test]
        fn prop_pool_stays_contiguous(seed in any::<u64>(), steps in proptest::collection::vec(0.0f32..80.0, 1..100)) {
            let tuning = Tuning::default();
            let mut pool = SegmentPool::initial(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let difficulty = Difficulty::at(800.0, &tuning.difficulty);
            let limit = tuning.track.camera_z + tuning.track.segment_length;

            for dz in steps {
                pool.advance(dz);
                for i in 0..pool.len() {
                    if pool.get(i).is_some_and(|s| s.z > limit) {
                        pool.recycle(i, &difficulty, &tuning, &mut rng);
                    }
                }
                let mut zs: Vec<f32> = pool.iter().map(|s| s.z).collect();
                zs.sort_by(f32::total_cmp);
                prop_assert_eq!(zs.len(), tuning.track.initial_segments);
                for pair in zs.windows(2) {
                    prop_assert!((pair[1] - pair[0] - tuning.track.segment_length).abs() < 1e-2);
                }
            }
        }
    }
}
