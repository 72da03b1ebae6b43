//! Populating segments with platforms and obstacles

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::object::{Obstacle, Platform, WorldObject};
use super::segment::PathSegment;
use crate::consts::NEON_COLORS;
use crate::tuning::Tuning;

/// Live objects on the path (sorted by spawn order / id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectField {
    objects: Vec<WorldObject>,
    next_id: u32,
}

impl Default for ObjectField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectField {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Reserve the next object id
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register an already built object
    pub fn insert(&mut self, obj: WorldObject) -> &WorldObject {
        self.objects.push(obj);
        &self.objects[self.objects.len() - 1]
    }

    /// Scroll every object toward the camera
    pub fn advance(&mut self, dz: f32) {
        for obj in &mut self.objects {
            obj.advance(dz);
        }
    }

    /// Drop objects whose center has passed `limit_z`; returns how many went
    pub fn despawn_past(&mut self, limit_z: f32) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.pos().z <= limit_z);
        before - self.objects.len()
    }

    /// Fill a freshly configured segment
    ///
    /// Solid segments get two spawn attempts a quarter length either side of
    /// center, plus a likely third at center when the path is narrow. Gap
    /// segments get a forced run of platforms across their usable length.
    pub fn populate<R: Rng>(
        &mut self,
        segment: &PathSegment,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        if segment.is_gap {
            self.spawn_across_gap(segment, difficulty, tuning, rng);
            return;
        }

        let quarter = tuning.track.segment_length * 0.25;
        self.spawn_object(segment.z - quarter, false, difficulty, tuning, rng);
        self.spawn_object(segment.z + quarter, false, difficulty, tuning, rng);

        let spawn = &tuning.spawn;
        if segment.width < spawn.narrow_path_width
            && rng.random_bool(f64::from(
                spawn.narrow_extra_spawn_probability.clamp(0.0, 1.0),
            ))
        {
            self.spawn_object(segment.z, false, difficulty, tuning, rng);
        }
    }

    /// Lay platforms across a gap, spaced by the minimum distance plus jitter
    fn spawn_across_gap<R: Rng>(
        &mut self,
        segment: &PathSegment,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        let spawn = &tuning.spawn;
        let usable = tuning.track.segment_length * spawn.gap_usable_fraction;
        let end = segment.z + usable / 2.0;
        let mut z = segment.z - usable / 2.0;
        while z <= end {
            self.spawn_object(z, true, difficulty, tuning, rng);
            z += spawn.min_gap_platform_distance
                + rng.random::<f32>() * spawn.min_gap_platform_distance * spawn.gap_platform_jitter;
        }
    }

    /// Spawn a single platform or obstacle at `z`
    ///
    /// Lateral offset is uniform within the current path width minus the
    /// spawn margin. `forced` always yields a platform.
    pub fn spawn_object<R: Rng>(
        &mut self,
        z: f32,
        forced: bool,
        difficulty: &Difficulty,
        tuning: &Tuning,
        rng: &mut R,
    ) -> &WorldObject {
        let spawn = &tuning.spawn;
        let lateral_limit = (difficulty.half_width() - spawn.lateral_margin).max(0.0);
        let x = (rng.random::<f32>() * 2.0 - 1.0) * lateral_limit;
        let make_platform = forced
            || rng.random_bool(f64::from(difficulty.platform_probability.clamp(0.0, 1.0)));

        let id = self.allocate_id();
        let obj = if make_platform {
            let height = spawn.platform_height_min + rng.random::<f32>() * spawn.platform_height_range;
            let color = NEON_COLORS[rng.random_range(0..NEON_COLORS.len())];
            WorldObject::Platform(Platform {
                id,
                pos: Vec3::new(x, height, z),
                size: spawn.platform_size,
                color,
            })
        } else {
            WorldObject::Obstacle(Obstacle {
                id,
                pos: Vec3::new(x, spawn.obstacle_height, z),
                size: spawn.obstacle_size,
            })
        };
        self.insert(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn segment(z: f32, width: f32, is_gap: bool) -> PathSegment {
        PathSegment {
            id: 0,
            z,
            width,
            is_gap,
            color: Vec3::ONE,
        }
    }

    #[test]
    fn test_forced_spawn_is_platform_in_band() {
        let tuning = Tuning::default();
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ObjectField::new();

        for i in 0..50 {
            let obj = field.spawn_object(-(i as f32), true, &difficulty, &tuning, &mut rng);
            let WorldObject::Platform(p) = obj else {
                panic!("forced spawn produced an obstacle");
            };
            assert!(p.pos.y >= 1.0 && p.pos.y < 4.5);
            assert!(p.pos.x.abs() <= 5.0 - 0.8 + 1e-5);
            assert!(NEON_COLORS.contains(&p.color));
        }
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn test_obstacles_rest_on_ground() {
        let mut tuning = Tuning::default();
        tuning.difficulty.base_platform_probability = 0.0;
        tuning.difficulty.platform_probability_gain = 0.0;
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(12);
        let mut field = ObjectField::new();

        let obj = field.spawn_object(-30.0, false, &difficulty, &tuning, &mut rng);
        let WorldObject::Obstacle(o) = obj else {
            panic!("zero platform probability produced a platform");
        };
        assert_eq!(o.pos.y, 0.6);
        assert_eq!(o.pos.z, -30.0);
        assert!(obj.aabb().bottom().abs() < 1e-6);
    }

    #[test]
    fn test_solid_wide_segment_gets_two_spawns() {
        let tuning = Tuning::default();
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(13);
        let mut field = ObjectField::new();

        field.populate(&segment(-100.0, 10.0, false), &difficulty, &tuning, &mut rng);
        let zs: Vec<f32> = field.iter().map(|o| o.pos().z).collect();
        assert_eq!(zs, vec![-112.5, -87.5]);
    }

    #[test]
    fn test_narrow_segment_may_get_center_spawn() {
        let mut tuning = Tuning::default();
        tuning.spawn.narrow_extra_spawn_probability = 1.0;
        let difficulty = Difficulty::at(1200.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(14);
        let mut field = ObjectField::new();

        field.populate(&segment(-100.0, 3.0, false), &difficulty, &tuning, &mut rng);
        assert_eq!(field.len(), 3);
        assert_eq!(field.as_slice()[2].pos().z, -100.0);
    }

    #[test]
    fn test_out_of_range_probabilities_are_clamped() {
        let mut tuning = Tuning::default();
        tuning.spawn.narrow_extra_spawn_probability = 1.5;
        tuning.difficulty.base_platform_probability = -0.5;
        tuning.difficulty.platform_probability_gain = 0.0;
        let difficulty = Difficulty::at(1200.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(17);
        let mut field = ObjectField::new();

        field.populate(&segment(-100.0, 3.0, false), &difficulty, &tuning, &mut rng);
        assert_eq!(field.len(), 3);
        assert!(field.iter().all(WorldObject::is_lethal));

        tuning.spawn.narrow_extra_spawn_probability = -1.0;
        let mut field = ObjectField::new();
        field.populate(&segment(-100.0, 3.0, false), &difficulty, &tuning, &mut rng);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_despawn_past_limit() {
        let tuning = Tuning::default();
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(15);
        let mut field = ObjectField::new();
        field.spawn_object(0.0, true, &difficulty, &tuning, &mut rng);
        field.spawn_object(-20.0, true, &difficulty, &tuning, &mut rng);

        field.advance(16.0);
        assert_eq!(field.despawn_past(15.0), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.as_slice()[0].pos().z, -4.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let tuning = Tuning::default();
        let difficulty = Difficulty::at(0.0, &tuning.difficulty);
        let mut rng = Pcg32::seed_from_u64(16);
        let mut field = ObjectField::new();
        field.populate(&segment(-50.0, 10.0, true), &difficulty, &tuning, &mut rng);
        let mut ids: Vec<u32> = field.iter().map(WorldObject::id).collect();
        ids.dedup();
        assert_eq!(ids.len(), field.len());
    }

    proptest! {
        #[test]
        fn prop_gap_platforms_span_usable_length(seed in any::<u64>(), z in -5000.0f32..0.0, score in 0.0f32..3000.0) {
            let tuning = Tuning::default();
            let difficulty = Difficulty::at(score, &tuning.difficulty);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ObjectField::new();
            field.populate(&segment(z, difficulty.path_width, true), &difficulty, &tuning, &mut rng);

            let usable = tuning.track.segment_length * tuning.spawn.gap_usable_fraction;
            let start = z - usable / 2.0;
            let end = z + usable / 2.0;
            let max_step = tuning.spawn.min_gap_platform_distance * 1.5;

            let zs: Vec<f32> = field.iter().map(|o| o.pos().z).collect();
            prop_assert!(field.iter().all(|o| !o.is_lethal()));
            prop_assert!(zs.len() >= 2);
            prop_assert!((zs[0] - start).abs() < 1e-2);
            prop_assert!(end - zs[zs.len() - 1] <= max_step + 1e-2);
            prop_assert!(zs.iter().all(|&pz| pz <= end + 1e-2));
            for pair in zs.windows(2) {
                let step = pair[1] - pair[0];
                prop_assert!(step >= tuning.spawn.min_gap_platform_distance - 1e-2);
                prop_assert!(step <= max_step + 1e-2);
            }
        }
    }
}
