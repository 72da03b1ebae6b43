//! Idle/demo mode - the runner plays itself
//!
//! Looks one jump's worth of travel ahead, picks the lane with the most room
//! around anything it would collide with, and jumps just before impact or
//! just before the ground runs out.

use super::collision::Aabb;
use super::object::WorldObject;
use super::player::jump_airtime;
use super::state::GameState;
use super::tick::TickInput;

/// Candidate lateral positions across the path
const LANES: usize = 9;
/// Seconds before contact at which to take off
const JUMP_LEAD: f32 = 0.2;
/// Platforms whose underside is this close above the player's head still block
const HEADROOM: f32 = 0.05;

/// Fill `input` with the autopilot's steering and jump decisions
pub fn drive(state: &GameState, input: &mut TickInput) {
    let tuning = &state.tuning;
    let player = &state.player;
    let radius = player.radius;
    let difficulty = state.difficulty();
    let limit = (difficulty.half_width() - tuning.player.pointer_margin).max(0.0);
    let look_ahead = state.speed * jump_airtime(&tuning.player);
    let jump_distance = state.speed * JUMP_LEAD;
    let head = player.pos.y + radius;

    let threats: Vec<Aabb> = state
        .objects
        .iter()
        .filter(|o| blocks(o, head))
        .map(WorldObject::aabb)
        .filter(|b| b.max.z >= -look_ahead && b.min.z <= radius)
        .collect();

    let gap_ahead = state
        .segments
        .segment_at(-jump_distance)
        .is_none_or(|s| s.is_gap);

    let target_x = if gap_ahead {
        nearest_platform_ahead(state).map_or(player.pos.x, |x| x.clamp(-limit, limit))
    } else {
        best_lane(&threats, limit, player.pos.x, radius)
    };
    input.pointer_x = Some(target_x / (tuning.difficulty.base_path_width / 2.0));

    if !player.is_grounded() {
        return;
    }
    let impact_soon = threats.iter().any(|b| {
        lateral_clearance(target_x, radius, b) < 0.0 && -radius - b.max.z <= jump_distance
    });
    let ground_ends = !state.segments.has_ground_at(target_x, -jump_distance);
    if impact_soon || ground_ends {
        input.jump = true;
    }
}

/// Would walking into this object at the current height hurt
fn blocks(obj: &WorldObject, head: f32) -> bool {
    match obj {
        WorldObject::Obstacle(_) => true,
        WorldObject::Platform(_) => obj.aabb().bottom() < head + HEADROOM,
    }
}

/// Horizontal distance between the player at `x` and a box (negative when overlapping)
fn lateral_clearance(x: f32, radius: f32, b: &Aabb) -> f32 {
    (b.min.x - (x + radius)).max((x - radius) - b.max.x)
}

/// Lane with the most clearance; ties go to the lane nearest the player
fn best_lane(threats: &[Aabb], limit: f32, current_x: f32, radius: f32) -> f32 {
    let mut best = current_x.clamp(-limit, limit);
    let mut best_clearance = f32::NEG_INFINITY;
    for k in 0..LANES {
        let x = -limit + 2.0 * limit * k as f32 / (LANES - 1) as f32;
        let clearance = threats
            .iter()
            .map(|b| lateral_clearance(x, radius, b))
            .fold(f32::INFINITY, f32::min);
        let better = clearance > best_clearance
            || (clearance == best_clearance && (x - current_x).abs() < (best - current_x).abs());
        if better {
            best = x;
            best_clearance = clearance;
        }
    }
    best
}

/// Lateral position of the closest platform still ahead of the player
fn nearest_platform_ahead(state: &GameState) -> Option<f32> {
    state
        .objects
        .iter()
        .filter_map(WorldObject::as_platform)
        .filter(|p| p.pos.z < 0.0)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
        .map(|p| p.pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn state_with_obstacle(pos: Vec3, size: Vec3) -> GameState {
        let mut state = GameState::new(21, Tuning::default());
        state.objects.clear();
        let id = state.objects.allocate_id();
        state
            .objects
            .insert(WorldObject::Obstacle(Obstacle { id, pos, size }));
        state
    }

    #[test]
    fn test_steers_around_obstacle() {
        let state = state_with_obstacle(Vec3::new(0.0, 0.6, -8.0), Vec3::new(1.0, 1.2, 1.0));
        let mut input = TickInput::default();
        drive(&state, &mut input);

        let pointer = input.pointer_x.expect("autopilot always steers");
        let x = pointer * 5.0;
        assert!(x.abs() >= 1.0, "lane {x} still hits the obstacle");
        assert!(!input.jump);
    }

    #[test]
    fn test_jumps_wall_it_cannot_avoid() {
        let state = state_with_obstacle(Vec3::new(0.0, 0.6, -1.8), Vec3::new(20.0, 1.2, 1.0));
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.jump);
    }

    #[test]
    fn test_clear_path_stays_centered() {
        let mut state = GameState::new(22, Tuning::default());
        state.objects.clear();
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert_eq!(input.pointer_x, Some(0.0));
        assert!(!input.jump);
    }
}
