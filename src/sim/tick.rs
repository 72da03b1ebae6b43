//! Fixed timestep simulation tick
//!
//! Core game loop that advances the runner deterministically.

use super::autopilot;
use super::difficulty::Difficulty;
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Lateral pointer position in [-1, 1] (from mouse/touch)
    pub pointer_x: Option<f32>,
    /// Jump (space/tap)
    pub jump: bool,
    /// Start a new run; only honored after game over
    pub restart: bool,
    /// Idle/demo mode - the autopilot plays
    pub autopilot: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Dead is terminal; only a restart gets out
    if state.is_game_over() {
        if input.restart {
            state.restart();
        }
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;
    state.score += dt * state.tuning.track.score_rate;
    let difficulty = state.difficulty();

    if let Some(pointer) = input.pointer_x {
        state
            .player
            .steer(pointer, difficulty.half_width(), &state.tuning);
    }
    state
        .player
        .clamp_lateral(difficulty.half_width(), state.tuning.player.pointer_margin);
    if input.jump {
        state.player.jump(&state.tuning.player);
    }

    advance_world(state, dt, &difficulty);

    if let Some(cause) = state.player.step(
        dt,
        &state.tuning.player,
        &state.segments,
        state.objects.as_slice(),
    ) {
        let score = state.display_score();
        log::info!("Game over at score {} ({:?})", score, cause);
        state.events.push(GameEvent::GameOver { score, cause });
    }

    state.camera.follow(state.player.pos.y, &state.tuning);
    state.speed += dt * state.tuning.track.speed_gain;
}

/// Scroll the world, recycle segments behind the camera, drop stale objects
fn advance_world(state: &mut GameState, dt: f32, difficulty: &Difficulty) {
    let dz = state.speed * dt;
    state.segments.advance(dz);
    state.objects.advance(dz);

    let track = &state.tuning.track;
    let recycle_z = track.camera_z + track.segment_length;
    let despawn_z = track.camera_z + track.despawn_margin;

    for i in 0..state.segments.len() {
        if !state.segments.get(i).is_some_and(|s| s.z > recycle_z) {
            continue;
        }
        let Some(segment) = state
            .segments
            .recycle(i, difficulty, &state.tuning, &mut state.rng)
            .cloned()
        else {
            continue;
        };
        state
            .objects
            .populate(&segment, difficulty, &state.tuning, &mut state.rng);
        state.events.push(GameEvent::SegmentRecycled {
            id: segment.id,
            gap: segment.is_gap,
        });
    }

    state.objects.despawn_past(despawn_z);
}
