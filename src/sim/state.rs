//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of everything that changes during a run.
//! Subsystems borrow the pieces they need for the duration of a call.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::player::{DeathCause, Player};
use super::segment::SegmentPool;
use super::spawner::ObjectField;
use crate::consts::INITIAL_POPULATE_FROM;
use crate::tuning::Tuning;

/// Something the host should react to, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A segment moved to the frontier
    SegmentRecycled { id: u32, gap: bool },
    /// The player died; `score` is the floored final score
    GameOver { score: u64, cause: DeathCause },
    /// A fresh run started
    Restarted { generation: u64 },
}

/// Chase camera looking down the travel axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
    pub z: f32,
}

impl Camera {
    fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.player.radius + tuning.player.camera_height,
            z: tuning.track.camera_z,
        }
    }

    /// Ease toward sitting `camera_height` above the player
    pub fn follow(&mut self, player_y: f32, tuning: &Tuning) {
        let target = player_y + tuning.player.camera_height;
        self.y += (target - self.y) * tuning.player.camera_follow;
    }
}

/// Complete runner state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Monotonic within a run, reset on restart
    pub score: f32,
    /// World scroll speed (units/s)
    pub speed: f32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Bumped on every restart; tags deferred actions
    pub generation: u64,
    pub segments: SegmentPool,
    pub objects: ObjectField,
    pub player: Player,
    pub camera: Camera,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0.0,
            speed: tuning.track.initial_speed,
            time_ticks: 0,
            generation: 0,
            segments: SegmentPool::initial(&tuning),
            objects: ObjectField::new(),
            player: Player::spawn(&tuning.player),
            camera: Camera::new(&tuning),
            events: Vec::new(),
            tuning,
        };
        state.populate_initial();
        state
    }

    /// Reinitialize every piece of run state
    ///
    /// The RNG keeps its stream so consecutive runs differ; the generation
    /// counter invalidates anything scheduled against the previous run.
    pub fn restart(&mut self) {
        self.score = 0.0;
        self.speed = self.tuning.track.initial_speed;
        self.time_ticks = 0;
        self.generation += 1;
        self.segments = SegmentPool::initial(&self.tuning);
        self.objects.clear();
        self.player = Player::spawn(&self.tuning.player);
        self.camera = Camera::new(&self.tuning);
        self.populate_initial();
        self.events.push(GameEvent::Restarted {
            generation: self.generation,
        });
        log::info!("Run restarted (generation {})", self.generation);
    }

    /// Objects on every other segment from `INITIAL_POPULATE_FROM`, leaving the spawn area clear
    fn populate_initial(&mut self) {
        let difficulty = self.difficulty();
        for i in (INITIAL_POPULATE_FROM..self.segments.len()).step_by(2) {
            if let Some(segment) = self.segments.get(i) {
                self.objects
                    .populate(segment, &difficulty, &self.tuning, &mut self.rng);
            }
        }
    }

    /// Difficulty at the current score
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::at(self.score, &self.tuning.difficulty)
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn is_game_over(&self) -> bool {
        self.player.is_dead()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
