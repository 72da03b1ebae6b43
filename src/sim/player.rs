//! Player physics and collision
//!
//! The player sits at z = 0 while the world scrolls past. Vertical motion is
//! integrated with semi-implicit Euler; lateral position follows the pointer
//! and is clamped to the current path width.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::object::WorldObject;
use super::segment::SegmentPool;
use crate::tuning::{PlayerTuning, Tuning};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched an obstacle
    Obstacle { id: u32 },
    /// Hit a platform from the side or from below
    PlatformSide { id: u32 },
    /// Dropped below the death floor
    Fell,
}

/// Physical state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Resting on the path or a platform top
    Grounded,
    /// Rising or falling
    Airborne,
    /// Terminal until restart
    Dead(DeathCause),
}

/// Time from take-off to the top of a jump
pub fn apex_time(tuning: &PlayerTuning) -> f32 {
    tuning.jump_impulse / -tuning.gravity
}

/// Time a jump from flat ground spends in the air
pub fn jump_airtime(tuning: &PlayerTuning) -> f32 {
    2.0 * apex_time(tuning)
}

/// The player sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sphere center
    pub pos: Vec3,
    pub velocity_y: f32,
    pub state: PlayerState,
    /// Height at the start of the last step (landing test)
    pub prev_y: f32,
    pub radius: f32,
}

impl Player {
    /// Standing on the path at the origin
    pub fn spawn(tuning: &PlayerTuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.radius, 0.0),
            velocity_y: 0.0,
            state: PlayerState::Grounded,
            prev_y: tuning.radius,
            radius: tuning.radius,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, PlayerState::Dead(_))
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == PlayerState::Grounded
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        match self.state {
            PlayerState::Dead(cause) => Some(cause),
            _ => None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_sphere(self.pos, self.radius)
    }

    /// Start a jump; ignored unless grounded
    pub fn jump(&mut self, tuning: &PlayerTuning) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.velocity_y = tuning.jump_impulse;
        self.state = PlayerState::Airborne;
        true
    }

    /// Map a pointer position in [-1, 1] onto the path
    pub fn steer(&mut self, pointer: f32, half_width: f32, tuning: &Tuning) {
        if self.is_dead() {
            return;
        }
        self.pos.x = pointer.clamp(-1.0, 1.0) * tuning.difficulty.base_path_width / 2.0;
        self.clamp_lateral(half_width, tuning.player.pointer_margin);
    }

    /// Keep the player inside the current path width
    pub fn clamp_lateral(&mut self, half_width: f32, margin: f32) {
        let limit = (half_width - margin).max(0.0);
        self.pos.x = self.pos.x.clamp(-limit, limit);
    }

    /// Enter the dead state; returns `false` if already dead
    pub fn kill(&mut self, cause: DeathCause) -> bool {
        if self.is_dead() {
            return false;
        }
        self.state = PlayerState::Dead(cause);
        true
    }

    /// Integrate one step and resolve contacts
    ///
    /// Returns the cause only on the step that kills the player.
    pub fn step(
        &mut self,
        dt: f32,
        tuning: &PlayerTuning,
        segments: &SegmentPool,
        objects: &[WorldObject],
    ) -> Option<DeathCause> {
        if self.is_dead() {
            return None;
        }

        self.prev_y = self.pos.y;
        let mut grounded = self.is_grounded();
        if !grounded {
            self.velocity_y += tuning.gravity * dt;
        }
        self.pos.y += self.velocity_y * dt;

        let radius = self.radius;
        let ground = segments.has_ground_at(self.pos.x, self.pos.z);
        if self.pos.y <= radius && ground {
            self.pos.y = radius;
            self.velocity_y = 0.0;
            grounded = true;
        } else if self.velocity_y == 0.0 && !ground {
            // Ground vanished underneath (walked onto a gap)
            grounded = false;
        } else if self.pos.y > radius {
            grounded = false;
        }
        self.state = if grounded {
            PlayerState::Grounded
        } else {
            PlayerState::Airborne
        };

        let bounds = self.aabb();
        for obj in objects {
            if !bounds.intersects(&obj.aabb()) {
                continue;
            }
            match obj {
                WorldObject::Obstacle(o) => {
                    return self.die(DeathCause::Obstacle { id: o.id });
                }
                WorldObject::Platform(p) => {
                    let top = p.top();
                    let landing = self.velocity_y <= 0.0
                        && self.prev_y - radius >= top - tuning.landing_tolerance_above
                        && self.pos.y - radius <= top + tuning.landing_tolerance_below;
                    if !landing {
                        return self.die(DeathCause::PlatformSide { id: p.id });
                    }
                    self.pos.y = top + radius;
                    self.velocity_y = 0.0;
                    self.state = PlayerState::Grounded;
                }
            }
        }

        if self.pos.y < tuning.death_floor {
            return self.die(DeathCause::Fell);
        }
        None
    }

    fn die(&mut self, cause: DeathCause) -> Option<DeathCause> {
        self.kill(cause).then_some(cause)
    }
}
