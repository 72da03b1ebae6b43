//! Interactive objects placed on the path

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::OBSTACLE_COLOR;
use crate::rgb_from_hex;

/// Walkable box; safe to land on from above only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Box center
    pub pos: Vec3,
    pub size: Vec3,
    /// `0xRRGGBB` from the neon palette
    pub color: u32,
}

impl Platform {
    /// Height of the walkable top face
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// Lethal box resting on the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Box center
    pub pos: Vec3,
    pub size: Vec3,
}

/// Something spawned onto a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldObject {
    Platform(Platform),
    Obstacle(Obstacle),
}

impl WorldObject {
    pub fn id(&self) -> u32 {
        match self {
            WorldObject::Platform(p) => p.id,
            WorldObject::Obstacle(o) => o.id,
        }
    }

    pub fn pos(&self) -> Vec3 {
        match self {
            WorldObject::Platform(p) => p.pos,
            WorldObject::Obstacle(o) => o.pos,
        }
    }

    /// Scroll along the travel axis
    pub fn advance(&mut self, dz: f32) {
        match self {
            WorldObject::Platform(p) => p.pos.z += dz,
            WorldObject::Obstacle(o) => o.pos.z += dz,
        }
    }

    pub fn aabb(&self) -> Aabb {
        match self {
            WorldObject::Platform(p) => Aabb::from_center_size(p.pos, p.size),
            WorldObject::Obstacle(o) => Aabb::from_center_size(o.pos, o.size),
        }
    }

    /// Display color as `0xRRGGBB`
    pub fn color(&self) -> u32 {
        match self {
            WorldObject::Platform(p) => p.color,
            WorldObject::Obstacle(_) => OBSTACLE_COLOR,
        }
    }

    /// Display color as [0, 1] channels
    pub fn rgb(&self) -> Vec3 {
        rgb_from_hex(self.color())
    }

    /// Touching it ends the run regardless of approach
    pub fn is_lethal(&self) -> bool {
        matches!(self, WorldObject::Obstacle(_))
    }

    pub fn as_platform(&self) -> Option<&Platform> {
        match self {
            WorldObject::Platform(p) => Some(p),
            WorldObject::Obstacle(_) => None,
        }
    }
}
