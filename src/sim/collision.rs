//! Axis-aligned bounding boxes
//!
//! Everything the player can touch is box-shaped, and the player itself is
//! tested as the box enclosing its sphere.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered on `center` with full extents `size`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box enclosing a sphere
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_size(center, Vec3::splat(radius * 2.0))
    }

    /// Overlap test; touching faces count as overlapping
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(0.9, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(0.0, 0.0, 1.5), Vec3::ONE);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_sphere_box() {
        let b = Aabb::from_sphere(Vec3::new(1.0, 0.5, 0.0), 0.5);
        assert_eq!(b.bottom(), 0.0);
        assert_eq!(b.top(), 1.0);
        assert_eq!(b.min.x, 0.5);
    }
}
