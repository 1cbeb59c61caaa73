//! Collision detection for center-anchored boxes
//!
//! Every entity in the playfield is an axis-aligned box described by its
//! center and full size. Touching edges do not count as a hit.

use glam::Vec2;

/// Anything that occupies an axis-aligned box in the playfield
pub trait Bounds {
    /// Center of the box
    fn center(&self) -> Vec2;
    /// Full width and height of the box
    fn size(&self) -> Vec2;

    /// Half-extents (width/2, height/2)
    #[inline]
    fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }
}

/// A free-standing box, handy for probes and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }
}

impl Bounds for Aabb {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// Check whether two boxes overlap
///
/// Strict on all four sides, so `overlaps(a, b) == overlaps(b, a)` and boxes
/// that merely share an edge are not colliding.
#[inline]
pub fn overlaps<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    let delta = (a.center() - b.center()).abs();
    let reach = a.half_extents() + b.half_extents();
    delta.x < reach.x && delta.y < reach.y
}
