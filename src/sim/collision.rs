//! Axis-aligned box geometry
//!
//! Every entity owns an [`Aabb`] rather than being one. Overlap is strict:
//! boxes that only share an edge do not collide, which is what lets the
//! player rest flush against an obstacle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, positioned by its top-left corner (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
        }
    }

    /// Square box of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.width;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.height;
    }

    /// Same size, moved to `pos`
    pub fn at(&self, pos: Vec2) -> Self {
        Self { pos, ..*self }
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if the box lies entirely within [0, width] x [0, height]
    pub fn inside_arena(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// Push the box back inside [0, width] x [0, height]
    pub fn clamp_to_arena(&mut self, width: f32, height: f32) {
        if self.left() < 0.0 {
            self.set_left(0.0);
        }
        if self.right() > width {
            self.set_right(width);
        }
        if self.top() < 0.0 {
            self.set_top(0.0);
        }
        if self.bottom() > height {
            self.set_bottom(height);
        }
    }
}

/// True if `aabb` overlaps any box in `others`
pub fn overlaps_any(aabb: &Aabb, others: &[Aabb]) -> bool {
    others.iter().any(|o| aabb.intersects(o))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let b = Aabb::new(10.0, 20.0, 50.0, 30.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 60.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 50.0);
        assert_eq!(b.center(), Vec2::new(35.0, 35.0));
    }

    #[test]
    fn test_centered() {
        let b = Aabb::centered(Vec2::new(400.0, 300.0), 10.0);
        assert_eq!(b.pos, Vec2::new(395.0, 295.0));
        assert_eq!(b.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let b = Aabb::new(50.0, 0.0, 50.0, 50.0);
        assert!(!a.intersects(&b));
        let c = Aabb::new(49.0, 49.0, 50.0, 50.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_set_edges() {
        let mut b = Aabb::new(0.0, 0.0, 50.0, 40.0);
        b.set_right(100.0);
        assert_eq!(b.left(), 50.0);
        b.set_bottom(100.0);
        assert_eq!(b.top(), 60.0);
    }

    #[test]
    fn test_clamp_to_arena() {
        let mut b = Aabb::new(-20.0, 590.0, 50.0, 50.0);
        b.clamp_to_arena(800.0, 600.0);
        assert_eq!(b.pos, Vec2::new(0.0, 550.0));
        assert!(b.inside_arena(800.0, 600.0));
    }

    #[test]
    fn test_overlaps_any() {
        let boxes = [Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(100.0, 100.0, 10.0, 10.0)];
        assert!(overlaps_any(&Aabb::new(105.0, 105.0, 10.0, 10.0), &boxes));
        assert!(!overlaps_any(&Aabb::new(50.0, 50.0, 10.0, 10.0), &boxes));
        assert!(!overlaps_any(&Aabb::new(50.0, 50.0, 10.0, 10.0), &[]));
    }
}
