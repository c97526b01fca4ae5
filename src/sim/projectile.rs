//! Straight-line bullets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::{ConfigError, ensure_positive};

/// A bullet flying in a fixed direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub aabb: Aabb,
    pub vel: Vec2,
}

impl Projectile {
    /// Aim from `origin` toward `target` at `speed`.
    ///
    /// The box is centered on `origin`. When `origin == target` there is no
    /// direction to aim in and the bullet gets zero velocity.
    pub fn new(id: u32, origin: Vec2, target: Vec2, size: f32, speed: f32) -> Result<Self, ConfigError> {
        let size = ensure_positive("bullet_size", size)?;
        let speed = ensure_positive("bullet_speed", speed)?;

        Ok(Self {
            id,
            aabb: Aabb::centered(origin, size),
            vel: (target - origin).normalize_or_zero() * speed,
        })
    }

    pub fn advance(&mut self) {
        self.aabb.pos += self.vel;
    }

    /// True once any edge has left [0, width] x [0, height]
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        !self.aabb.inside_arena(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fire_right_leaves_arena() {
        let mut p = Projectile::new(1, Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0), 10.0, 10.0).unwrap();
        assert!((p.vel - Vec2::new(10.0, 0.0)).length() < 1e-5);
        assert!(!p.is_out_of_bounds(800.0, 600.0));

        for _ in 0..50 {
            p.advance();
        }
        assert!((p.aabb.center().x - 900.0).abs() < 1e-3);
        assert!(p.is_out_of_bounds(800.0, 600.0));
    }

    #[test]
    fn test_zero_distance_aim_is_stationary() {
        let p = Projectile::new(1, Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 10.0, 10.0).unwrap();
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(Projectile::new(1, Vec2::ZERO, Vec2::X, -1.0, 10.0).is_err());
        assert!(Projectile::new(1, Vec2::ZERO, Vec2::X, 10.0, 0.0).is_err());
    }

    #[test]
    fn test_any_edge_counts() {
        // Center still inside, top edge already above the arena
        let p = Projectile::new(1, Vec2::new(100.0, 3.0), Vec2::new(100.0, 0.0), 10.0, 10.0).unwrap();
        assert!(p.is_out_of_bounds(800.0, 600.0));
    }

    proptest! {
        #[test]
        fn prop_velocity_has_bullet_speed(
            ox in -1000.0f32..1000.0, oy in -1000.0f32..1000.0,
            tx in -1000.0f32..1000.0, ty in -1000.0f32..1000.0,
            speed in 0.5f32..50.0,
        ) {
            let origin = Vec2::new(ox, oy);
            let target = Vec2::new(tx, ty);
            prop_assume!(origin.distance(target) > 1e-2);
            let p = Projectile::new(1, origin, target, 10.0, speed).unwrap();
            prop_assert!((p.vel.length() - speed).abs() < 1e-3 * speed.max(1.0));
        }
    }
}
