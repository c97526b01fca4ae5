//! Pursuing enemies: steering, spawning and hit reaction
//!
//! Steering is a local heuristic (seek + separation + incremental obstacle
//! avoidance), not pathfinding. It costs O(enemies + obstacles) per enemy and
//! tolerates temporary bunching at obstacle corners.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, overlaps_any};
use crate::consts::*;
use crate::error::{ConfigError, ensure_positive};
use crate::rotate_degrees;

/// Below this squared distance the enemy is already on its target
const ARRIVED_EPSILON_SQ: f32 = 0.01;

/// Visual tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tint {
    #[default]
    Normal,
    /// Just hit by a bullet
    Flash,
}

/// Which side-step is tried first when the direct move is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOrder {
    PositiveFirst,
    NegativeFirst,
}

impl SideOrder {
    /// Coin flip
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            SideOrder::PositiveFirst
        } else {
            SideOrder::NegativeFirst
        }
    }
}

/// How a steering call ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    /// Already at the target; nothing moved
    Arrived,
    /// Straight line (plus separation) was clear
    Direct,
    /// Perpendicular side-step, with its sign
    SideStep { positive: bool },
    /// Desired move rotated by this many degrees
    Fan { degrees: f32 },
    /// Everything collided; backed off
    Retreat,
}

/// Result of one steering call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteerOutcome {
    pub steer: Steer,
    /// Candidate positions tested against the obstacles (at most 10)
    pub evaluations: u32,
    /// Committed displacement
    pub delta: Vec2,
}

/// Where another enemy was at the start of the frame
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub id: u32,
    pub center: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Sub-pixel position of the top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub hp: i32,
    /// Ticks left on the hit flash
    pub hit_timer: u8,
    pub tint: Tint,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32) -> Result<Self, ConfigError> {
        let size = ensure_positive("enemy_size", size)?;
        let speed = ensure_positive("enemy_speed", speed)?;
        Ok(Self {
            id,
            pos,
            size,
            speed,
            hp: ENEMY_START_HP,
            hit_timer: 0,
            tint: Tint::Normal,
        })
    }

    /// Collision box, truncated to whole pixels
    pub fn aabb(&self) -> Aabb {
        self.box_at(self.pos)
    }

    fn box_at(&self, pos: Vec2) -> Aabb {
        Aabb::new(pos.x.trunc(), pos.y.trunc(), self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn neighbor(&self) -> Neighbor {
        Neighbor {
            id: self.id,
            center: self.center(),
        }
    }

    /// Steer toward `target` with a random side-step order
    pub fn steer<R: Rng + ?Sized>(
        &mut self,
        target: Vec2,
        neighbors: &[Neighbor],
        obstacles: &[Aabb],
        rng: &mut R,
    ) -> SteerOutcome {
        let order = SideOrder::random(rng);
        self.steer_ordered(target, neighbors, obstacles, order)
    }

    /// Steer toward `target`, committing exactly one candidate move.
    ///
    /// Candidates, in order: direct, two side-steps, six fan rotations, then an
    /// unconditional retreat. `neighbors` may include this enemy; it is skipped
    /// by id.
    pub fn steer_ordered(
        &mut self,
        target: Vec2,
        neighbors: &[Neighbor],
        obstacles: &[Aabb],
        order: SideOrder,
    ) -> SteerOutcome {
        let center = self.center();
        let to_target = target - center;
        if to_target.length_squared() < ARRIVED_EPSILON_SQ {
            return SteerOutcome {
                steer: Steer::Arrived,
                evaluations: 0,
                delta: Vec2::ZERO,
            };
        }

        let desired = to_target.normalize() * self.speed + self.separation(center, neighbors);
        let mut evaluations = 0;

        evaluations += 1;
        if self.try_commit(desired, obstacles) {
            return self.outcome(Steer::Direct, evaluations, desired);
        }

        let perp = desired.perp();
        if perp.length_squared() > 0.0 {
            let side = perp.normalize() * self.speed * SIDESTEP_FACTOR;
            let sides = match order {
                SideOrder::PositiveFirst => [(side, true), (-side, false)],
                SideOrder::NegativeFirst => [(-side, false), (side, true)],
            };
            for (step, positive) in sides {
                evaluations += 1;
                if self.try_commit(step, obstacles) {
                    return self.outcome(Steer::SideStep { positive }, evaluations, step);
                }
            }
        }

        for degrees in FAN_ANGLES {
            let alt = rotate_degrees(desired, degrees);
            evaluations += 1;
            if self.try_commit(alt, obstacles) {
                return self.outcome(Steer::Fan { degrees }, evaluations, alt);
            }
        }

        let back = -desired * RETREAT_FACTOR;
        self.pos += back;
        evaluations += 1;
        self.outcome(Steer::Retreat, evaluations, back)
    }

    /// Push away from every neighbour closer than our own extent
    fn separation(&self, center: Vec2, neighbors: &[Neighbor]) -> Vec2 {
        let radius = self.size;
        neighbors
            .iter()
            .filter(|n| n.id != self.id)
            .fold(Vec2::ZERO, |acc, n| {
                let offset = center - n.center;
                let dist = offset.length();
                if dist > 0.0 && dist < radius {
                    acc + offset / dist * (radius - dist) * SEPARATION_GAIN
                } else {
                    acc
                }
            })
    }

    fn try_commit(&mut self, delta: Vec2, obstacles: &[Aabb]) -> bool {
        let candidate = self.pos + delta;
        if overlaps_any(&self.box_at(candidate), obstacles) {
            return false;
        }
        self.pos = candidate;
        true
    }

    fn outcome(&self, steer: Steer, evaluations: u32, delta: Vec2) -> SteerOutcome {
        SteerOutcome {
            steer,
            evaluations,
            delta,
        }
    }

    /// Take a bullet at `hit_point`. Returns true if this killed the enemy.
    ///
    /// The enemy is shoved [`KNOCKBACK`] units directly away from the impact
    /// and flashes for [`ENEMY_FLASH_TICKS`] ticks. Removal is the caller's job.
    pub fn hit_react(&mut self, hit_point: Vec2) -> bool {
        self.hp -= 1;
        let away = (self.center() - hit_point).normalize_or_zero();
        self.pos += away * KNOCKBACK;
        self.hit_timer = ENEMY_FLASH_TICKS;
        self.tint = Tint::Flash;
        self.hp <= 0
    }

    /// Advance the hit flash by one tick
    pub fn tick_flash(&mut self) {
        if self.hit_timer > 0 {
            self.hit_timer -= 1;
            if self.hit_timer == 0 {
                self.tint = Tint::Normal;
            }
        }
    }

    /// Place a new enemy just outside a random arena edge.
    ///
    /// Up to [`SPAWN_ATTEMPTS`] candidates are tried; one overlapping an
    /// existing enemy is rejected. Returns `None` when every attempt fails.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        size: f32,
        speed: f32,
        arena_width: f32,
        arena_height: f32,
        existing: &[Enemy],
        rng: &mut R,
    ) -> Result<Option<Self>, ConfigError> {
        let size = ensure_positive("enemy_size", size)?;
        let max_x = (arena_width - size).max(0.0) as i32;
        let max_y = (arena_height - size).max(0.0) as i32;

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = match rng.random_range(0..4) {
                // top
                0 => Vec2::new(rng.random_range(0..=max_x) as f32, -size),
                // bottom
                1 => Vec2::new(rng.random_range(0..=max_x) as f32, arena_height),
                // left
                2 => Vec2::new(-size, rng.random_range(0..=max_y) as f32),
                // right
                _ => Vec2::new(arena_width, rng.random_range(0..=max_y) as f32),
            };

            let enemy = Enemy::new(id, pos, size, speed)?;
            let aabb = enemy.aabb();
            if !existing.iter().any(|e| aabb.intersects(&e.aabb())) {
                return Ok(Some(enemy));
            }
        }
        Ok(None)
    }
}
