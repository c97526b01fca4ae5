//! The player-controlled unit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::{ConfigError, ensure_positive};

/// Held movement keys (W/A/S/D or equivalent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Unit or zero direction.
    ///
    /// Opposing keys do not cancel: down wins over up, right over left.
    pub fn direction(self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y = -1.0;
        }
        if self.down {
            dir.y = 1.0;
        }
        if self.left {
            dir.x = -1.0;
        }
        if self.right {
            dir.x = 1.0;
        }
        dir.normalize_or_zero()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub aabb: Aabb,
    pub speed: f32,
    /// Velocity applied this frame
    pub vel: Vec2,
    pub life: u8,
    /// Remaining invincibility (ms); zero means vulnerable
    pub invincible_ms: u32,
    /// Length of the invincibility window (ms)
    pub invincibility_window_ms: u32,
}

impl Player {
    /// Square player of side `size` with its top-left corner at `pos`
    pub fn new(pos: Vec2, size: f32, speed: f32, life: u8, invincibility_window_ms: u32) -> Result<Self, ConfigError> {
        let size = ensure_positive("player_size", size)?;
        let speed = ensure_positive("player_speed", speed)?;
        Ok(Self {
            aabb: Aabb::new(pos.x, pos.y, size, size),
            speed,
            vel: Vec2::ZERO,
            life,
            invincible_ms: 0,
            invincibility_window_ms,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.aabb.center()
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    /// Set this frame's velocity from the held keys
    pub fn apply_input(&mut self, intent: MoveIntent) {
        self.vel = intent.direction() * self.speed;
    }

    /// Move by the current velocity, one axis at a time.
    ///
    /// Each axis is displaced and then resolved against every obstacle before
    /// the other axis moves, so a diagonal push into a corner slides along the
    /// free axis instead of snagging. Finally the box is clamped inside the
    /// arena.
    pub fn move_and_collide(&mut self, obstacles: &[Aabb], arena_width: f32, arena_height: f32) {
        self.aabb.pos.x += self.vel.x;
        for obstacle in obstacles {
            if self.aabb.intersects(obstacle) {
                if self.vel.x > 0.0 {
                    self.aabb.set_right(obstacle.left());
                } else if self.vel.x < 0.0 {
                    self.aabb.set_left(obstacle.right());
                }
            }
        }

        self.aabb.pos.y += self.vel.y;
        for obstacle in obstacles {
            if self.aabb.intersects(obstacle) {
                if self.vel.y > 0.0 {
                    self.aabb.set_bottom(obstacle.top());
                } else if self.vel.y < 0.0 {
                    self.aabb.set_top(obstacle.bottom());
                }
            }
        }

        self.aabb.clamp_to_arena(arena_width, arena_height);
    }

    /// Count the invincibility window down
    pub fn update_invincibility(&mut self, dt_ms: u32) {
        self.invincible_ms = self.invincible_ms.saturating_sub(dt_ms);
    }

    /// Lose one life unless invincible. Returns true if damage was taken.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.life = self.life.saturating_sub(1);
        self.invincible_ms = self.invincibility_window_ms;
        true
    }
}
