//! Arena Shooter - A top-down wave survival game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (steering, collisions, waves, session state)
//! - `settings`: Session configuration
//! - `audio`: Sound capability the presentation layer plugs in
//! - `error`: Configuration errors

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, LogAudio, SilentAudio, SoundEffect};
pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (headless default)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_LIFE: u8 = 3;
    /// Damage is ignored for this long after a hit
    pub const INVINCIBILITY_MS: u32 = 1000;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED_INIT: f32 = 1.0;
    pub const ENEMY_SPEED_STEP: f32 = 0.20;
    pub const ENEMY_START_HP: i32 = 1;
    /// Ticks the hit flash stays on
    pub const ENEMY_FLASH_TICKS: u8 = 6;
    /// Distance an enemy is shoved away from a bullet impact
    pub const KNOCKBACK: f32 = 40.0;
    /// Repulsion gain between overlapping neighbours
    pub const SEPARATION_GAIN: f32 = 0.02;
    /// Side-step length as a fraction of speed
    pub const SIDESTEP_FACTOR: f32 = 0.6;
    /// Fan search offsets in degrees, tried in order
    pub const FAN_ANGLES: [f32; 6] = [15.0, -15.0, 30.0, -30.0, 45.0, -45.0];
    /// Retreat length as a fraction of the desired move
    pub const RETREAT_FACTOR: f32 = 0.5;
    /// Edge placement attempts per enemy
    pub const SPAWN_ATTEMPTS: u32 = 50;

    /// Projectile defaults
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Obstacle field
    pub const BOX_SIZE: f32 = 50.0;
    pub const OBSTACLES_COUNT: u32 = 10;
    pub const OBSTACLE_ATTEMPTS: u32 = 200;

    /// Weapon
    pub const MAX_SHOTS: u32 = 10;
    pub const RELOAD_TIME_MS: u32 = 2000;

    /// Waves
    pub const ENEMIES_TO_SPAWN_INIT: u32 = 20;
    pub const MAX_WAVES: u32 = 4;
    /// Batch-wide spawn attempts per requested enemy
    pub const WAVE_ATTEMPTS_PER_ENEMY: u32 = 10;
    /// Largest first-wave quota a config may ask for
    pub const MAX_FIRST_WAVE_ENEMIES: u32 = 1000;
    /// Largest obstacle count a config may ask for
    pub const MAX_OBSTACLES: u32 = 1000;
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Quota for a wave number: `5 + wave * 7`
#[inline]
pub fn wave_quota(wave: u32) -> u32 {
    wave.saturating_mul(7).saturating_add(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_degrees_quarter_turn() {
        let v = rotate_degrees(Vec2::new(1.0, 0.0), 90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        for angle in consts::FAN_ANGLES {
            assert!((rotate_degrees(v, angle).length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_wave_quota() {
        assert_eq!(wave_quota(2), 19);
        assert_eq!(wave_quota(4), 33);
        assert_eq!(wave_quota(u32::MAX), u32::MAX);
    }
}
