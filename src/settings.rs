//! Session settings
//!
//! Fixed at session start. Loaded from JSON; any field left out falls back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ensure_positive};

/// Everything a session needs to know before the first frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_start_life: u8,
    /// Invincibility window after a hit (ms)
    pub invincibility_ms: u32,

    // === Enemies ===
    pub enemy_size: f32,
    /// Speed of wave 1 enemies
    pub enemy_speed: f32,
    /// Added to enemy speed on every new wave
    pub enemy_speed_step: f32,

    // === Projectiles ===
    pub bullet_size: f32,
    pub bullet_speed: f32,

    // === Obstacles ===
    pub obstacle_size: f32,
    pub obstacle_count: u32,

    // === Weapon ===
    pub max_shots: u32,
    pub reload_ms: u32,

    // === Waves ===
    pub first_wave_enemies: u32,
    pub max_waves: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_start_life: PLAYER_START_LIFE,
            invincibility_ms: INVINCIBILITY_MS,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED_INIT,
            enemy_speed_step: ENEMY_SPEED_STEP,

            bullet_size: BULLET_SIZE,
            bullet_speed: BULLET_SPEED,

            obstacle_size: BOX_SIZE,
            obstacle_count: OBSTACLES_COUNT,

            max_shots: MAX_SHOTS,
            reload_ms: RELOAD_TIME_MS,

            first_wave_enemies: ENEMIES_TO_SPAWN_INIT,
            max_waves: MAX_WAVES,
        }
    }
}

impl Settings {
    /// Settings for an arena of the given size, everything else default
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Fail fast on values no session can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("arena_width", self.arena_width)?;
        ensure_positive("arena_height", self.arena_height)?;
        ensure_positive("player_size", self.player_size)?;
        ensure_positive("player_speed", self.player_speed)?;
        ensure_positive("enemy_size", self.enemy_size)?;
        ensure_positive("enemy_speed", self.enemy_speed)?;
        ensure_positive("bullet_size", self.bullet_size)?;
        ensure_positive("bullet_speed", self.bullet_speed)?;
        ensure_positive("obstacle_size", self.obstacle_size)?;

        if !self.enemy_speed_step.is_finite() || self.enemy_speed_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "enemy_speed_step must be >= 0, got {}",
                self.enemy_speed_step
            )));
        }

        // Player, enemy and obstacle boxes must each fit inside the arena
        // somewhere.
        let needed = self
            .player_size
            .max(self.enemy_size)
            .max(self.obstacle_size);
        if self.arena_width < needed || self.arena_height < needed {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                needed,
            });
        }

        if self.player_start_life == 0 {
            return Err(ConfigError::Invalid("player_start_life must be at least 1".into()));
        }
        if self.max_shots == 0 {
            return Err(ConfigError::Invalid("max_shots must be at least 1".into()));
        }
        if self.max_waves == 0 {
            return Err(ConfigError::Invalid("max_waves must be at least 1".into()));
        }
        if self.first_wave_enemies > MAX_FIRST_WAVE_ENEMIES {
            return Err(ConfigError::Invalid(format!(
                "first_wave_enemies must be at most {}, got {}",
                MAX_FIRST_WAVE_ENEMIES, self.first_wave_enemies
            )));
        }
        if self.obstacle_count > MAX_OBSTACLES {
            return Err(ConfigError::Invalid(format!(
                "obstacle_count must be at most {}, got {}",
                MAX_OBSTACLES, self.obstacle_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "arena_width": 800, "arena_height": 600 }"#).unwrap();
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, 600.0);
        assert_eq!(settings.max_waves, MAX_WAVES);
        assert_eq!(settings.bullet_speed, BULLET_SPEED);
    }

    #[test]
    fn test_negative_speed_rejected() {
        let err = Settings::from_json(r#"{ "enemy_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "enemy_speed", .. }));
    }

    #[test]
    fn test_arena_smaller_than_player_rejected() {
        let err = Settings::with_arena(30.0, 600.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ArenaTooSmall { .. }));
    }

    #[test]
    fn test_zero_magazine_rejected() {
        let settings = Settings {
            max_shots: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let err = Settings::from_json(r#"{ "first_wave_enemies": 500000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = Settings::from_json(r#"{ "obstacle_count": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let settings = Settings::from_json(r#"{ "first_wave_enemies": 1000 }"#).unwrap();
        assert_eq!(settings.first_wave_enemies, MAX_FIRST_WAVE_ENEMIES);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
