//! Wave progression and enemy batch spawning

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use crate::consts::WAVE_ATTEMPTS_PER_ENEMY;
use crate::error::ConfigError;
use crate::wave_quota;

/// What clearing a wave led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    /// Last wave done; nothing spawned
    Won,
    /// Next wave started with `spawned` of `quota` enemies placed
    Advanced { wave: u32, quota: u32, spawned: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveController {
    /// Current wave (1-based)
    pub wave: u32,
    pub max_waves: u32,
    /// Enemies requested for the current wave
    pub quota: u32,
    /// Speed given to newly spawned enemies
    pub enemy_speed: f32,
    pub speed_step: f32,
    pub enemy_size: f32,
}

impl WaveController {
    pub fn new(first_quota: u32, max_waves: u32, enemy_size: f32, enemy_speed: f32, speed_step: f32) -> Self {
        Self {
            wave: 1,
            max_waves,
            quota: first_quota,
            enemy_speed,
            speed_step,
            enemy_size,
        }
    }

    /// Replace `enemies` with a fresh batch of up to `count`.
    ///
    /// Gives up after `count * 10` placement calls in total; a short wave is
    /// fine. Returns the number placed.
    pub fn init_wave<R: Rng + ?Sized>(
        &self,
        count: u32,
        enemies: &mut Vec<Enemy>,
        next_id: &mut u32,
        arena_width: f32,
        arena_height: f32,
        rng: &mut R,
    ) -> Result<u32, ConfigError> {
        enemies.clear();
        let max_attempts = count.saturating_mul(WAVE_ATTEMPTS_PER_ENEMY);
        let mut attempts = 0;
        let mut spawned = 0;

        while spawned < count && attempts < max_attempts {
            attempts += 1;
            let spawn = Enemy::spawn(
                *next_id,
                self.enemy_size,
                self.enemy_speed,
                arena_width,
                arena_height,
                enemies,
                rng,
            )?;
            if let Some(enemy) = spawn {
                *next_id += 1;
                enemies.push(enemy);
                spawned += 1;
            }
        }

        if spawned < count {
            log::warn!("Wave {} under-filled: {}/{} enemies placed", self.wave, spawned, count);
        }
        Ok(spawned)
    }

    /// Call exactly once when the live enemy list becomes empty
    pub fn on_wave_cleared<R: Rng + ?Sized>(
        &mut self,
        enemies: &mut Vec<Enemy>,
        next_id: &mut u32,
        arena_width: f32,
        arena_height: f32,
        rng: &mut R,
    ) -> Result<WaveOutcome, ConfigError> {
        self.wave += 1;
        if self.wave > self.max_waves {
            log::info!("All {} waves cleared", self.max_waves);
            return Ok(WaveOutcome::Won);
        }

        self.quota = wave_quota(self.wave);
        self.enemy_speed += self.speed_step;
        let spawned = self.init_wave(self.quota, enemies, next_id, arena_width, arena_height, rng)?;
        log::info!(
            "Wave {}: {} enemies at speed {:.2}",
            self.wave,
            spawned,
            self.enemy_speed
        );
        Ok(WaveOutcome::Advanced {
            wave: self.wave,
            quota: self.quota,
            spawned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn controller() -> WaveController {
        WaveController::new(20, 4, 40.0, 1.0, 0.2)
    }

    #[test]
    fn test_init_wave_fills_quota() {
        let mut rng = Pcg32::seed_from_u64(5);
        let waves = controller();
        let mut enemies = Vec::new();
        let mut next_id = 1;
        let spawned = waves.init_wave(20, &mut enemies, &mut next_id, 1280.0, 720.0, &mut rng).unwrap();
        assert_eq!(spawned, 20);
        assert_eq!(enemies.len(), 20);
        assert_eq!(next_id, 21);
        for (i, a) in enemies.iter().enumerate() {
            for b in &enemies[i + 1..] {
                assert!(!a.aabb().intersects(&b.aabb()));
            }
        }
    }

    #[test]
    fn test_init_wave_underfills_tiny_arena() {
        let mut rng = Pcg32::seed_from_u64(5);
        let waves = controller();
        let mut enemies = Vec::new();
        let mut next_id = 1;
        // Four edge slots only
        let spawned = waves.init_wave(10, &mut enemies, &mut next_id, 40.0, 40.0, &mut rng).unwrap();
        assert!(spawned <= 4);
        assert_eq!(enemies.len() as u32, spawned);
    }

    #[test]
    fn test_cleared_advances_and_speeds_up() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut waves = controller();
        let mut enemies = Vec::new();
        let mut next_id = 1;

        let outcome = waves
            .on_wave_cleared(&mut enemies, &mut next_id, 1280.0, 720.0, &mut rng)
            .unwrap();
        assert_eq!(
            outcome,
            WaveOutcome::Advanced {
                wave: 2,
                quota: 19,
                spawned: enemies.len() as u32
            }
        );
        assert_eq!(enemies.len(), 19);
        assert!((waves.enemy_speed - 1.2).abs() < 1e-6);
        assert!(enemies.iter().all(|e| (e.speed - 1.2).abs() < 1e-6));
    }

    #[test]
    fn test_last_wave_wins_without_spawning() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut waves = controller();
        waves.wave = 4;
        let mut enemies = Vec::new();
        let mut next_id = 1;
        let speed = waves.enemy_speed;

        let outcome = waves
            .on_wave_cleared(&mut enemies, &mut next_id, 1280.0, 720.0, &mut rng)
            .unwrap();
        assert_eq!(outcome, WaveOutcome::Won);
        assert!(enemies.is_empty());
        assert_eq!(next_id, 1);
        assert_eq!(waves.enemy_speed, speed);
    }
}
