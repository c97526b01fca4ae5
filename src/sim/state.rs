//! Session state and core simulation types
//!
//! One [`GameState`] owns everything that lives for an episode. Nothing here
//! is global; a reset rebuilds every per-episode field in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::enemy::{Enemy, Tint};
use super::obstacles::ObstacleField;
use super::player::Player;
use super::projectile::Projectile;
use super::wave::{WaveController, WaveOutcome};
use super::weapon::Weapon;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Every wave cleared
    Won,
    /// Player out of lives
    Lost,
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { id: u32 },
    ReloadStarted,
    ReloadFinished,
    PlayerHurt { life: u8 },
    /// Enemy ran into the player and was consumed (no kill awarded)
    EnemyContact { id: u32 },
    EnemyKilled { id: u32 },
    WaveAdvanced { wave: u32 },
    SessionWon,
    SessionLost,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed of the current episode
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub player: Player,
    /// Live enemies, in creation order
    pub enemies: Vec<Enemy>,
    /// Live bullets, in creation order
    pub projectiles: Vec<Projectile>,
    pub obstacles: ObstacleField,
    pub waves: WaveController,
    pub weapon: Weapon,
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Validate `settings` and set up the first episode
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut state = Self {
            player: spawn_player(&settings)?,
            waves: wave_controller(&settings),
            weapon: Weapon::new(settings.max_shots, settings.reload_ms),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Playing,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            obstacles: ObstacleField::empty(),
            kills: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.populate()?;
        log::info!("New session with seed {}", seed);
        Ok(state)
    }

    /// Start a fresh episode: new player, obstacles, enemies, counters.
    ///
    /// The next seed is drawn from the current RNG, so a run of resets is
    /// still reproducible from the first seed.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let seed = self.rng.random::<u64>();
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = SessionPhase::Playing;
        self.player = spawn_player(&self.settings)?;
        self.waves = wave_controller(&self.settings);
        self.weapon = Weapon::new(self.settings.max_shots, self.settings.reload_ms);
        self.projectiles.clear();
        self.enemies.clear();
        self.kills = 0;
        self.time_ticks = 0;
        self.next_id = 1;
        self.populate()?;
        log::info!("Session reset with seed {}", seed);
        Ok(())
    }

    fn populate(&mut self) -> Result<(), ConfigError> {
        let s = &self.settings;
        self.obstacles = ObstacleField::generate(
            s.obstacle_count,
            s.obstacle_size,
            s.arena_width,
            s.arena_height,
            &self.player.aabb,
            &mut self.rng,
        );
        self.waves.init_wave(
            self.waves.quota,
            &mut self.enemies,
            &mut self.next_id,
            s.arena_width,
            s.arena_height,
            &mut self.rng,
        )?;
        Ok(())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance the wave controller; call once when the last enemy is gone
    pub fn on_wave_cleared(&mut self) -> Result<WaveOutcome, ConfigError> {
        let (width, height) = (self.settings.arena_width, self.settings.arena_height);
        self.waves
            .on_wave_cleared(&mut self.enemies, &mut self.next_id, width, height, &mut self.rng)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.aabb,
            life: self.player.life,
            lives_lost: self.settings.player_start_life.saturating_sub(self.player.life),
            invincible: self.player.is_invincible(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    aabb: e.aabb(),
                    tint: e.tint,
                })
                .collect(),
            projectiles: self.projectiles.iter().map(|p| p.aabb).collect(),
            obstacles: self.obstacles.boxes().to_vec(),
            wave: self.waves.wave,
            kills: self.kills,
            ammo: self.weapon.ammo(),
            reloading: self.weapon.is_reloading(),
            ticks: self.time_ticks,
        }
    }
}

/// Player with its top-left corner on the arena midpoint, pulled back inside
/// when the arena is too narrow for that
fn spawn_player(settings: &Settings) -> Result<Player, ConfigError> {
    let pos = Vec2::new(
        (settings.arena_width / 2.0).floor().min(settings.arena_width - settings.player_size),
        (settings.arena_height / 2.0).floor().min(settings.arena_height - settings.player_size),
    );
    Player::new(
        pos,
        settings.player_size,
        settings.player_speed,
        settings.player_start_life,
        settings.invincibility_ms,
    )
}

fn wave_controller(settings: &Settings) -> WaveController {
    WaveController::new(
        settings.first_wave_enemies,
        settings.max_waves,
        settings.enemy_size,
        settings.enemy_speed,
        settings.enemy_speed_step,
    )
}

/// An enemy as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub aabb: Aabb,
    pub tint: Tint,
}

/// Post-step view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub player: Aabb,
    pub life: u8,
    pub lives_lost: u8,
    pub invincible: bool,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<Aabb>,
    pub obstacles: Vec<Aabb>,
    pub wave: u32,
    pub kills: u32,
    pub ammo: u32,
    pub reloading: bool,
    /// Frames simulated this episode
    pub ticks: u64,
}
