//! One simulation frame
//!
//! Stages run in a fixed order, each over the whole collection before the
//! next starts:
//! 1. weapon reload, then the fire request
//! 2. player movement, collision and invincibility
//! 3. enemy steering and player contact
//! 4. bullet flight and enemy hits
//! 5. wave check
//!
//! Removals are collected during a stage and applied when it ends.

use glam::Vec2;

use super::enemy::Neighbor;
use super::player::MoveIntent;
use super::projectile::Projectile;
use super::state::{GameEvent, GameState, SessionPhase};
use super::wave::WaveOutcome;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Trigger pulled this frame, aimed at this point
    pub fire_at: Option<Vec2>,
    /// Restart request; honored only once the session has ended
    pub reset: bool,
}

/// Advance the session by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if !state.is_playing() {
        if input.reset {
            if let Err(e) = state.reset() {
                log::error!("Reset failed: {}", e);
            }
        }
        return;
    }

    state.time_ticks += 1;

    update_weapon(state, input, dt_ms);
    update_player(state, input, dt_ms);
    update_enemies(state);
    // Contact damage may have ended the session
    if !state.is_playing() {
        return;
    }
    update_projectiles(state);
    check_wave_cleared(state);
}

fn update_weapon(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if state.weapon.tick(dt_ms) {
        log::debug!("Reload finished");
        state.events.push(GameEvent::ReloadFinished);
    }

    let Some(target) = input.fire_at else { return };
    let outcome = state.weapon.try_fire();
    if !outcome.fired {
        return;
    }

    let id = state.next_entity_id();
    let s = &state.settings;
    match Projectile::new(id, state.player.center(), target, s.bullet_size, s.bullet_speed) {
        Ok(projectile) => {
            state.projectiles.push(projectile);
            state.events.push(GameEvent::ShotFired { id });
        }
        Err(e) => log::error!("Bullet rejected: {}", e),
    }

    if outcome.reload_started {
        log::debug!("Magazine empty, reloading");
        state.events.push(GameEvent::ReloadStarted);
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    let s = &state.settings;
    state.player.apply_input(input.movement);
    state
        .player
        .move_and_collide(state.obstacles.boxes(), s.arena_width, s.arena_height);
    state.player.update_invincibility(dt_ms);
}

fn update_enemies(state: &mut GameState) {
    // Separation sees where everyone stood when the stage began
    let neighbors: Vec<Neighbor> = state.enemies.iter().map(|e| e.neighbor()).collect();
    let target = state.player.center();
    let mut consumed = vec![false; state.enemies.len()];

    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.tick_flash();
        enemy.steer(target, &neighbors, state.obstacles.boxes(), &mut state.rng);

        if !state.player.aabb.intersects(&enemy.aabb()) {
            continue;
        }

        // Contact consumes the enemy even while the player is invincible
        consumed[i] = true;
        state.events.push(GameEvent::EnemyContact { id: enemy.id });
        if state.player.take_damage() {
            log::debug!("Player hurt, {} lives left", state.player.life);
            state.events.push(GameEvent::PlayerHurt {
                life: state.player.life,
            });
        }
        if state.player.is_dead() && state.phase == SessionPhase::Playing {
            log::info!("Player died on wave {} with {} kills", state.waves.wave, state.kills);
            state.phase = SessionPhase::Lost;
            state.events.push(GameEvent::SessionLost);
        }
    }

    let mut flags = consumed.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
}

fn update_projectiles(state: &mut GameState) {
    let (width, height) = (state.settings.arena_width, state.settings.arena_height);
    let mut spent = vec![false; state.projectiles.len()];
    let mut dead = vec![false; state.enemies.len()];

    for (p, projectile) in state.projectiles.iter_mut().enumerate() {
        projectile.advance();
        if projectile.is_out_of_bounds(width, height) {
            spent[p] = true;
            continue;
        }

        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(e, enemy)| !dead[*e] && projectile.aabb.intersects(&enemy.aabb()))
            .map(|(e, _)| e);

        // At most one enemy per bullet
        if let Some(e) = hit {
            spent[p] = true;
            let enemy = &mut state.enemies[e];
            if enemy.hit_react(projectile.aabb.center()) {
                dead[e] = true;
                state.kills += 1;
                log::debug!("Enemy {} killed ({} total)", enemy.id, state.kills);
                state.events.push(GameEvent::EnemyKilled { id: enemy.id });
            }
        }
    }

    let mut flags = spent.into_iter();
    state.projectiles.retain(|_| !flags.next().unwrap_or(false));
    let mut flags = dead.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
}

fn check_wave_cleared(state: &mut GameState) {
    if !state.enemies.is_empty() {
        return;
    }

    match state.on_wave_cleared() {
        Ok(WaveOutcome::Won) => {
            state.phase = SessionPhase::Won;
            state.events.push(GameEvent::SessionWon);
        }
        Ok(WaveOutcome::Advanced { wave, .. }) => {
            state.events.push(GameEvent::WaveAdvanced { wave });
        }
        Err(e) => log::error!("Wave spawn failed: {}", e),
    }
}
