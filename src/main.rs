//! Headless driver
//!
//! Runs the simulation at a fixed 16 ms frame with a simple autopilot and
//! prints the final snapshot as JSON.
//!
//! Usage: `arena-shooter [CONFIG.json] [--seed N] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use arena_shooter::sim::{GameState, MoveIntent, SessionPhase, TickInput, tick};
    use arena_shooter::{AudioSink, LogAudio, Settings};
    use clap::Parser;
    use glam::Vec2;

    /// One frame at 60 Hz, in milliseconds
    const FRAME_MS: u32 = 16;
    const DEFAULT_FRAMES: u64 = 60 * 60;
    /// Autopilot backs off when the nearest enemy is closer than this
    const COMFORT_DISTANCE: f32 = 200.0;

    /// Headless arena run driven by an autopilot
    #[derive(Parser, Debug)]
    #[command(author, version, about)]
    struct Opts {
        /// Settings file (JSON); defaults are used when omitted
        #[arg(value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Seed of the first episode
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of 16 ms frames to simulate
        #[arg(long, default_value_t = DEFAULT_FRAMES)]
        frames: u64,
    }

    /// Fire at the nearest enemy and strafe away from it when it gets close
    fn autopilot(state: &GameState) -> TickInput {
        if !state.is_playing() {
            return TickInput {
                reset: true,
                ..TickInput::default()
            };
        }

        let me = state.player.center();
        let nearest = state
            .enemies
            .iter()
            .map(|e| e.center())
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

        let Some(target) = nearest else {
            return TickInput::default();
        };

        let mut movement = MoveIntent::default();
        let away = me - target;
        if away.length() < COMFORT_DISTANCE {
            // Sidestep perpendicular to the threat while backing off
            let dodge = (away.normalize_or_zero() + away.perp().normalize_or_zero()) * 0.5;
            let dodge = if dodge == Vec2::ZERO { Vec2::X } else { dodge };
            movement.left = dodge.x < -0.1;
            movement.right = dodge.x > 0.1;
            movement.up = dodge.y < -0.1;
            movement.down = dodge.y > 0.1;
        }

        TickInput {
            movement,
            fire_at: Some(target),
            reset: false,
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();

        let args = Opts::parse();
        let settings = match &args.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        let mut state = GameState::new(settings, args.seed).context("starting session")?;
        let mut audio = LogAudio::new();
        let mut last_phase = state.phase;
        let (mut wins, mut losses) = (0u32, 0u32);

        for _ in 0..args.frames {
            let input = autopilot(&state);
            tick(&mut state, &input, FRAME_MS);
            audio.play_events(&state.drain_events());

            if state.phase != last_phase {
                match state.phase {
                    SessionPhase::Won => wins += 1,
                    SessionPhase::Lost => losses += 1,
                    SessionPhase::Playing => {}
                }
                log::info!("Phase {:?} -> {:?}", last_phase, state.phase);
                last_phase = state.phase;
            }
        }

        log::info!(
            "Ran {} frames: {} wins, {} losses, {} sounds",
            args.frames,
            wins,
            losses,
            audio.played()
        );
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_opts_defaults() {
            let opts = Opts::try_parse_from(["arena-shooter"]).unwrap();
            assert!(opts.config.is_none());
            assert_eq!(opts.seed, 42);
            assert_eq!(opts.frames, DEFAULT_FRAMES);
        }

        #[test]
        fn test_opts_config_and_flags() {
            let opts =
                Opts::try_parse_from(["arena-shooter", "arena.json", "--seed", "7", "--frames", "120"]).unwrap();
            assert_eq!(opts.config, Some(PathBuf::from("arena.json")));
            assert_eq!(opts.seed, 7);
            assert_eq!(opts.frames, 120);
        }

        #[test]
        fn test_opts_reject_bad_input() {
            assert!(Opts::try_parse_from(["arena-shooter", "--seed"]).is_err());
            assert!(Opts::try_parse_from(["arena-shooter", "--seed", "many"]).is_err());
            assert!(Opts::try_parse_from(["arena-shooter", "--turbo"]).is_err());
        }

        #[test]
        fn test_autopilot_fires_at_nearest_and_resets_when_over() {
            let mut state = GameState::new(Settings::default(), 3).unwrap();
            let input = autopilot(&state);
            assert!(input.fire_at.is_some());
            assert!(!input.reset);

            state.phase = SessionPhase::Lost;
            let input = autopilot(&state);
            assert!(input.reset);
            assert!(input.fire_at.is_none());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
