//! Nova Shooter entry point
//!
//! The browser build is driven from JS through the `web` bindings in the
//! library. Natively this runs a headless autoplay session: an autopilot
//! holds fire and chases the lowest enemy until the run ends.
//!
//! Environment:
//! - `NOVA_TUNING`: path to a JSON tuning file (partial files are fine)
//! - `NOVA_SEED`: RNG seed (random if unset)
//! - `NOVA_MAX_FRAMES`: frame cap (default 36000, ten minutes at 60 fps)
//! - `RUST_LOG`: log filter (default `info`)

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use nova_shooter::Game;
    use nova_shooter::Tuning;
    use nova_shooter::platform::{FileStore, LogReporter, NullRenderer};
    use nova_shooter::sim::{GameState, TickInput};

    const DEFAULT_MAX_FRAMES: u64 = 36_000;
    /// Don't chase when already this close (pixels)
    const AIM_DEADZONE: f32 = 4.0;

    fn high_score_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".nova_shooter.json")
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("NOVA_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(err) => {
                    log::warn!("Bad tuning file {}: {}, using defaults", path, err);
                    Tuning::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read tuning file {}: {}, using defaults", path, err);
                Tuning::default()
            }
        }
    }

    fn env_u64(name: &str) -> Option<u64> {
        std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
    }

    /// Always fire; line up under the enemy closest to the bottom
    fn autopilot(state: &GameState) -> TickInput {
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.pos.x)
            .or_else(|| state.gifts.first().map(|g| g.pos.x));

        let dx = target.map_or(0.0, |x| x - state.player.pos.x);
        TickInput {
            left: dx < -AIM_DEADZONE,
            right: dx > AIM_DEADZONE,
            fire: true,
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Nova Shooter (native, headless autoplay) starting...");

        let tuning = load_tuning();
        let seed = env_u64("NOVA_SEED").unwrap_or_else(rand::random);
        let max_frames = env_u64("NOVA_MAX_FRAMES").unwrap_or(DEFAULT_MAX_FRAMES);
        let store = FileStore::new(high_score_path());

        let mut game = Game::new(tuning, seed, store);
        let mut ui = LogReporter;
        let mut renderer = NullRenderer;

        game.start();
        let mut frames = 0;
        while frames < max_frames {
            let input = autopilot(game.state());
            frames += 1;
            if !game.frame(&input, &mut ui, &mut renderer) {
                break;
            }
        }

        if game.is_running() {
            log::info!("Frame cap reached, returning to menu");
            game.stop_to_menu();
        }
        let state = game.state();
        log::info!(
            "Session over after {} frames: score {}, level {}, health {}/{}, best {}",
            frames,
            state.score,
            state.level,
            state.health,
            state.tuning.max_health,
            game.high_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the `web` module's start function
}
