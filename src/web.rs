//! Browser bindings
//!
//! The page owns the canvas, the DOM and `requestAnimationFrame`; it
//! forwards key events here, calls `frame()` once per animation callback
//! while it returns true, then draws from `snapshot_json()` and applies
//! `drain_ui_json()` to the HUD.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::platform::{
    InputSource, KeyState, KeyValueStore, NullRenderer, StorageError, UiReporter,
};
use crate::sim::GameEvent;
use crate::tuning::Tuning;

/// `window.localStorage`
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

/// Collects HUD updates until the page drains them
#[derive(Default)]
struct HudQueue {
    updates: Vec<GameEvent>,
}

impl UiReporter for HudQueue {
    fn score_changed(&mut self, score: u64) {
        self.updates.push(GameEvent::ScoreChanged { score });
    }

    fn level_changed(&mut self, level: u32) {
        self.updates.push(GameEvent::LevelChanged { level });
    }

    fn health_changed(&mut self, health: u32, max_health: u32) {
        self.updates
            .push(GameEvent::HealthChanged { health, max_health });
    }

    fn game_over(&mut self, final_score: u64, final_level: u32, high_score: u64) {
        self.updates.push(GameEvent::GameOver {
            score: final_score,
            level: final_level,
            high_score,
        });
    }
}

/// The game as seen from JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStore>,
    keys: KeyState,
    hud: HudQueue,
}

#[wasm_bindgen]
impl WebGame {
    /// Optional JSON tuning overrides; invalid JSON falls back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(err)) => {
                log::warn!("Bad tuning JSON ({}), using defaults", err);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        WebGame {
            game: Game::new(tuning, seed, LocalStore),
            keys: KeyState::new(),
            hud: HudQueue::default(),
        }
    }

    /// Start or restart a run
    pub fn start(&mut self) {
        self.keys.release_all();
        self.game.start();
    }

    pub fn stop_to_menu(&mut self) {
        self.keys.release_all();
        self.game.stop_to_menu();
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Drop held keys when the page loses focus
    pub fn blur(&mut self) {
        self.keys.release_all();
    }

    /// One animation callback's worth of simulation
    pub fn frame(&mut self) -> bool {
        let input = self.keys.sample();
        self.game.frame(&input, &mut self.hud, &mut NullRenderer)
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    /// Best score, as a JS number
    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    /// Everything the canvas needs for this frame
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.state().snapshot()).unwrap_or_else(|err| {
            log::error!("Snapshot serialization failed: {}", err);
            String::from("null")
        })
    }

    /// HUD updates since the last call, oldest first
    pub fn drain_ui_json(&mut self) -> String {
        let updates = std::mem::take(&mut self.hud.updates);
        serde_json::to_string(&updates).unwrap_or_else(|err| {
            log::error!("HUD serialization failed: {}", err);
            String::from("[]")
        })
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Nova Shooter wasm module loaded");
}
