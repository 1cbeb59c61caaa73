//! Session driver
//!
//! Owns the simulation state and the high score store, and runs one
//! update + one draw per host animation frame.

use crate::highscores::HighScore;
use crate::platform::{InputSource, KeyValueStore, Renderer, UiReporter};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all session state
pub struct Game<S: KeyValueStore> {
    state: GameState,
    high_score: HighScore,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Build an idle game, reading the best score from `store`
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let high_score = HighScore::load(&store);
        let mut state = GameState::new(tuning, seed);
        state.set_high_score(high_score.best());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            high_score,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Reset and begin running (also used for restart)
    pub fn start(&mut self) {
        self.state.start();
    }

    /// Back to the menu without ending the run as a loss
    pub fn stop_to_menu(&mut self) {
        self.state.stop_to_menu();
    }

    /// Advance one tick and report what changed
    pub fn update(&mut self, input: &TickInput, ui: &mut impl UiReporter) {
        tick(&mut self.state, input);
        self.flush_events(ui);
    }

    /// Forward queued events to the UI and persist a new best score
    pub fn flush_events(&mut self, ui: &mut impl UiReporter) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => ui.score_changed(score),
                GameEvent::LevelChanged { level } => ui.level_changed(level),
                GameEvent::HealthChanged { health, max_health } => {
                    ui.health_changed(health, max_health)
                }
                GameEvent::NewHighScore { score } => {
                    self.high_score.record(score, &mut self.store);
                }
                GameEvent::GameOver {
                    score,
                    level,
                    high_score,
                } => ui.game_over(score, level, high_score),
                GameEvent::GiftSpawned { .. } => {}
            }
        }
    }

    /// One animation frame: sample input, update, draw
    ///
    /// Returns true while the host should schedule another frame.
    pub fn frame(
        &mut self,
        input: &impl InputSource,
        ui: &mut impl UiReporter,
        renderer: &mut impl Renderer,
    ) -> bool {
        if !self.state.is_running() {
            self.flush_events(ui);
            return false;
        }
        let input = input.sample();
        self.update(&input, ui);
        renderer.draw(&self.state);
        self.state.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::STORAGE_KEY;
    use crate::platform::{MemoryStore, NullRenderer};
    use crate::sim::{Enemy, GamePhase};
    use glam::Vec2;

    /// Records every UI notification in order
    #[derive(Default)]
    struct Recorder {
        scores: Vec<u64>,
        levels: Vec<u32>,
        health: Vec<(u32, u32)>,
        game_overs: Vec<(u64, u32, u64)>,
    }

    impl UiReporter for Recorder {
        fn score_changed(&mut self, score: u64) {
            self.scores.push(score);
        }

        fn level_changed(&mut self, level: u32) {
            self.levels.push(level);
        }

        fn health_changed(&mut self, health: u32, max_health: u32) {
            self.health.push((health, max_health));
        }

        fn game_over(&mut self, final_score: u64, final_level: u32, high_score: u64) {
            self.game_overs.push((final_score, final_level, high_score));
        }
    }

    /// Counts draws
    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, _state: &GameState) {
            self.frames += 1;
        }
    }

    fn quiet_tuning() -> Tuning {
        Tuning {
            enemy_spawn_rate: u64::MAX,
            enemy_fire_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_loads_high_score_from_store() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "2500").unwrap();
        let game = Game::new(Tuning::default(), 1, store);
        assert_eq!(game.high_score(), 2500);
        assert_eq!(game.state().high_score, 2500);
        assert_eq!(game.state().phase, GamePhase::Idle);
    }

    #[test]
    fn test_idle_frame_does_not_tick_or_draw() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::new());
        let mut ui = Recorder::default();
        let mut renderer = CountingRenderer::default();
        assert!(!game.frame(&TickInput::default(), &mut ui, &mut renderer));
        assert_eq!(renderer.frames, 0);
        assert_eq!(game.state().frame_count, 0);
    }

    #[test]
    fn test_start_reports_initial_hud() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::new());
        let mut ui = Recorder::default();
        let mut renderer = CountingRenderer::default();
        game.start();
        assert!(game.frame(&TickInput::default(), &mut ui, &mut renderer));
        assert_eq!(ui.scores, vec![0]);
        assert_eq!(ui.levels, vec![1]);
        assert_eq!(ui.health, vec![(150, 150)]);
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_game_over_persists_new_best_and_stops() {
        let mut game = Game::new(quiet_tuning(), 1, MemoryStore::new());
        let mut ui = Recorder::default();
        let mut renderer = NullRenderer;
        game.start();
        game.state.add_score(1300);
        game.state.health = 10;
        let player = game.state.player.pos;
        game.state.enemies.push(Enemy::new(player - Vec2::new(0.0, 5.0)));

        assert!(!game.frame(&TickInput::default(), &mut ui, &mut renderer));
        assert_eq!(ui.game_overs, vec![(1300, 2, 1300)]);
        assert_eq!(game.high_score(), 1300);
        assert_eq!(game.store().get(STORAGE_KEY).unwrap().as_deref(), Some("1300"));

        // Terminal: further frames neither tick nor report a second game over
        let frame = game.state().frame_count;
        assert!(!game.frame(&TickInput::default(), &mut ui, &mut renderer));
        assert_eq!(game.state().frame_count, frame);
        assert_eq!(ui.game_overs.len(), 1);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "900").unwrap();
        let mut game = Game::new(quiet_tuning(), 1, store);
        let mut ui = Recorder::default();
        game.start();
        game.state.add_score(400);
        game.state.take_damage(500);
        game.flush_events(&mut ui);
        assert_eq!(ui.game_overs, vec![(400, 1, 900)]);
        assert_eq!(game.store().get(STORAGE_KEY).unwrap().as_deref(), Some("900"));

        game.start();
        game.start();
        assert!(game.is_running());
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().health, 150);
        assert_eq!(game.state().high_score, 900);
    }

    #[test]
    fn test_stop_to_menu_halts_frames() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::new());
        let mut ui = Recorder::default();
        let mut renderer = NullRenderer;
        game.start();
        assert!(game.frame(&TickInput::default(), &mut ui, &mut renderer));
        game.stop_to_menu();
        assert!(!game.frame(&TickInput::default(), &mut ui, &mut renderer));
        assert!(ui.game_overs.is_empty());
        assert_eq!(game.state().phase, GamePhase::Idle);
    }
}
