//! UI reporting and rendering contracts
//!
//! Formatting and drawing belong to the host; the core only says what changed.

use crate::sim::GameState;

/// Receives state changes worth showing in the HUD
pub trait UiReporter {
    fn score_changed(&mut self, score: u64);
    fn level_changed(&mut self, level: u32);
    fn health_changed(&mut self, health: u32, max_health: u32);
    fn game_over(&mut self, final_score: u64, final_level: u32, high_score: u64);
}

/// Draws a frame from the current state
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Reports everything through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl UiReporter for LogReporter {
    fn score_changed(&mut self, score: u64) {
        log::debug!("Score: {}", score);
    }

    fn level_changed(&mut self, level: u32) {
        log::info!("Level: {}", level);
    }

    fn health_changed(&mut self, health: u32, max_health: u32) {
        log::debug!("Health: {}/{}", health, max_health);
    }

    fn game_over(&mut self, final_score: u64, final_level: u32, high_score: u64) {
        log::info!(
            "Final score {} at level {} (best {})",
            final_score,
            final_level,
            high_score
        );
    }
}

/// Headless runs draw nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &GameState) {}
}
