//! Per-frame simulation tick
//!
//! Runs the pipeline stages in a fixed order, once per rendered frame.

use super::combat::{
    advance_bullets, advance_enemies, advance_enemy_bullets, advance_gifts, advance_particles,
    resolve_bullet_hits,
};
use super::spawn::{spawn_enemies, spawn_gifts};
use super::state::{Bullet, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire held
    pub fire: bool,
}

/// Steer the ship and fire if the cooldown allows
fn control_player(state: &mut GameState, input: &TickInput) {
    state.player.steer(input.left, input.right);

    if input.fire && state.fire_cooldown <= 0 {
        state.bullets.push(Bullet::new(state.player.muzzle()));
        state.fire_cooldown = state.tuning.fire_cooldown;
    }
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
}

/// Advance the game state by one frame
///
/// Does nothing unless the session is running. A tick that ends the run
/// still completes; the next one is a no-op.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }

    state.frame_count += 1;
    state.player.flash_ticks = state.player.flash_ticks.saturating_sub(1);

    control_player(state, input);
    advance_bullets(state);
    spawn_enemies(state);
    advance_enemies(state);
    advance_enemy_bullets(state);
    resolve_bullet_hits(state);
    spawn_gifts(state);
    advance_gifts(state);
    advance_particles(state);
}
