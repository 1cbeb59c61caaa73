//! Time- and score-gated spawning
//!
//! All randomness is drawn from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, GameEvent, GameState, Gift};
use crate::consts::*;

/// Uniform x inside the spawn lane
fn spawn_x(state: &mut GameState) -> f32 {
    state
        .rng
        .random_range(SPAWN_MARGIN..=PLAYFIELD_WIDTH - SPAWN_MARGIN)
}

/// Spawn one enemy above the screen every `enemy_spawn_rate` frames
pub fn spawn_enemies(state: &mut GameState) {
    if state.frame_count % state.tuning.enemy_spawn_rate != 0 {
        return;
    }
    let x = spawn_x(state);
    state.enemies.push(Enemy::new(Vec2::new(x, SPAWN_Y)));
    log::debug!("Enemy spawned at x={:.1} (frame {})", x, state.frame_count);
}

/// Whether score has entered a gift band that has not dropped yet
pub fn gift_due(state: &GameState) -> bool {
    state.score > 0 && state.score >= state.last_gift_score + state.tuning.gift_score_step
}

/// Drop at most one gift per score band
pub fn spawn_gifts(state: &mut GameState) {
    if !gift_due(state) {
        return;
    }
    let step = state.tuning.gift_score_step;
    let x = spawn_x(state);
    state.gifts.push(Gift::new(Vec2::new(x, SPAWN_Y)));
    state.last_gift_score = state.score / step * step;
    state.push_event(GameEvent::GiftSpawned { x });
    log::debug!(
        "Gift spawned at x={:.1} (score {}, band {})",
        x,
        state.score,
        state.last_gift_score
    );
}

/// Bernoulli fire trial for one enemy; returns the bullet if it fires
pub fn roll_enemy_fire(state: &mut GameState, enemy: &Enemy) -> Option<Bullet> {
    state
        .rng
        .random_bool(state.tuning.enemy_fire_chance)
        .then(|| Bullet::new(enemy.muzzle()))
}
