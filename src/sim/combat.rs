//! Movement integration and collision resolution
//!
//! Each function is one stage of the tick pipeline. Pools are rebuilt
//! rather than spliced while being scanned.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::spawn::roll_enemy_fire;
use super::state::{GameState, Particle, ParticleColor};
use crate::consts::*;

/// Emit a burst of particles at `pos`
pub fn explode(state: &mut GameState, pos: Vec2, color: ParticleColor) {
    state.particles.reserve(PARTICLES_PER_BURST);
    for _ in 0..PARTICLES_PER_BURST {
        let vel = Vec2::new(
            state.rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            state.rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        let size = PARTICLE_MIN_SIZE + state.rng.random::<f32>() * PARTICLE_SIZE_RANGE;
        state.particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            size,
            color,
        });
    }
}

/// Move player bullets up; drop any that reach the top edge
pub fn advance_bullets(state: &mut GameState) {
    let speed = state.tuning.bullet_speed;
    state.bullets.retain_mut(|bullet| {
        bullet.pos.y -= speed;
        bullet.pos.y > 0.0
    });
}

/// Move enemies down, roll their fire, and resolve contact with the player
pub fn advance_enemies(state: &mut GameState) {
    let speed = state.enemy_speed();
    let damage = state.tuning.enemy_contact_damage;
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        enemy.pos.y += speed;

        if let Some(bullet) = roll_enemy_fire(state, &enemy) {
            state.enemy_bullets.push(bullet);
        }

        if overlaps(&state.player, &enemy) {
            state.take_damage(damage);
            explode(state, enemy.pos, ParticleColor::Hit);
            continue;
        }

        if enemy.pos.y < PLAYFIELD_HEIGHT {
            survivors.push(enemy);
        }
    }

    state.enemies = survivors;
}

/// Move enemy bullets down and resolve hits on the player
pub fn advance_enemy_bullets(state: &mut GameState) {
    let speed = state.tuning.enemy_bullet_speed;
    let damage = state.tuning.bullet_contact_damage;
    let bullets = std::mem::take(&mut state.enemy_bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.pos.y += speed;

        if overlaps(&state.player, &bullet) {
            state.take_damage(damage);
            explode(state, bullet.pos, ParticleColor::Hit);
            continue;
        }

        if bullet.pos.y < PLAYFIELD_HEIGHT {
            survivors.push(bullet);
        }
    }

    state.enemy_bullets = survivors;
}

/// Resolve player bullets against enemies
///
/// Each bullet claims at most one enemy (the first overlapping one in pool
/// order that is still unclaimed) and each enemy dies at most once. Matches
/// are collected first, then both pools are filtered.
pub fn resolve_bullet_hits(state: &mut GameState) {
    let mut bullet_spent = vec![false; state.bullets.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut kills: Vec<Vec2> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_dead[*ei] && overlaps(bullet, *enemy))
            .map(|(ei, _)| ei);

        if let Some(ei) = hit {
            bullet_spent[bi] = true;
            enemy_dead[ei] = true;
            kills.push(state.enemies[ei].pos);
        }
    }

    if kills.is_empty() {
        return;
    }

    state.bullets = std::mem::take(&mut state.bullets)
        .into_iter()
        .zip(bullet_spent)
        .filter_map(|(bullet, spent)| (!spent).then_some(bullet))
        .collect();
    state.enemies = std::mem::take(&mut state.enemies)
        .into_iter()
        .zip(enemy_dead)
        .filter_map(|(enemy, dead)| (!dead).then_some(enemy))
        .collect();

    let points = state.tuning.kill_score;
    for pos in kills {
        state.add_score(points);
        explode(state, pos, ParticleColor::Kill);
    }
}

/// Move gifts down, pulse them, and resolve pickups
pub fn advance_gifts(state: &mut GameState) {
    let speed = state.enemy_speed() * GIFT_SPEED_FACTOR;
    let heal = state.tuning.gift_heal;
    let gifts = std::mem::take(&mut state.gifts);
    let mut survivors = Vec::with_capacity(gifts.len());

    for mut gift in gifts {
        gift.pos.y += speed;
        gift.pulse += GIFT_PULSE_STEP;

        if overlaps(&state.player, &gift) {
            state.heal(heal);
            explode(state, gift.pos, ParticleColor::Collect);
            continue;
        }

        if gift.pos.y < PLAYFIELD_HEIGHT {
            survivors.push(gift);
        }
    }

    state.gifts = survivors;
}

/// Integrate particles and drop the spent ones
pub fn advance_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
        p.size *= PARTICLE_SHRINK;
        p.life > 0.0
    });
}
