//! Nova Shooter - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `platform`: Input, storage, UI and renderer contracts plus stock implementations
//! - `highscores`: Persisted best score
//! - `game`: Session driver tying the simulation to the platform

pub mod game;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use highscores::HighScore;
pub use tuning::Tuning;

/// Fixed geometry shared by simulation and presentation
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 900.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship box, spawned centered near the bottom edge
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;

    /// Bullets (both owners share the same box)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    /// Enemy and gift boxes
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const GIFT_SIZE: f32 = 30.0;

    /// Spawn lane: x in [SPAWN_MARGIN, width - SPAWN_MARGIN], y just above the screen
    pub const SPAWN_MARGIN: f32 = 30.0;
    pub const SPAWN_Y: f32 = -30.0;

    /// Gifts fall slower than enemies
    pub const GIFT_SPEED_FACTOR: f32 = 0.8;
    /// Pulse phase advance per tick (radians)
    pub const GIFT_PULSE_STEP: f32 = 0.1;

    /// Per-level enemy speed bonus (speed = base * (1 + level * LEVEL_SPEED_BONUS))
    pub const LEVEL_SPEED_BONUS: f32 = 0.1;

    /// Explosion bursts
    pub const PARTICLES_PER_BURST: usize = 20;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 4.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.95;
}
