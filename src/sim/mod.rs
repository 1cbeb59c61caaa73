//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per rendered frame, fixed stage order
//! - Seeded RNG only
//! - Pools filtered after each scan, never spliced mid-scan
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod combat;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounds, overlaps};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Gift, Particle, ParticleColor, Player,
    Snapshot,
};
pub use tick::{TickInput, tick};
