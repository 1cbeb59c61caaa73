//! Data-driven game balance
//!
//! Every gameplay knob that is not pure geometry lives here so a host can
//! load overrides from JSON. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Balance configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal player movement per tick
    pub player_speed: f32,
    /// Player bullet rise per tick
    pub bullet_speed: f32,
    /// Enemy bullet fall per tick
    pub enemy_bullet_speed: f32,
    /// Enemy fall per tick at level 0 (scaled by level)
    pub enemy_base_speed: f32,
    /// An enemy spawns every `enemy_spawn_rate` frames
    pub enemy_spawn_rate: u64,
    /// Per-enemy, per-tick probability of firing
    pub enemy_fire_chance: f64,
    /// Ticks between player shots while fire is held
    pub fire_cooldown: i32,
    /// Damage from touching an enemy
    pub enemy_contact_damage: u32,
    /// Damage from an enemy bullet
    pub bullet_contact_damage: u32,
    /// Health restored by a gift
    pub gift_heal: u32,
    /// A gift drops each time score enters a new band of this size
    pub gift_score_step: u64,
    /// Points per enemy kill
    pub kill_score: u64,
    /// Level increases each time score crosses a multiple of this
    pub level_score_step: u64,
    /// Starting and maximum health
    pub max_health: u32,
    /// Ticks the player flashes after taking damage
    pub flash_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            bullet_speed: 7.0,
            enemy_bullet_speed: 4.0,
            enemy_base_speed: 2.0,
            enemy_spawn_rate: 120,
            enemy_fire_chance: 0.02,
            fire_cooldown: 10,
            enemy_contact_damage: 20,
            bullet_contact_damage: 10,
            gift_heal: 30,
            gift_score_step: 500,
            kill_score: 100,
            level_score_step: 1000,
            max_health: 150,
            flash_ticks: 10,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document, then clamp it into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Clamp values that would otherwise panic or stall the simulation
    pub fn validated(mut self) -> Self {
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            log::warn!("player_speed {} out of range, using 0", self.player_speed);
            self.player_speed = 0.0;
        }

        // Bullets and enemies are only pruned at the edge they travel toward
        let defaults = Tuning::default();
        for (name, speed, fallback) in [
            ("bullet_speed", &mut self.bullet_speed, defaults.bullet_speed),
            (
                "enemy_bullet_speed",
                &mut self.enemy_bullet_speed,
                defaults.enemy_bullet_speed,
            ),
            (
                "enemy_base_speed",
                &mut self.enemy_base_speed,
                defaults.enemy_base_speed,
            ),
        ] {
            if !speed.is_finite() || *speed <= 0.0 {
                log::warn!("{} {} out of range, using {}", name, speed, fallback);
                *speed = fallback;
            }
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            let clamped = if self.enemy_fire_chance.is_nan() {
                0.0
            } else {
                self.enemy_fire_chance.clamp(0.0, 1.0)
            };
            log::warn!(
                "enemy_fire_chance {} out of range, using {}",
                self.enemy_fire_chance,
                clamped
            );
            self.enemy_fire_chance = clamped;
        }
        self.enemy_spawn_rate = self.enemy_spawn_rate.max(1);
        self.gift_score_step = self.gift_score_step.max(1);
        self.level_score_step = self.level_score_step.max(1);
        self.max_health = self.max_health.max(1);
        self.fire_cooldown = self.fire_cooldown.max(0);
        self
    }
}
