//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Presentation
//! layers observe it through [`GameState::snapshot`] and the queued
//! [`GameEvent`]s; they never mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Bounds;
use crate::consts::*;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Menu, nothing simulated
    Idle,
    /// Active gameplay
    Running,
    /// Health ran out; only an explicit restart leaves this phase
    GameOver,
}

/// Explosion palette tag, resolved to a color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleColor {
    /// Something hit the player
    Hit,
    /// An enemy was shot down
    Kill,
    /// A gift was collected
    Collect,
}

impl ParticleColor {
    /// CSS hex color used by the browser host
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Hit => "#f5576c",
            ParticleColor::Kill => "#667eea",
            ParticleColor::Collect => "#43e97b",
        }
    }
}

/// State changes the UI layer cares about, queued during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LevelChanged { level: u32 },
    HealthChanged { health: u32, max_health: u32 },
    GiftSpawned { x: f32 },
    NewHighScore { score: u64 },
    GameOver { score: u64, level: u32, high_score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    /// Ticks left in the damage flash window
    pub flash_ticks: u32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Self::spawn_point(),
            speed,
            flash_ticks: 0,
        }
    }

    fn spawn_point() -> Vec2 {
        Vec2::new(
            PLAYFIELD_WIDTH / 2.0,
            PLAYFIELD_HEIGHT - PLAYER_BOTTOM_OFFSET,
        )
    }

    /// Back to the spawn point with no flash
    pub fn reset(&mut self) {
        self.pos = Self::spawn_point();
        self.flash_ticks = 0;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Apply horizontal intent and clamp inside the playfield
    pub fn steer(&mut self, left: bool, right: bool) {
        let mut dx = 0.0;
        if left {
            dx -= self.speed;
        }
        if right {
            dx += self.speed;
        }
        let half = PLAYER_WIDTH / 2.0;
        self.pos.x = (self.pos.x + dx).clamp(half, PLAYFIELD_WIDTH - half);
    }

    /// Top-center of the ship, where bullets leave
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2.0)
    }
}

impl Bounds for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// A projectile; player and enemy bullets live in separate pools
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}

impl Bounds for Bullet {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// A descending enemy ship
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Bottom-center, where enemy bullets leave
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + ENEMY_SIZE / 2.0)
    }
}

impl Bounds for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(ENEMY_SIZE)
    }
}

/// A falling health pickup
#[derive(Debug, Clone, Serialize)]
pub struct Gift {
    pub pos: Vec2,
    /// Pulse animation phase (radians)
    pub pulse: f32,
}

impl Gift {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, pulse: 0.0 }
    }
}

impl Bounds for Gift {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(GIFT_SIZE)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
    pub color: ParticleColor,
}

/// Borrowed view of everything a renderer draws
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub high_score: u64,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub gifts: &'a [Gift],
    pub particles: &'a [Particle],
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance knobs for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1, never decreases
    pub level: u32,
    /// Always within [0, tuning.max_health]
    pub health: u32,
    /// Best score seen, carried across sessions
    pub high_score: u64,
    /// Last gift band boundary (multiple of gift_score_step)
    pub last_gift_score: u64,
    /// Ticks since start
    pub frame_count: u64,
    /// Player may fire when this is <= 0
    pub fire_cooldown: i32,
    pub player: Player,
    /// Player bullets (moving up)
    pub bullets: Vec<Bullet>,
    /// Enemy bullets (moving down)
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub gifts: Vec<Gift>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Spawn positions, fire trials and particle spread
    pub(crate) rng: Pcg32,
    /// Events queued since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with a seeded RNG
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Create an idle session with an explicit RNG
    pub fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let tuning = tuning.validated();
        Self {
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            health: tuning.max_health,
            high_score: 0,
            last_gift_score: 0,
            frame_count: 0,
            fire_cooldown: 0,
            player: Player::new(tuning.player_speed),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            gifts: Vec::new(),
            particles: Vec::new(),
            rng,
            events: Vec::new(),
            tuning,
        }
    }

    /// Reset everything except the high score and begin running
    pub fn start(&mut self) {
        self.score = 0;
        self.level = 1;
        self.health = self.tuning.max_health;
        self.last_gift_score = 0;
        self.frame_count = 0;
        self.fire_cooldown = 0;
        self.player.speed = self.tuning.player_speed;
        self.player.reset();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.gifts.clear();
        self.particles.clear();
        self.phase = GamePhase::Running;

        self.events.push(GameEvent::ScoreChanged { score: self.score });
        self.events.push(GameEvent::LevelChanged { level: self.level });
        self.push_health_event();
        log::info!("Session started (high score {})", self.high_score);
    }

    /// Leave the session without it counting as a loss
    pub fn stop_to_menu(&mut self) {
        if self.phase != GamePhase::Idle {
            log::info!("Returned to menu at score {}", self.score);
        }
        self.phase = GamePhase::Idle;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Seed the best score loaded from storage
    pub fn set_high_score(&mut self, high_score: u64) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Current enemy fall speed (grows 10% of base per level)
    pub fn enemy_speed(&self) -> f32 {
        self.tuning.enemy_base_speed * (1.0 + self.level as f32 * LEVEL_SPEED_BONUS)
    }

    /// Award points, raising the level once per level step crossed
    pub fn add_score(&mut self, points: u64) {
        let step = self.tuning.level_score_step;
        let before = self.score / step;
        self.score += points;
        let after = self.score / step;
        self.events.push(GameEvent::ScoreChanged { score: self.score });

        if after > before {
            self.level += (after - before) as u32;
            log::info!("Level up: {} (score {})", self.level, self.score);
            self.events.push(GameEvent::LevelChanged { level: self.level });
        }
    }

    /// Subtract health, flash, and end the run once health hits zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.player.flash_ticks = self.tuning.flash_ticks;
        self.push_health_event();

        if self.health == 0 {
            self.game_over();
        }
    }

    /// Restore health, capped at max
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.tuning.max_health);
        self.push_health_event();
    }

    /// Running -> GameOver; no-op from any other phase
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;

        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("New high score: {}", self.score);
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
        log::info!(
            "Game over: score {}, level {}, high score {}",
            self.score,
            self.level,
            self.high_score
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
            high_score: self.high_score,
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn push_health_event(&mut self) {
        self.events.push(GameEvent::HealthChanged {
            health: self.health,
            max_health: self.tuning.max_health,
        });
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score,
            level: self.level,
            health: self.health,
            max_health: self.tuning.max_health,
            high_score: self.high_score,
            player: &self.player,
            bullets: &self.bullets,
            enemy_bullets: &self.enemy_bullets,
            enemies: &self.enemies,
            gifts: &self.gifts,
            particles: &self.particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> GameState {
        let mut state = GameState::new(Tuning::default(), 7);
        state.start();
        state.drain_events();
        state
    }

    fn game_over_count(state: &GameState) -> usize {
        state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level, 1);
        assert_eq!(state.health, 150);
        assert_eq!(state.player.pos, Vec2::new(450.0, 520.0));
    }

    #[test]
    fn test_steer_clamps_to_playfield() {
        let mut player = Player::new(5.0);
        player.pos.x = 22.0;
        player.steer(true, false);
        assert_eq!(player.pos.x, 20.0);

        player.pos.x = 878.0;
        player.steer(false, true);
        assert_eq!(player.pos.x, 880.0);
    }

    #[test]
    fn test_steer_opposite_intents_cancel() {
        let mut player = Player::new(5.0);
        player.steer(true, true);
        assert_eq!(player.pos.x, 450.0);
    }

    #[test]
    fn test_damage_clamps_and_ends_once() {
        let mut state = running();
        state.health = 10;
        state.take_damage(15);
        assert_eq!(state.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(game_over_count(&state), 1);

        state.take_damage(15);
        assert_eq!(state.health, 0);
        assert_eq!(game_over_count(&state), 1);
    }

    #[test]
    fn test_damage_opens_flash_window() {
        let mut state = running();
        state.take_damage(10);
        assert!(state.player.is_flashing());
        assert_eq!(state.health, 140);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut state = running();
        state.health = 140;
        state.heal(30);
        assert_eq!(state.health, 150);
    }

    #[test]
    fn test_level_up_per_thousand() {
        let mut state = running();
        for _ in 0..9 {
            state.add_score(100);
        }
        assert_eq!(state.level, 1);
        state.add_score(100);
        assert_eq!(state.level, 2);
        // Staying at 1000 must not keep levelling
        state.add_score(0);
        assert_eq!(state.level, 2);
        for _ in 0..10 {
            state.add_score(100);
        }
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_level_up_counts_every_crossed_step() {
        let mut state = running();
        state.add_score(2500);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut state = running();
        state.set_high_score(300);
        state.add_score(500);
        state.game_over();
        assert_eq!(state.high_score, 500);
        assert!(
            state
                .events()
                .contains(&GameEvent::NewHighScore { score: 500 })
        );
    }

    #[test]
    fn test_game_over_keeps_higher_record() {
        let mut state = running();
        state.set_high_score(900);
        state.add_score(200);
        state.game_over();
        assert_eq!(state.high_score, 900);
        assert!(
            !state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_game_over_ignored_when_idle() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.game_over();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_start_twice_resets_everything_but_high_score() {
        let mut state = running();
        state.add_score(1200);
        state.take_damage(40);
        state.enemies.push(Enemy::new(Vec2::new(100.0, 100.0)));
        state.bullets.push(Bullet::new(Vec2::new(100.0, 300.0)));
        state.gifts.push(Gift::new(Vec2::new(200.0, 100.0)));
        state.last_gift_score = 1000;
        state.frame_count = 77;
        state.high_score = 5000;

        for _ in 0..2 {
            state.start();
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.score, 0);
            assert_eq!(state.level, 1);
            assert_eq!(state.health, 150);
            assert_eq!(state.frame_count, 0);
            assert_eq!(state.last_gift_score, 0);
            assert!(state.bullets.is_empty());
            assert!(state.enemy_bullets.is_empty());
            assert!(state.enemies.is_empty());
            assert!(state.gifts.is_empty());
            assert!(state.particles.is_empty());
            assert_eq!(state.high_score, 5000);
        }
    }

    #[test]
    fn test_stop_to_menu_is_not_a_loss() {
        let mut state = running();
        state.add_score(700);
        state.stop_to_menu();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.high_score, 0);
        assert_eq!(game_over_count(&state), 0);
    }

    #[test]
    fn test_enemy_speed_scales_with_level() {
        let mut state = running();
        assert!((state.enemy_speed() - 2.2).abs() < 1e-5);
        state.level = 5;
        assert!((state.enemy_speed() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = running();
        state.enemies.push(Enemy::new(Vec2::new(10.0, 20.0)));
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"enemies\""));
        assert!(json.contains("\"Running\""));
    }
}
