//! Game state and core simulation types
//!
//! Entities are plain mutable records; all behavior lives in the update
//! functions. `GameState` is the single session struct owned by the
//! simulation loop - there are no ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::upgrade::UpgradeKind;
use crate::consts::*;
use crate::format_time;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Manual pause
    Paused,
    /// Simulation suspended pending an upgrade choice
    AwaitingUpgrade,
    /// Run ended
    GameOver,
}

/// World bounds in pixels (the viewport; may change on resize)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// HP regenerated per second
    pub regen: f32,
    /// Contact damage reduction fraction, [0, 0.6]
    pub armor: f32,
    /// Seconds between volleys, floored at 0.16
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_count: u32,
    /// Gems inside this radius home toward the player
    pub pickup_radius: f32,
    /// Run-clock time of the last contact hit
    pub last_hit: f32,
    pub hit_cooldown: f32,
}

impl Player {
    pub fn new(world: &World) -> Self {
        Self {
            pos: world.center(),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            regen: 0.0,
            armor: 0.0,
            fire_rate: PLAYER_FIRE_RATE,
            bullet_speed: PLAYER_BULLET_SPEED,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            bullet_count: 1,
            pickup_radius: PLAYER_PICKUP_RADIUS,
            last_hit: -999.0,
            hit_cooldown: PLAYER_HIT_COOLDOWN,
        }
    }

    /// Clamp position back inside world bounds
    pub fn clamp_to(&mut self, world: &World) {
        self.pos.x = self.pos.x.clamp(self.radius, world.width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, world.height - self.radius);
    }
}

/// A swarm enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    /// Contact damage before armor reduction
    pub damage: f32,
}

impl Enemy {
    /// Spawn an enemy with difficulty-scaled stats
    pub fn spawn(pos: Vec2, difficulty: f32) -> Self {
        let hp = 22.0 + difficulty * 12.0;
        Self {
            pos,
            radius: 10.0 + (difficulty * 1.6).min(12.0),
            hp,
            max_hp: hp,
            speed: 55.0 + difficulty * 14.0,
            damage: 6.0 + difficulty * 1.6,
        }
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub damage: f32,
    pub age: f32,
    pub max_age: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, speed: f32, damage: f32) -> Self {
        Self {
            pos,
            radius: BULLET_RADIUS,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            damage,
            age: 0.0,
            max_age: BULLET_LIFETIME,
        }
    }
}

/// An experience gem dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u32,
}

impl Gem {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: GEM_RADIUS,
            value: GEM_VALUE,
        }
    }
}

/// RNG state wrapper, records the run seed for reproducibility
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state, exclusively owned by the simulation loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    pub world: World,
    pub phase: GamePhase,
    /// Elapsed run time in seconds (excludes paused time)
    pub time: f32,
    pub kills: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub spawn_timer: f32,
    pub shoot_timer: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub gems: Vec<Gem>,
    /// Exactly 3 entries while AwaitingUpgrade, empty otherwise
    pub upgrade_choices: Vec<UpgradeKind>,
}

impl GameState {
    /// Create a fresh session with the given seed and viewport
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let world = World::new(width, height);
        Self {
            seed,
            rng: RngState::new(seed).to_rng(),
            world,
            phase: GamePhase::Running,
            time: 0.0,
            kills: 0,
            level: 1,
            xp: 0,
            xp_to_next: super::progress::xp_for_level(1),
            spawn_timer: 0.0,
            shoot_timer: 0.0,
            player: Player::new(&world),
            enemies: Vec::new(),
            bullets: Vec::new(),
            gems: Vec::new(),
            upgrade_choices: Vec::new(),
        }
    }

    /// Re-initialize the run, atomically discarding all in-flight entities.
    /// The RNG stream continues; the viewport is kept.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.time = 0.0;
        self.kills = 0;
        self.level = 1;
        self.xp = 0;
        self.xp_to_next = super::progress::xp_for_level(1);
        self.spawn_timer = 0.0;
        self.shoot_timer = 0.0;
        self.player = Player::new(&self.world);
        self.enemies.clear();
        self.bullets.clear();
        self.gems.clear();
        self.upgrade_choices.clear();
        log::info!("run reset (seed {})", self.seed);
    }

    /// Viewport resize. Only the player is re-clamped; enemies, bullets and
    /// gems keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world = World::new(width, height);
        self.player.clamp_to(&self.world);
    }

    /// Snapshot of everything the HUD reads, once per frame
    pub fn hud(&self) -> HudState {
        HudState {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            xp: self.xp,
            xp_to_next: self.xp_to_next,
            level: self.level,
            kills: self.kills,
            time: format_time(self.time),
            paused: self.phase == GamePhase::Paused,
            awaiting_upgrade: self.phase == GamePhase::AwaitingUpgrade,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}

/// Per-frame HUD snapshot (the presentation adapter contract)
#[derive(Debug, Clone, Serialize)]
pub struct HudState {
    pub hp: f32,
    pub max_hp: f32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub level: u32,
    pub kills: u32,
    /// mm:ss
    pub time: String,
    pub paused: bool,
    pub awaiting_upgrade: bool,
    pub game_over: bool,
}
