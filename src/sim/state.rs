//! Game state and core simulation types
//!
//! Everything a single play-through needs lives in `GameState`, which is
//! owned by the session and lent to `tick` each step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::Aabb;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Events raised by the simulation for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was fired
    Shoot { projectile_id: u32 },
    /// A projectile struck the enemy
    EnemyHit { projectile_id: u32, enemy_health: u32 },
    /// Enemy died and was replaced; carries the new score
    EnemyKilled { score: u64 },
    /// Body contact hurt the player
    PlayerDamaged { health: u32 },
    /// Player health reached zero
    GameOver { final_score: u64 },
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub health: u32,
}

impl Player {
    /// Spawn with the sprite centred in the arena
    pub fn spawn_at_center(id: u32, arena: &Arena) -> Self {
        Self {
            id,
            pos: arena.center() - Vec2::splat(PLAYER_SIZE / 2.0),
            health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_sprite(self.pos, PLAYER_SIZE)
    }

    /// Centre of the sprite, where shots originate from
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// The pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub health: u32,
}

impl Enemy {
    /// Spawn at a random integer position inside the spawn margins
    pub fn spawn_random(id: u32, arena: &Arena, rng: &mut Pcg32) -> Self {
        let ((x0, x1), (y0, y1)) = arena.enemy_spawn_range();
        let x = rng.random_range(x0..=x1.max(x0));
        let y = rng.random_range(y0..=y1.max(y0));
        Self {
            id,
            pos: Vec2::new(x as f32, y as f32),
            health: ENEMY_MAX_HEALTH,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_sprite(self.pos, ENEMY_SIZE)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// A shot travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Direction of travel (radians)
    pub angle: f32,
}

impl Projectile {
    /// Spawn at the muzzle: sprite centre pushed out along `angle`
    pub fn fire_from(id: u32, player: &Player, angle: f32) -> Self {
        Self {
            id,
            pos: player.center() + polar_to_cartesian(MUZZLE_OFFSET, angle),
            angle,
        }
    }

    /// Per-tick displacement
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(PROJECTILE_SPEED, self.angle)
    }

    pub fn advance(&mut self) {
        self.pos += self.velocity();
    }
}

/// Read-only view handed to renderers each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_pos: Vec2,
    pub player_health: u32,
    pub enemy_pos: Vec2,
    pub enemy_health: u32,
    pub projectiles: Vec<Vec2>,
    pub score: u64,
    pub time_ticks: u64,
    /// Simulated seconds survived
    pub elapsed: f32,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub player: Player,
    pub enemy: Enemy,
    /// Live projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds survived (sum of tick dt)
    pub elapsed: f32,
    /// Set once the player's health reaches zero
    pub over: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh game: player centred, enemy at a random spot
    pub fn new(seed: u64, arena: Arena) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::spawn_at_center(1, &arena);
        let enemy = Enemy::spawn_random(2, &arena, &mut rng);
        Self {
            seed,
            arena,
            player,
            enemy,
            projectiles: Vec::new(),
            score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            over: false,
            events: Vec::new(),
            rng,
            next_id: 3,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the enemy with a fresh one at a random position
    pub fn respawn_enemy(&mut self) {
        let id = self.next_entity_id();
        self.enemy = Enemy::spawn_random(id, &self.arena, &mut self.rng);
    }

    /// Take all events raised since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_pos: self.player.pos,
            player_health: self.player.health,
            enemy_pos: self.enemy.pos,
            enemy_health: self.enemy.health,
            projectiles: self.projectiles.iter().map(|p| p.pos).collect(),
            score: self.score,
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
        }
    }

    /// Ensure projectiles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
    }
}
