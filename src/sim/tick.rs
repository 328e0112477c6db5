//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Movement is
//! expressed per tick; `dt` only feeds the survival clock.

use glam::Vec2;

use super::collision::in_closed_bounds;
use super::state::{GameEvent, GameState, Projectile};
use crate::angle_to;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire once (edge-triggered: set for one tick per key press)
    pub fire: bool,
}

impl TickInput {
    /// Net movement direction from the held keys; opposing keys cancel
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the player is dead
    if state.over {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    // --- FIRE ---
    if input.fire {
        let angle = angle_to(state.player.pos, state.enemy.pos);
        let id = state.next_entity_id();
        let projectile = Projectile::fire_from(id, &state.player, angle);
        log::debug!(
            "Tick {}: fired projectile {} at {:.3} rad",
            state.time_ticks,
            id,
            angle
        );
        state.projectiles.push(projectile);
        state.events.push(GameEvent::Shoot { projectile_id: id });
    }

    // --- PLAYER MOVEMENT ---
    let (player_min, player_max) = state.arena.player_bounds();
    let step = input.direction() * PLAYER_STEP;
    state.player.pos = (state.player.pos + step).clamp(player_min, player_max);

    // --- ENEMY AI ---
    // Chase on each axis independently (diagonal steps are not normalized)
    let delta = state.player.pos - state.enemy.pos;
    let chase = Vec2::new(step_toward(delta.x), step_toward(delta.y)) * ENEMY_STEP;
    let (enemy_min, enemy_max) = state.arena.enemy_bounds();
    state.enemy.pos = (state.enemy.pos + chase).clamp(enemy_min, enemy_max);

    // --- PROJECTILE MOTION ---
    let bounds = state.arena.projectile_bounds();
    for projectile in &mut state.projectiles {
        projectile.advance();
    }
    state
        .projectiles
        .retain(|p| in_closed_bounds(p.pos, &bounds));

    // --- PROJECTILE / ENEMY ---
    let enemy_box = state.enemy.bounds();
    let mut hits: Vec<u32> = Vec::new();
    state.projectiles.retain(|p| {
        let hit = enemy_box.contains_point(p.pos);
        if hit {
            hits.push(p.id);
        }
        !hit
    });
    for projectile_id in hits {
        state.enemy.health = state.enemy.health.saturating_sub(PROJECTILE_DAMAGE);
        state.events.push(GameEvent::EnemyHit {
            projectile_id,
            enemy_health: state.enemy.health,
        });
    }

    // --- ENEMY DEATH ---
    if state.enemy.is_dead() {
        state.score += KILL_REWARD;
        state.respawn_enemy();
        log::debug!(
            "Tick {}: enemy killed, score {}, respawned at ({}, {})",
            state.time_ticks,
            state.score,
            state.enemy.pos.x,
            state.enemy.pos.y
        );
        state.events.push(GameEvent::EnemyKilled { score: state.score });
    }

    // --- BODY CONTACT ---
    // Not edge-triggered: every tick of overlap drains both
    if state.player.bounds().overlaps(&state.enemy.bounds()) {
        state.player.health = state.player.health.saturating_sub(CONTACT_DAMAGE_TO_PLAYER);
        state.enemy.health = state.enemy.health.saturating_sub(CONTACT_DAMAGE_TO_ENEMY);
        state.events.push(GameEvent::PlayerDamaged {
            health: state.player.health,
        });
    }

    // --- GAME OVER ---
    if !state.player.is_alive() {
        state.over = true;
        log::info!(
            "Game over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Unit step toward a signed gap; no step when already aligned
fn step_toward(d: f32) -> f32 {
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Arena;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Arena::default());
        // Park the enemy far from the player so tests control contact
        state.enemy.pos = Vec2::new(40.0, 500.0);
        state
    }

    fn count<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], f: F) -> usize {
        events.iter().filter(|e| f(e)).count()
    }

    #[test]
    fn test_hold_right_moves_then_clamps() {
        let mut state = fresh(1);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player.pos, Vec2::new(468.0, 268.0));

        for _ in 0..100 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player.pos.x, 704.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut state = fresh(1);
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.pos, Vec2::new(368.0, 263.0));
    }

    #[test]
    fn test_player_clamped_at_top_left() {
        let mut state = fresh(1);
        state.player.pos = Vec2::new(34.0, 33.0);
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player.pos, Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_fire_at_enemy_directly_right() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 268.0);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].angle, 0.0);
        // Muzzle at centre + 32, then one step of travel in the same tick
        assert_eq!(state.projectiles[0].pos, Vec2::new(442.0, 300.0));
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Shoot { .. })), 1);

        // Fire is edge-triggered: an idle tick spawns nothing new
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(452.0, 300.0));
    }

    #[test]
    fn test_projectile_travels_along_angle() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 500.0);
        let angle = angle_to(state.player.pos, state.enemy.pos);
        let muzzle = state.player.center() + crate::polar_to_cartesian(MUZZLE_OFFSET, angle);
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
            SIM_DT,
        );
        for k in 2..=6 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            let expected = muzzle + Vec2::new(angle.cos(), angle.sin()) * 10.0 * k as f32;
            assert!(state.projectiles[0].pos.distance(expected) < 1e-3);
        }
    }

    #[test]
    fn test_projectile_boundary_is_closed() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 400.0);
        state.projectiles.push(Projectile {
            id: 100,
            pos: Vec2::new(41.0, 100.0),
            angle: std::f32::consts::PI,
        });
        state.projectiles.push(Projectile {
            id: 101,
            pos: Vec2::new(42.0, 200.0),
            angle: std::f32::consts::PI,
        });
        tick(&mut state, &TickInput::default(), SIM_DT);
        // x = 31 is gone, x = 32 is retained
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, 101);
        assert!((state.projectiles[0].pos.x - 32.0).abs() < 1e-4);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_five_hits_kill_once() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 268.0);
        let first_enemy = state.enemy.id;
        let mut events = Vec::new();

        for n in 0..5 {
            // Enemy steps 2 left this tick, projectile steps 10 right into its centre
            let target = state.enemy.pos + Vec2::new(-2.0 + 24.0, 24.0);
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: target - Vec2::new(10.0, 0.0),
                angle: 0.0,
            });
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if n < 4 {
                assert_eq!(state.enemy.health, 50 - 10 * (n + 1));
            }
        }

        assert_eq!(count(&events, |e| matches!(e, GameEvent::EnemyHit { .. })), 5);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::EnemyKilled { .. })), 1);
        assert_eq!(state.score, 10);
        assert_ne!(state.enemy.id, first_enemy);
        if !state.player.bounds().overlaps(&state.enemy.bounds()) {
            assert_eq!(state.enemy.health, 50);
        }
    }

    #[test]
    fn test_multiple_hits_same_tick() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 268.0);
        for i in 0..3 {
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: Vec2::new(600.0 - 2.0 + 10.0, 268.0 + 10.0 + i as f32 * 5.0),
                angle: 0.0,
            });
        }
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemy.health, 20);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_sustained_contact_drains_both() {
        let mut state = fresh(1);
        state.enemy.pos = state.player.pos + Vec2::new(8.0, 8.0);
        let mut events = Vec::new();
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
        }
        assert_eq!(state.player.health, 80);
        assert_eq!(state.enemy.health, 10);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::PlayerDamaged { .. })), 2);

        // Third tick would take the enemy below zero: clamped, respawned next tick
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 70);
        assert_eq!(state.enemy.health, 0);
        assert_eq!(state.snapshot().enemy_health, 0);
        assert_eq!(state.score, 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 10);
        assert!(state.enemy.health > 0);
    }

    #[test]
    fn test_edge_contact_does_no_damage() {
        let mut state = fresh(1);
        // After the chase step (2 left) the enemy's left edge sits exactly on x = 432
        state.enemy.pos = Vec2::new(434.0, 268.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemy.pos, Vec2::new(432.0, 268.0));
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_enemy_clamped_after_chase() {
        let mut state = fresh(1);
        state.player.pos = Vec2::new(32.0, 32.0);
        state.enemy.pos = Vec2::new(10.0, 300.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemy.pos, Vec2::new(32.0, 298.0));
    }

    #[test]
    fn test_enemy_holds_aligned_axis() {
        let mut state = fresh(1);
        state.enemy.pos = Vec2::new(600.0, 268.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemy.pos, Vec2::new(598.0, 268.0));
    }

    #[test]
    fn test_survival_clock_in_snapshot() {
        let mut state = fresh(1);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let snapshot = state.snapshot();
        assert_eq!(snapshot.time_ticks, 3);
        assert!((snapshot.elapsed - 3.0 * SIM_DT).abs() < 1e-6);

        // The clock stops with the game
        state.over = true;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.snapshot().elapsed, snapshot.elapsed);
    }

    #[test]
    fn test_game_over_then_frozen() {
        let mut state = fresh(1);
        state.score = 30;
        state.player.health = 10;
        state.enemy.pos = state.player.pos + Vec2::new(8.0, 8.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 0);
        assert!(state.over);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 30 }));

        let ticks = state.time_ticks;
        tick(
            &mut state,
            &TickInput {
                fire: true,
                right: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.time_ticks, ticks);
        assert!(state.projectiles.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Arena::default());
        let mut state2 = GameState::new(99999, Arena::default());

        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right, fire)| TickInput {
                up,
                down,
                left,
                right,
                fire,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = GameState::new(seed, Arena::default());
            let (pmin, pmax) = state.arena.player_bounds();
            let (emin, emax) = state.arena.enemy_bounds();
            let bounds = state.arena.projectile_bounds();
            let mut last_score = 0;

            for input in &inputs {
                tick(&mut state, input, SIM_DT);
                prop_assert!(state.player.health <= PLAYER_MAX_HEALTH);
                prop_assert!(state.enemy.health <= ENEMY_MAX_HEALTH);
                prop_assert!(state.player.pos.cmpge(pmin).all() && state.player.pos.cmple(pmax).all());
                prop_assert!(state.enemy.pos.cmpge(emin).all() && state.enemy.pos.cmple(emax).all());
                for p in &state.projectiles {
                    prop_assert!(in_closed_bounds(p.pos, &bounds));
                }
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(state.score % KILL_REWARD, 0);
                prop_assert_eq!(state.over, state.player.health == 0);
                last_score = state.score;
            }
        }
    }
}
