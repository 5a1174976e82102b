//! Combat resolver
//!
//! Nearest-target acquisition, volley spread geometry, bullet integration and
//! collision, enemy seek and contact damage. Removal during iteration uses
//! swap_remove with manual index control so multi-removals in one tick never
//! skip or reprocess entries.

use glam::Vec2;

use super::state::{Bullet, Enemy, GamePhase, GameState, Gem, World};
use crate::consts::BULLET_BOUNDS_MARGIN;

/// Index of the nearest enemy by squared distance. Ties resolve to the
/// first encountered in collection order.
pub fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<usize> {
    let mut nearest = None;
    let mut best = f32::INFINITY;
    for (i, enemy) in enemies.iter().enumerate() {
        let dist = enemy.pos.distance_squared(from);
        if dist < best {
            best = dist;
            nearest = Some(i);
        }
    }
    nearest
}

/// Bullet angles for one volley. A single bullet flies straight at the
/// target; larger volleys fan out symmetrically around the base angle with
/// total spread `min(0.7, 0.16 + 0.05 * (count - 1))` radians.
pub fn volley_angles(base: f32, count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![base];
    }
    let spread = (0.16 + 0.05 * (count - 1) as f32).min(0.7);
    let step = spread / (count - 1) as f32;
    let start = base - spread / 2.0;
    (0..count).map(|i| start + step * i as f32).collect()
}

/// Accumulate the shoot timer gated by fire rate, firing volleys while it
/// crosses the gate. With no enemies the timer is clamped down to at most
/// one fire interval so an enemy-free gap cannot bank a burst.
pub fn update_shooting(state: &mut GameState, dt: f32) {
    if state.enemies.is_empty() {
        state.shoot_timer = state.shoot_timer.min(state.player.fire_rate);
        return;
    }
    state.shoot_timer += dt;
    while state.shoot_timer >= state.player.fire_rate {
        fire_volley(state);
        state.shoot_timer -= state.player.fire_rate;
    }
}

fn fire_volley(state: &mut GameState) {
    let Some(target) = nearest_enemy(&state.enemies, state.player.pos) else {
        return;
    };
    let to_target = state.enemies[target].pos - state.player.pos;
    let base = to_target.y.atan2(to_target.x);
    for angle in volley_angles(base, state.player.bullet_count) {
        state.bullets.push(Bullet::new(
            state.player.pos,
            angle,
            state.player.bullet_speed,
            state.player.bullet_damage,
        ));
    }
}

fn out_of_bounds(pos: Vec2, world: &World) -> bool {
    pos.x < -BULLET_BOUNDS_MARGIN
        || pos.x > world.width + BULLET_BOUNDS_MARGIN
        || pos.y < -BULLET_BOUNDS_MARGIN
        || pos.y > world.height + BULLET_BOUNDS_MARGIN
}

/// Integrate bullets, expire them, and resolve enemy hits.
///
/// A bullet is consumed by its first hit in enemy collection order, even if
/// it overlaps several enemies. A killed enemy is removed immediately and
/// drops a gem at its position.
pub fn update_bullets(state: &mut GameState, dt: f32) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = &mut state.bullets[i];
        bullet.pos += bullet.vel * dt;
        bullet.age += dt;

        if bullet.age > bullet.max_age || out_of_bounds(bullet.pos, &state.world) {
            state.bullets.swap_remove(i);
            continue;
        }

        let (pos, radius, damage) = (bullet.pos, bullet.radius, bullet.damage);
        let mut consumed = false;
        let mut j = 0;
        while j < state.enemies.len() {
            let enemy = &mut state.enemies[j];
            if enemy.pos.distance(pos) < enemy.radius + radius {
                enemy.hp -= damage;
                consumed = true;
                if enemy.hp <= 0.0 {
                    let drop_at = enemy.pos;
                    state.enemies.swap_remove(j);
                    state.kills += 1;
                    state.gems.push(Gem::new(drop_at));
                    log::debug!("enemy down, {} kills", state.kills);
                }
                break;
            }
            j += 1;
        }

        if consumed {
            state.bullets.swap_remove(i);
            continue;
        }
        i += 1;
    }
}

/// Move enemies directly toward the player and resolve contact damage.
///
/// Contact applies `damage * (1 - armor)` when the post-move distance is
/// within the radius sum and the hit cooldown has elapsed on the run clock.
/// Dropping to 0 hp transitions to GameOver immediately, halting the rest
/// of this tick's enemy processing.
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let now = state.time;
    for enemy in state.enemies.iter_mut() {
        let to_player = state.player.pos - enemy.pos;
        enemy.pos += to_player.normalize_or_zero() * enemy.speed * dt;

        let gap = state.player.pos.distance(enemy.pos);
        if gap < enemy.radius + state.player.radius
            && now - state.player.last_hit > state.player.hit_cooldown
        {
            let damage = enemy.damage * (1.0 - state.player.armor);
            state.player.hp = (state.player.hp - damage).max(0.0);
            state.player.last_hit = now;
            if state.player.hp <= 0.0 {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "game over at {:.1}s, {} kills, level {}",
                    now,
                    state.kills,
                    state.level
                );
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;

    fn state_with(enemies: Vec<Enemy>) -> GameState {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.enemies = enemies;
        state
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::spawn(Vec2::new(x, y), 1.0)
    }

    #[test]
    fn test_nearest_enemy_first_wins_ties() {
        let enemies = vec![enemy_at(500.0, 300.0), enemy_at(300.0, 300.0)];
        // Both are 100 units from (400, 300); first encountered wins
        assert_eq!(nearest_enemy(&enemies, Vec2::new(400.0, 300.0)), Some(0));
        assert_eq!(nearest_enemy(&[], Vec2::ZERO), None);
    }

    #[test]
    fn test_single_bullet_flies_at_target() {
        let mut state = state_with(vec![enemy_at(700.0, 300.0)]);
        state.shoot_timer = 0.0;
        update_shooting(&mut state, 0.45);

        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        // Target is due east of the player
        assert!((bullet.vel.y).abs() < 1e-4);
        assert!(bullet.vel.x > 0.0);
        assert!((bullet.vel.length() - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_volley_spread_geometry() {
        assert_eq!(volley_angles(1.0, 1), vec![1.0]);

        let angles = volley_angles(0.0, 3);
        // spread = 0.16 + 0.05*2 = 0.26, step = 0.13, symmetric about base
        assert_eq!(angles.len(), 3);
        assert!((angles[0] + 0.13).abs() < 1e-5);
        assert!(angles[1].abs() < 1e-5);
        assert!((angles[2] - 0.13).abs() < 1e-5);

        // Spread is capped at 0.7 radians
        let wide = volley_angles(0.0, 20);
        assert!((wide.last().unwrap() - wide.first().unwrap() - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_shoot_timer_clamp_prevents_burst() {
        let mut state = state_with(vec![]);
        state.shoot_timer = 3.0;

        // No enemies: the timer is held at exactly one fire interval
        update_shooting(&mut state, 0.016);
        assert_eq!(state.shoot_timer, state.player.fire_rate);
        assert!(state.bullets.is_empty());

        // First enemy appears: the next tick fires exactly one volley
        state.enemies.push(enemy_at(700.0, 300.0));
        update_shooting(&mut state, 0.016);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_expiry_and_bounds() {
        let mut state = state_with(vec![]);
        // Stale bullet in the middle of the world
        let mut old = Bullet::new(Vec2::new(400.0, 300.0), 0.0, 0.0, 16.0);
        old.age = 2.39;
        state.bullets.push(old);
        // Fast bullet about to leave the world
        state
            .bullets
            .push(Bullet::new(Vec2::new(815.0, 300.0), 0.0, 420.0, 16.0));

        update_bullets(&mut state, 0.02);
        // 2.41 > 2.4 lifetime, and 823.4 > 800 + 20 margin
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_consumed_by_first_hit_only() {
        // Two overlapping enemies; bullet damages exactly one and is consumed
        let mut state = state_with(vec![enemy_at(420.0, 300.0), enemy_at(425.0, 300.0)]);
        state
            .bullets
            .push(Bullet::new(Vec2::new(418.0, 300.0), 0.0, 0.0, 5.0));

        update_bullets(&mut state, 0.001);

        assert!(state.bullets.is_empty());
        let damaged = state
            .enemies
            .iter()
            .filter(|e| e.hp < e.max_hp)
            .count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn test_kill_drops_gem_and_counts() {
        let mut state = state_with(vec![enemy_at(420.0, 300.0)]);
        state.enemies[0].hp = 4.0;
        state
            .bullets
            .push(Bullet::new(Vec2::new(419.0, 300.0), 0.0, 0.0, 16.0));

        update_bullets(&mut state, 0.001);

        assert!(state.enemies.is_empty());
        assert_eq!(state.kills, 1);
        assert_eq!(state.gems.len(), 1);
        assert!((state.gems[0].pos.x - 420.0).abs() < 1.0);
    }

    #[test]
    fn test_multi_removal_in_one_tick() {
        // Three weak enemies, three bullets each sitting on one of them,
        // plus one expired bullet. All four bullets and all three enemies
        // must resolve in a single update without skips.
        let mut state = state_with(vec![
            enemy_at(100.0, 100.0),
            enemy_at(300.0, 300.0),
            enemy_at(500.0, 500.0),
        ]);
        for enemy in &mut state.enemies {
            enemy.hp = 1.0;
        }
        for pos in [
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(500.0, 500.0),
        ] {
            state.bullets.push(Bullet::new(pos, 0.0, 0.0, 16.0));
        }
        let mut stale = Bullet::new(Vec2::new(700.0, 100.0), 0.0, 0.0, 16.0);
        stale.age = 3.0;
        state.bullets.push(stale);

        update_bullets(&mut state, 0.001);

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.kills, 3);
        assert_eq!(state.gems.len(), 3);
    }

    #[test]
    fn test_contact_damage_with_armor_and_cooldown() {
        let mut state = state_with(vec![enemy_at(400.0, 300.0)]);
        state.time = 10.0;
        state.player.armor = 0.5;
        let damage = state.enemies[0].damage;

        update_enemies(&mut state, 0.001);
        let expected = 100.0 - damage * 0.5;
        assert!((state.player.hp - expected).abs() < 1e-3);
        assert_eq!(state.player.last_hit, 10.0);

        // Within the cooldown window no second hit lands
        state.time = 10.2;
        update_enemies(&mut state, 0.001);
        assert!((state.player.hp - expected).abs() < 1e-3);

        // After the cooldown it does
        state.time = 10.5;
        update_enemies(&mut state, 0.001);
        assert!(state.player.hp < expected - 1.0);
    }

    #[test]
    fn test_lethal_contact_halts_processing() {
        let mut state = state_with(vec![enemy_at(400.0, 300.0), enemy_at(404.0, 300.0)]);
        state.time = 5.0;
        state.player.hp = 1.0;

        update_enemies(&mut state, 0.001);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.hp, 0.0);
        // Halted before the second enemy: only one hit was registered
        assert_eq!(state.player.last_hit, 5.0);
    }

    #[test]
    fn test_enemy_seeks_player() {
        let mut state = state_with(vec![enemy_at(0.0, 300.0)]);
        let before = state.enemies[0].pos.distance(state.player.pos);
        update_enemies(&mut state, 0.05);
        let after = state.enemies[0].pos.distance(state.player.pos);
        assert!(after < before);
        // Moves at its own speed
        assert!((before - after - state.enemies[0].speed * 0.05).abs() < 1e-3);
    }
}
