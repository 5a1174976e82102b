//! Time-driven enemy spawner with difficulty ramp

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState};
use crate::consts::*;

/// Seconds between spawns, monotonically decreasing with run time
pub fn spawn_interval(time: f32) -> f32 {
    (SPAWN_INTERVAL_MAX - time * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_MIN)
}

/// Difficulty factor scaling enemy stats over a run
pub fn difficulty(time: f32) -> f32 {
    1.0 + time / 50.0
}

/// Accumulate elapsed time and spawn while the timer crosses the interval.
/// The loop handles multiple spawns in a single slow tick.
pub fn update(state: &mut GameState, dt: f32) {
    let interval = spawn_interval(state.time);
    state.spawn_timer += dt;
    while state.spawn_timer >= interval {
        state.spawn_timer -= interval;
        spawn_enemy(state);
    }
}

/// Spawn one enemy on a random world edge, offset outside the viewport
pub fn spawn_enemy(state: &mut GameState) {
    let (w, h) = (state.world.width, state.world.height);
    let side: u8 = state.rng.random_range(0..4);
    let pos = match side {
        0 => Vec2::new(-SPAWN_MARGIN, state.rng.random_range(0.0..h)),
        1 => Vec2::new(w + SPAWN_MARGIN, state.rng.random_range(0.0..h)),
        2 => Vec2::new(state.rng.random_range(0.0..w), -SPAWN_MARGIN),
        _ => Vec2::new(state.rng.random_range(0.0..w), h + SPAWN_MARGIN),
    };
    state
        .enemies
        .push(Enemy::spawn(pos, difficulty(state.time)));
}
