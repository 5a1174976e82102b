//! Per-frame simulation tick
//!
//! Orchestrates the update order across spawner, combat and progression, and
//! owns the Running / Paused / AwaitingUpgrade / GameOver state machine.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::{combat, progress, spawn};
use crate::consts::MAX_FRAME_DT;

/// Input intents for a single tick. Recorded asynchronously by the platform
/// layer and sampled exactly once at the start of the tick; discrete actions
/// are one-shot and cleared by the caller after the tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pause toggle (ignored while AwaitingUpgrade or GameOver)
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Upgrade choice index (0..2) while AwaitingUpgrade
    pub choose: Option<usize>,
}

/// Advance the session by one tick. `dt` is the measured frame delta in
/// seconds; it is clamped to bound the worst-case step size.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    if input.restart && state.phase == GamePhase::GameOver {
        state.reset();
    }

    if let Some(index) = input.choose {
        progress::apply_choice(state, index);
    }

    if input.pause {
        match state.phase {
            GamePhase::Running => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Running,
            // No manual pause while choosing an upgrade or dead
            GamePhase::AwaitingUpgrade | GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    state.time += dt;
    update_player(state, input, dt);
    spawn::update(state, dt);
    combat::update_shooting(state, dt);
    combat::update_bullets(state, dt);
    combat::update_enemies(state, dt);
    if state.phase == GamePhase::GameOver {
        // Lethal contact this tick: gems and level-ups do not process
        return;
    }
    progress::update_gems(state, dt);
    progress::check_level_up(state);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut axis = Vec2::ZERO;
    if input.up {
        axis.y -= 1.0;
    }
    if input.down {
        axis.y += 1.0;
    }
    if input.left {
        axis.x -= 1.0;
    }
    if input.right {
        axis.x += 1.0;
    }

    let world = state.world;
    let player = &mut state.player;
    player.pos += axis.normalize_or_zero() * player.speed * dt;
    player.clamp_to(&world);

    if player.regen > 0.0 {
        player.hp = (player.hp + player.regen * dt).min(player.max_hp);
    }
}
