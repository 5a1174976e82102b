//! Canvas-2d draw pass (wasm)
//!
//! A thin presentation adapter: reads entity positions/radii and draws
//! circles. No game logic here.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::settings::Settings;
use crate::sim::GameState;

const GEM_COLOR: &str = "#6bdc68";
const BULLET_COLOR: &str = "#f6d365";
const ENEMY_COLOR: &str = "#ff5b5b";
const PLAYER_RING_COLOR: &str = "#1b1f2b";
const PLAYER_COLOR: &str = "#4f9cff";
const HALO_COLOR: &str = "#8cd8ff";

fn fill_circle(ctx: &CanvasRenderingContext2d, x: f32, y: f32, r: f32, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU);
    ctx.fill();
}

/// Draw one frame of entity state
pub fn draw(ctx: &CanvasRenderingContext2d, state: &GameState, settings: &Settings) {
    ctx.clear_rect(
        0.0,
        0.0,
        state.world.width as f64,
        state.world.height as f64,
    );

    let player = &state.player;
    if settings.show_pickup_halo {
        ctx.save();
        ctx.set_global_alpha(0.08);
        fill_circle(
            ctx,
            player.pos.x,
            player.pos.y,
            player.pickup_radius,
            HALO_COLOR,
        );
        ctx.restore();
    }

    for gem in &state.gems {
        fill_circle(ctx, gem.pos.x, gem.pos.y, gem.radius, GEM_COLOR);
    }

    for bullet in &state.bullets {
        fill_circle(ctx, bullet.pos.x, bullet.pos.y, bullet.radius, BULLET_COLOR);
    }

    for enemy in &state.enemies {
        fill_circle(ctx, enemy.pos.x, enemy.pos.y, enemy.radius, ENEMY_COLOR);
    }

    fill_circle(
        ctx,
        player.pos.x,
        player.pos.y,
        player.radius + 3.0,
        PLAYER_RING_COLOR,
    );
    fill_circle(ctx, player.pos.x, player.pos.y, player.radius, PLAYER_COLOR);
}
