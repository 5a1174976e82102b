//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Input sampled once per tick from a snapshot
//! - No rendering or platform dependencies

pub mod combat;
pub mod progress;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use state::{Bullet, Enemy, GamePhase, GameState, Gem, HudState, Player, World};
pub use tick::{TickInput, tick};
pub use upgrade::{UpgradeKind, pick_upgrades};
