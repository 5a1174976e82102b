//! Swarm Arena - a top-down survival arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, combat, progression)
//! - `leaderboard`: Remote score submission/retrieval client
//! - `settings`: Player preferences
//! - `render`: Canvas draw pass over entity state (wasm)

pub mod leaderboard;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use leaderboard::ScoreBoard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum per-tick delta regardless of measured frame time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_MAX_HP: f32 = 100.0;
    pub const PLAYER_FIRE_RATE: f32 = 0.45;
    pub const PLAYER_BULLET_SPEED: f32 = 420.0;
    pub const PLAYER_BULLET_DAMAGE: f32 = 16.0;
    pub const PLAYER_PICKUP_RADIUS: f32 = 70.0;
    pub const PLAYER_HIT_COOLDOWN: f32 = 0.45;

    /// Fire rate can never drop below this (seconds between volleys)
    pub const FIRE_RATE_FLOOR: f32 = 0.16;
    /// Armor fraction cap
    pub const ARMOR_MAX: f32 = 0.6;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_LIFETIME: f32 = 2.4;
    /// Bullets despawn this far outside the world bounds
    pub const BULLET_BOUNDS_MARGIN: f32 = 20.0;

    /// Gem defaults
    pub const GEM_RADIUS: f32 = 5.0;
    pub const GEM_VALUE: u32 = 1;
    /// Magnetized gems home toward the player at this speed
    pub const GEM_ATTRACT_SPEED: f32 = 220.0;

    /// Spawner tuning
    pub const SPAWN_MARGIN: f32 = 60.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 1.35;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.35;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.012;

    /// Upgrade choices presented per level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Format a run clock as mm:ss
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.9), "00:59");
        assert_eq!(format_time(61.0), "01:01");
        assert_eq!(format_time(754.3), "12:34");
    }
}
