//! Fixed catalog of permanent upgrades
//!
//! Each upgrade is pure data plus a stat mutation over the player; selection
//! is a Fisher-Yates draw from the full catalog, independent across level-ups.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::{ARMOR_MAX, FIRE_RATE_FLOOR};

/// The nine permanent upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Rapid,
    Damage,
    Speed,
    Vitality,
    Multi,
    Magnet,
    Regen,
    Armor,
    Velocity,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 9] = [
        UpgradeKind::Rapid,
        UpgradeKind::Damage,
        UpgradeKind::Speed,
        UpgradeKind::Vitality,
        UpgradeKind::Multi,
        UpgradeKind::Magnet,
        UpgradeKind::Regen,
        UpgradeKind::Armor,
        UpgradeKind::Velocity,
    ];

    /// Stable wire/storage id
    pub fn id(&self) -> &'static str {
        match self {
            UpgradeKind::Rapid => "rapid",
            UpgradeKind::Damage => "damage",
            UpgradeKind::Speed => "speed",
            UpgradeKind::Vitality => "vitality",
            UpgradeKind::Multi => "multi",
            UpgradeKind::Magnet => "magnet",
            UpgradeKind::Regen => "regen",
            UpgradeKind::Armor => "armor",
            UpgradeKind::Velocity => "velocity",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Rapid => "Rapid Fire",
            UpgradeKind::Damage => "Sharpened Ammo",
            UpgradeKind::Speed => "Light Boots",
            UpgradeKind::Vitality => "Vitality",
            UpgradeKind::Multi => "Split Shot",
            UpgradeKind::Magnet => "Magnet",
            UpgradeKind::Regen => "Regen",
            UpgradeKind::Armor => "Armor",
            UpgradeKind::Velocity => "Quick Rounds",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::Rapid => "Shoot 20% faster.",
            UpgradeKind::Damage => "Bullet damage +30%.",
            UpgradeKind::Speed => "Move speed +20%.",
            UpgradeKind::Vitality => "Max HP +25 (heal included).",
            UpgradeKind::Multi => "Shoot +1 projectile.",
            UpgradeKind::Magnet => "Pickup radius +30%.",
            UpgradeKind::Regen => "Regenerate 0.6 HP/s.",
            UpgradeKind::Armor => "Reduce contact damage by 12%.",
            UpgradeKind::Velocity => "Bullet speed +20%.",
        }
    }

    /// Apply the upgrade's stat mutation. Effects stack; clamps keep
    /// fire rate and armor inside their valid ranges.
    pub fn apply(&self, player: &mut Player) {
        match self {
            UpgradeKind::Rapid => {
                player.fire_rate = (player.fire_rate * 0.8).max(FIRE_RATE_FLOOR);
            }
            UpgradeKind::Damage => player.bullet_damage *= 1.3,
            UpgradeKind::Speed => player.speed *= 1.2,
            UpgradeKind::Vitality => {
                player.max_hp += 25.0;
                player.hp = (player.hp + 25.0).min(player.max_hp);
            }
            UpgradeKind::Multi => player.bullet_count += 1,
            UpgradeKind::Magnet => player.pickup_radius *= 1.3,
            UpgradeKind::Regen => player.regen += 0.6,
            UpgradeKind::Armor => {
                player.armor = (player.armor + 0.12).min(ARMOR_MAX);
            }
            UpgradeKind::Velocity => player.bullet_speed *= 1.2,
        }
    }
}

/// Draw `n` distinct upgrades: uniform permutation of the full catalog,
/// first `n` taken. Independent of prior draws.
pub fn pick_upgrades(rng: &mut Pcg32, n: usize) -> Vec<UpgradeKind> {
    let mut pool = UpgradeKind::ALL.to_vec();
    pool.shuffle(rng);
    pool.truncate(n);
    pool
}
