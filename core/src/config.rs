use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::rarity::{RarityChance, RARITY_CHANCES};

/// Time between two spawns in production (5 minutes)
pub const CARD_SPAWN_INTERVAL_MS: i64 = 5 * 60 * 1000;
/// Shortest interval accepted by [`GameConfig::validate`]
pub const MIN_SPAWN_INTERVAL_MS: i64 = 1000;
/// Longest interval accepted by [`GameConfig::validate`] (one day)
pub const MAX_SPAWN_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;
/// A last-spawn time older than this many intervals is discarded on resume
pub const STALE_AFTER_INTERVALS: u32 = 2;

/// Tunables of a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Milliseconds between spawns
    pub spawn_interval_ms: i64,
    /// Rarity table walked in order by the spawn selector
    pub rarity_chances: Vec<RarityChance>,
    /// Absences longer than this many intervals earn a single offer, not a catch-up
    pub stale_after_intervals: u32,
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if !(MIN_SPAWN_INTERVAL_MS..=MAX_SPAWN_INTERVAL_MS).contains(&self.spawn_interval_ms) {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "spawn interval must be between {MIN_SPAWN_INTERVAL_MS} and {MAX_SPAWN_INTERVAL_MS} ms, got {}",
                    self.spawn_interval_ms
                ),
            });
        }
        if self.stale_after_intervals == 0 {
            return Err(GameError::InvalidConfig {
                reason: "stale threshold must be at least one interval".to_string(),
            });
        }
        if self.rarity_chances.is_empty() {
            return Err(GameError::InvalidConfig {
                reason: "rarity table is empty".to_string(),
            });
        }
        if let Some(bad) = self
            .rarity_chances
            .iter()
            .find(|entry| !entry.chance.is_finite() || entry.chance < 0.0)
        {
            return Err(GameError::InvalidConfig {
                reason: format!("chance for {} must be non-negative", bad.rarity.label()),
            });
        }
        Ok(())
    }

    /// Spawn interval in whole seconds, rounded up
    pub fn interval_secs(&self) -> u64 {
        ceil_secs(self.spawn_interval_ms)
    }

    /// Age after which a stored last-spawn time is ignored
    pub fn stale_after_ms(&self) -> i64 {
        self.spawn_interval_ms
            .saturating_mul(i64::from(self.stale_after_intervals))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: CARD_SPAWN_INTERVAL_MS,
            rarity_chances: RARITY_CHANCES.to_vec(),
            stale_after_intervals: STALE_AFTER_INTERVALS,
        }
    }
}

/// Milliseconds to whole seconds, rounding up and clamping at zero
pub(crate) fn ceil_secs(ms: i64) -> u64 {
    if ms <= 0 {
        0
    } else {
        (ms as u64).div_ceil(1000)
    }
}
