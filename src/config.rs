//! Tunables for a progression session.
//!
//! Every field has a default matching the shipped game, so a config file
//! only needs to name what it overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::constants::{GemType, StatType, CELL_SIZE, GEMS_PER_RING};
use crate::models::errors::GameResult;
use crate::models::stats::StatMap;

/// What happens to a room's reward when its gate is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RewardPolicy {
    /// The boost rolled when the room was created is the one granted.
    #[default]
    Keep,
    /// Roll again, applying the unlocking gem's modifier.
    RerollWithResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Seed for reward rolls.
    pub seed: u64,
    /// World units per grid cell, used when converting positions.
    pub cell_size: f32,
    /// Gems per ring of distance a gate requires.
    pub gems_per_ring: u32,
    pub reward_policy: RewardPolicy,
    /// Inventory a fresh session starts with.
    pub starting_gems: BTreeMap<GemType, u32>,
    /// Replaces the built-in starting value for the named stats.
    pub base_stats: BTreeMap<StatType, f32>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cell_size: CELL_SIZE,
            gems_per_ring: GEMS_PER_RING,
            reward_policy: RewardPolicy::Keep,
            starting_gems: BTreeMap::new(),
            base_stats: BTreeMap::new(),
        }
    }
}

impl ProgressionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in starting stats with any overrides applied.
    pub fn base_stat_map(&self) -> StatMap {
        let mut stats = StatMap::base();
        for (stat, value) in &self.base_stats {
            stats.set(*stat, *value);
        }
        stats
    }
}
