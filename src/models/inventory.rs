use std::collections::BTreeMap;

use super::constants::GemType;
use super::errors::{GameError, GameResult};

/// Gems the player is carrying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInventory {
    gems: BTreeMap<GemType, u32>,
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(counts: impl IntoIterator<Item = (GemType, u32)>) -> Self {
        PlayerInventory {
            gems: counts.into_iter().collect(),
        }
    }

    pub fn count(&self, gem: GemType) -> u32 {
        self.gems.get(&gem).copied().unwrap_or(0)
    }

    pub fn add(&mut self, gem: GemType, amount: u32) {
        let count = self.gems.entry(gem).or_insert(0);
        *count = count.saturating_add(amount);
    }

    pub fn set(&mut self, gem: GemType, amount: u32) {
        self.gems.insert(gem, amount);
    }

    pub fn ensure_available(&self, gem: GemType, amount: u32) -> GameResult<()> {
        let available = self.count(gem);
        if available < amount {
            return Err(GameError::InsufficientGems {
                gem,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn spend(&mut self, gem: GemType, amount: u32) -> GameResult<()> {
        self.ensure_available(gem, amount)?;
        if let Some(count) = self.gems.get_mut(&gem) {
            *count -= amount;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GemType, u32)> + '_ {
        self.gems.iter().map(|(gem, count)| (*gem, *count))
    }
}
