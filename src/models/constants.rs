use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::GameError;

/// World units per grid cell along each horizontal axis.
pub const CELL_SIZE: f32 = 10.0;
/// Gems required per ring of distance between the origin and the far room.
pub const GEMS_PER_RING: u32 = 10;

pub const NUM_DIRECTIONS: usize = 4;
pub const NUM_GEM_TYPES: usize = 3;
pub const NUM_STAT_TYPES: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GemType {
    RedGem,
    BlueGem,
    GreenGem,
}

impl GemType {
    pub fn name(&self) -> &'static str {
        match self {
            GemType::RedGem => "RedGem",
            GemType::BlueGem => "BlueGem",
            GemType::GreenGem => "GreenGem",
        }
    }

    pub const ALL: [GemType; NUM_GEM_TYPES] = [GemType::RedGem, GemType::BlueGem, GemType::GreenGem];
}

impl fmt::Display for GemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GemType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GemType::ALL
            .into_iter()
            .find(|gem| gem.name() == s)
            .ok_or_else(|| GameError::UnknownGemType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatType {
    AttackDamage,
    CriticalChance,
    Armor,
    MagicResistance,
    MovementSpeed,
    ResourceRegeneration,
    HealthBoost,
    ManaBoost,
    CooldownReduction,
    AttackSpeed,
    ArmorPenetration,
}

impl StatType {
    pub fn name(&self) -> &'static str {
        match self {
            StatType::AttackDamage => "AttackDamage",
            StatType::CriticalChance => "CriticalChance",
            StatType::Armor => "Armor",
            StatType::MagicResistance => "MagicResistance",
            StatType::MovementSpeed => "MovementSpeed",
            StatType::ResourceRegeneration => "ResourceRegeneration",
            StatType::HealthBoost => "HealthBoost",
            StatType::ManaBoost => "ManaBoost",
            StatType::CooldownReduction => "CooldownReduction",
            StatType::AttackSpeed => "AttackSpeed",
            StatType::ArmorPenetration => "ArmorPenetration",
        }
    }

    /// Value the player starts with before any room boost is applied.
    pub fn base_value(&self) -> f32 {
        match self {
            StatType::AttackDamage => 10.0,
            StatType::CriticalChance => 5.0,
            StatType::Armor => 5.0,
            StatType::MagicResistance => 5.0,
            StatType::MovementSpeed => 4.0,
            StatType::ResourceRegeneration => 2.0,
            StatType::HealthBoost => 100.0,
            StatType::ManaBoost => 50.0,
            StatType::CooldownReduction => 0.0,
            StatType::AttackSpeed => 1.0,
            StatType::ArmorPenetration => 0.0,
        }
    }

    pub const ALL: [StatType; NUM_STAT_TYPES] = [
        StatType::AttackDamage,
        StatType::CriticalChance,
        StatType::Armor,
        StatType::MagicResistance,
        StatType::MovementSpeed,
        StatType::ResourceRegeneration,
        StatType::HealthBoost,
        StatType::ManaBoost,
        StatType::CooldownReduction,
        StatType::AttackSpeed,
        StatType::ArmorPenetration,
    ];
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatType::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| GameError::UnknownStatType(s.to_string()))
    }
}

/// Gate directions. The discriminant is the gate index on a room, and
/// `(index + 2) % 4` is always the facing side of the neighbouring room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +z
    North = 0,
    /// +x
    East = 1,
    /// -z
    South = 2,
    /// -x
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Direction::ALL.get(index).copied()
    }

    /// The paired gate on the neighbouring room.
    pub fn opposite(&self) -> Direction {
        Direction::ALL[(self.index() + 2) % NUM_DIRECTIONS]
    }

    /// Cell offset as (dx, dz).
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Direction::from_index(index).ok_or(GameError::InvalidGateIndex(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_paired_index() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().index(), (dir.index() + 2) % 4);
            let (dx, dz) = dir.offset();
            let (ox, oz) = dir.opposite().offset();
            assert_eq!((dx + ox, dz + oz), (0, 0), "{:?} must face its pair", dir);
        }
    }

    #[test]
    fn gem_names_parse_back() {
        for gem in GemType::ALL {
            assert_eq!(gem.name().parse::<GemType>().unwrap(), gem);
        }
        assert!("PurpleGem".parse::<GemType>().is_err());
    }

    #[test]
    fn stat_names_parse_back() {
        for stat in StatType::ALL {
            assert_eq!(stat.name().parse::<StatType>().unwrap(), stat);
        }
    }

    #[test]
    fn gate_index_out_of_range_is_rejected() {
        assert!(Direction::try_from(3).is_ok());
        assert!(matches!(
            Direction::try_from(4),
            Err(GameError::InvalidGateIndex(4))
        ));
    }
}
