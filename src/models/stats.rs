use std::collections::BTreeMap;

use super::constants::StatType;

/// Current value of every player stat.
#[derive(Debug, Clone, PartialEq)]
pub struct StatMap {
    values: BTreeMap<StatType, f32>,
}

impl Default for StatMap {
    fn default() -> Self {
        Self::base()
    }
}

impl StatMap {
    /// Every stat at its starting value.
    pub fn base() -> Self {
        StatMap {
            values: StatType::ALL.iter().map(|s| (*s, s.base_value())).collect(),
        }
    }

    pub fn get(&self, stat: StatType) -> f32 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, stat: StatType, value: f32) {
        self.values.insert(stat, value);
    }

    pub fn add(&mut self, stat: StatType, delta: f32) {
        *self.values.entry(stat).or_insert(0.0) += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatType, f32)> + '_ {
        self.values.iter().map(|(stat, value)| (*stat, *value))
    }

    /// Exact comparison, treating values by bit pattern.
    pub fn bitwise_eq(&self, other: &StatMap) -> bool {
        self.values.len() == other.values.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((sa, va), (sb, vb))| sa == sb && va.to_bits() == vb.to_bits())
    }
}

impl FromIterator<(StatType, f32)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (StatType, f32)>>(iter: I) -> Self {
        StatMap {
            values: iter.into_iter().collect(),
        }
    }
}
