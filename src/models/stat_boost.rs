use serde::{Deserialize, Serialize};

use super::constants::StatType;
use super::errors::{GameError, GameResult};

/// A reward rolled for one room. Never mutated after it is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: StatType,
    pub value: f32,
}

impl StatBoost {
    pub fn new(stat: StatType, value: f32) -> Self {
        StatBoost { stat, value }
    }

    /// Rolled-instance identity, `"{stat}-{value}-{value}"`. `f32` display is
    /// shortest round-trip, so parsing the id yields the same bits.
    pub fn instance_id(&self) -> String {
        format!("{}-{}-{}", self.stat, self.value, self.value)
    }
}

/// A catalog entry: which stat, and the per-ring range a roll is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBoostTemplate {
    pub stat: StatType,
    pub min: f32,
    pub max: f32,
}

impl StatBoostTemplate {
    pub const fn new(stat: StatType, min: f32, max: f32) -> Self {
        StatBoostTemplate { stat, min, max }
    }

    /// Template identity, `"{stat}-{min}-{max}"`.
    pub fn template_id(&self) -> String {
        format!("{}-{}-{}", self.stat, self.min, self.max)
    }
}

/// A parsed boost identity string. Both schemes share one textual shape, so
/// an id with `low == high` may be either a rolled instance or a degenerate
/// template; the catalog decides when resolving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostIdentity {
    pub stat: StatType,
    pub low: f32,
    pub high: f32,
}

impl BoostIdentity {
    pub fn parse(id: &str) -> GameResult<Self> {
        let parts: Vec<&str> = id.split('-').collect();
        let [stat, low, high] = parts.as_slice() else {
            return Err(GameError::InvalidArgument(format!("malformed boost id: {id}")));
        };
        let parse_value = |s: &str| {
            s.parse::<f32>()
                .map_err(|_| GameError::InvalidArgument(format!("malformed boost id: {id}")))
        };
        Ok(BoostIdentity {
            stat: stat.parse()?,
            low: parse_value(*low)?,
            high: parse_value(*high)?,
        })
    }

    pub fn is_instance(&self) -> bool {
        self.low.to_bits() == self.high.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_id_parses_to_same_bits() {
        let boost = StatBoost::new(StatType::Armor, 2.345_678_9 * 3.0);
        let id = boost.instance_id();
        let parsed = BoostIdentity::parse(&id).unwrap();
        assert!(parsed.is_instance());
        assert_eq!(parsed.stat, StatType::Armor);
        assert_eq!(parsed.low.to_bits(), boost.value.to_bits());
    }

    #[test]
    fn template_id_matches_legacy_shape() {
        let template = StatBoostTemplate::new(StatType::HealthBoost, 5.0, 10.0);
        assert_eq!(template.template_id(), "HealthBoost-5-10");
        let parsed = BoostIdentity::parse("HealthBoost-5-10").unwrap();
        assert!(!parsed.is_instance());
        assert_eq!((parsed.low, parsed.high), (5.0, 10.0));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(BoostIdentity::parse("").is_err());
        assert!(BoostIdentity::parse("Armor-1").is_err());
        assert!(BoostIdentity::parse("Armor-x-1").is_err());
        assert!(BoostIdentity::parse("Luck-1-1").is_err());
    }
}
