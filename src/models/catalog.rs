//! Stat boost catalog
//!
//! Fixed per-quadrant tables of boost templates. Rolling picks a template
//! uniformly, draws a value in its range and scales it by ring distance.

use std::collections::BTreeMap;

use rand::Rng;

use super::constants::{GemType, StatType};
use super::errors::{GameError, GameResult};
use super::quadrant::Quadrant;
use super::stat_boost::{BoostIdentity, StatBoost, StatBoostTemplate};

/// Per-gem adjustment applied when a reward is rolled against the gem that
/// unlocked the room. `value * scale + bonus`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceModifier {
    pub scale: f32,
    pub bonus: f32,
}

impl Default for ResourceModifier {
    fn default() -> Self {
        ResourceModifier {
            scale: 1.0,
            bonus: 0.0,
        }
    }
}

impl ResourceModifier {
    fn apply(&self, value: f32) -> f32 {
        value * self.scale + self.bonus
    }
}

#[derive(Debug, Clone)]
pub struct StatBoostCatalog {
    tables: BTreeMap<Quadrant, Vec<StatBoostTemplate>>,
    modifiers: BTreeMap<GemType, ResourceModifier>,
}

impl Default for StatBoostCatalog {
    fn default() -> Self {
        use StatType::*;

        let mut tables = BTreeMap::new();
        // Defence
        tables.insert(
            Quadrant::NorthEast,
            vec![
                StatBoostTemplate::new(Armor, 1.0, 3.0),
                StatBoostTemplate::new(MagicResistance, 1.0, 3.0),
                StatBoostTemplate::new(HealthBoost, 5.0, 10.0),
                StatBoostTemplate::new(ResourceRegeneration, 0.5, 1.5),
                StatBoostTemplate::new(MovementSpeed, 0.1, 0.3),
            ],
        );
        // Magic
        tables.insert(
            Quadrant::EastSouth,
            vec![
                StatBoostTemplate::new(ManaBoost, 2.0, 5.0),
                StatBoostTemplate::new(CooldownReduction, 0.5, 1.5),
                StatBoostTemplate::new(AttackSpeed, 0.1, 0.3),
                StatBoostTemplate::new(MagicResistance, 1.0, 2.0),
                StatBoostTemplate::new(ResourceRegeneration, 0.5, 1.0),
            ],
        );
        // Speed
        tables.insert(
            Quadrant::SouthWest,
            vec![
                StatBoostTemplate::new(MovementSpeed, 0.1, 0.5),
                StatBoostTemplate::new(AttackSpeed, 0.1, 0.3),
                StatBoostTemplate::new(HealthBoost, 3.0, 6.0),
                StatBoostTemplate::new(CooldownReduction, 0.2, 1.0),
                StatBoostTemplate::new(Armor, 0.5, 1.5),
            ],
        );
        // Physical damage
        tables.insert(
            Quadrant::NorthWest,
            vec![
                StatBoostTemplate::new(AttackDamage, 1.0, 4.0),
                StatBoostTemplate::new(CriticalChance, 0.5, 2.0),
                StatBoostTemplate::new(ArmorPenetration, 1.0, 3.0),
                StatBoostTemplate::new(MovementSpeed, 0.1, 0.3),
                StatBoostTemplate::new(ManaBoost, 3.0, 7.0),
            ],
        );

        StatBoostCatalog {
            tables,
            modifiers: BTreeMap::new(),
        }
    }
}

impl StatBoostCatalog {
    pub fn new(tables: BTreeMap<Quadrant, Vec<StatBoostTemplate>>) -> Self {
        StatBoostCatalog {
            tables,
            modifiers: BTreeMap::new(),
        }
    }

    pub fn with_modifier(mut self, gem: GemType, modifier: ResourceModifier) -> Self {
        self.modifiers.insert(gem, modifier);
        self
    }

    pub fn table(&self, quadrant: Quadrant) -> &[StatBoostTemplate] {
        self.tables.get(&quadrant).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn modifier(&self, gem: GemType) -> ResourceModifier {
        self.modifiers.get(&gem).copied().unwrap_or_default()
    }

    /// Roll a reward for a room. `None` if the quadrant's table is empty.
    pub fn roll(&self, quadrant: Quadrant, ring: u32, rng: &mut impl Rng) -> Option<StatBoost> {
        let table = self.table(quadrant);
        if table.is_empty() {
            return None;
        }
        let template = table[rng.gen_range(0..table.len())];
        let drawn = if template.min < template.max {
            rng.gen_range(template.min..=template.max)
        } else {
            template.min
        };
        Some(StatBoost::new(template.stat, drawn * ring as f32))
    }

    pub fn roll_with_resource_modifier(
        &self,
        quadrant: Quadrant,
        ring: u32,
        gem: GemType,
        rng: &mut impl Rng,
    ) -> Option<StatBoost> {
        let modifier = self.modifier(gem);
        self.roll(quadrant, ring, rng)
            .map(|boost| StatBoost::new(boost.stat, modifier.apply(boost.value)))
    }

    pub fn templates(&self) -> impl Iterator<Item = &StatBoostTemplate> {
        self.tables.values().flatten()
    }

    pub fn template_by_id(&self, id: &str) -> Option<&StatBoostTemplate> {
        self.templates().find(|t| t.template_id() == id)
    }

    /// Turn a saved identity back into a boost without rolling.
    ///
    /// Rolled-instance ids carry their value and always resolve. Template ids
    /// (older saves) resolve to the template's minimum, and fail when no
    /// catalog entry matches.
    pub fn resolve(&self, id: &str) -> GameResult<StatBoost> {
        let identity = BoostIdentity::parse(id)?;
        if identity.is_instance() {
            return Ok(StatBoost::new(identity.stat, identity.low));
        }
        self.template_by_id(id)
            .map(|t| StatBoost::new(t.stat, t.min))
            .ok_or_else(|| GameError::BoostNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn roll_stays_in_scaled_range() {
        let catalog = StatBoostCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        for quadrant in Quadrant::ALL {
            for ring in 1..=4 {
                for _ in 0..50 {
                    let boost = catalog.roll(quadrant, ring, &mut rng).unwrap();
                    let fits = catalog.table(quadrant).iter().any(|t| {
                        t.stat == boost.stat
                            && boost.value >= t.min * ring as f32 - 1e-4
                            && boost.value <= t.max * ring as f32 + 1e-4
                    });
                    assert!(fits, "{:?} out of range for ring {}", boost, ring);
                }
            }
        }
    }

    #[test]
    fn default_modifiers_change_nothing() {
        let catalog = StatBoostCatalog::default();
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        let plain = catalog.roll(Quadrant::SouthWest, 2, &mut a);
        let modded = catalog.roll_with_resource_modifier(Quadrant::SouthWest, 2, GemType::BlueGem, &mut b);
        assert_eq!(plain, modded);
    }

    #[test]
    fn custom_modifier_applies() {
        let catalog = StatBoostCatalog::default().with_modifier(
            GemType::RedGem,
            ResourceModifier {
                scale: 2.0,
                bonus: 1.0,
            },
        );
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let plain = catalog.roll(Quadrant::NorthEast, 1, &mut a).unwrap();
        let modded = catalog
            .roll_with_resource_modifier(Quadrant::NorthEast, 1, GemType::RedGem, &mut b)
            .unwrap();
        assert_eq!(modded.stat, plain.stat);
        assert_eq!(modded.value, plain.value * 2.0 + 1.0);
    }

    #[test]
    fn empty_table_rolls_nothing() {
        let catalog = StatBoostCatalog::new(BTreeMap::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(catalog.roll(Quadrant::NorthEast, 1, &mut rng).is_none());
    }

    #[test]
    fn resolves_both_identity_schemes() {
        let catalog = StatBoostCatalog::default();
        let rolled = StatBoost::new(StatType::Armor, 4.123_456);
        assert_eq!(catalog.resolve(&rolled.instance_id()).unwrap(), rolled);

        let legacy = catalog.resolve("HealthBoost-5-10").unwrap();
        assert_eq!(legacy, StatBoost::new(StatType::HealthBoost, 5.0));

        assert!(matches!(
            catalog.resolve("Armor-7-9"),
            Err(GameError::BoostNotFound(_))
        ));
    }
}
