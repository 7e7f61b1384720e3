//! Arena combat math driven by the player's aggregated stats.
//!
//! Independent of the room graph: it only reads a [`StatMap`].

use rand::Rng;
use tracing::debug;

use crate::models::constants::StatType;
use crate::models::stats::StatMap;

pub const ENEMY_MAX_HEALTH: f32 = 50.0;
pub const ENEMY_ARMOR: f32 = 10.0;

/// A training dummy in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    max_health: f32,
    health: f32,
    armor: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Enemy::new(ENEMY_MAX_HEALTH, ENEMY_ARMOR)
    }
}

impl Enemy {
    pub fn new(max_health: f32, armor: f32) -> Self {
        Enemy {
            max_health,
            health: max_health,
            armor,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn armor(&self) -> f32 {
        self.armor
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Apply a hit after armor. Returns true if this hit killed it.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        let was_alive = self.is_alive();
        let effective = (damage - self.armor).max(0.0);
        self.health -= effective;
        debug!(damage, effective, health = self.health, "enemy hit");
        was_alive && !self.is_alive()
    }

    pub fn respawn(&mut self) {
        self.health = self.max_health;
    }
}

/// The player's hit points. The pool's size follows the HealthBoost stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerHealth {
    current: f32,
    max: f32,
}

impl PlayerHealth {
    /// Full health at the size `stats` allow.
    pub fn from_stats(stats: &StatMap) -> Self {
        let max = stats.get(StatType::HealthBoost);
        PlayerHealth { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply a raw hit through the player's armor. Returns true if this hit
    /// was fatal.
    pub fn take_damage(&mut self, stats: &StatMap, raw: f32) -> bool {
        let was_alive = self.is_alive();
        self.current -= incoming_damage(stats, raw);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Resize the pool after stats change. Current health never exceeds
    /// the new maximum and is not topped up when it grows.
    pub fn update_max(&mut self, stats: &StatMap) {
        self.max = stats.get(StatType::HealthBoost);
        self.current = self.current.min(self.max);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub damage: f32,
    pub critical: bool,
}

/// Damage the player deals to a target with `target_armor`.
///
/// Armor penetration lowers the target's armor (not below zero); critical
/// chance is a percentage and doubles the hit.
pub fn attack_damage(stats: &StatMap, target_armor: f32, rng: &mut impl Rng) -> AttackRoll {
    let armor = (target_armor - stats.get(StatType::ArmorPenetration)).max(0.0);
    let base = stats.get(StatType::AttackDamage) - armor;
    let critical = rng.gen::<f32>() < stats.get(StatType::CriticalChance) / 100.0;
    let damage = if critical { base * 2.0 } else { base };
    AttackRoll { damage, critical }
}

/// Damage the player takes from a raw hit, after armor.
pub fn incoming_damage(stats: &StatMap, raw: f32) -> f32 {
    (raw - stats.get(StatType::Armor)).max(0.0)
}

/// Seconds between attacks. `None` when attack speed is not positive.
pub fn attack_cooldown(stats: &StatMap) -> Option<f32> {
    let speed = stats.get(StatType::AttackSpeed);
    (speed > 0.0).then(|| 1.0 / speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn penetration_cannot_make_armor_negative() {
        let mut stats = StatMap::base();
        stats.set(StatType::CriticalChance, 0.0);
        stats.set(StatType::ArmorPenetration, 50.0);
        let mut rng = StdRng::seed_from_u64(0);
        let roll = attack_damage(&stats, ENEMY_ARMOR, &mut rng);
        assert!(!roll.critical);
        assert_eq!(roll.damage, 10.0);
    }

    #[test]
    fn guaranteed_critical_doubles() {
        let mut stats = StatMap::base();
        stats.set(StatType::CriticalChance, 100.0);
        stats.set(StatType::AttackDamage, 15.0);
        let mut rng = StdRng::seed_from_u64(1);
        let roll = attack_damage(&stats, 5.0, &mut rng);
        assert!(roll.critical);
        assert_eq!(roll.damage, 20.0);
    }

    #[test]
    fn enemy_dies_once() {
        let mut enemy = Enemy::new(10.0, 2.0);
        assert!(!enemy.take_damage(1.0), "armor absorbs weak hits");
        assert_eq!(enemy.health(), 10.0);
        assert!(enemy.take_damage(12.0));
        assert!(!enemy.take_damage(12.0), "already dead");
        enemy.respawn();
        assert!(enemy.is_alive());
    }

    #[test]
    fn player_armor_reduces_incoming() {
        let stats = StatMap::base();
        assert_eq!(incoming_damage(&stats, 12.0), 7.0);
        assert_eq!(incoming_damage(&stats, 3.0), 0.0);
    }

    #[test]
    fn health_pool_follows_health_boost() {
        let mut stats = StatMap::base();
        let mut health = PlayerHealth::from_stats(&stats);
        assert_eq!(health.max(), 100.0);

        assert!(!health.take_damage(&stats, 45.0));
        assert_eq!(health.current(), 60.0);
        health.heal(500.0);
        assert_eq!(health.current(), 100.0);

        stats.set(StatType::HealthBoost, 120.0);
        health.update_max(&stats);
        assert_eq!(health.max(), 120.0);
        assert_eq!(health.current(), 100.0);

        stats.set(StatType::HealthBoost, 80.0);
        health.update_max(&stats);
        assert_eq!(health.current(), 80.0);

        assert!(health.take_damage(&stats, 90.0));
        assert!(!health.is_alive());
        assert!(!health.take_damage(&stats, 90.0), "already dead");
    }

    #[test]
    fn cooldown_follows_attack_speed() {
        let mut stats = StatMap::base();
        assert_eq!(attack_cooldown(&stats), Some(1.0));
        stats.set(StatType::AttackSpeed, 0.0);
        assert_eq!(attack_cooldown(&stats), None);
    }
}
