//! Shared stat math for characters, equipment and the arena.
//!
//! These pure functions calculate stat blocks and combat outcomes without side
//! effects. The character model and the simulator both use them so that level
//! scaling, equipment merging and critical hits stay consistent.

use crate::core::constants::{
    DEFAULT_CRITICAL_CHANCE, DEFAULT_CRITICAL_MULTIPLIER, DEFENSE_CURVE_CONSTANT, MIN_DAMAGE,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Live stat block of a character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub speed: u32,
    pub mana: u32,
    pub max_mana: u32,
    /// Chance to crit, 0.0-1.0.
    pub critical_chance: f64,
    /// Damage multiplier on crit, at least 1.0.
    pub critical_multiplier: f64,
}

/// Class base stats as authored. Optional fields fall back to defaults in
/// [`clone_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTemplate {
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_mana: Option<u32>,
    pub critical_chance: Option<f64>,
    pub critical_multiplier: Option<f64>,
}

/// Per-level additive growth. Fractional values accumulate and are floored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatGrowth {
    pub health: f64,
    pub attack_power: f64,
    pub defense: f64,
    pub speed: f64,
    pub mana: f64,
}

/// Additive stat bonuses from gear and set bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentStats {
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub speed: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
}

impl EquipmentStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign for EquipmentStats {
    fn add_assign(&mut self, other: Self) {
        self.health = self.health.saturating_add(other.health);
        self.max_health = self.max_health.saturating_add(other.max_health);
        self.attack_power = self.attack_power.saturating_add(other.attack_power);
        self.defense = self.defense.saturating_add(other.defense);
        self.speed = self.speed.saturating_add(other.speed);
        self.mana = self.mana.saturating_add(other.mana);
        self.max_mana = self.max_mana.saturating_add(other.max_mana);
        self.critical_chance += other.critical_chance;
        self.critical_multiplier += other.critical_multiplier;
    }
}

/// How hit damage is mitigated by defense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageFormula {
    /// `max(1, attack - defense)`.
    #[default]
    Flat,
    /// [`calculate_damage_reduction`].
    DiminishingReturns,
}

impl DamageFormula {
    pub fn apply(&self, raw_damage: u32, defense: u32) -> u32 {
        match self {
            DamageFormula::Flat => calculate_flat_damage(raw_damage, defense),
            DamageFormula::DiminishingReturns => calculate_damage_reduction(raw_damage, defense),
        }
    }
}

/// Result of a critical hit roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalHit {
    /// Damage after the crit multiplier, if it applied.
    pub damage: u32,
    pub is_critical: bool,
}

/// Builds a fresh stat block from a class template.
///
/// The result never aliases the template: every character gets its own copy.
/// Missing mana defaults to 0, crit chance to 0 and crit multiplier to 1.5.
pub fn clone_stats(template: &StatTemplate) -> CharacterStats {
    let max_mana = template.max_mana.unwrap_or(0);
    CharacterStats {
        health: template.max_health,
        max_health: template.max_health,
        attack_power: template.attack_power,
        defense: template.defense,
        speed: template.speed,
        mana: max_mana,
        max_mana,
        critical_chance: template
            .critical_chance
            .unwrap_or(DEFAULT_CRITICAL_CHANCE)
            .clamp(0.0, 1.0),
        critical_multiplier: template
            .critical_multiplier
            .unwrap_or(DEFAULT_CRITICAL_MULTIPLIER)
            .max(1.0),
    }
}

fn grown(base: u32, growth_per_level: f64, level: u32) -> u32 {
    let levels = level.saturating_sub(1) as f64;
    base.saturating_add((growth_per_level.max(0.0) * levels).floor() as u32)
}

/// Scales base stats to the given level.
///
/// Each grown stat gains `floor(growth * (level - 1))`. Health and mana are
/// restored to their new maximums: recalculation is a refresh event.
pub fn calculate_level_stats(
    base: &CharacterStats,
    growth: &StatGrowth,
    level: u32,
) -> CharacterStats {
    let max_health = grown(base.max_health, growth.health, level);
    let max_mana = if base.max_mana > 0 {
        grown(base.max_mana, growth.mana, level)
    } else {
        0
    };

    CharacterStats {
        health: max_health,
        max_health,
        attack_power: grown(base.attack_power, growth.attack_power, level),
        defense: grown(base.defense, growth.defense, level),
        speed: grown(base.speed, growth.speed, level),
        mana: max_mana,
        max_mana,
        critical_chance: base.critical_chance,
        critical_multiplier: base.critical_multiplier,
    }
}

/// Adds equipment bonuses to a stat block and re-clamps the pools.
///
/// # Arguments
/// * `base` - Level-scaled stats
/// * `bonus` - Aggregated equipment bonus (items plus set tiers)
///
/// # Returns
/// Stats with `health <= max_health`, `mana <= max_mana` and crit chance capped at 1.0
pub fn apply_equipment_stats(base: &CharacterStats, bonus: &EquipmentStats) -> CharacterStats {
    let mut stats = *base;
    stats.max_health = stats.max_health.saturating_add(bonus.max_health);
    stats.health = stats.health.saturating_add(bonus.health);
    stats.attack_power = stats.attack_power.saturating_add(bonus.attack_power);
    stats.defense = stats.defense.saturating_add(bonus.defense);
    stats.speed = stats.speed.saturating_add(bonus.speed);
    stats.max_mana = stats.max_mana.saturating_add(bonus.max_mana);
    stats.mana = stats.mana.saturating_add(bonus.mana);
    stats.critical_chance = (stats.critical_chance + bonus.critical_chance).clamp(0.0, 1.0);
    stats.critical_multiplier = (stats.critical_multiplier + bonus.critical_multiplier).max(1.0);

    stats.health = stats.health.min(stats.max_health);
    stats.mana = stats.mana.min(stats.max_mana);
    stats
}

/// Calculate damage after the defense curve.
///
/// `raw * (1 - defense / (defense + 100))`, floored. Defense approaches but
/// never reaches full mitigation, so any positive hit deals at least 1.
///
/// # Arguments
/// * `raw_damage` - Incoming damage before defense
/// * `defense` - Defender's effective defense
pub fn calculate_damage_reduction(raw_damage: u32, defense: u32) -> u32 {
    if raw_damage == 0 {
        return 0;
    }
    let defense = defense as f64;
    let mitigation = 1.0 - defense / (defense + DEFENSE_CURVE_CONSTANT);
    let reduced = (raw_damage as f64 * mitigation).floor() as u32;
    reduced.max(MIN_DAMAGE)
}

/// Flat arena damage: `max(1, attack - defense)`.
pub fn calculate_flat_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(MIN_DAMAGE)
}

/// Roll for a critical hit.
///
/// # Arguments
/// * `base_damage` - Damage before the crit multiplier
/// * `critical_chance` - Chance to crit (0.0-1.0)
/// * `critical_multiplier` - Multiplier applied on crit
/// * `rng` - Random number generator
pub fn calculate_critical_hit(
    base_damage: u32,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut impl Rng,
) -> CriticalHit {
    let roll: f64 = rng.gen();
    if roll < critical_chance {
        CriticalHit {
            damage: (base_damage as f64 * critical_multiplier).floor() as u32,
            is_critical: true,
        }
    } else {
        CriticalHit {
            damage: base_damage,
            is_critical: false,
        }
    }
}

/// Checks the stat block invariants.
pub fn validate_stats(stats: &CharacterStats) -> bool {
    stats.health <= stats.max_health
        && stats.mana <= stats.max_mana
        && (0.0..=1.0).contains(&stats.critical_chance)
        && stats.critical_multiplier >= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn template() -> StatTemplate {
        StatTemplate {
            max_health: 100,
            attack_power: 20,
            defense: 10,
            speed: 10,
            max_mana: None,
            critical_chance: None,
            critical_multiplier: None,
        }
    }

    #[test]
    fn test_clone_stats_defaults() {
        let stats = clone_stats(&template());
        assert_eq!(stats.health, 100);
        assert_eq!(stats.mana, 0);
        assert_eq!(stats.max_mana, 0);
        assert_eq!(stats.critical_chance, 0.0);
        assert_eq!(stats.critical_multiplier, 1.5);
        assert!(validate_stats(&stats));
    }

    #[test]
    fn test_clone_stats_does_not_alias() {
        let tpl = template();
        let mut a = clone_stats(&tpl);
        let b = clone_stats(&tpl);
        a.health = 1;
        assert_eq!(b.health, 100);
    }

    #[test]
    fn test_level_stats_growth_is_floored() {
        let base = clone_stats(&StatTemplate {
            max_mana: Some(50),
            ..template()
        });
        let growth = StatGrowth {
            health: 12.0,
            attack_power: 2.5,
            defense: 1.0,
            speed: 0.4,
            mana: 7.5,
        };
        let stats = calculate_level_stats(&base, &growth, 4);
        assert_eq!(stats.max_health, 136); // 100 + 36
        assert_eq!(stats.attack_power, 27); // 20 + floor(7.5)
        assert_eq!(stats.defense, 13);
        assert_eq!(stats.speed, 11); // 10 + floor(1.2)
        assert_eq!(stats.max_mana, 72); // 50 + floor(22.5)
        assert_eq!(stats.health, stats.max_health);
        assert_eq!(stats.mana, stats.max_mana);
    }

    #[test]
    fn test_level_stats_level_one_is_base() {
        let base = clone_stats(&template());
        let growth = StatGrowth {
            health: 10.0,
            ..StatGrowth::default()
        };
        assert_eq!(calculate_level_stats(&base, &growth, 1), base);
    }

    #[test]
    fn test_apply_equipment_clamps_pools() {
        let mut base = clone_stats(&template());
        base.health = 90;
        let bonus = EquipmentStats {
            health: 50,
            attack_power: 5,
            critical_chance: 2.0,
            ..EquipmentStats::default()
        };
        let stats = apply_equipment_stats(&base, &bonus);
        assert_eq!(stats.health, 100);
        assert_eq!(stats.attack_power, 25);
        assert_eq!(stats.critical_chance, 1.0);
        assert!(validate_stats(&stats));
    }

    #[test]
    fn test_apply_equipment_raises_max_health() {
        let base = clone_stats(&template());
        let bonus = EquipmentStats {
            max_health: 20,
            ..EquipmentStats::default()
        };
        let stats = apply_equipment_stats(&base, &bonus);
        assert_eq!(stats.max_health, 120);
        assert_eq!(stats.health, 100);
    }

    #[test]
    fn test_apply_equipment_saturates() {
        let base = clone_stats(&template());
        let bonus = EquipmentStats {
            max_health: u32::MAX,
            health: u32::MAX,
            attack_power: u32::MAX,
            ..EquipmentStats::default()
        };
        let stats = apply_equipment_stats(&base, &bonus);
        assert_eq!(stats.max_health, u32::MAX);
        assert_eq!(stats.health, u32::MAX);
        assert_eq!(stats.attack_power, u32::MAX);

        let mut total = bonus;
        total += bonus;
        assert_eq!(total.attack_power, u32::MAX);
    }

    #[test]
    fn test_damage_reduction_anchors() {
        assert_eq!(calculate_damage_reduction(100, 0), 100);
        assert_eq!(calculate_damage_reduction(100, 100), 50);
        assert_eq!(calculate_damage_reduction(25, 3), 24);
    }

    #[test]
    fn test_damage_reduction_minimum_one() {
        for defense in [0, 10, 1_000, 100_000, u32::MAX / 2] {
            assert!(calculate_damage_reduction(1, defense) >= 1);
            assert!(calculate_damage_reduction(5, defense) >= 1);
        }
        assert_eq!(calculate_damage_reduction(0, 50), 0);
    }

    #[test]
    fn test_flat_damage() {
        assert_eq!(calculate_flat_damage(25, 3), 22);
        assert_eq!(calculate_flat_damage(5, 10), 1);
    }

    #[test]
    fn test_crit_never_at_zero_chance() {
        let mut rng = StepRng::new(0, 1);
        for _ in 0..100 {
            let hit = calculate_critical_hit(40, 0.0, 2.0, &mut rng);
            assert!(!hit.is_critical);
            assert_eq!(hit.damage, 40);
        }
    }

    #[test]
    fn test_crit_always_at_full_chance() {
        let mut rng = StepRng::new(u64::MAX, 0);
        for _ in 0..100 {
            let hit = calculate_critical_hit(33, 1.0, 1.5, &mut rng);
            assert!(hit.is_critical);
            assert_eq!(hit.damage, 49);
        }
    }

    #[test]
    fn test_validate_rejects_overfull_health() {
        let mut stats = clone_stats(&template());
        stats.health = stats.max_health + 1;
        assert!(!validate_stats(&stats));
    }
}
