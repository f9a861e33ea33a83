use super::catalog::{get_item, is_set_member};
use super::types::{Equipment, Rarity};
use crate::core::constants::{
    BOSS_EPIC_THRESHOLD, BOSS_MAGIC_THRESHOLD, BOSS_RARE_THRESHOLD, ITEM_DROP_MAX_CHANCE,
};
use crate::zones::ZoneLevel;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Roll item rarity for a normal clear.
pub fn roll_rarity(rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>();

    // Base distribution: 55% Common, 30% Magic, 12% Rare, 2.5% Epic, 0.5% Legendary
    if roll < 0.55 {
        Rarity::Common
    } else if roll < 0.85 {
        Rarity::Magic
    } else if roll < 0.97 {
        Rarity::Rare
    } else if roll < 0.995 {
        Rarity::Epic
    } else {
        Rarity::Legendary
    }
}

/// Boss clears skip Common entirely.
pub fn roll_boss_rarity(rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>();
    if roll < BOSS_MAGIC_THRESHOLD {
        Rarity::Magic
    } else if roll < BOSS_RARE_THRESHOLD {
        Rarity::Rare
    } else if roll < BOSS_EPIC_THRESHOLD {
        Rarity::Epic
    } else {
        Rarity::Legendary
    }
}

/// Random (v4) uuid built from the caller's RNG instead of OS entropy.
fn drop_uuid(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn scale(value: u32, multiplier: f64) -> u32 {
    (value as f64 * multiplier).round() as u32
}

/// Builds a fresh copy of a template at the given rarity.
///
/// Generated copies get a unique id so several can sit in the inventory.
/// The id is drawn from `rng`, so seeded runs produce the same ids.
pub fn generate_drop(
    template: &Equipment,
    rarity: Rarity,
    item_level: u32,
    rng: &mut impl Rng,
) -> Equipment {
    let m = rarity.stat_multiplier();
    let mut stats = template.stats;
    stats.health = scale(stats.health, m);
    stats.max_health = scale(stats.max_health, m);
    stats.attack_power = scale(stats.attack_power, m);
    stats.defense = scale(stats.defense, m);
    stats.speed = scale(stats.speed, m);
    stats.mana = scale(stats.mana, m);
    stats.max_mana = scale(stats.max_mana, m);
    stats.critical_chance *= m;
    stats.critical_multiplier *= m;

    let name = if rarity == Rarity::Common {
        template.name.clone()
    } else {
        format!("{} {}", rarity.name(), template.name)
    };

    Equipment {
        id: format!("{}-{}", template.id, drop_uuid(rng)),
        name,
        rarity,
        level: item_level.max(template.level),
        stats,
        ..template.clone()
    }
}

/// Try to drop an item after clearing a level.
///
/// Set pieces drop as-is so their catalog id keeps counting toward the set.
pub fn try_drop_from_level(level: &ZoneLevel, rng: &mut impl Rng) -> Option<Equipment> {
    if level.rewards.loot.is_empty() {
        return None;
    }
    let chance = level.rewards.drop_chance.min(ITEM_DROP_MAX_CHANCE);
    if rng.gen::<f64>() >= chance {
        return None;
    }

    let pick = level.rewards.loot[rng.gen_range(0..level.rewards.loot.len())];
    let template = get_item(pick)?;
    if is_set_member(&template.id) {
        return Some(template);
    }

    let rarity = if level.is_boss {
        roll_boss_rarity(rng)
    } else {
        roll_rarity(rng)
    };
    Some(generate_drop(&template, rarity, level.enemy_level, rng))
}
