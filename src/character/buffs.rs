//! Timed stat modifiers owned by the entity they affect.

use crate::core::clock::Timestamp;
use crate::core::stats::CharacterStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatModifier {
    AttackPower(i32),
    Defense(i32),
    Speed(i32),
    CriticalChance(f64),
    /// Status tag only. Nothing in combat reads it.
    Stunned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub name: String,
    pub modifier: StatModifier,
    /// Absolute expiry on the arena clock.
    pub expires_at: Timestamp,
}

impl Buff {
    pub fn new(name: &str, modifier: StatModifier, now: Timestamp, duration_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            modifier,
            expires_at: now + duration_ms,
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    pub fn is_debuff(&self) -> bool {
        match self.modifier {
            StatModifier::AttackPower(v) | StatModifier::Defense(v) | StatModifier::Speed(v) => {
                v < 0
            }
            StatModifier::CriticalChance(v) => v < 0.0,
            StatModifier::Stunned => true,
        }
    }
}

fn offset(value: u32, delta: i32) -> u32 {
    (value as i64 + delta as i64).max(0) as u32
}

/// Applies every buff in the list on top of `stats`.
pub fn apply_buffs(stats: &CharacterStats, buffs: &[Buff]) -> CharacterStats {
    let mut result = *stats;
    for buff in buffs {
        match buff.modifier {
            StatModifier::AttackPower(v) => result.attack_power = offset(result.attack_power, v),
            StatModifier::Defense(v) => result.defense = offset(result.defense, v),
            StatModifier::Speed(v) => result.speed = offset(result.speed, v),
            StatModifier::CriticalChance(v) => {
                result.critical_chance = (result.critical_chance + v).clamp(0.0, 1.0)
            }
            StatModifier::Stunned => {}
        }
    }
    result
}

/// Adds a buff, refreshing any active buff of the same name.
pub fn add_or_refresh(buffs: &mut Vec<Buff>, buff: Buff) {
    buffs.retain(|b| b.name != buff.name);
    buffs.push(buff);
}

/// Drops expired buffs, returning how many were removed.
pub fn expire_buffs(buffs: &mut Vec<Buff>, now: Timestamp) -> usize {
    let before = buffs.len();
    buffs.retain(|b| !b.is_expired(now));
    before - buffs.len()
}
