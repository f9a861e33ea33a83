//! Class-specific state: level-up hooks, passives, combo and mana regen.

use super::abilities::SpecialAbility;
use super::class::CharacterClass;
use crate::core::constants::*;
use crate::core::stats::CharacterStats;
use serde::{Deserialize, Serialize};

/// Fractional mana regeneration. Whole points are granted, the rest carries over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManaRegen {
    pub per_second: f64,
    pub carry: f64,
}

impl ManaRegen {
    fn new(per_second: f64) -> Self {
        Self {
            per_second,
            carry: 0.0,
        }
    }

    /// Returns mana actually restored.
    pub fn tick(&mut self, stats: &mut CharacterStats, delta_seconds: f64) -> u32 {
        if stats.mana >= stats.max_mana {
            self.carry = 0.0;
            return 0;
        }
        self.carry += self.per_second * delta_seconds.max(0.0);
        let whole = self.carry.floor();
        self.carry -= whole;
        let before = stats.mana;
        stats.mana = (stats.mana + whole as u32).min(stats.max_mana);
        stats.mana - before
    }
}

/// Boxer combo meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub combo_count: u32,
    pub max_combo: u32,
    /// Seconds since the last combo-building action.
    pub combo_timer: f64,
    /// Speed granted by level-up hooks.
    pub bonus_speed: u32,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            combo_count: 0,
            max_combo: BOXER_DEFAULT_MAX_COMBO,
            combo_timer: 0.0,
            bonus_speed: 0,
        }
    }
}

impl ComboState {
    pub fn build(&mut self) {
        self.combo_count = (self.combo_count + 1).min(self.max_combo);
        self.combo_timer = 0.0;
    }

    pub fn reset(&mut self) {
        self.combo_count = 0;
        self.combo_timer = 0.0;
    }

    /// Advances the decay timer. Returns true if the combo just dropped.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        if self.combo_count == 0 {
            return false;
        }
        self.combo_timer += delta_seconds;
        if self.combo_timer >= BOXER_COMBO_DECAY_SECONDS {
            self.reset();
            return true;
        }
        false
    }

    pub fn attack_bonus(&self) -> u32 {
        self.combo_count * BOXER_ATTACK_PER_COMBO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassState {
    Warrior { bonus_max_health: u32 },
    Archer { bonus_crit: f64 },
    Mage { bonus_max_mana: u32, regen: ManaRegen },
    Priest { regen: ManaRegen },
    Boxer(ComboState),
}

impl ClassState {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Warrior => ClassState::Warrior {
                bonus_max_health: 0,
            },
            CharacterClass::Archer => ClassState::Archer { bonus_crit: 0.0 },
            CharacterClass::Mage => ClassState::Mage {
                bonus_max_mana: 0,
                regen: ManaRegen::new(MAGE_MANA_REGEN_PER_SECOND),
            },
            CharacterClass::Priest => ClassState::Priest {
                regen: ManaRegen::new(PRIEST_MANA_REGEN_PER_SECOND),
            },
            CharacterClass::Boxer => ClassState::Boxer(ComboState::default()),
        }
    }

    /// Runs once per level gained. Bonuses are banked here so that later
    /// stat recalculations keep them.
    pub fn on_level_up(&mut self, new_level: u32, abilities: &mut [SpecialAbility]) {
        match self {
            ClassState::Warrior { bonus_max_health } => {
                if new_level % WARRIOR_HEALTH_BONUS_INTERVAL == 0 {
                    *bonus_max_health += WARRIOR_HEALTH_BONUS;
                }
            }
            ClassState::Archer { bonus_crit } => {
                if new_level % ARCHER_CRIT_BONUS_INTERVAL == 0 {
                    *bonus_crit += ARCHER_CRIT_BONUS;
                }
            }
            ClassState::Mage { bonus_max_mana, .. } => {
                if new_level % MAGE_MANA_BONUS_INTERVAL == 0 {
                    *bonus_max_mana += MAGE_MANA_BONUS;
                }
            }
            ClassState::Priest { .. } => {
                if new_level % PRIEST_HEAL_BONUS_INTERVAL == 0 {
                    for ability in abilities.iter_mut().filter(|a| a.heal_amount > 0) {
                        ability.heal_amount += PRIEST_HEAL_BONUS;
                    }
                }
            }
            ClassState::Boxer(combo) => {
                if new_level % BOXER_COMBO_CAP_INTERVAL == 0 {
                    combo.max_combo += 1;
                }
                if new_level % BOXER_SPEED_BONUS_INTERVAL == 0 {
                    combo.bonus_speed += BOXER_SPEED_BONUS;
                }
            }
        }
    }

    /// Passive scaling on top of level and equipment stats.
    ///
    /// The Boxer's combo attack bonus is not folded in here: it is applied
    /// when stats are read, so a refresh never bakes in a stale combo.
    pub fn apply_class_specific_stats(&self, stats: &mut CharacterStats, level: u32) {
        match self {
            ClassState::Warrior { bonus_max_health } => {
                stats.max_health = stats.max_health.saturating_add(*bonus_max_health);
                stats.health = stats.health.saturating_add(*bonus_max_health);
            }
            ClassState::Archer { bonus_crit } => {
                stats.speed = stats.speed.saturating_add(level / 2);
                let mut crit = stats.critical_chance + bonus_crit;
                if level >= ARCHER_CRIT_PASSIVE_LEVEL {
                    crit += ARCHER_CRIT_PASSIVE;
                }
                stats.critical_chance = crit.min(1.0);
            }
            ClassState::Mage { bonus_max_mana, .. } => {
                stats.max_mana = stats.max_mana.saturating_add(*bonus_max_mana);
                stats.mana = stats.mana.saturating_add(*bonus_max_mana);
                stats.attack_power = stats
                    .attack_power
                    .saturating_add(stats.max_mana / MAGE_ATTACK_MANA_DIVISOR);
                if level >= MAGE_CRIT_MULTIPLIER_LEVEL {
                    stats.critical_multiplier += MAGE_CRIT_MULTIPLIER_PASSIVE;
                }
            }
            ClassState::Priest { .. } => {
                let bonus = (level / PRIEST_MANA_PASSIVE_STEP) * PRIEST_MANA_PASSIVE_PER_STEP;
                stats.max_mana = stats.max_mana.saturating_add(bonus);
                stats.mana = stats.mana.saturating_add(bonus);
                if level >= PRIEST_DEFENSE_PASSIVE_LEVEL {
                    stats.defense = stats.defense.saturating_add(PRIEST_DEFENSE_PASSIVE);
                }
            }
            ClassState::Boxer(combo) => {
                stats.speed = stats.speed.saturating_add(combo.bonus_speed);
                let steps = stats.speed / BOXER_SPEED_PER_CRIT_STEP;
                stats.critical_chance =
                    (stats.critical_chance + steps as f64 * BOXER_CRIT_PER_SPEED_STEP).min(1.0);
            }
        }
    }

    pub fn mana_regen_mut(&mut self) -> Option<&mut ManaRegen> {
        match self {
            ClassState::Mage { regen, .. } | ClassState::Priest { regen } => Some(regen),
            _ => None,
        }
    }

    pub fn combo(&self) -> Option<&ComboState> {
        match self {
            ClassState::Boxer(combo) => Some(combo),
            _ => None,
        }
    }

    pub fn combo_mut(&mut self) -> Option<&mut ComboState> {
        match self {
            ClassState::Boxer(combo) => Some(combo),
            _ => None,
        }
    }
}
