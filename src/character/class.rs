use crate::core::constants::{
    ARCHER_RANGE, BOXER_RANGE, MAGE_RANGE, PRIEST_HEAL_RANGE, WARRIOR_RANGE,
};
use crate::core::stats::{StatGrowth, StatTemplate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Archer,
    Mage,
    Priest,
    Boxer,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 5] {
        [
            CharacterClass::Warrior,
            CharacterClass::Archer,
            CharacterClass::Mage,
            CharacterClass::Priest,
            CharacterClass::Boxer,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Archer => "Archer",
            CharacterClass::Mage => "Mage",
            CharacterClass::Priest => "Priest",
            CharacterClass::Boxer => "Boxer",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }

    /// Base stats at level 1.
    pub fn base_template(&self) -> StatTemplate {
        match self {
            CharacterClass::Warrior => StatTemplate {
                max_health: 120,
                attack_power: 25,
                defense: 15,
                speed: 8,
                max_mana: None,
                critical_chance: Some(0.05),
                critical_multiplier: None,
            },
            CharacterClass::Archer => StatTemplate {
                max_health: 80,
                attack_power: 20,
                defense: 3,
                speed: 12,
                max_mana: None,
                critical_chance: Some(0.15),
                critical_multiplier: Some(2.0),
            },
            CharacterClass::Mage => StatTemplate {
                max_health: 70,
                attack_power: 22,
                defense: 2,
                speed: 9,
                max_mana: Some(100),
                critical_chance: Some(0.1),
                critical_multiplier: Some(1.8),
            },
            CharacterClass::Priest => StatTemplate {
                max_health: 75,
                attack_power: 10,
                defense: 5,
                speed: 9,
                max_mana: Some(80),
                critical_chance: Some(0.05),
                critical_multiplier: None,
            },
            CharacterClass::Boxer => StatTemplate {
                max_health: 95,
                attack_power: 18,
                defense: 8,
                speed: 15,
                max_mana: None,
                critical_chance: Some(0.1),
                critical_multiplier: Some(1.6),
            },
        }
    }

    pub fn growth(&self) -> StatGrowth {
        match self {
            CharacterClass::Warrior => StatGrowth {
                health: 12.0,
                attack_power: 3.0,
                defense: 2.0,
                speed: 0.5,
                mana: 0.0,
            },
            CharacterClass::Archer => StatGrowth {
                health: 8.0,
                attack_power: 3.5,
                defense: 0.8,
                speed: 0.6,
                mana: 0.0,
            },
            CharacterClass::Mage => StatGrowth {
                health: 6.0,
                attack_power: 2.5,
                defense: 0.5,
                speed: 0.4,
                mana: 10.0,
            },
            CharacterClass::Priest => StatGrowth {
                health: 7.0,
                attack_power: 1.5,
                defense: 1.0,
                speed: 0.4,
                mana: 8.0,
            },
            CharacterClass::Boxer => StatGrowth {
                health: 10.0,
                attack_power: 3.0,
                defense: 1.2,
                speed: 0.8,
                mana: 0.0,
            },
        }
    }

    /// Attack range in arena percent. For the Priest this is the heal range.
    pub fn range(&self) -> f64 {
        match self {
            CharacterClass::Warrior => WARRIOR_RANGE,
            CharacterClass::Archer => ARCHER_RANGE,
            CharacterClass::Mage => MAGE_RANGE,
            CharacterClass::Priest => PRIEST_HEAL_RANGE,
            CharacterClass::Boxer => BOXER_RANGE,
        }
    }

    /// Healers support allies in the arena and never auto-attack.
    pub fn is_healer(&self) -> bool {
        matches!(self, CharacterClass::Priest)
    }
}
