use crate::character::CharacterClass;
use crate::core::stats::EquipmentStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
    Boots,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 4] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Accessory,
            EquipmentSlot::Boots,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Accessory => "Accessory",
            EquipmentSlot::Boots => "Boots",
        }
    }

    /// Parses a slot name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Magic = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Stat scaling applied to generated items of this rarity.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Magic => 1.25,
            Rarity::Rare => 1.6,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 2.6,
        }
    }
}

/// Conditional modifier carried by an item. Stored and shown, not evaluated
/// by the combat core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub kind: String,
    pub value: f64,
    /// Chance (0.0-1.0) the effect procs, if it is a proc.
    #[serde(default)]
    pub chance: Option<f64>,
}

/// A piece of gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub level: u32,
    pub required_level: u32,
    pub stats: EquipmentStats,
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    pub durability: u32,
    pub max_durability: u32,
    #[serde(default)]
    pub class_restrictions: Option<Vec<CharacterClass>>,
}

impl Equipment {
    pub fn is_broken(&self) -> bool {
        self.durability == 0
    }

    /// True if no restriction is set or the class is listed.
    pub fn allows_class(&self, class: CharacterClass) -> bool {
        self.class_restrictions
            .as_ref()
            .map_or(true, |classes| classes.contains(&class))
    }
}
