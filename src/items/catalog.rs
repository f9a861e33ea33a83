//! Static item and equipment-set definitions.

use super::sets::{EquipmentSet, SetBonus};
use super::types::{Equipment, EquipmentSlot, ItemEffect, Rarity};
use crate::character::CharacterClass;
use crate::core::constants::DEFAULT_MAX_DURABILITY;
use crate::core::stats::EquipmentStats;

fn base_item(
    id: &str,
    name: &str,
    slot: EquipmentSlot,
    required_level: u32,
    stats: EquipmentStats,
) -> Equipment {
    Equipment {
        id: id.to_string(),
        name: name.to_string(),
        slot,
        rarity: Rarity::Common,
        level: required_level,
        required_level,
        stats,
        effects: vec![],
        durability: DEFAULT_MAX_DURABILITY,
        max_durability: DEFAULT_MAX_DURABILITY,
        class_restrictions: None,
    }
}

fn restricted(mut item: Equipment, classes: &[CharacterClass]) -> Equipment {
    item.class_restrictions = Some(classes.to_vec());
    item
}

/// Returns every item template in the game.
pub fn get_all_items() -> Vec<Equipment> {
    vec![
        // Weapons
        restricted(
            base_item(
                "wooden_sword",
                "Wooden Sword",
                EquipmentSlot::Weapon,
                1,
                EquipmentStats {
                    attack_power: 4,
                    ..EquipmentStats::default()
                },
            ),
            &[CharacterClass::Warrior],
        ),
        restricted(
            base_item(
                "short_bow",
                "Short Bow",
                EquipmentSlot::Weapon,
                1,
                EquipmentStats {
                    attack_power: 5,
                    ..EquipmentStats::default()
                },
            ),
            &[CharacterClass::Archer],
        ),
        restricted(
            base_item(
                "oak_staff",
                "Oak Staff",
                EquipmentSlot::Weapon,
                1,
                EquipmentStats {
                    attack_power: 3,
                    max_mana: 20,
                    ..EquipmentStats::default()
                },
            ),
            &[CharacterClass::Mage, CharacterClass::Priest],
        ),
        restricted(
            base_item(
                "cloth_wraps",
                "Cloth Wraps",
                EquipmentSlot::Weapon,
                1,
                EquipmentStats {
                    attack_power: 3,
                    speed: 1,
                    ..EquipmentStats::default()
                },
            ),
            &[CharacterClass::Boxer],
        ),
        restricted(
            Equipment {
                effects: vec![ItemEffect {
                    kind: "fire".to_string(),
                    value: 8.0,
                    chance: Some(0.1),
                }],
                ..base_item(
                    "ember_rod",
                    "Ember Rod",
                    EquipmentSlot::Weapon,
                    5,
                    EquipmentStats {
                        attack_power: 9,
                        max_mana: 30,
                        ..EquipmentStats::default()
                    },
                )
            },
            &[CharacterClass::Mage],
        ),
        // Armor
        base_item(
            "leather_armor",
            "Leather Armor",
            EquipmentSlot::Armor,
            1,
            EquipmentStats {
                defense: 3,
                max_health: 10,
                ..EquipmentStats::default()
            },
        ),
        // Accessories
        base_item(
            "lucky_charm",
            "Lucky Charm",
            EquipmentSlot::Accessory,
            2,
            EquipmentStats {
                critical_chance: 0.03,
                ..EquipmentStats::default()
            },
        ),
        // Boots
        base_item(
            "running_shoes",
            "Running Shoes",
            EquipmentSlot::Boots,
            1,
            EquipmentStats {
                speed: 2,
                ..EquipmentStats::default()
            },
        ),
        // Ranger set
        base_item(
            "ranger_hood",
            "Ranger Hood",
            EquipmentSlot::Accessory,
            3,
            EquipmentStats {
                critical_chance: 0.02,
                ..EquipmentStats::default()
            },
        ),
        base_item(
            "ranger_vest",
            "Ranger Vest",
            EquipmentSlot::Armor,
            3,
            EquipmentStats {
                defense: 4,
                ..EquipmentStats::default()
            },
        ),
        base_item(
            "ranger_boots",
            "Ranger Boots",
            EquipmentSlot::Boots,
            3,
            EquipmentStats {
                speed: 2,
                ..EquipmentStats::default()
            },
        ),
        // Iron set
        base_item(
            "iron_plate",
            "Iron Plate",
            EquipmentSlot::Armor,
            6,
            EquipmentStats {
                defense: 8,
                max_health: 20,
                ..EquipmentStats::default()
            },
        ),
        base_item(
            "iron_greaves",
            "Iron Greaves",
            EquipmentSlot::Boots,
            6,
            EquipmentStats {
                defense: 4,
                ..EquipmentStats::default()
            },
        ),
        base_item(
            "iron_signet",
            "Iron Signet",
            EquipmentSlot::Accessory,
            6,
            EquipmentStats {
                max_health: 15,
                ..EquipmentStats::default()
            },
        ),
    ]
}

pub fn get_item(id: &str) -> Option<Equipment> {
    get_all_items().into_iter().find(|item| item.id == id)
}

/// Returns every equipment set.
pub fn get_all_sets() -> Vec<EquipmentSet> {
    vec![
        EquipmentSet {
            id: "ranger".to_string(),
            name: "Ranger's Garb".to_string(),
            item_ids: vec![
                "ranger_hood".to_string(),
                "ranger_vest".to_string(),
                "ranger_boots".to_string(),
            ],
            bonuses: vec![
                SetBonus {
                    items_required: 2,
                    stats: EquipmentStats {
                        attack_power: 5,
                        ..EquipmentStats::default()
                    },
                },
                SetBonus {
                    items_required: 3,
                    stats: EquipmentStats {
                        critical_chance: 0.05,
                        speed: 2,
                        ..EquipmentStats::default()
                    },
                },
            ],
        },
        EquipmentSet {
            id: "iron".to_string(),
            name: "Ironclad".to_string(),
            item_ids: vec![
                "iron_plate".to_string(),
                "iron_greaves".to_string(),
                "iron_signet".to_string(),
            ],
            bonuses: vec![
                SetBonus {
                    items_required: 2,
                    stats: EquipmentStats {
                        defense: 6,
                        ..EquipmentStats::default()
                    },
                },
                SetBonus {
                    items_required: 3,
                    stats: EquipmentStats {
                        max_health: 30,
                        ..EquipmentStats::default()
                    },
                },
            ],
        },
    ]
}

pub fn is_set_member(item_id: &str) -> bool {
    get_all_sets()
        .iter()
        .any(|set| set.item_ids.iter().any(|id| id == item_id))
}

/// Gear every new party starts with in its shared inventory.
pub fn starter_inventory() -> Vec<Equipment> {
    [
        "wooden_sword",
        "short_bow",
        "oak_staff",
        "oak_staff",
        "cloth_wraps",
        "leather_armor",
        "running_shoes",
    ]
    .into_iter()
    .filter_map(get_item)
    .collect()
}
