//! Zone and level data definitions.

use crate::combat::EnemyType;
use crate::core::constants::ITEM_DROP_BASE_CHANCE;
use serde::Serialize;

/// Represents a zone in the game world.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: u32,
    pub name: &'static str,
    pub levels: Vec<ZoneLevel>,
}

/// One fight in a zone: a fixed enemy composition and its rewards.
#[derive(Debug, Clone)]
pub struct ZoneLevel {
    pub id: u32,
    pub name: &'static str,
    /// Level every spawned enemy is scaled to.
    pub enemy_level: u32,
    pub enemies: Vec<EnemySpawn>,
    pub rewards: LevelRewards,
    pub is_boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySpawn {
    pub enemy_type: EnemyType,
    pub count: u32,
}

/// Granted on victory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRewards {
    /// Experience for each surviving party member.
    pub experience: u64,
    pub gold: u64,
    pub drop_chance: f64,
    /// Catalog ids that can drop.
    pub loot: Vec<&'static str>,
}

fn spawn(enemy_type: EnemyType, count: u32) -> EnemySpawn {
    EnemySpawn { enemy_type, count }
}

fn rewards(experience: u64, gold: u64, drop_chance: f64, loot: &[&'static str]) -> LevelRewards {
    LevelRewards {
        experience,
        gold,
        drop_chance,
        loot: loot.to_vec(),
    }
}

/// Returns all zones in the game.
pub fn get_all_zones() -> Vec<Zone> {
    use EnemyType::*;
    vec![
        Zone {
            id: 1,
            name: "Grassland",
            levels: vec![
                ZoneLevel {
                    id: 1,
                    name: "Grass Path",
                    enemy_level: 1,
                    enemies: vec![spawn(Slime, 2)],
                    rewards: rewards(30, 10, ITEM_DROP_BASE_CHANCE, &["running_shoes"]),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 2,
                    name: "Snake Hill",
                    enemy_level: 2,
                    enemies: vec![spawn(Slime, 1), spawn(Snake, 2)],
                    rewards: rewards(
                        45,
                        15,
                        ITEM_DROP_BASE_CHANCE,
                        &["leather_armor", "lucky_charm"],
                    ),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 3,
                    name: "Goblin Camp",
                    enemy_level: 3,
                    enemies: vec![spawn(Goblin, 2), spawn(Snake, 1)],
                    rewards: rewards(
                        70,
                        25,
                        0.25,
                        &[
                            "ranger_hood",
                            "ranger_vest",
                            "ranger_boots",
                            "wooden_sword",
                            "short_bow",
                        ],
                    ),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 4,
                    name: "Chief's Tent",
                    enemy_level: 4,
                    enemies: vec![spawn(GoblinChief, 1), spawn(Goblin, 2)],
                    rewards: rewards(
                        150,
                        60,
                        0.5,
                        &["ranger_hood", "ranger_vest", "ranger_boots", "ember_rod"],
                    ),
                    is_boss: true,
                },
            ],
        },
        Zone {
            id: 2,
            name: "Whispering Forest",
            levels: vec![
                ZoneLevel {
                    id: 1,
                    name: "Forest Edge",
                    enemy_level: 5,
                    enemies: vec![spawn(Bat, 2), spawn(Goblin, 1)],
                    rewards: rewards(
                        110,
                        30,
                        ITEM_DROP_BASE_CHANCE,
                        &["lucky_charm", "cloth_wraps"],
                    ),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 2,
                    name: "Old Woods",
                    enemy_level: 6,
                    enemies: vec![spawn(Tree, 2), spawn(Bat, 1)],
                    rewards: rewards(140, 40, 0.2, &["iron_plate", "iron_greaves", "oak_staff"]),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 3,
                    name: "Hollow Grove",
                    enemy_level: 8,
                    enemies: vec![spawn(ElderTree, 1), spawn(Bat, 2)],
                    rewards: rewards(300, 100, 0.5, &["iron_plate", "iron_greaves", "iron_signet"]),
                    is_boss: true,
                },
            ],
        },
        Zone {
            id: 3,
            name: "Bone Cavern",
            levels: vec![
                ZoneLevel {
                    id: 1,
                    name: "Cave Mouth",
                    enemy_level: 10,
                    enemies: vec![spawn(Skeleton, 2), spawn(Bat, 2)],
                    rewards: rewards(260, 70, 0.2, &["iron_signet", "ember_rod"]),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 2,
                    name: "Bone Pit",
                    enemy_level: 12,
                    enemies: vec![spawn(Skeleton, 3)],
                    rewards: rewards(340, 90, 0.25, &["iron_plate", "lucky_charm"]),
                    is_boss: false,
                },
                ZoneLevel {
                    id: 3,
                    name: "Lich's Crypt",
                    enemy_level: 15,
                    enemies: vec![spawn(Lich, 1), spawn(Skeleton, 2)],
                    rewards: rewards(800, 250, 0.6, &["ember_rod", "iron_signet", "ranger_hood"]),
                    is_boss: true,
                },
            ],
        },
    ]
}

pub fn get_zone(zone_id: u32) -> Option<Zone> {
    get_all_zones().into_iter().find(|z| z.id == zone_id)
}

pub fn get_level(zone_id: u32, level_id: u32) -> Option<ZoneLevel> {
    get_zone(zone_id)?
        .levels
        .into_iter()
        .find(|l| l.id == level_id)
}

/// The level after `(zone_id, level_id)`: next in the zone, else the first
/// level of the next zone.
pub fn next_level(zone_id: u32, level_id: u32) -> Option<(u32, u32)> {
    let zones = get_all_zones();
    let zone = zones.iter().find(|z| z.id == zone_id)?;
    if let Some(level) = zone.levels.iter().find(|l| l.id == level_id + 1) {
        return Some((zone.id, level.id));
    }
    let next_zone = zones.iter().find(|z| z.id == zone_id + 1)?;
    next_zone.levels.first().map(|l| (next_zone.id, l.id))
}
