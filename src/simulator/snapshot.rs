//! Read-only views of the arena for the host.

use crate::character::CharacterClass;
use crate::combat::{Enemy, EnemyType, MovementState, PartyMember, Position};
use crate::core::clock::Timestamp;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuffSnapshot {
    pub name: String,
    pub remaining_ms: u64,
    pub is_debuff: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub position: Position,
    pub movement: MovementState,
    pub buffs: Vec<BuffSnapshot>,
    /// Only present for Boxers.
    pub combo: Option<u32>,
    /// Seconds left per ability still cooling down.
    pub cooldowns: BTreeMap<String, f64>,
    pub defeated: bool,
}

impl PlayerSnapshot {
    pub fn capture(member: &PartyMember, now: Timestamp) -> Self {
        let c = &member.character;
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            class: c.class,
            level: c.level(),
            experience: c.progression.experience,
            experience_to_next: c.progression.experience_to_next,
            health: c.stats.health,
            max_health: c.stats.max_health,
            mana: c.stats.mana,
            max_mana: c.stats.max_mana,
            position: member.body.position,
            movement: member.body.movement,
            buffs: c
                .buffs
                .iter()
                .map(|b| BuffSnapshot {
                    name: b.name.clone(),
                    remaining_ms: b.remaining_ms(now),
                    is_debuff: b.is_debuff(),
                })
                .collect(),
            combo: c.class_state.combo().map(|combo| combo.combo_count),
            cooldowns: c.cooldowns().clone(),
            defeated: !member.is_active(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemySnapshot {
    pub id: String,
    pub enemy_type: EnemyType,
    pub name: &'static str,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub position: Position,
    pub movement: MovementState,
    pub defeated: bool,
}

impl EnemySnapshot {
    pub fn capture(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id.clone(),
            enemy_type: enemy.enemy_type,
            name: enemy.name(),
            level: enemy.level,
            health: enemy.health,
            max_health: enemy.max_health,
            position: enemy.body.position,
            movement: enemy.body.movement,
            defeated: !enemy.is_active(),
        }
    }
}

/// Whole-arena view at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaSnapshot {
    pub now_ms: Timestamp,
    pub zone: Option<(u32, u32)>,
    pub state: &'static str,
    pub paused: bool,
    pub auto_battle: bool,
    pub game_speed: f64,
    pub gold: u64,
    pub inventory_size: usize,
    pub party: Vec<PlayerSnapshot>,
    pub enemies: Vec<EnemySnapshot>,
}
