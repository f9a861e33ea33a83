//! Events produced by a simulator tick.
//!
//! The host maps these to its combat log, effects and sounds. Simulation code
//! never depends on how they are presented.

use crate::items::Rarity;
use crate::zones::LevelRewards;
use serde::Serialize;

/// A single event produced by a tick or a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TickEvent {
    // ── Encounter ───────────────────────────────────────────────
    /// A fresh enemy wave entered the arena.
    EncounterStarted {
        zone_id: u32,
        level_id: u32,
        enemy_count: usize,
    },

    /// All enemies defeated. Rewards have already been granted.
    Victory {
        zone_id: u32,
        level_id: u32,
        rewards: LevelRewards,
    },

    /// All party members defeated. Auto-battle halts.
    Defeat,

    // ── Combat ──────────────────────────────────────────────────
    AttackResolved {
        attacker_id: String,
        target_id: String,
        damage: u32,
        is_critical: bool,
    },

    HealResolved {
        healer_id: String,
        target_id: String,
        amount: u32,
    },

    EntityDefeated { entity_id: String },

    AbilityUsed {
        caster_id: String,
        ability_id: String,
        target_id: Option<String>,
        damage: u32,
        healing: u32,
    },

    // ── Progression ─────────────────────────────────────────────
    /// May repeat within one tick for large experience gains.
    LeveledUp { character_id: String, new_level: u32 },

    /// A drop was added to the party inventory.
    ItemDropped {
        item_id: String,
        item_name: String,
        rarity: Rarity,
    },
}

/// Result of processing a single tick.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickResult {
    /// Events in chronological order, including those queued by commands
    /// since the previous tick.
    pub events: Vec<TickEvent>,
    /// Arena clock after the tick, in milliseconds.
    pub now_ms: u64,
}

impl TickResult {
    pub fn victories(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::Victory { .. }))
            .count()
    }

    pub fn has_defeat(&self) -> bool {
        self.events.iter().any(|e| matches!(e, TickEvent::Defeat))
    }
}
