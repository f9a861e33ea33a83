//! Per-character equipped gear and set-bonus aggregation.

use super::equipment::EquippedItems;
use super::sets::EquipmentSet;
use super::types::{Equipment, EquipmentSlot};
use crate::core::stats::EquipmentStats;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns every character's equipped items, keyed by character id, plus the
/// catalog of equipment sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentManager {
    equipped: HashMap<String, EquippedItems>,
    sets: Vec<EquipmentSet>,
}

impl EquipmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sets(sets: Vec<EquipmentSet>) -> Self {
        Self {
            equipped: HashMap::new(),
            sets,
        }
    }

    pub fn register_set(&mut self, set: EquipmentSet) {
        self.sets.retain(|existing| existing.id != set.id);
        self.sets.push(set);
    }

    pub fn sets(&self) -> &[EquipmentSet] {
        &self.sets
    }

    /// Only broken gear is refused here. Class restrictions need class data
    /// this component does not have, so they are only noted.
    pub fn can_equip(&self, character_id: &str, item: &Equipment) -> bool {
        if item.is_broken() {
            return false;
        }
        if let Some(classes) = &item.class_restrictions {
            debug!(
                "{} carries class restrictions {:?}; not checked for {}",
                item.id, classes, character_id
            );
        }
        true
    }

    /// Equips an item, overwriting the slot. The displaced item is dropped;
    /// call [`Self::unequip_item`] first to keep it.
    pub fn equip_item(&mut self, character_id: &str, item: Equipment) -> bool {
        if !self.can_equip(character_id, &item) {
            return false;
        }
        self.equipped
            .entry(character_id.to_string())
            .or_default()
            .set(item);
        true
    }

    pub fn unequip_item(&mut self, character_id: &str, slot: EquipmentSlot) -> Option<Equipment> {
        self.equipped.get_mut(character_id)?.take(slot)
    }

    /// Snapshot copy of a character's gear. Empty for unknown characters.
    pub fn get_equipped_items(&self, character_id: &str) -> EquippedItems {
        self.equipped
            .get(character_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn equipped_items(&self, character_id: &str) -> Option<&EquippedItems> {
        self.equipped.get(character_id)
    }

    /// Sums item stats, then adds every satisfied tier of every set.
    pub fn calculate_total_stats(&self, equipped: &EquippedItems) -> EquipmentStats {
        let mut total = EquipmentStats::default();
        for item in equipped.iter_equipped() {
            total += item.stats;
        }
        for set in &self.sets {
            let count = set.equipped_count(equipped);
            if count > 0 {
                total += set.active_bonus(count);
            }
        }
        total
    }

    /// Aggregated bonus for one character.
    pub fn bonus_for(&self, character_id: &str) -> EquipmentStats {
        self.equipped
            .get(character_id)
            .map(|equipped| self.calculate_total_stats(equipped))
            .unwrap_or_default()
    }
}
