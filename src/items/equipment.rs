use super::types::{Equipment, EquipmentSlot};
use serde::{Deserialize, Serialize};

/// One character's equipped gear, one item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedItems {
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    pub accessory: Option<Equipment>,
    pub boots: Option<Equipment>,
}

impl EquippedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Equipment> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
            EquipmentSlot::Boots => self.boots.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Equipment> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
            EquipmentSlot::Boots => &mut self.boots,
        }
    }

    /// Puts an item in its slot, returning whatever was there.
    pub fn set(&mut self, item: Equipment) -> Option<Equipment> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Equipment> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Equipment> {
        [&self.weapon, &self.armor, &self.accessory, &self.boots]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn contains_id(&self, item_id: &str) -> bool {
        self.iter_equipped().any(|item| item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.iter_equipped().next().is_none()
    }
}
