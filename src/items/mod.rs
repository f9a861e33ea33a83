//! Item system: gear, equipped slots, sets, catalog and drops.

pub mod catalog;
pub mod drops;
pub mod equipment;
pub mod manager;
pub mod sets;
pub mod types;

pub use equipment::EquippedItems;
pub use manager::EquipmentManager;
pub use sets::{EquipmentSet, SetBonus};
pub use types::{Equipment, EquipmentSlot, ItemEffect, Rarity};
