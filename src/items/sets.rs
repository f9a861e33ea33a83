use super::equipment::EquippedItems;
use crate::core::stats::EquipmentStats;
use serde::{Deserialize, Serialize};

/// Bonus granted once `items_required` pieces of a set are equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonus {
    pub items_required: usize,
    pub stats: EquipmentStats,
}

/// A named group of items with tiered bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    pub id: String,
    pub name: String,
    pub item_ids: Vec<String>,
    pub bonuses: Vec<SetBonus>,
}

impl EquipmentSet {
    /// Counts how many of this set's members are currently equipped.
    pub fn equipped_count(&self, equipped: &EquippedItems) -> usize {
        self.item_ids
            .iter()
            .filter(|id| equipped.contains_id(id))
            .count()
    }

    /// Sums every tier whose threshold is met. Tiers stack.
    pub fn active_bonus(&self, equipped_count: usize) -> EquipmentStats {
        let mut total = EquipmentStats::default();
        for bonus in &self.bonuses {
            if bonus.items_required <= equipped_count {
                total += bonus.stats;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered_set() -> EquipmentSet {
        EquipmentSet {
            id: "test".to_string(),
            name: "Test Set".to_string(),
            item_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            bonuses: vec![
                SetBonus {
                    items_required: 2,
                    stats: EquipmentStats {
                        defense: 5,
                        ..EquipmentStats::default()
                    },
                },
                SetBonus {
                    items_required: 3,
                    stats: EquipmentStats {
                        attack_power: 7,
                        ..EquipmentStats::default()
                    },
                },
            ],
        }
    }

    #[test]
    fn test_no_bonus_below_threshold() {
        assert!(tiered_set().active_bonus(1).is_empty());
    }

    #[test]
    fn test_tiers_are_additive() {
        let set = tiered_set();
        let two = set.active_bonus(2);
        assert_eq!(two.defense, 5);
        assert_eq!(two.attack_power, 0);

        let three = set.active_bonus(3);
        assert_eq!(three.defense, 5);
        assert_eq!(three.attack_power, 7);
    }
}
