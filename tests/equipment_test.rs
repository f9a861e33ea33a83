//! Equipment pipeline integration tests
//!
//! Gear flows from the party inventory through the EquipmentManager into
//! character stats, including set bonuses and save files.

use stick_ranger::character::save::SaveManager;
use stick_ranger::character::{Character, CharacterClass};
use stick_ranger::core::stats::apply_equipment_stats;
use stick_ranger::core::{CharacterStats, EquipmentStats};
use stick_ranger::items::catalog::{get_all_sets, get_item};
use stick_ranger::items::{EquipmentManager, EquipmentSlot};
use stick_ranger::simulator::{Simulator, SimulatorConfig};

fn leveled_archer_sim() -> Simulator {
    let mut sim = Simulator::default();
    // Ranger gear needs level 3
    sim.character_mut("archer").unwrap().gain_experience(500);
    for id in ["ranger_hood", "ranger_vest", "ranger_boots"] {
        sim.add_to_inventory(get_item(id).unwrap());
    }
    sim
}

#[test]
fn test_manager_overwrites_slot() {
    let mut manager = EquipmentManager::new();
    assert!(manager.equip_item("hero", get_item("wooden_sword").unwrap()));
    assert!(manager.equip_item("hero", get_item("ember_rod").unwrap()));

    let equipped = manager.get_equipped_items("hero");
    assert_eq!(equipped.weapon.as_ref().unwrap().id, "ember_rod");
    assert_eq!(manager.calculate_total_stats(&equipped).attack_power, 9);
}

#[test]
fn test_manager_refuses_broken_gear() {
    let mut manager = EquipmentManager::new();
    let mut boots = get_item("running_shoes").unwrap();
    boots.durability = 0;
    assert!(!manager.can_equip("hero", &boots));
    assert!(!manager.equip_item("hero", boots));
    assert!(manager.get_equipped_items("hero").is_empty());
    assert!(manager.unequip_item("hero", EquipmentSlot::Boots).is_none());
}

#[test]
fn test_set_tiers_stack() {
    let mut manager = EquipmentManager::with_sets(get_all_sets());
    manager.equip_item("hero", get_item("ranger_hood").unwrap());
    let one = manager.bonus_for("hero");
    assert_eq!(one.attack_power, 0);

    manager.equip_item("hero", get_item("ranger_vest").unwrap());
    let two = manager.bonus_for("hero");
    assert_eq!(two.attack_power, 5);
    assert_eq!(two.defense, 4);
    assert_eq!(two.speed, 0);

    manager.equip_item("hero", get_item("ranger_boots").unwrap());
    let three = manager.bonus_for("hero");
    // Both tiers apply at three pieces
    assert_eq!(three.attack_power, 5);
    assert_eq!(three.speed, 2 + 2);
    assert!((three.critical_chance - (0.02 + 0.05)).abs() < 1e-9);
}

#[test]
fn test_equipment_bonus_clamps() {
    let base = Character::new("m", "Mage", CharacterClass::Mage).stats;
    let bonus = EquipmentStats {
        critical_chance: 2.0,
        max_health: 10,
        ..EquipmentStats::default()
    };
    let stats: CharacterStats = apply_equipment_stats(&base, &bonus);
    assert_eq!(stats.critical_chance, 1.0);
    assert_eq!(stats.max_health, base.max_health + 10);
    assert!(stats.health <= stats.max_health);
}

#[test]
fn test_full_set_through_simulator() {
    let mut sim = leveled_archer_sim();
    let before = sim.character("archer").unwrap().stats;

    for id in ["ranger_hood", "ranger_vest", "ranger_boots"] {
        assert!(sim.equip("archer", id), "equip {id}");
    }
    let after = sim.character("archer").unwrap().stats;
    assert_eq!(after.attack_power, before.attack_power + 5);
    assert_eq!(after.defense, before.defense + 4);
    assert_eq!(after.speed, before.speed + 4);
    assert!((after.critical_chance - before.critical_chance - 0.07).abs() < 1e-9);

    // Dropping to two pieces loses only the top tier
    assert!(sim.unequip("archer", EquipmentSlot::Boots));
    let partial = sim.character("archer").unwrap().stats;
    assert_eq!(partial.attack_power, before.attack_power + 5);
    assert_eq!(partial.speed, before.speed);
    assert!(sim.inventory().iter().any(|i| i.id == "ranger_boots"));
}

#[test]
fn test_swap_returns_old_item_to_inventory() {
    let mut sim = Simulator::default();
    assert!(sim.equip("archer", "running_shoes"));
    assert!(!sim.inventory().iter().any(|i| i.id == "running_shoes"));

    sim.character_mut("archer").unwrap().gain_experience(500);
    sim.add_to_inventory(get_item("ranger_boots").unwrap());
    assert!(sim.equip("archer", "ranger_boots"));

    let boots = sim
        .equipment()
        .get_equipped_items("archer")
        .get(EquipmentSlot::Boots)
        .map(|i| i.id.clone());
    assert_eq!(boots.as_deref(), Some("ranger_boots"));
    assert!(sim.inventory().iter().any(|i| i.id == "running_shoes"));
}

#[test]
fn test_gear_is_gated() {
    let mut sim = Simulator::default();
    // Class restricted
    assert!(!sim.equip("priest", "short_bow"));
    // Level restricted
    sim.add_to_inventory(get_item("ranger_vest").unwrap());
    assert!(!sim.equip("archer", "ranger_vest"));
    // Not owned
    assert!(!sim.equip("archer", "ember_rod"));
    assert!(!sim.equip("nobody", "short_bow"));
    assert!(sim.equipment().get_equipped_items("archer").is_empty());
}

#[test]
fn test_party_survives_save_file() {
    let mut sim = leveled_archer_sim();
    sim.equip("archer", "ranger_hood");
    sim.equip("archer", "ranger_vest");
    sim.equip("warrior", "wooden_sword");

    let path = std::env::temp_dir().join(format!(
        "stick-ranger-equipment-test-{}.dat",
        std::process::id()
    ));
    let manager = SaveManager::with_path(&path);
    manager.save(&sim.to_save()).unwrap();
    let restored = Simulator::from_save(SimulatorConfig::default(), manager.load().unwrap());
    std::fs::remove_file(&path).unwrap();

    for id in ["warrior", "archer", "mage", "priest"] {
        let a = sim.character(id).unwrap();
        let b = restored.character(id).unwrap();
        assert_eq!(a.stats, b.stats, "{id}");
        assert_eq!(a.progression, b.progression, "{id}");
    }
    assert_eq!(
        restored.equipment().get_equipped_items("archer"),
        sim.equipment().get_equipped_items("archer")
    );
    assert_eq!(restored.inventory(), sim.inventory());
}
