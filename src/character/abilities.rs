//! Special ability definitions per class.

use super::class::CharacterClass;
use serde::{Deserialize, Serialize};

/// Effect dispatched when an ability fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Charge,
    ShieldBash,
    BerserkerRage,
    PiercingShot,
    MultiShot,
    EagleEye,
    Fireball,
    IceShard,
    LightningBolt,
    ManaShield,
    Heal,
    GroupHeal,
    DivineProtection,
    HolyLight,
    RapidPunch,
    Uppercut,
    CounterAttack,
    ComboFinisher,
}

impl AbilityKind {
    /// Abilities that want a hostile target.
    pub fn is_offensive(&self) -> bool {
        matches!(
            self,
            AbilityKind::Charge
                | AbilityKind::ShieldBash
                | AbilityKind::PiercingShot
                | AbilityKind::MultiShot
                | AbilityKind::Fireball
                | AbilityKind::IceShard
                | AbilityKind::LightningBolt
                | AbilityKind::RapidPunch
                | AbilityKind::Uppercut
                | AbilityKind::ComboFinisher
        )
    }

    /// Abilities that take a friendly target (or the caster when none is given).
    pub fn targets_ally(&self) -> bool {
        matches!(
            self,
            AbilityKind::Heal | AbilityKind::DivineProtection | AbilityKind::HolyLight
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub id: String,
    pub name: String,
    pub kind: AbilityKind,
    /// Seconds.
    pub cooldown: f64,
    pub mana_cost: Option<u32>,
    pub damage: u32,
    pub heal_amount: u32,
    /// Free-form classification ("damage", "heal", "buff", "debuff").
    pub effect: String,
}

#[allow(clippy::too_many_arguments)]
fn ability(
    id: &str,
    name: &str,
    kind: AbilityKind,
    cooldown: f64,
    mana_cost: Option<u32>,
    damage: u32,
    heal_amount: u32,
    effect: &str,
) -> SpecialAbility {
    SpecialAbility {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        cooldown,
        mana_cost,
        damage,
        heal_amount,
        effect: effect.to_string(),
    }
}

/// Returns the starting ability list for a class.
pub fn class_abilities(class: CharacterClass) -> Vec<SpecialAbility> {
    use AbilityKind::*;
    match class {
        CharacterClass::Warrior => vec![
            ability("warrior_charge", "Charge", Charge, 8.0, None, 35, 0, "damage"),
            ability("warrior_shield_bash", "Shield Bash", ShieldBash, 6.0, None, 20, 0, "debuff"),
            ability(
                "warrior_berserker_rage",
                "Berserker Rage",
                BerserkerRage,
                20.0,
                None,
                0,
                0,
                "buff",
            ),
        ],
        CharacterClass::Archer => vec![
            ability(
                "archer_piercing_shot",
                "Piercing Shot",
                PiercingShot,
                7.0,
                None,
                40,
                0,
                "damage",
            ),
            ability("archer_multi_shot", "Multi Shot", MultiShot, 10.0, None, 25, 0, "damage"),
            ability("archer_eagle_eye", "Eagle Eye", EagleEye, 20.0, None, 0, 0, "buff"),
        ],
        CharacterClass::Mage => vec![
            ability("mage_fireball", "Fireball", Fireball, 4.0, Some(20), 45, 0, "damage"),
            ability("mage_ice_shard", "Ice Shard", IceShard, 3.0, Some(15), 35, 0, "damage"),
            ability(
                "mage_lightning_bolt",
                "Lightning Bolt",
                LightningBolt,
                9.0,
                Some(35),
                55,
                0,
                "damage",
            ),
            ability("mage_mana_shield", "Mana Shield", ManaShield, 18.0, Some(25), 0, 0, "buff"),
        ],
        CharacterClass::Priest => vec![
            ability("priest_heal", "Heal", Heal, 3.0, Some(15), 0, 50, "heal"),
            ability("priest_group_heal", "Group Heal", GroupHeal, 10.0, Some(30), 0, 35, "heal"),
            ability(
                "priest_divine_protection",
                "Divine Protection",
                DivineProtection,
                20.0,
                Some(20),
                0,
                0,
                "buff",
            ),
            ability("priest_holy_light", "Holy Light", HolyLight, 6.0, Some(20), 0, 40, "heal"),
        ],
        CharacterClass::Boxer => vec![
            ability("boxer_rapid_punch", "Rapid Punch", RapidPunch, 5.0, None, 15, 0, "damage"),
            ability("boxer_uppercut", "Uppercut", Uppercut, 7.0, None, 35, 0, "damage"),
            ability(
                "boxer_counter_attack",
                "Counter Attack",
                CounterAttack,
                10.0,
                None,
                0,
                0,
                "buff",
            ),
            ability(
                "boxer_combo_finisher",
                "Combo Finisher",
                ComboFinisher,
                12.0,
                None,
                25,
                0,
                "damage",
            ),
        ],
    }
}
