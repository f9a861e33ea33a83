use super::abilities::{class_abilities, AbilityKind, SpecialAbility};
use super::behavior::ClassState;
use super::buffs::{add_or_refresh, apply_buffs, expire_buffs, Buff, StatModifier};
use super::class::CharacterClass;
use super::combatant::Combatant;
use crate::core::clock::Timestamp;
use crate::core::constants::*;
use crate::core::progression::CharacterProgression;
use crate::core::stats::{
    apply_equipment_stats, calculate_critical_hit, calculate_damage_reduction,
    calculate_level_stats, clone_stats, validate_stats, CharacterStats, DamageFormula,
    EquipmentStats,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of a basic attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: u32,
    pub is_critical: bool,
}

/// Result of a successful ability use.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityOutcome {
    pub ability_id: String,
    pub kind: AbilityKind,
    pub damage: u32,
    pub healing: u32,
    pub is_critical: bool,
}

impl AbilityOutcome {
    fn new(ability: &SpecialAbility) -> Self {
        Self {
            ability_id: ability.id.clone(),
            kind: ability.kind,
            damage: 0,
            healing: 0,
            is_critical: false,
        }
    }
}

/// A party member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub stats: CharacterStats,
    pub progression: CharacterProgression,
    pub abilities: Vec<SpecialAbility>,
    pub buffs: Vec<Buff>,
    pub class_state: ClassState,
    base_stats: CharacterStats,
    equipment_bonus: EquipmentStats,
    /// Seconds remaining per ability id. Absent means ready.
    cooldowns: BTreeMap<String, f64>,
}

impl Character {
    pub fn new(id: &str, name: &str, class: CharacterClass) -> Self {
        let base_stats = clone_stats(&class.base_template());
        let mut character = Self {
            id: id.to_string(),
            name: name.to_string(),
            class,
            stats: base_stats,
            progression: CharacterProgression::new(),
            abilities: class_abilities(class),
            buffs: Vec::new(),
            class_state: ClassState::for_class(class),
            base_stats,
            equipment_bonus: EquipmentStats::default(),
            cooldowns: BTreeMap::new(),
        };
        character.update_stats();
        character
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    pub fn equipment_bonus(&self) -> &EquipmentStats {
        &self.equipment_bonus
    }

    /// Stats with buffs and the Boxer combo bonus applied.
    pub fn effective_stats(&self) -> CharacterStats {
        let mut stats = apply_buffs(&self.stats, &self.buffs);
        if let Some(combo) = self.class_state.combo() {
            stats.attack_power += combo.attack_bonus();
        }
        stats
    }

    /// Recomputes stats from base, level, equipment and class passives.
    ///
    /// Health and mana are refilled. A defeated character stays at 0 health
    /// until revived.
    pub fn update_stats(&mut self) {
        let was_alive = self.is_alive();
        let level = self.progression.level;
        let leveled = calculate_level_stats(&self.base_stats, &self.class.growth(), level);
        let mut stats = apply_equipment_stats(&leveled, &self.equipment_bonus);
        self.class_state.apply_class_specific_stats(&mut stats, level);
        if !was_alive {
            stats.health = 0;
        }

        if !validate_stats(&stats) {
            log::error!("{} has invalid stats after recalculation: {:?}", self.id, stats);
            stats.health = stats.health.min(stats.max_health);
            stats.mana = stats.mana.min(stats.max_mana);
            stats.critical_chance = stats.critical_chance.clamp(0.0, 1.0);
            stats.critical_multiplier = stats.critical_multiplier.max(1.0);
        }
        self.stats = stats;
    }

    /// Caches the aggregated equipment bonus and refreshes stats.
    pub fn set_equipment_bonus(&mut self, bonus: EquipmentStats) {
        self.equipment_bonus = bonus;
        self.update_stats();
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let reduced = calculate_damage_reduction(amount, self.effective_stats().defense);
        self.take_true_damage(reduced)
    }

    pub fn take_true_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.stats.health);
        self.stats.health -= actual;
        actual
    }

    /// Never overheals. Defeated characters need [`Character::revive`].
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let actual = amount.min(self.stats.max_health - self.stats.health);
        self.stats.health += actual;
        actual
    }

    /// Restores a defeated character to full health and mana.
    pub fn revive(&mut self) {
        self.stats.health = self.stats.max_health;
        self.stats.mana = self.stats.max_mana;
        self.buffs.clear();
        if let Some(combo) = self.class_state.combo_mut() {
            combo.reset();
        }
    }

    pub fn add_buff(&mut self, buff: Buff) {
        add_or_refresh(&mut self.buffs, buff);
    }

    pub fn expire_buffs(&mut self, now: Timestamp) -> usize {
        expire_buffs(&mut self.buffs, now)
    }

    /// Basic attack through the defense curve.
    pub fn attack(&mut self, target: &mut dyn Combatant, rng: &mut impl Rng) -> u32 {
        self.attack_with(target, DamageFormula::DiminishingReturns, rng)
            .damage
    }

    /// Basic attack with an explicit mitigation formula.
    pub fn attack_with(
        &mut self,
        target: &mut dyn Combatant,
        formula: DamageFormula,
        rng: &mut impl Rng,
    ) -> AttackOutcome {
        let stats = self.effective_stats();
        let hit = calculate_critical_hit(
            stats.attack_power,
            stats.critical_chance,
            stats.critical_multiplier,
            rng,
        );
        let damage = match formula {
            DamageFormula::DiminishingReturns => target.take_damage(hit.damage),
            DamageFormula::Flat => {
                let defense = target.effective_defense();
                target.take_true_damage(formula.apply(hit.damage, defense))
            }
        };
        if damage > 0 {
            self.build_combo();
        }
        AttackOutcome {
            damage,
            is_critical: hit.is_critical,
        }
    }

    pub fn ability(&self, ability_id: &str) -> Option<&SpecialAbility> {
        self.abilities.iter().find(|a| a.id == ability_id)
    }

    /// Amount a plain Heal restores: its `heal_amount` plus max mana / 10.
    /// Zero for classes without a Heal ability.
    pub fn heal_power(&self) -> u32 {
        self.abilities
            .iter()
            .find(|a| matches!(a.kind, AbilityKind::Heal))
            .map_or(0, |a| {
                a.heal_amount + self.effective_stats().max_mana / PRIEST_HEAL_MANA_DIVISOR
            })
    }

    pub fn get_ability_cooldown(&self, ability_id: &str) -> f64 {
        self.cooldowns.get(ability_id).copied().unwrap_or(0.0)
    }

    pub fn cooldowns(&self) -> &BTreeMap<String, f64> {
        &self.cooldowns
    }

    /// True if the ability exists, is off cooldown and affordable.
    pub fn can_use_ability(&self, ability_id: &str) -> bool {
        match self.ability(ability_id) {
            Some(ability) => {
                self.get_ability_cooldown(ability_id) <= 0.0
                    && self.stats.mana >= ability.mana_cost.unwrap_or(0)
            }
            None => false,
        }
    }

    pub fn use_ability(
        &mut self,
        ability_id: &str,
        target: Option<&mut dyn Combatant>,
        now: Timestamp,
    ) -> bool {
        self.try_use_ability(ability_id, target, now).is_some()
    }

    /// Fires an ability. Returns None without any state change when the
    /// ability is unknown, cooling down or unaffordable.
    pub fn try_use_ability(
        &mut self,
        ability_id: &str,
        target: Option<&mut dyn Combatant>,
        now: Timestamp,
    ) -> Option<AbilityOutcome> {
        if !self.can_use_ability(ability_id) {
            return None;
        }
        let ability = self.ability(ability_id)?.clone();

        let outcome = self.resolve_ability(&ability, target, now);

        if ability.cooldown > 0.0 {
            self.cooldowns.insert(ability.id.clone(), ability.cooldown);
        }
        self.stats.mana -= ability.mana_cost.unwrap_or(0);
        Some(outcome)
    }

    fn resolve_ability(
        &mut self,
        ability: &SpecialAbility,
        target: Option<&mut dyn Combatant>,
        now: Timestamp,
    ) -> AbilityOutcome {
        let stats = self.effective_stats();
        let atk = stats.attack_power;
        let mut outcome = AbilityOutcome::new(ability);

        match ability.kind {
            AbilityKind::Charge => {
                outcome.damage = strike(target, atk + ability.damage);
            }
            AbilityKind::ShieldBash => {
                if let Some(target) = target {
                    outcome.damage = target.take_damage(ability.damage);
                    target.add_buff(Buff::new(
                        "stunned",
                        StatModifier::Stunned,
                        now,
                        SHIELD_BASH_STUN_MS,
                    ));
                }
            }
            AbilityKind::BerserkerRage => self.add_buff(Buff::new(
                "berserker_rage",
                StatModifier::AttackPower(BERSERKER_RAGE_ATTACK),
                now,
                BERSERKER_RAGE_DURATION_MS,
            )),
            AbilityKind::PiercingShot => {
                let raw = ((atk + ability.damage) as f64 * stats.critical_multiplier).floor();
                outcome.damage = strike(target, raw as u32);
                outcome.is_critical = true;
            }
            AbilityKind::MultiShot => {
                outcome.damage = strike(target, ability.damage);
            }
            AbilityKind::EagleEye => self.add_buff(Buff::new(
                "eagle_eye",
                StatModifier::CriticalChance(EAGLE_EYE_CRIT),
                now,
                EAGLE_EYE_DURATION_MS,
            )),
            AbilityKind::Fireball => {
                outcome.damage = strike(target, scaled(atk + ability.damage, FIREBALL_SCALE));
            }
            AbilityKind::IceShard => {
                outcome.damage = strike(target, scaled(atk + ability.damage, ICE_SHARD_SCALE));
            }
            AbilityKind::LightningBolt => {
                outcome.damage =
                    strike(target, scaled(atk + ability.damage, LIGHTNING_BOLT_SCALE));
            }
            AbilityKind::ManaShield => self.add_buff(Buff::new(
                "mana_shield",
                StatModifier::Defense(MANA_SHIELD_DEFENSE),
                now,
                MANA_SHIELD_DURATION_MS,
            )),
            AbilityKind::Heal => {
                let amount = ability.heal_amount + stats.max_mana / PRIEST_HEAL_MANA_DIVISOR;
                outcome.healing = match target {
                    Some(target) => target.heal(amount),
                    None => self.heal(amount),
                };
            }
            AbilityKind::GroupHeal => {
                let amount =
                    ability.heal_amount + stats.max_mana / PRIEST_GROUP_HEAL_MANA_DIVISOR;
                outcome.healing = self.heal(amount);
            }
            AbilityKind::DivineProtection => {
                let buff = Buff::new(
                    "divine_protection",
                    StatModifier::Defense(DIVINE_PROTECTION_DEFENSE),
                    now,
                    DIVINE_PROTECTION_DURATION_MS,
                );
                match target {
                    Some(target) => target.add_buff(buff),
                    None => self.add_buff(buff),
                }
            }
            AbilityKind::HolyLight => {
                let amount =
                    ability.heal_amount + stats.max_mana / PRIEST_HOLY_LIGHT_MANA_DIVISOR;
                outcome.healing = match target {
                    Some(target) => target.heal(amount),
                    None => self.heal(amount),
                };
            }
            AbilityKind::RapidPunch => {
                if let Some(target) = target {
                    let per_hit = scaled(atk + ability.damage, RAPID_PUNCH_SCALE);
                    for _ in 0..RAPID_PUNCH_HITS {
                        let dealt = target.take_damage(per_hit);
                        if dealt > 0 {
                            self.build_combo();
                        }
                        outcome.damage += dealt;
                    }
                }
            }
            AbilityKind::Uppercut => {
                let raw = atk + ability.damage + self.combo_count() * UPPERCUT_DAMAGE_PER_COMBO;
                outcome.damage = strike(target, raw);
                if outcome.damage > 0 {
                    self.build_combo();
                }
            }
            AbilityKind::CounterAttack => self.build_combo(),
            AbilityKind::ComboFinisher => {
                let factor = (self.combo_count() as f64 * COMBO_FINISHER_SCALE_PER_COMBO).max(1.0);
                outcome.damage = strike(target, scaled(atk + ability.damage, factor));
                if outcome.damage > 0 {
                    if let Some(combo) = self.class_state.combo_mut() {
                        combo.reset();
                    }
                }
            }
        }

        log::debug!(
            "{} used {} (damage {}, healing {})",
            self.id,
            ability.id,
            outcome.damage,
            outcome.healing
        );
        outcome
    }

    /// Levels up once. Experience resets to 0.
    pub fn level_up(&mut self) {
        self.progression.advance_level();
        let level = self.progression.level;
        self.class_state.on_level_up(level, &mut self.abilities);
        self.update_stats();
    }

    /// Adds experience, levelling as many times as it covers. The overflow
    /// past each threshold carries into the next level. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        self.progression.experience += amount;
        let mut gained = 0;
        while self.progression.has_level_up_pending() {
            let carry = self.progression.experience - self.progression.experience_to_next;
            self.level_up();
            self.progression.experience = carry;
            gained += 1;
        }
        gained
    }

    pub fn update_cooldowns(&mut self, delta_seconds: f64) {
        for remaining in self.cooldowns.values_mut() {
            *remaining = (*remaining - delta_seconds).max(0.0);
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
    }

    /// Boxer combo decay plus ability cooldowns. No-op for other classes.
    pub fn update_combos(&mut self, delta_seconds: f64) {
        let Some(combo) = self.class_state.combo_mut() else {
            return;
        };
        if combo.tick(delta_seconds) {
            log::debug!("{} combo expired", self.id);
        }
        self.update_cooldowns(delta_seconds);
    }

    /// Caster mana regeneration. Returns mana restored.
    pub fn regenerate_mana(&mut self, delta_seconds: f64) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        match self.class_state.mana_regen_mut() {
            Some(regen) => regen.tick(&mut self.stats, delta_seconds),
            None => 0,
        }
    }

    /// Per-tick timers: cooldowns, combo decay and mana regen.
    pub fn advance_timers(&mut self, delta_seconds: f64) {
        if self.class_state.combo().is_some() {
            self.update_combos(delta_seconds);
        } else {
            self.update_cooldowns(delta_seconds);
        }
        self.regenerate_mana(delta_seconds);
    }

    /// Current combo, or 0 for non-Boxers.
    pub fn combo_count(&self) -> u32 {
        self.class_state.combo().map_or(0, |c| c.combo_count)
    }

    fn build_combo(&mut self) {
        if let Some(combo) = self.class_state.combo_mut() {
            combo.build();
        }
    }
}

fn scaled(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).floor() as u32
}

fn strike(target: Option<&mut dyn Combatant>, raw: u32) -> u32 {
    target.map_or(0, |t| t.take_damage(raw))
}

impl Combatant for Character {
    fn combatant_id(&self) -> &str {
        &self.id
    }

    fn effective_defense(&self) -> u32 {
        self.effective_stats().defense
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        Character::take_damage(self, amount)
    }

    fn take_true_damage(&mut self, amount: u32) -> u32 {
        Character::take_true_damage(self, amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        Character::heal(self, amount)
    }

    fn is_alive(&self) -> bool {
        Character::is_alive(self)
    }

    fn add_buff(&mut self, buff: Buff) {
        Character::add_buff(self, buff)
    }
}
