//! The encounter simulator: owns the arena, the party and the enemy wave.
//!
//! Hosts call [`Simulator::tick`] on a timer (see [`Simulator::tick_interval`])
//! with the real time elapsed, and issue commands between ticks. Everything is
//! single-threaded and driven through `&mut self`.

use super::config::SimulatorConfig;
use super::snapshot::{ArenaSnapshot, EnemySnapshot, PlayerSnapshot};
use crate::character::save::PartySave;
use crate::character::{AbilityKind, Character, Combatant};
use crate::combat::logic::{
    all_enemies_defeated, enemy_turn, nearest_enemy, pair_mut, party_defeated, party_turn,
    sweep_defeated,
};
use crate::combat::{CombatEntity, Enemy, PartyMember, Position};
use crate::core::clock::{GameClock, Timestamp};
use crate::core::constants::*;
use crate::core::tick::{TickEvent, TickResult};
use crate::items::catalog::{get_all_sets, starter_inventory};
use crate::items::drops::try_drop_from_level;
use crate::items::{Equipment, EquipmentManager, EquipmentSlot};
use crate::zones::{get_level, ZoneLevel, ZoneProgression};
use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

/// Encounter state machine.
///
/// Idle -> Active -> Victory -> (respawn delay) -> Active, or Active -> Defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterState {
    Idle,
    Active,
    Victory { respawn_at: Timestamp },
    Defeat,
}

impl EncounterState {
    pub fn name(&self) -> &'static str {
        match self {
            EncounterState::Idle => "idle",
            EncounterState::Active => "active",
            EncounterState::Victory { .. } => "victory",
            EncounterState::Defeat => "defeat",
        }
    }
}

fn party_slot(index: usize) -> Position {
    Position::new(
        (PARTY_SPAWN_X + index as f64 * PARTY_SPAWN_X_STEP).min(ARENA_MAX),
        SPAWN_Y_TOP + (index % 4) as f64 * SPAWN_Y_STEP,
    )
}

fn enemy_slot(index: usize) -> Position {
    Position::new(
        (ENEMY_SPAWN_X + index as f64 * ENEMY_SPAWN_X_STEP).min(ARENA_MAX),
        SPAWN_Y_TOP + (index % 4) as f64 * SPAWN_Y_STEP,
    )
}

pub struct Simulator {
    config: SimulatorConfig,
    clock: GameClock,
    party: Vec<PartyMember>,
    enemies: Vec<Enemy>,
    equipment: EquipmentManager,
    inventory: Vec<Equipment>,
    gold: u64,
    progression: ZoneProgression,
    state: EncounterState,
    paused: bool,
    next_enemy_id: u64,
    /// Events raised by commands, delivered with the next tick.
    pending: Vec<TickEvent>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Creates a fresh party from the config with the starter inventory.
    pub fn new(mut config: SimulatorConfig) -> Self {
        config.game_speed = config.game_speed.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
        let party = config
            .party
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                PartyMember::new(Character::new(&slot.id, &slot.name, slot.class), party_slot(i))
            })
            .collect();
        Self {
            config,
            clock: GameClock::new(),
            party,
            enemies: Vec::new(),
            equipment: EquipmentManager::with_sets(get_all_sets()),
            inventory: starter_inventory(),
            gold: 0,
            progression: ZoneProgression::new(),
            state: EncounterState::Idle,
            paused: false,
            next_enemy_id: 1,
            pending: Vec::new(),
        }
    }

    /// Restores a saved party. The save's characters replace `config.party`.
    pub fn from_save(config: SimulatorConfig, save: PartySave) -> Self {
        let mut sim = Self::new(config);
        sim.party = save
            .characters
            .into_iter()
            .enumerate()
            .map(|(i, character)| PartyMember::new(character, party_slot(i)))
            .collect();
        sim.inventory = save.inventory;
        sim.gold = save.gold;
        sim.progression = save.progression;
        sim.progression.current = None;
        for (character_id, equipped) in save.equipped {
            for item in [equipped.weapon, equipped.armor, equipped.accessory, equipped.boots]
                .into_iter()
                .flatten()
            {
                sim.equipment.equip_item(&character_id, item);
            }
        }
        for i in 0..sim.party.len() {
            sim.refresh_equipment_bonus(i);
        }
        sim
    }

    pub fn to_save(&self) -> PartySave {
        PartySave {
            characters: self.party.iter().map(|m| m.character.clone()).collect(),
            equipped: self
                .party
                .iter()
                .map(|m| {
                    let id = m.character.id.clone();
                    let gear = self.equipment.get_equipped_items(&id);
                    (id, gear)
                })
                .filter(|(_, gear)| !gear.is_empty())
                .collect(),
            inventory: self.inventory.clone(),
            gold: self.gold,
            progression: self.progression.clone(),
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn party(&self) -> &[PartyMember] {
        &self.party
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn member(&self, character_id: &str) -> Option<&PartyMember> {
        self.party.iter().find(|m| m.character.id == character_id)
    }

    pub fn character(&self, character_id: &str) -> Option<&Character> {
        self.member(character_id).map(|m| &m.character)
    }

    /// Direct access for host tooling such as debug menus.
    pub fn character_mut(&mut self, character_id: &str) -> Option<&mut Character> {
        self.party
            .iter_mut()
            .find(|m| m.character.id == character_id)
            .map(|m| &mut m.character)
    }

    pub fn equipment(&self) -> &EquipmentManager {
        &self.equipment
    }

    pub fn inventory(&self) -> &[Equipment] {
        &self.inventory
    }

    /// Adds an item to the party inventory.
    pub fn add_to_inventory(&mut self, item: Equipment) {
        self.inventory.push(item);
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn progression(&self) -> &ZoneProgression {
        &self.progression
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn auto_battle(&self) -> bool {
        self.config.auto_battle
    }

    pub fn game_speed(&self) -> f64 {
        self.config.game_speed
    }

    /// How often the host should call [`Simulator::tick`] at the current speed.
    pub fn tick_interval(&self) -> Duration {
        let ms = self.config.tick_interval_ms as f64 / self.config.game_speed;
        Duration::from_millis(ms.round().max(1.0) as u64)
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let now = self.clock.now();
        ArenaSnapshot {
            now_ms: now,
            zone: self.progression.current,
            state: self.state.name(),
            paused: self.paused,
            auto_battle: self.config.auto_battle,
            game_speed: self.config.game_speed,
            gold: self.gold,
            inventory_size: self.inventory.len(),
            party: self
                .party
                .iter()
                .map(|m| PlayerSnapshot::capture(m, now))
                .collect(),
            enemies: self.enemies.iter().map(EnemySnapshot::capture).collect(),
        }
    }

    fn member_index(&self, character_id: &str) -> Option<usize> {
        self.party.iter().position(|m| m.character.id == character_id)
    }

    // ── Commands ────────────────────────────────────────────────

    pub fn set_game_speed(&mut self, multiplier: f64) {
        if !multiplier.is_finite() {
            warn!("Ignoring game speed {}", multiplier);
            return;
        }
        self.config.game_speed = multiplier.clamp(MIN_GAME_SPEED, MAX_GAME_SPEED);
        debug!("Game speed set to {}x", self.config.game_speed);
    }

    pub fn set_auto_battle(&mut self, enabled: bool) {
        self.config.auto_battle = enabled;
        info!("Auto battle {}", if enabled { "on" } else { "off" });
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Enters a level: revives the party, resets positions and spawns a
    /// fresh wave. Fails for unknown or locked levels.
    pub fn spawn_zone(&mut self, zone_id: u32, level_id: u32) -> bool {
        let Some(level) = get_level(zone_id, level_id) else {
            warn!("No level {}-{}", zone_id, level_id);
            return false;
        };
        if !self.progression.travel_to(zone_id, level_id) {
            warn!("Level {}-{} is locked", zone_id, level_id);
            return false;
        }

        for (i, member) in self.party.iter_mut().enumerate() {
            if !member.character.is_alive() {
                member.character.revive();
            }
            member.body = CombatEntity::at(party_slot(i));
        }
        self.spawn_wave(zone_id, level_id, &level);
        info!("Entered {} ({}-{})", level.name, zone_id, level_id);
        true
    }

    fn spawn_wave(&mut self, zone_id: u32, level_id: u32, level: &ZoneLevel) {
        self.enemies.clear();
        for spawn in &level.enemies {
            for _ in 0..spawn.count {
                let id = format!("enemy-{}", self.next_enemy_id);
                self.next_enemy_id += 1;
                let position = enemy_slot(self.enemies.len());
                self.enemies
                    .push(Enemy::new(&id, spawn.enemy_type, level.enemy_level, position));
            }
        }
        self.state = EncounterState::Active;
        self.pending.push(TickEvent::EncounterStarted {
            zone_id,
            level_id,
            enemy_count: self.enemies.len(),
        });
    }

    /// Fires a special ability on behalf of a party member.
    ///
    /// Offensive abilities hit `target_id` if it names a standing enemy, or
    /// the nearest enemy when it is `None`. Ally abilities target the named
    /// party member, or the caster. Fails closed on unknown ids, defeated
    /// casters or targets, cooldowns and missing mana.
    pub fn use_ability(
        &mut self,
        character_id: &str,
        ability_id: &str,
        target_id: Option<&str>,
    ) -> bool {
        let Some(i) = self.member_index(character_id) else {
            warn!("Unknown character {}", character_id);
            return false;
        };
        if !self.party[i].is_active() {
            warn!("{} cannot act while defeated", character_id);
            return false;
        }
        let Some(ability) = self.party[i].character.ability(ability_id).cloned() else {
            warn!("{} has no ability {}", character_id, ability_id);
            return false;
        };
        let now = self.clock.now();

        let (outcome, target) = if ability.kind.is_offensive() {
            let t = match target_id {
                Some(id) => self.enemies.iter().position(|e| e.id == id && e.is_active()),
                None => nearest_enemy(&self.party[i].body.position, &self.enemies),
            };
            let Some(t) = t else {
                warn!("{}: no target for {}", character_id, ability_id);
                return false;
            };
            let enemy: &mut dyn Combatant = &mut self.enemies[t];
            let outcome = self.party[i]
                .character
                .try_use_ability(ability_id, Some(enemy), now);
            (outcome, Some(self.enemies[t].id.clone()))
        } else if ability.kind.targets_ally() && target_id.is_some_and(|id| id != character_id) {
            let Some(j) = target_id.and_then(|id| self.member_index(id)) else {
                warn!("{}: no ally {:?}", character_id, target_id);
                return false;
            };
            if !self.party[j].is_active() {
                return false;
            }
            let (caster, ally) = pair_mut(&mut self.party, i, j);
            let ally_target: &mut dyn Combatant = &mut ally.character;
            let outcome = caster
                .character
                .try_use_ability(ability_id, Some(ally_target), now);
            (outcome, Some(ally.character.id.clone()))
        } else {
            let outcome = self.party[i].character.try_use_ability(ability_id, None, now);
            (outcome, None)
        };

        let Some(mut outcome) = outcome else {
            debug!("{} not ready: {}", character_id, ability_id);
            return false;
        };

        if ability.kind == AbilityKind::GroupHeal {
            outcome.healing += self.group_heal(i, ability.heal_amount);
        }

        self.pending.push(TickEvent::AbilityUsed {
            caster_id: character_id.to_string(),
            ability_id: ability_id.to_string(),
            target_id: target,
            damage: outcome.damage,
            healing: outcome.healing,
        });
        true
    }

    /// Group Heal already healed the caster; this covers everyone else.
    fn group_heal(&mut self, caster: usize, heal_amount: u32) -> u32 {
        let max_mana = self.party[caster].character.stats.max_mana;
        let amount = heal_amount + max_mana / PRIEST_GROUP_HEAL_MANA_DIVISOR;
        self.party
            .iter_mut()
            .enumerate()
            .filter(|(j, m)| *j != caster && m.is_active())
            .map(|(_, m)| m.character.heal(amount))
            .sum()
    }

    /// Equips an item from the party inventory. The displaced item, if any,
    /// goes back to the inventory.
    pub fn equip(&mut self, character_id: &str, equipment_id: &str) -> bool {
        let Some(i) = self.member_index(character_id) else {
            warn!("Unknown character {}", character_id);
            return false;
        };
        let Some(pos) = self.inventory.iter().position(|item| item.id == equipment_id) else {
            warn!("{} is not in the inventory", equipment_id);
            return false;
        };

        let character = &self.party[i].character;
        let item = &self.inventory[pos];
        if !item.allows_class(character.class) {
            warn!("{} cannot use {}", character.class.name(), item.name);
            return false;
        }
        if character.level() < item.required_level {
            warn!(
                "{} needs level {} (has {})",
                item.name,
                item.required_level,
                character.level()
            );
            return false;
        }
        if !self.equipment.can_equip(character_id, item) {
            warn!("{} is broken", item.name);
            return false;
        }

        let item = self.inventory.remove(pos);
        let displaced = self.equipment.unequip_item(character_id, item.slot);
        self.equipment.equip_item(character_id, item);
        if let Some(old) = displaced {
            self.inventory.push(old);
        }
        self.refresh_equipment_bonus(i);
        true
    }

    pub fn unequip(&mut self, character_id: &str, slot: EquipmentSlot) -> bool {
        let Some(i) = self.member_index(character_id) else {
            return false;
        };
        let Some(item) = self.equipment.unequip_item(character_id, slot) else {
            return false;
        };
        self.inventory.push(item);
        self.refresh_equipment_bonus(i);
        true
    }

    fn refresh_equipment_bonus(&mut self, index: usize) {
        let member = &mut self.party[index];
        let bonus = self.equipment.bonus_for(&member.character.id);
        member.character.set_equipment_bonus(bonus);
    }

    // ── Tick ────────────────────────────────────────────────────

    /// Advances the arena by `elapsed`. A no-op while paused.
    pub fn tick(&mut self, elapsed: Duration, rng: &mut impl Rng) -> TickResult {
        if self.paused {
            return TickResult {
                events: Vec::new(),
                now_ms: self.clock.now(),
            };
        }

        let dt = self.clock.advance(elapsed);
        let now = self.clock.now();
        let mut events = std::mem::take(&mut self.pending);

        for member in &mut self.party {
            member.character.advance_timers(dt);
            member.character.expire_buffs(now);
        }
        for enemy in &mut self.enemies {
            enemy.expire_buffs(now);
        }

        if let EncounterState::Victory { respawn_at } = self.state {
            if now >= respawn_at {
                self.respawn(&mut events);
            }
        }

        if self.state == EncounterState::Active {
            self.run_round(rng, &mut events);
        }

        TickResult {
            events,
            now_ms: now,
        }
    }

    fn run_round(&mut self, rng: &mut impl Rng, events: &mut Vec<TickEvent>) {
        events.extend(sweep_defeated(&mut self.party, &mut self.enemies));
        if self.resolve_outcome(rng, events) || !self.config.auto_battle {
            return;
        }

        let rules = self.config.rules();
        events.extend(party_turn(
            &mut self.party,
            &mut self.enemies,
            &rules,
            &self.clock,
            rng,
        ));
        if self.resolve_outcome(rng, events) {
            return;
        }

        events.extend(enemy_turn(
            &mut self.enemies,
            &mut self.party,
            &rules,
            &self.clock,
        ));
        self.resolve_outcome(rng, events);
    }

    /// Checks for victory or defeat. Returns true if the encounter ended.
    fn resolve_outcome(&mut self, rng: &mut impl Rng, events: &mut Vec<TickEvent>) -> bool {
        if all_enemies_defeated(&self.enemies) {
            self.grant_victory(rng, events);
            return true;
        }
        if party_defeated(&self.party) {
            self.state = EncounterState::Defeat;
            for member in &mut self.party {
                member.body.movement = Default::default();
            }
            info!("Party defeated");
            events.push(TickEvent::Defeat);
            return true;
        }
        false
    }

    fn grant_victory(&mut self, rng: &mut impl Rng, events: &mut Vec<TickEvent>) {
        self.state = EncounterState::Victory {
            respawn_at: self.clock.now() + self.config.respawn_delay_ms,
        };
        let Some((zone_id, level_id)) = self.progression.current else {
            return;
        };
        let Some(level) = get_level(zone_id, level_id) else {
            return;
        };
        info!("Cleared {} ({}-{})", level.name, zone_id, level_id);
        events.push(TickEvent::Victory {
            zone_id,
            level_id,
            rewards: level.rewards.clone(),
        });

        for member in self.party.iter_mut().filter(|m| m.is_active()) {
            let character = &mut member.character;
            let before = character.level();
            let gained = character.gain_experience(level.rewards.experience);
            for new_level in before + 1..=before + gained {
                info!("{} reached level {}", character.name, new_level);
                events.push(TickEvent::LeveledUp {
                    character_id: character.id.clone(),
                    new_level,
                });
            }
            member.body.movement = Default::default();
        }
        self.gold += level.rewards.gold;

        if let Some(item) = try_drop_from_level(&level, rng) {
            info!("Dropped {} ({})", item.name, item.rarity.name());
            events.push(TickEvent::ItemDropped {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                rarity: item.rarity,
            });
            self.inventory.push(item);
        }

        if let Some((zone, next)) = self.progression.record_clear(zone_id, level_id) {
            info!("Unlocked level {}-{}", zone, next);
        }
    }

    fn respawn(&mut self, events: &mut Vec<TickEvent>) {
        let Some((zone_id, level_id)) = self.progression.current else {
            self.state = EncounterState::Idle;
            return;
        };
        let Some(level) = get_level(zone_id, level_id) else {
            self.state = EncounterState::Idle;
            return;
        };
        debug!("Respawning {}", level.name);
        self.spawn_wave(zone_id, level_id, &level);
        events.append(&mut self.pending);
    }
}
