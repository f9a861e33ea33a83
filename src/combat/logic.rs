//! Per-tick arena decisions: targeting, movement, attacks and heals.

use super::types::{
    attack_cooldown_ms, CombatEntity, Enemy, HealRangePolicy, MovementState, PartyMember, Position,
};
use crate::core::clock::GameClock;
use crate::core::constants::*;
use crate::core::stats::DamageFormula;
use crate::core::tick::TickEvent;
use rand::Rng;

/// Rules the arena resolves actions with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaRules {
    pub damage_formula: DamageFormula,
    pub heal_range: HealRangePolicy,
}

/// Index of the closest enemy still standing.
pub fn nearest_enemy(from: &Position, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_active())
        .min_by(|(_, a), (_, b)| {
            from.distance_to(&a.body.position)
                .total_cmp(&from.distance_to(&b.body.position))
        })
        .map(|(i, _)| i)
}

/// Index of the closest party member still standing.
pub fn nearest_member(from: &Position, party: &[PartyMember]) -> Option<usize> {
    party
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_active())
        .min_by(|(_, a), (_, b)| {
            from.distance_to(&a.body.position)
                .total_cmp(&from.distance_to(&b.body.position))
        })
        .map(|(i, _)| i)
}

/// Living member with the lowest health ratio, if anyone is hurt.
pub fn most_injured_member(party: &[PartyMember]) -> Option<usize> {
    party
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_active() && m.health_ratio() < 1.0)
        .min_by(|(_, a), (_, b)| a.health_ratio().total_cmp(&b.health_ratio()))
        .map(|(i, _)| i)
}

/// Two distinct mutable elements of one slice.
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Steps `body` toward `target` when it is outside `range`. Returns true if
/// the body spent its turn moving.
fn approach(body: &mut CombatEntity, target: &Position, speed: u32, range: f64) -> bool {
    let threshold = range * RANGE_THRESHOLD_FACTOR;
    if body.position.distance_to(target) <= threshold {
        return false;
    }
    let step = speed as f64 * MOVE_STEP_FACTOR;
    let stop_at = (threshold - APPROACH_MARGIN).max(0.0);
    body.position = body.position.step_toward(target, step, stop_at);
    body.movement = MovementState::Moving;
    true
}

pub fn all_enemies_defeated(enemies: &[Enemy]) -> bool {
    !enemies.is_empty() && enemies.iter().all(|e| !e.is_active())
}

pub fn party_defeated(party: &[PartyMember]) -> bool {
    !party.is_empty() && party.iter().all(|m| !m.is_active())
}

/// Flags anything that dropped to 0 health since it was last checked.
pub fn sweep_defeated(party: &mut [PartyMember], enemies: &mut [Enemy]) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for member in party.iter_mut() {
        if !member.body.defeated && !member.character.is_alive() {
            member.body.defeated = true;
            member.body.movement = MovementState::Idle;
            events.push(TickEvent::EntityDefeated {
                entity_id: member.character.id.clone(),
            });
        }
    }
    for enemy in enemies.iter_mut() {
        if !enemy.body.defeated && enemy.health == 0 {
            enemy.body.defeated = true;
            enemy.body.movement = MovementState::Idle;
            events.push(TickEvent::EntityDefeated {
                entity_id: enemy.id.clone(),
            });
        }
    }
    events
}

/// Every living party member acts once.
pub fn party_turn(
    party: &mut [PartyMember],
    enemies: &mut [Enemy],
    rules: &ArenaRules,
    clock: &GameClock,
    rng: &mut impl Rng,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for i in 0..party.len() {
        if !party[i].is_active() {
            continue;
        }
        if party[i].character.class.is_healer() {
            healer_turn(party, i, rules, clock, &mut events);
        } else {
            striker_turn(&mut party[i], enemies, rules, clock, rng, &mut events);
        }
    }
    events
}

fn striker_turn(
    member: &mut PartyMember,
    enemies: &mut [Enemy],
    rules: &ArenaRules,
    clock: &GameClock,
    rng: &mut impl Rng,
    events: &mut Vec<TickEvent>,
) {
    let Some(t) = nearest_enemy(&member.body.position, enemies) else {
        member.body.movement = MovementState::Idle;
        return;
    };
    let speed = member.character.effective_stats().speed;
    let target_pos = enemies[t].body.position;
    if approach(&mut member.body, &target_pos, speed, member.character.class.range()) {
        return;
    }

    member.body.movement = MovementState::Attacking;
    let cooldown = attack_cooldown_ms(PLAYER_ATTACK_COOLDOWN_BASE_MS, speed);
    if !clock.has_elapsed(member.body.last_attack_at, cooldown) {
        return;
    }

    let enemy = &mut enemies[t];
    let outcome = member
        .character
        .attack_with(enemy, rules.damage_formula, rng);
    member.body.last_attack_at = Some(clock.now());
    events.push(TickEvent::AttackResolved {
        attacker_id: member.character.id.clone(),
        target_id: enemy.id.clone(),
        damage: outcome.damage,
        is_critical: outcome.is_critical,
    });
    if enemy.health == 0 {
        enemy.body.defeated = true;
        enemy.body.movement = MovementState::Idle;
        events.push(TickEvent::EntityDefeated {
            entity_id: enemy.id.clone(),
        });
    }
}

/// Healers never attack: they walk to the most injured ally and heal on
/// their attack cooldown.
fn healer_turn(
    party: &mut [PartyMember],
    i: usize,
    rules: &ArenaRules,
    clock: &GameClock,
    events: &mut Vec<TickEvent>,
) {
    let Some(j) = most_injured_member(party) else {
        party[i].body.movement = MovementState::Idle;
        return;
    };
    let stats = party[i].character.effective_stats();
    let target_pos = party[j].body.position;
    if rules.heal_range == HealRangePolicy::MoveIntoRange && i != j {
        let range = party[i].character.class.range();
        if approach(&mut party[i].body, &target_pos, stats.speed, range) {
            return;
        }
    }

    party[i].body.movement = MovementState::Attacking;
    let cooldown = attack_cooldown_ms(PLAYER_ATTACK_COOLDOWN_BASE_MS, stats.speed);
    if !clock.has_elapsed(party[i].body.last_attack_at, cooldown) {
        return;
    }

    let amount = party[i].character.heal_power();
    let healed = party[j].character.heal(amount);
    party[i].body.last_attack_at = Some(clock.now());
    events.push(TickEvent::HealResolved {
        healer_id: party[i].character.id.clone(),
        target_id: party[j].character.id.clone(),
        amount: healed,
    });
}

/// Every living enemy acts once.
pub fn enemy_turn(
    enemies: &mut [Enemy],
    party: &mut [PartyMember],
    rules: &ArenaRules,
    clock: &GameClock,
) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for enemy in enemies.iter_mut() {
        if !enemy.is_active() {
            continue;
        }
        let Some(t) = nearest_member(&enemy.body.position, party) else {
            enemy.body.movement = MovementState::Idle;
            continue;
        };
        let speed = enemy.effective_speed();
        let target_pos = party[t].body.position;
        if approach(&mut enemy.body, &target_pos, speed, enemy.range) {
            continue;
        }

        enemy.body.movement = MovementState::Attacking;
        let cooldown = attack_cooldown_ms(ENEMY_ATTACK_COOLDOWN_BASE_MS, speed);
        if !clock.has_elapsed(enemy.body.last_attack_at, cooldown) {
            continue;
        }

        let member = &mut party[t];
        let defense = member.character.effective_stats().defense;
        let damage = rules
            .damage_formula
            .apply(enemy.effective_attack(), defense);
        let dealt = member.character.take_true_damage(damage);
        enemy.body.last_attack_at = Some(clock.now());
        events.push(TickEvent::AttackResolved {
            attacker_id: enemy.id.clone(),
            target_id: member.character.id.clone(),
            damage: dealt,
            is_critical: false,
        });
        if !member.character.is_alive() {
            member.body.defeated = true;
            member.body.movement = MovementState::Idle;
            events.push(TickEvent::EntityDefeated {
                entity_id: member.character.id.clone(),
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, CharacterClass};
    use crate::combat::types::EnemyType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn member(id: &str, class: CharacterClass, x: f64) -> PartyMember {
        PartyMember::new(Character::new(id, id, class), Position::new(x, 50.0))
    }

    fn enemy(id: &str, x: f64) -> Enemy {
        Enemy::new(id, EnemyType::Slime, 1, Position::new(x, 50.0))
    }

    #[test]
    fn test_nearest_skips_defeated() {
        let mut enemies = vec![enemy("near", 20.0), enemy("far", 80.0)];
        let from = Position::new(10.0, 50.0);
        assert_eq!(nearest_enemy(&from, &enemies), Some(0));
        enemies[0].health = 0;
        enemies[0].body.defeated = true;
        assert_eq!(nearest_enemy(&from, &enemies), Some(1));
        enemies[1].body.defeated = true;
        assert_eq!(nearest_enemy(&from, &enemies), None);
    }

    #[test]
    fn test_most_injured_by_ratio() {
        let mut party = vec![
            member("warrior", CharacterClass::Warrior, 10.0),
            member("archer", CharacterClass::Archer, 10.0),
        ];
        assert_eq!(most_injured_member(&party), None);
        party[0].character.take_true_damage(30); // 90/120
        party[1].character.take_true_damage(30); // 50/80
        assert_eq!(most_injured_member(&party), Some(1));
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut values = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut values, 2, 0);
        *a += 10;
        *b += 20;
        assert_eq!(values, vec![21, 2, 13]);
    }

    #[test]
    fn test_striker_moves_then_attacks() {
        let mut party = vec![member("warrior", CharacterClass::Warrior, 10.0)];
        let mut enemies = vec![enemy("slime", 30.0)];
        let rules = ArenaRules::default();
        let mut clock = GameClock::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let events = party_turn(&mut party, &mut enemies, &rules, &clock, &mut rng);
        assert!(events.is_empty());
        assert_eq!(party[0].body.movement, MovementState::Moving);
        assert!(party[0].body.position.x > 10.0);

        for _ in 0..4 {
            clock.advance(Duration::from_millis(1000));
            party_turn(&mut party, &mut enemies, &rules, &clock, &mut rng);
        }
        assert!(enemies[0].health < enemies[0].max_health);
        assert_eq!(party[0].body.movement, MovementState::Attacking);
    }

    #[test]
    fn test_flat_damage_from_enemy() {
        let mut party = vec![member("archer", CharacterClass::Archer, 50.0)];
        let mut enemies = vec![Enemy::new(
            "goblin",
            EnemyType::Goblin,
            1,
            Position::new(52.0, 50.0),
        )];
        let clock = GameClock::new();
        let events = enemy_turn(&mut enemies, &mut party, &ArenaRules::default(), &clock);
        // 10 attack against 3 defense
        assert_eq!(
            events[0],
            TickEvent::AttackResolved {
                attacker_id: "goblin".to_string(),
                target_id: "archer".to_string(),
                damage: 7,
                is_critical: false,
            }
        );
        assert_eq!(party[0].character.stats.health, 73);
    }

    #[test]
    fn test_enemy_respects_cooldown() {
        let mut party = vec![member("warrior", CharacterClass::Warrior, 50.0)];
        let mut enemies = vec![enemy("slime", 52.0)];
        let mut clock = GameClock::new();
        let rules = ArenaRules::default();
        assert_eq!(enemy_turn(&mut enemies, &mut party, &rules, &clock).len(), 1);
        clock.advance(Duration::from_millis(1000));
        assert!(enemy_turn(&mut enemies, &mut party, &rules, &clock).is_empty());
        // slime speed 5: 2500 - 250
        clock.advance(Duration::from_millis(1250));
        assert_eq!(enemy_turn(&mut enemies, &mut party, &rules, &clock).len(), 1);
    }

    #[test]
    fn test_healer_never_attacks() {
        let mut party = vec![
            member("priest", CharacterClass::Priest, 50.0),
            member("warrior", CharacterClass::Warrior, 52.0),
        ];
        let mut enemies = vec![enemy("slime", 53.0)];
        party[1].character.take_true_damage(100);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let events = party_turn(
            &mut party,
            &mut enemies,
            &ArenaRules::default(),
            &GameClock::new(),
            &mut rng,
        );
        // Heal is 50 + 80/10
        assert!(events.contains(&TickEvent::HealResolved {
            healer_id: "priest".to_string(),
            target_id: "warrior".to_string(),
            amount: 58,
        }));
        assert!(!events.iter().any(|e| matches!(
            e,
            TickEvent::AttackResolved { attacker_id, .. } if attacker_id == "priest"
        )));
    }

    #[test]
    fn test_levelled_healer_uses_class_heal() {
        let mut party = vec![
            member("priest", CharacterClass::Priest, 50.0),
            member("warrior", CharacterClass::Warrior, 52.0),
        ];
        for _ in 1..10 {
            party[0].character.level_up();
        }
        party[1].character.take_true_damage(110);
        let priest = &party[0].character;
        let heal_amount = priest.ability("priest_heal").unwrap().heal_amount;
        assert_eq!(heal_amount, 70);
        let expected = heal_amount + priest.effective_stats().max_mana / PRIEST_HEAL_MANA_DIVISOR;
        assert_eq!(expected, 86);

        let mut enemies: Vec<Enemy> = vec![];
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let events = party_turn(
            &mut party,
            &mut enemies,
            &ArenaRules::default(),
            &GameClock::new(),
            &mut rng,
        );
        assert_eq!(
            events,
            vec![TickEvent::HealResolved {
                healer_id: "priest".to_string(),
                target_id: "warrior".to_string(),
                amount: expected,
            }]
        );
    }

    #[test]
    fn test_healer_walks_into_range() {
        let mut party = vec![
            member("priest", CharacterClass::Priest, 0.0),
            member("archer", CharacterClass::Archer, 80.0),
        ];
        party[1].character.take_true_damage(40);
        let mut enemies: Vec<Enemy> = vec![];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let clock = GameClock::new();
        let events = party_turn(&mut party, &mut enemies, &ArenaRules::default(), &clock, &mut rng);
        assert!(events.is_empty());
        assert_eq!(party[0].body.movement, MovementState::Moving);

        let unlimited = ArenaRules {
            heal_range: HealRangePolicy::Unlimited,
            ..ArenaRules::default()
        };
        let events = party_turn(&mut party, &mut enemies, &unlimited, &clock, &mut rng);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_sweep_flags_once() {
        let mut party = vec![member("warrior", CharacterClass::Warrior, 0.0)];
        let mut enemies = vec![enemy("slime", 10.0)];
        enemies[0].health = 0;
        assert_eq!(sweep_defeated(&mut party, &mut enemies).len(), 1);
        assert!(sweep_defeated(&mut party, &mut enemies).is_empty());
        assert!(all_enemies_defeated(&enemies));
        assert!(!party_defeated(&party));
    }
}
