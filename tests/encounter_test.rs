//! Encounter simulator integration tests
//!
//! Drives the arena through full encounters with seeded RNGs: victory,
//! respawn, defeat, manual play and zone unlocks.

use rand::rngs::mock::StepRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use stick_ranger::character::CharacterClass;
use stick_ranger::combat::MovementState;
use stick_ranger::core::constants::ENEMY_RESPAWN_DELAY_MS;
use stick_ranger::core::{TickEvent, TickResult};
use stick_ranger::simulator::{EncounterState, PartyMemberConfig, Simulator, SimulatorConfig};

const STEP: Duration = Duration::from_millis(250);

fn solo(class: CharacterClass) -> Simulator {
    Simulator::new(SimulatorConfig {
        party: vec![PartyMemberConfig::new("hero", "Hero", class)],
        ..SimulatorConfig::default()
    })
}

/// Ticks until `done` matches a tick's result, returning every event seen.
fn run_until(
    sim: &mut Simulator,
    rng: &mut impl Rng,
    max_ticks: usize,
    done: impl Fn(&TickResult) -> bool,
) -> Option<Vec<TickEvent>> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        let result = sim.tick(STEP, rng);
        let finished = done(&result);
        events.extend(result.events);
        if finished {
            return Some(events);
        }
    }
    None
}

// ============================================================================
// Victory and respawn
// ============================================================================

#[test]
fn test_party_clears_first_level() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    assert!(sim.spawn_zone(1, 1));

    let events = run_until(&mut sim, &mut rng, 400, |r| r.victories() > 0)
        .expect("party should win the first level");

    assert!(matches!(
        events.first(),
        Some(TickEvent::EncounterStarted { zone_id: 1, level_id: 1, enemy_count: 2 })
    ));
    let defeated = events
        .iter()
        .filter(|e| {
            matches!(e, TickEvent::EntityDefeated { entity_id } if entity_id.starts_with("enemy-"))
        })
        .count();
    assert_eq!(defeated, 2);
    assert!(events.iter().any(|e| matches!(e, TickEvent::AttackResolved { .. })));

    assert_eq!(sim.gold(), 10);
    for member in sim.party().iter().filter(|m| m.is_active()) {
        assert_eq!(member.character.progression.experience, 30);
        assert_eq!(member.body.movement, MovementState::Idle);
    }
    assert!(sim.progression().is_cleared(1, 1));
    assert!(sim.progression().is_unlocked(1, 2));
}

#[test]
fn test_wave_respawns_after_delay() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    sim.spawn_zone(1, 1);
    run_until(&mut sim, &mut rng, 400, |r| r.victories() > 0).unwrap();

    let EncounterState::Victory { respawn_at } = sim.state() else {
        panic!("expected victory, got {:?}", sim.state());
    };
    assert_eq!(respawn_at, sim.now() + ENEMY_RESPAWN_DELAY_MS);

    let steps = ENEMY_RESPAWN_DELAY_MS / STEP.as_millis() as u64;
    for _ in 0..steps - 1 {
        let result = sim.tick(STEP, &mut rng);
        assert!(result.events.is_empty());
    }
    let result = sim.tick(STEP, &mut rng);
    assert!(matches!(
        result.events[0],
        TickEvent::EncounterStarted { enemy_count: 2, .. }
    ));
    assert_eq!(sim.state(), EncounterState::Active);
    let ids: Vec<_> = sim.enemies().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["enemy-3", "enemy-4"]);
}

#[test]
fn test_same_seed_same_fight() {
    let run = |seed| {
        let mut sim = Simulator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        sim.spawn_zone(1, 1);
        run_until(&mut sim, &mut rng, 400, |r| r.victories() > 0).unwrap()
    };
    assert_eq!(run(99), run(99));
}

// ============================================================================
// Defeat
// ============================================================================

#[test]
fn test_defeat_halts_the_arena() {
    let mut sim = solo(CharacterClass::Warrior);
    // Never crits, so the first slime survives the opening swing
    let mut rng = StepRng::new(u64::MAX, 0);
    sim.spawn_zone(1, 1);
    sim.character_mut("hero").unwrap().take_true_damage(119);

    let events = run_until(&mut sim, &mut rng, 400, |r| r.has_defeat()).expect("hero should fall");
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::EntityDefeated { entity_id } if entity_id == "hero")));
    assert_eq!(sim.state(), EncounterState::Defeat);
    assert_eq!(sim.progression().total_victories, 0);

    // Nothing happens after defeat
    for _ in 0..20 {
        assert!(sim.tick(STEP, &mut rng).events.is_empty());
    }

    // Re-entering revives the party
    assert!(sim.spawn_zone(1, 1));
    let hero = sim.character("hero").unwrap();
    assert_eq!(hero.stats.health, hero.stats.max_health);
    assert_eq!(sim.state(), EncounterState::Active);
}

#[test]
fn test_defeated_members_are_not_targeted() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    sim.spawn_zone(1, 1);
    sim.character_mut("warrior").unwrap().take_true_damage(1_000);

    let result = sim.tick(STEP, &mut rng);
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::EntityDefeated { entity_id } if entity_id == "warrior")));

    let events = run_until(&mut sim, &mut rng, 400, |r| r.victories() > 0).unwrap();
    for event in &events {
        if let TickEvent::AttackResolved { target_id, attacker_id, .. } = event {
            assert_ne!(target_id, "warrior");
            assert_ne!(attacker_id, "warrior");
        }
        if let TickEvent::HealResolved { target_id, .. } = event {
            assert_ne!(target_id, "warrior");
        }
    }
    // Dead members earn nothing
    assert_eq!(sim.character("warrior").unwrap().progression.experience, 0);
}

// ============================================================================
// Host controls
// ============================================================================

#[test]
fn test_auto_battle_off_freezes_decisions() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    sim.spawn_zone(1, 1);
    sim.set_auto_battle(false);

    let positions: Vec<_> = sim.party().iter().map(|m| m.body.position).collect();
    sim.tick(STEP, &mut rng);
    for _ in 0..20 {
        assert!(sim.tick(STEP, &mut rng).events.is_empty());
    }
    let after: Vec<_> = sim.party().iter().map(|m| m.body.position).collect();
    assert_eq!(positions, after);
    assert_eq!(sim.now(), 21 * 250);

    sim.set_auto_battle(true);
    sim.tick(STEP, &mut rng);
    assert_ne!(
        sim.party()[0].body.position,
        positions[0],
        "warrior should start walking"
    );
}

#[test]
fn test_manual_abilities_win_with_auto_battle_off() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    sim.spawn_zone(1, 1);
    sim.set_auto_battle(false);

    let first = sim.enemies()[0].id.clone();
    assert!(sim.use_ability("archer", "archer_piercing_shot", Some(&first)));
    assert!(sim.use_ability("warrior", "warrior_charge", None));
    assert!(!sim.use_ability("mage", "mage_fireball", None), "nothing left to hit");

    let result = sim.tick(STEP, &mut rng);
    let kinds: Vec<_> = result
        .events
        .iter()
        .map(|e| match e {
            TickEvent::AbilityUsed { .. } => "ability",
            TickEvent::EntityDefeated { .. } => "defeated",
            TickEvent::Victory { .. } => "victory",
            TickEvent::EncounterStarted { .. } => "started",
            _ => "other",
        })
        .filter(|k| *k != "other")
        .collect();
    assert_eq!(
        kinds,
        vec!["started", "ability", "ability", "defeated", "defeated", "victory"]
    );
    assert_eq!(sim.character("priest").unwrap().progression.experience, 30);
}

#[test]
fn test_pause_stops_the_clock() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    sim.spawn_zone(1, 1);
    sim.tick(STEP, &mut rng);

    sim.pause();
    assert!(sim.is_paused());
    let snapshot = sim.snapshot();
    for _ in 0..10 {
        let result = sim.tick(STEP, &mut rng);
        assert!(result.events.is_empty());
        assert_eq!(result.now_ms, 250);
    }
    assert_eq!(sim.snapshot(), snapshot);

    sim.resume();
    assert_eq!(sim.tick(STEP, &mut rng).now_ms, 500);
}

#[test]
fn test_ability_cooldowns_follow_elapsed_time() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    sim.spawn_zone(1, 1);
    sim.set_auto_battle(false);
    assert!(sim.use_ability("warrior", "warrior_berserker_rage", None));

    // 20 s cooldown
    for _ in 0..79 {
        sim.tick(STEP, &mut rng);
    }
    assert!(!sim.use_ability("warrior", "warrior_berserker_rage", None));
    sim.tick(STEP, &mut rng);
    assert!(sim.use_ability("warrior", "warrior_berserker_rage", None));
}

// ============================================================================
// Zone unlocks
// ============================================================================

#[test]
fn test_locked_levels_cannot_be_entered() {
    let mut sim = Simulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    assert!(!sim.spawn_zone(1, 2));
    assert!(!sim.spawn_zone(0, 0));
    assert_eq!(sim.state(), EncounterState::Idle);
    assert!(sim.enemies().is_empty());

    sim.spawn_zone(1, 1);
    run_until(&mut sim, &mut rng, 400, |r| r.victories() > 0).unwrap();
    assert!(sim.spawn_zone(1, 2));
    assert_eq!(sim.progression().current, Some((1, 2)));
    assert!(!sim.spawn_zone(1, 3));
    // A failed entry leaves the current fight alone
    assert_eq!(sim.progression().current, Some((1, 2)));
    assert_eq!(sim.enemies().len(), 3);
}

#[test]
fn test_snapshot_is_host_readable() {
    let mut sim = Simulator::new(SimulatorConfig {
        party: vec![
            PartyMemberConfig::new("bo", "Bo", CharacterClass::Boxer),
            PartyMemberConfig::new("pia", "Pia", CharacterClass::Priest),
        ],
        ..SimulatorConfig::default()
    });
    sim.spawn_zone(1, 1);
    sim.use_ability("bo", "boxer_counter_attack", None);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.state, "active");
    assert_eq!(snapshot.party[0].combo, Some(1));
    assert_eq!(snapshot.party[1].combo, None);
    assert_eq!(snapshot.party[0].cooldowns.get("boxer_counter_attack"), Some(&10.0));
    assert_eq!(snapshot.enemies.len(), 2);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["party"][0]["class"], "Boxer");
    assert_eq!(json["enemies"][0]["enemy_type"], "Slime");
}
