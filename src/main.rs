//! Headless driver for the Stick Ranger arena.
//!
//! Usage:
//!   stick-ranger [OPTIONS]
//!
//! Examples:
//!   stick-ranger --ticks 300 --seed 42
//!   stick-ranger --zone 1 --level 1 --json
//!   stick-ranger --load party.dat --save party.dat

use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use stick_ranger::build_info;
use stick_ranger::character::save::SaveManager;
use stick_ranger::core::TickEvent;
use stick_ranger::simulator::{EncounterState, Simulator, SimulatorConfig};

struct Options {
    ticks: u64,
    seed: Option<u64>,
    zone: u32,
    level: u32,
    speed: Option<f64>,
    config: Option<PathBuf>,
    save: Option<PathBuf>,
    load: Option<PathBuf>,
    realtime: bool,
    json: bool,
    quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: None,
            zone: 1,
            level: 1,
            speed: None,
            config: None,
            save: None,
            load: None,
            realtime: false,
            json: false,
            quiet: false,
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let default_filter = if options.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mut config = match &options.config {
        Some(path) => SimulatorConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => SimulatorConfig::default(),
    };
    if let Some(speed) = options.speed {
        config.game_speed = speed;
    }

    let mut sim = match &options.load {
        Some(path) => match SaveManager::with_path(path).load() {
            Ok(save) => Simulator::from_save(config, save),
            Err(e) => {
                eprintln!("Failed to load save {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Simulator::new(config),
    };
    if let Some(speed) = options.speed {
        sim.set_game_speed(speed);
    }

    if !sim.spawn_zone(options.zone, options.level) {
        eprintln!(
            "Cannot enter level {}-{} (unknown or locked)",
            options.zone, options.level
        );
        std::process::exit(1);
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut victories = 0;
    let mut last = Instant::now();
    for _ in 0..options.ticks {
        let elapsed = if options.realtime {
            std::thread::sleep(sim.tick_interval());
            let now = Instant::now();
            let elapsed = now - last;
            last = now;
            elapsed
        } else {
            sim.tick_interval()
        };

        let result = sim.tick(elapsed, &mut rng);
        if !options.quiet {
            for event in &result.events {
                print_event(event, result.now_ms, options.json);
            }
        }

        if result.victories() > 0 {
            victories += result.victories();
            advance_if_unlocked(&mut sim);
        }
        if sim.state() == EncounterState::Defeat {
            break;
        }
    }

    print_summary(&sim, victories, options.json);

    if let Some(path) = &options.save {
        if let Err(e) = SaveManager::with_path(path).save(&sim.to_save()) {
            eprintln!("Failed to save {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

/// Moves on to the furthest unlocked level once the current one is cleared.
fn advance_if_unlocked(sim: &mut Simulator) {
    let progression = sim.progression();
    let Some(&(zone, level)) = progression.unlocked_levels.last() else {
        return;
    };
    if progression.current != Some((zone, level)) && !progression.is_cleared(zone, level) {
        sim.spawn_zone(zone, level);
    }
}

fn print_event(event: &TickEvent, now_ms: u64, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to encode event: {}", e),
        }
        return;
    }

    let secs = now_ms as f64 / 1000.0;
    let text = match event {
        TickEvent::EncounterStarted {
            zone_id,
            level_id,
            enemy_count,
        } => format!("Level {zone_id}-{level_id}: {enemy_count} enemies appear"),
        TickEvent::Victory {
            zone_id,
            level_id,
            rewards,
        } => format!(
            "Victory at {zone_id}-{level_id}! +{} xp, +{} gold",
            rewards.experience, rewards.gold
        ),
        TickEvent::Defeat => "The party has fallen".to_string(),
        TickEvent::AttackResolved {
            attacker_id,
            target_id,
            damage,
            is_critical,
        } => format!(
            "{attacker_id} hits {target_id} for {damage}{}",
            if *is_critical { " (critical)" } else { "" }
        ),
        TickEvent::HealResolved {
            healer_id,
            target_id,
            amount,
        } => format!("{healer_id} heals {target_id} for {amount}"),
        TickEvent::EntityDefeated { entity_id } => format!("{entity_id} is defeated"),
        TickEvent::AbilityUsed {
            caster_id,
            ability_id,
            damage,
            healing,
            ..
        } => format!("{caster_id} uses {ability_id} ({damage} damage, {healing} healing)"),
        TickEvent::LeveledUp {
            character_id,
            new_level,
        } => format!("{character_id} reached level {new_level}"),
        TickEvent::ItemDropped {
            item_name, rarity, ..
        } => format!("Found {} [{}]", item_name, rarity.name()),
    };
    println!("[{:>8.2}s] {}", secs, text);
}

fn print_summary(sim: &Simulator, victories: usize, json: bool) {
    let snapshot = sim.snapshot();
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to encode snapshot: {}", e),
        }
        return;
    }

    println!();
    println!("After {:.1}s of arena time:", snapshot.now_ms as f64 / 1000.0);
    println!("  Victories:  {}", victories);
    println!("  Gold:       {}", snapshot.gold);
    println!("  Inventory:  {} items", snapshot.inventory_size);
    if let Some((zone, level)) = snapshot.zone {
        println!("  Location:   {}-{} ({})", zone, level, snapshot.state);
    }
    println!();
    for p in &snapshot.party {
        println!(
            "  {:<10} {:<8} Lv {:>2}  HP {:>4}/{:<4} MP {:>3}/{:<3}{}",
            p.name,
            p.class.name(),
            p.level,
            p.health,
            p.max_health,
            p.mana,
            p.max_mana,
            if p.defeated { "  (down)" } else { "" }
        );
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-t" | "--ticks" => {
                if let Some(v) = value {
                    options.ticks = v.parse().unwrap_or(options.ticks);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = value {
                    options.seed = v.parse().ok();
                    i += 1;
                }
            }
            "-z" | "--zone" => {
                if let Some(v) = value {
                    options.zone = v.parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if let Some(v) = value {
                    options.level = v.parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--speed" => {
                if let Some(v) = value {
                    options.speed = v.parse().ok();
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if let Some(v) = value {
                    options.config = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--save" => {
                if let Some(v) = value {
                    options.save = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--load" => {
                if let Some(v) = value {
                    options.load = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--realtime" => options.realtime = true,
            "--json" => options.json = true,
            "-q" | "--quiet" => options.quiet = true,
            "-v" | "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'stick-ranger --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Stick Ranger arena simulator");
    println!();
    println!("USAGE:");
    println!("    stick-ranger [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -t, --ticks <N>     Ticks to run (default: 600)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -z, --zone <Z>      Zone to enter (default: 1)");
    println!("    -l, --level <L>     Level to enter (default: 1)");
    println!("        --speed <X>     Game speed, 0.25 to 8.0");
    println!("    -c, --config <F>    JSON config file");
    println!("        --load <F>      Load a saved party");
    println!("        --save <F>      Save the party on exit");
    println!("        --realtime      Sleep between ticks like a live host");
    println!("        --json          Print events and the final snapshot as JSON");
    println!("    -q, --quiet         Only print the summary");
    println!("    -v, --version       Show version information");
    println!("    -h, --help          Show this help message");
    println!();
    println!("Set RUST_LOG=debug for per-action logging.");
}
