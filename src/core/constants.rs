// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const ENEMY_RESPAWN_DELAY_MS: u64 = 3000;
pub const MIN_GAME_SPEED: f64 = 0.25;
pub const MAX_GAME_SPEED: f64 = 8.0;

// Arena attack timing: cooldown_ms = BASE - speed * PER_SPEED
pub const PLAYER_ATTACK_COOLDOWN_BASE_MS: u64 = 2000;
pub const ENEMY_ATTACK_COOLDOWN_BASE_MS: u64 = 2500;
pub const ATTACK_COOLDOWN_PER_SPEED_MS: u64 = 50;
pub const MIN_ATTACK_COOLDOWN_MS: u64 = 300;

// Arena geometry (percentage-of-arena coordinates)
pub const ARENA_MIN: f64 = 0.0;
pub const ARENA_MAX: f64 = 100.0;
pub const RANGE_THRESHOLD_FACTOR: f64 = 1.0;
pub const MOVE_STEP_FACTOR: f64 = 0.5;
// Movers stop this far inside their range so the next tick is in reach
pub const APPROACH_MARGIN: f64 = 0.5;
pub const PARTY_SPAWN_X: f64 = 10.0;
pub const PARTY_SPAWN_X_STEP: f64 = 4.0;
pub const ENEMY_SPAWN_X: f64 = 75.0;
pub const ENEMY_SPAWN_X_STEP: f64 = 6.0;
pub const SPAWN_Y_TOP: f64 = 20.0;
pub const SPAWN_Y_STEP: f64 = 20.0;

// Class attack ranges (arena percent)
pub const WARRIOR_RANGE: f64 = 8.0;
pub const ARCHER_RANGE: f64 = 35.0;
pub const MAGE_RANGE: f64 = 28.0;
pub const PRIEST_HEAL_RANGE: f64 = 22.0;
pub const BOXER_RANGE: f64 = 6.0;

// Stat defaults for templates that omit optional fields
pub const DEFAULT_CRITICAL_CHANCE: f64 = 0.0;
pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 1.5;

// Damage reduction curve: raw * (1 - def / (def + DEFENSE_CURVE_CONSTANT))
pub const DEFENSE_CURVE_CONSTANT: f64 = 100.0;
pub const MIN_DAMAGE: u32 = 1;

// XP and leveling
pub const XP_CURVE_BASE: u64 = 100;
pub const STAT_POINTS_PER_LEVEL: u32 = 5;
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

// Class level-up hooks
pub const WARRIOR_HEALTH_BONUS: u32 = 10;
pub const WARRIOR_HEALTH_BONUS_INTERVAL: u32 = 5;
pub const ARCHER_CRIT_BONUS: f64 = 0.02;
pub const ARCHER_CRIT_BONUS_INTERVAL: u32 = 4;
pub const MAGE_MANA_BONUS: u32 = 15;
pub const MAGE_MANA_BONUS_INTERVAL: u32 = 3;
pub const PRIEST_HEAL_BONUS: u32 = 10;
pub const PRIEST_HEAL_BONUS_INTERVAL: u32 = 5;
pub const BOXER_COMBO_CAP_INTERVAL: u32 = 4;
pub const BOXER_SPEED_BONUS: u32 = 2;
pub const BOXER_SPEED_BONUS_INTERVAL: u32 = 3;

// Class passives
pub const ARCHER_CRIT_PASSIVE_LEVEL: u32 = 10;
pub const ARCHER_CRIT_PASSIVE: f64 = 0.05;
pub const MAGE_ATTACK_MANA_DIVISOR: u32 = 20;
pub const MAGE_CRIT_MULTIPLIER_LEVEL: u32 = 15;
pub const MAGE_CRIT_MULTIPLIER_PASSIVE: f64 = 0.5;
pub const PRIEST_MANA_PASSIVE_STEP: u32 = 4;
pub const PRIEST_MANA_PASSIVE_PER_STEP: u32 = 5;
pub const PRIEST_DEFENSE_PASSIVE_LEVEL: u32 = 10;
pub const PRIEST_DEFENSE_PASSIVE: u32 = 3;
pub const BOXER_SPEED_PER_CRIT_STEP: u32 = 10;
pub const BOXER_CRIT_PER_SPEED_STEP: f64 = 0.01;
pub const BOXER_ATTACK_PER_COMBO: u32 = 2;

// Mana regeneration (per second)
pub const MAGE_MANA_REGEN_PER_SECOND: f64 = 5.0;
pub const PRIEST_MANA_REGEN_PER_SECOND: f64 = 3.0;

// Boxer combo
pub const BOXER_DEFAULT_MAX_COMBO: u32 = 5;
pub const BOXER_COMBO_DECAY_SECONDS: f64 = 3.0;
pub const RAPID_PUNCH_HITS: u32 = 3;
pub const RAPID_PUNCH_SCALE: f64 = 0.6;
pub const UPPERCUT_DAMAGE_PER_COMBO: u32 = 5;
pub const COMBO_FINISHER_SCALE_PER_COMBO: f64 = 0.5;

// Ability scaling
pub const FIREBALL_SCALE: f64 = 1.5;
pub const ICE_SHARD_SCALE: f64 = 1.3;
pub const LIGHTNING_BOLT_SCALE: f64 = 1.8;
pub const PRIEST_HEAL_MANA_DIVISOR: u32 = 10;
pub const PRIEST_GROUP_HEAL_MANA_DIVISOR: u32 = 15;
pub const PRIEST_HOLY_LIGHT_MANA_DIVISOR: u32 = 12;

// Timed buffs granted by support abilities
pub const BERSERKER_RAGE_ATTACK: i32 = 10;
pub const BERSERKER_RAGE_DURATION_MS: u64 = 10_000;
pub const EAGLE_EYE_CRIT: f64 = 0.15;
pub const EAGLE_EYE_DURATION_MS: u64 = 10_000;
pub const MANA_SHIELD_DEFENSE: i32 = 10;
pub const MANA_SHIELD_DURATION_MS: u64 = 8_000;
pub const DIVINE_PROTECTION_DEFENSE: i32 = 15;
pub const DIVINE_PROTECTION_DURATION_MS: u64 = 8_000;
pub const SHIELD_BASH_STUN_MS: u64 = 3_000;

// Enemy level scaling: multiplier = 1 + (level - 1) * step
pub const ENEMY_LEVEL_SCALING_STEP: f64 = 0.15;

// Item drops
pub const ITEM_DROP_BASE_CHANCE: f64 = 0.15;
pub const ITEM_DROP_MAX_CHANCE: f64 = 0.60;
pub const DEFAULT_MAX_DURABILITY: u32 = 100;

// Boss rarity distribution
pub const BOSS_MAGIC_THRESHOLD: f64 = 0.40;
pub const BOSS_RARE_THRESHOLD: f64 = 0.75;
pub const BOSS_EPIC_THRESHOLD: f64 = 0.95;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x5354_4943_4B52_4E47; // "STICKRNG"
