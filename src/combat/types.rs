use serde::{Deserialize, Serialize};

use crate::character::buffs::{add_or_refresh, expire_buffs};
use crate::character::{Buff, Character, Combatant, StatModifier};
use crate::core::clock::Timestamp;
use crate::core::constants::*;
use crate::core::stats::calculate_damage_reduction;

/// Arena coordinates, in percent of the arena on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves up to `step` toward `target`, stopping `stop_at` short of it.
    pub fn step_toward(&self, target: &Position, step: f64, stop_at: f64) -> Position {
        let dist = self.distance_to(target);
        let travel = (dist - stop_at).min(step).max(0.0);
        if dist <= f64::EPSILON || travel <= 0.0 {
            return *self;
        }
        let ratio = travel / dist;
        Position {
            x: (self.x + (target.x - self.x) * ratio).clamp(ARENA_MIN, ARENA_MAX),
            y: (self.y + (target.y - self.y) * ratio).clamp(ARENA_MIN, ARENA_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Idle,
    Moving,
    Attacking,
}

/// Runtime body of anything standing in the arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub position: Position,
    pub last_attack_at: Option<Timestamp>,
    pub movement: MovementState,
    pub defeated: bool,
}

impl CombatEntity {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// A party member standing in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMember {
    pub character: Character,
    pub body: CombatEntity,
}

impl PartyMember {
    pub fn new(character: Character, position: Position) -> Self {
        Self {
            character,
            body: CombatEntity::at(position),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.body.defeated && self.character.is_alive()
    }

    pub fn health_ratio(&self) -> f64 {
        let stats = &self.character.stats;
        if stats.max_health == 0 {
            return 0.0;
        }
        stats.health as f64 / stats.max_health as f64
    }
}

/// Whether the Priest must walk into heal range before healing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealRangePolicy {
    #[default]
    MoveIntoRange,
    Unlimited,
}

/// Attack cooldown for a given speed, floored at [`MIN_ATTACK_COOLDOWN_MS`].
pub fn attack_cooldown_ms(base_ms: u64, speed: u32) -> u64 {
    base_ms
        .saturating_sub(speed as u64 * ATTACK_COOLDOWN_PER_SPEED_MS)
        .max(MIN_ATTACK_COOLDOWN_MS)
}

/// Stat multiplier for an enemy of the given level.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * ENEMY_LEVEL_SCALING_STEP
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Slime,
    Snake,
    Goblin,
    Bat,
    Tree,
    Skeleton,
    GoblinChief,
    ElderTree,
    Lich,
}

/// Level-1 stats for an enemy type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBaseStats {
    pub health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub speed: u32,
    pub range: f64,
}

impl EnemyType {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyType::Slime => "Slime",
            EnemyType::Snake => "Snake",
            EnemyType::Goblin => "Goblin",
            EnemyType::Bat => "Bat",
            EnemyType::Tree => "Tree",
            EnemyType::Skeleton => "Skeleton",
            EnemyType::GoblinChief => "Goblin Chief",
            EnemyType::ElderTree => "Elder Tree",
            EnemyType::Lich => "Lich",
        }
    }

    pub fn base_stats(&self) -> EnemyBaseStats {
        let (health, attack_power, defense, speed, range) = match self {
            EnemyType::Slime => (30, 6, 1, 5, 6.0),
            EnemyType::Snake => (25, 8, 1, 8, 6.0),
            EnemyType::Goblin => (45, 10, 3, 7, 7.0),
            EnemyType::Bat => (20, 7, 0, 12, 5.0),
            EnemyType::Tree => (70, 9, 6, 3, 10.0),
            EnemyType::Skeleton => (55, 13, 5, 6, 8.0),
            EnemyType::GoblinChief => (160, 16, 6, 6, 8.0),
            EnemyType::ElderTree => (260, 18, 10, 3, 14.0),
            EnemyType::Lich => (320, 24, 8, 7, 30.0),
        };
        EnemyBaseStats {
            health,
            attack_power,
            defense,
            speed,
            range,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(
            self,
            EnemyType::GoblinChief | EnemyType::ElderTree | EnemyType::Lich
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub enemy_type: EnemyType,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub speed: u32,
    pub range: f64,
    pub buffs: Vec<Buff>,
    pub body: CombatEntity,
}

impl Enemy {
    /// Spawns an enemy with stats scaled to `level`.
    pub fn new(id: &str, enemy_type: EnemyType, level: u32, position: Position) -> Self {
        let base = enemy_type.base_stats();
        let m = level_multiplier(level);
        let scale = |v: u32| (v as f64 * m).round() as u32;
        let max_health = scale(base.health).max(1);
        Self {
            id: id.to_string(),
            enemy_type,
            level: level.max(1),
            health: max_health,
            max_health,
            attack_power: scale(base.attack_power),
            defense: scale(base.defense),
            speed: scale(base.speed),
            range: base.range * m,
            buffs: Vec::new(),
            body: CombatEntity::at(position),
        }
    }

    pub fn name(&self) -> &'static str {
        self.enemy_type.name()
    }

    fn buffed(&self, base: u32, pick: fn(&StatModifier) -> Option<i32>) -> u32 {
        let delta: i64 = self
            .buffs
            .iter()
            .filter_map(|b| pick(&b.modifier))
            .map(i64::from)
            .sum();
        (base as i64 + delta).max(0) as u32
    }

    pub fn effective_attack(&self) -> u32 {
        self.buffed(self.attack_power, |m| match m {
            StatModifier::AttackPower(v) => Some(*v),
            _ => None,
        })
    }

    pub fn effective_speed(&self) -> u32 {
        self.buffed(self.speed, |m| match m {
            StatModifier::Speed(v) => Some(*v),
            _ => None,
        })
    }

    pub fn expire_buffs(&mut self, now: Timestamp) -> usize {
        expire_buffs(&mut self.buffs, now)
    }

    pub fn is_active(&self) -> bool {
        !self.body.defeated && self.health > 0
    }
}

impl Combatant for Enemy {
    fn combatant_id(&self) -> &str {
        &self.id
    }

    fn effective_defense(&self) -> u32 {
        self.buffed(self.defense, |m| match m {
            StatModifier::Defense(v) => Some(*v),
            _ => None,
        })
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        let reduced = calculate_damage_reduction(amount, self.effective_defense());
        self.take_true_damage(reduced)
    }

    fn take_true_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.health);
        self.health -= actual;
        actual
    }

    fn heal(&mut self, amount: u32) -> u32 {
        if self.health == 0 {
            return 0;
        }
        let actual = amount.min(self.max_health - self.health);
        self.health += actual;
        actual
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn add_buff(&mut self, buff: Buff) {
        add_or_refresh(&mut self.buffs, buff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_multiplier() {
        assert_eq!(level_multiplier(1), 1.0);
        assert!((level_multiplier(3) - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_enemy_scales_with_level() {
        let low = Enemy::new("e1", EnemyType::Goblin, 1, Position::default());
        let high = Enemy::new("e2", EnemyType::Goblin, 5, Position::default());
        assert_eq!(low.max_health, 45);
        assert_eq!(high.max_health, 72); // 45 * 1.6
        assert_eq!(high.attack_power, 16);
        assert!(high.range > low.range);
    }

    #[test]
    fn test_attack_cooldown_floor() {
        assert_eq!(attack_cooldown_ms(2000, 10), 1500);
        assert_eq!(attack_cooldown_ms(2500, 10), 2000);
        assert_eq!(attack_cooldown_ms(2000, 100), MIN_ATTACK_COOLDOWN_MS);
    }

    #[test]
    fn test_step_toward_stops_at_range() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(10.0, 0.0);
        let moved = from.step_toward(&to, 100.0, 4.0);
        assert!((moved.x - 6.0).abs() < 1e-9);
        let partial = from.step_toward(&to, 2.0, 4.0);
        assert!((partial.x - 2.0).abs() < 1e-9);
        let stay = Position::new(7.0, 0.0).step_toward(&to, 2.0, 4.0);
        assert_eq!(stay, Position::new(7.0, 0.0));
    }

    #[test]
    fn test_enemy_defense_buff_and_damage() {
        let mut slime = Enemy::new("e", EnemyType::Slime, 1, Position::default());
        slime.add_buff(Buff::new("harden", StatModifier::Defense(99), 0, 1000));
        assert_eq!(slime.effective_defense(), 100);
        assert_eq!(slime.take_damage(20), 10);
        assert_eq!(slime.take_true_damage(100), 20);
        assert!(!slime.is_alive());
        assert_eq!(slime.heal(5), 0);
    }

    #[test]
    fn test_bosses_flagged() {
        assert!(EnemyType::Lich.is_boss());
        assert!(!EnemyType::Bat.is_boss());
    }
}
