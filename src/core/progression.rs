use super::constants::{SKILL_POINTS_PER_LEVEL, STAT_POINTS_PER_LEVEL, XP_CURVE_BASE};
use serde::{Deserialize, Serialize};

/// Calculates the XP required to advance from `level` to the next level.
pub fn xp_for_next_level(level: u32) -> u64 {
    let level = level.max(1) as u64;
    XP_CURVE_BASE * level * level
}

/// Level and experience bookkeeping for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProgression {
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub stat_points: u32,
    pub skill_points: u32,
}

impl Default for CharacterProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterProgression {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: xp_for_next_level(1),
            stat_points: 0,
            skill_points: 0,
        }
    }

    /// Advances one level. Experience resets to zero.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.experience = 0;
        self.experience_to_next = xp_for_next_level(self.level);
        self.stat_points += STAT_POINTS_PER_LEVEL;
        self.skill_points += SKILL_POINTS_PER_LEVEL;
    }

    pub fn has_level_up_pending(&self) -> bool {
        self.experience >= self.experience_to_next
    }

    /// Spends stat points. Returns false without change if not enough are banked.
    pub fn spend_stat_points(&mut self, amount: u32) -> bool {
        if amount > self.stat_points {
            return false;
        }
        self.stat_points -= amount;
        true
    }

    /// Spends skill points. Returns false without change if not enough are banked.
    pub fn spend_skill_points(&mut self, amount: u32) -> bool {
        if amount > self.skill_points {
            return false;
        }
        self.skill_points -= amount;
        true
    }
}
