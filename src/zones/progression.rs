//! Level unlock progression.

use serde::{Deserialize, Serialize};

use super::data::{get_level, next_level};

/// Tracks which levels the party can enter and which it has cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProgression {
    /// Level currently being fought, if any.
    pub current: Option<(u32, u32)>,
    /// (zone_id, level_id) pairs the party may enter.
    pub unlocked_levels: Vec<(u32, u32)>,
    /// (zone_id, level_id) pairs cleared at least once.
    pub cleared_levels: Vec<(u32, u32)>,
    pub total_victories: u64,
}

impl Default for ZoneProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneProgression {
    /// Creates a new progression with only the first level open.
    pub fn new() -> Self {
        Self {
            current: None,
            unlocked_levels: vec![(1, 1)],
            cleared_levels: vec![],
            total_victories: 0,
        }
    }

    pub fn is_unlocked(&self, zone_id: u32, level_id: u32) -> bool {
        self.unlocked_levels.contains(&(zone_id, level_id))
    }

    pub fn is_cleared(&self, zone_id: u32, level_id: u32) -> bool {
        self.cleared_levels.contains(&(zone_id, level_id))
    }

    /// True if the level exists and is unlocked.
    pub fn can_enter(&self, zone_id: u32, level_id: u32) -> bool {
        get_level(zone_id, level_id).is_some() && self.is_unlocked(zone_id, level_id)
    }

    /// Sets the current level. Returns false if it cannot be entered.
    pub fn travel_to(&mut self, zone_id: u32, level_id: u32) -> bool {
        if !self.can_enter(zone_id, level_id) {
            return false;
        }
        self.current = Some((zone_id, level_id));
        true
    }

    /// Unlocks a level.
    pub fn unlock(&mut self, zone_id: u32, level_id: u32) {
        if !self.is_unlocked(zone_id, level_id) {
            self.unlocked_levels.push((zone_id, level_id));
            self.unlocked_levels.sort();
        }
    }

    /// Records a victory. Returns the level newly unlocked by it, if any.
    pub fn record_clear(&mut self, zone_id: u32, level_id: u32) -> Option<(u32, u32)> {
        self.total_victories += 1;
        if !self.is_cleared(zone_id, level_id) {
            self.cleared_levels.push((zone_id, level_id));
        }
        let (next_zone, next_level_id) = next_level(zone_id, level_id)?;
        if self.is_unlocked(next_zone, next_level_id) {
            return None;
        }
        self.unlock(next_zone, next_level_id);
        Some((next_zone, next_level_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_progression_default() {
        let prog = ZoneProgression::new();
        assert!(prog.is_unlocked(1, 1));
        assert!(!prog.is_unlocked(1, 2));
        assert!(prog.current.is_none());
    }

    #[test]
    fn test_travel_requires_unlock() {
        let mut prog = ZoneProgression::new();
        assert!(prog.travel_to(1, 1));
        assert_eq!(prog.current, Some((1, 1)));
        assert!(!prog.travel_to(1, 2));
        assert_eq!(prog.current, Some((1, 1)));
    }

    #[test]
    fn test_unknown_level_cannot_be_entered() {
        let mut prog = ZoneProgression::new();
        prog.unlock(7, 1);
        assert!(!prog.can_enter(7, 1));
    }

    #[test]
    fn test_clear_unlocks_next() {
        let mut prog = ZoneProgression::new();
        assert_eq!(prog.record_clear(1, 1), Some((1, 2)));
        assert!(prog.is_cleared(1, 1));
        // Clearing again unlocks nothing new
        assert_eq!(prog.record_clear(1, 1), None);
        assert_eq!(prog.total_victories, 2);
        assert_eq!(
            prog.cleared_levels.iter().filter(|&&l| l == (1, 1)).count(),
            1
        );
    }

    #[test]
    fn test_boss_clear_opens_next_zone() {
        let mut prog = ZoneProgression::new();
        assert_eq!(prog.record_clear(1, 4), Some((2, 1)));
        assert!(prog.can_enter(2, 1));
    }
}
