//! Zone catalog and level unlock progression.
//!
//! Each zone is a short chain of levels ending in a boss fight. Clearing a
//! level unlocks the next one, and the boss opens the following zone.

mod data;
mod progression;

pub use data::{
    get_all_zones, get_level, get_zone, next_level, EnemySpawn, LevelRewards, Zone, ZoneLevel,
};
pub use progression::ZoneProgression;
