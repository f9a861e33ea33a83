//! Arena combat: bodies, enemies and per-tick decisions.

pub mod logic;
pub mod types;

pub use logic::ArenaRules;
pub use types::{
    CombatEntity, Enemy, EnemyType, HealRangePolicy, MovementState, PartyMember, Position,
};
