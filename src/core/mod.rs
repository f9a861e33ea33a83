//! Core game math, clock, constants and tick events.

pub mod clock;
pub mod constants;
pub mod progression;
pub mod stats;
pub mod tick;

pub use clock::{GameClock, Timestamp};
pub use progression::CharacterProgression;
pub use stats::{CharacterStats, DamageFormula, EquipmentStats};
pub use tick::{TickEvent, TickResult};
