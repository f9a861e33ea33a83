//! Party members: classes, abilities, buffs, progression and persistence.

pub mod abilities;
pub mod behavior;
pub mod buffs;
#[allow(clippy::module_inception)]
pub mod character;
pub mod class;
pub mod combatant;
pub mod save;

pub use abilities::{AbilityKind, SpecialAbility};
pub use behavior::{ClassState, ComboState};
pub use buffs::{Buff, StatModifier};
pub use character::{AbilityOutcome, AttackOutcome, Character};
pub use class::CharacterClass;
pub use combatant::Combatant;
