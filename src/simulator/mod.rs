//! Tick-driven encounter simulator and its host-facing types.

mod config;
#[allow(clippy::module_inception)]
mod simulator;
mod snapshot;

pub use config::{PartyMemberConfig, SimulatorConfig};
pub use simulator::{EncounterState, Simulator};
pub use snapshot::{ArenaSnapshot, BuffSnapshot, EnemySnapshot, PlayerSnapshot};
