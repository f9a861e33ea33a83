//! Stick Ranger - auto-battle combat and progression core
//!
//! A party of stick-figure heroes fights waves of enemies in a small arena.
//! The host drives [`simulator::Simulator`] with ticks and commands and renders
//! the events and snapshots it gets back.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod items;
pub mod simulator;
pub mod zones;
