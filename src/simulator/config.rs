//! Simulator configuration.

use crate::character::CharacterClass;
use crate::combat::{ArenaRules, HealRangePolicy};
use crate::core::constants::{
    ENEMY_RESPAWN_DELAY_MS, MAX_GAME_SPEED, MIN_GAME_SPEED, TICK_INTERVAL_MS,
};
use crate::core::stats::DamageFormula;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One party slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMemberConfig {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
}

impl PartyMemberConfig {
    pub fn new(id: &str, name: &str, class: CharacterClass) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class,
        }
    }
}

/// Configuration for a simulator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Host polling interval at 1x speed.
    pub tick_interval_ms: u64,

    /// Polling multiplier, clamped to 0.25-8.0.
    pub game_speed: f64,

    /// When false, nobody in the arena acts on their own.
    pub auto_battle: bool,

    /// Mitigation used for arena auto-attacks.
    pub damage_formula: DamageFormula,

    pub heal_range: HealRangePolicy,

    /// Arena time between a victory and the next wave.
    pub respawn_delay_ms: u64,

    pub party: Vec<PartyMemberConfig>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            game_speed: 1.0,
            auto_battle: true,
            damage_formula: DamageFormula::Flat,
            heal_range: HealRangePolicy::MoveIntoRange,
            respawn_delay_ms: ENEMY_RESPAWN_DELAY_MS,
            party: vec![
                PartyMemberConfig::new("warrior", "Warrior", CharacterClass::Warrior),
                PartyMemberConfig::new("archer", "Archer", CharacterClass::Archer),
                PartyMemberConfig::new("mage", "Mage", CharacterClass::Mage),
                PartyMemberConfig::new("priest", "Priest", CharacterClass::Priest),
            ],
        }
    }
}

impl SimulatorConfig {
    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if !(MIN_GAME_SPEED..=MAX_GAME_SPEED).contains(&self.game_speed) {
            return Err(ConfigError::Invalid(format!(
                "game_speed {} outside {}-{}",
                self.game_speed, MIN_GAME_SPEED, MAX_GAME_SPEED
            )));
        }
        if self.party.is_empty() {
            return Err(ConfigError::Invalid("party is empty".to_string()));
        }
        let mut ids = HashSet::new();
        for member in &self.party {
            if !ids.insert(member.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate party id '{}'",
                    member.id
                )));
            }
        }
        Ok(())
    }

    pub fn rules(&self) -> ArenaRules {
        ArenaRules {
            damage_formula: self.damage_formula,
            heal_range: self.heal_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.party.len(), 4);
        assert_eq!(config.damage_formula, DamageFormula::Flat);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulatorConfig::from_json(
            r#"{"damage_formula": "diminishing_returns", "heal_range": "unlimited"}"#,
        )
        .unwrap();
        assert_eq!(config.damage_formula, DamageFormula::DiminishingReturns);
        assert_eq!(config.heal_range, HealRangePolicy::Unlimited);
        assert_eq!(config.respawn_delay_ms, ENEMY_RESPAWN_DELAY_MS);
    }

    #[test]
    fn test_party_from_json() {
        let config = SimulatorConfig::from_json(
            r#"{"party": [{"id": "b", "name": "Bo", "class": "Boxer"}]}"#,
        )
        .unwrap();
        assert_eq!(config.party[0].class, CharacterClass::Boxer);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = SimulatorConfig::from_json(
            r#"{"party": [{"id": "x", "name": "A", "class": "Mage"},
                          {"id": "x", "name": "B", "class": "Priest"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            SimulatorConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(SimulatorConfig::from_json(r#"{"game_speed": 50.0}"#).is_err());
    }
}
