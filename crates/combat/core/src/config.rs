//! Combat constants and tunable parameters.

use crate::error::{ErrorSeverity, GameError};

/// Tunable numbers consumed by damage-path construction.
///
/// Balancing is owned by whoever loads this struct (see `combat-content`);
/// the engine only reads it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Share of the attack stat used as base damage for unarmed weapon packets.
    pub unarmed_attack_factor: f64,

    /// Spell power is scaled by `1 + intellect / intellect_divisor`.
    pub intellect_divisor: f64,

    /// Multiplicative `spell_bonus` modifier appended to every spell packet.
    pub spell_bonus: f64,

    /// Base power of the degenerate path: no weapon and no identifiable spell.
    pub fallback_spell_power: f64,

    /// Hit chance used when the scaling service cannot produce one.
    pub fallback_hit_chance: f64,
}

impl CombatConfig {
    // ===== compile-time limits =====
    /// Maximum number of simultaneous status effects on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_UNARMED_ATTACK_FACTOR: f64 = 0.5;
    pub const DEFAULT_INTELLECT_DIVISOR: f64 = 10.0;
    pub const DEFAULT_SPELL_BONUS: f64 = 1.1;
    pub const DEFAULT_FALLBACK_SPELL_POWER: f64 = 5.0;
    pub const DEFAULT_FALLBACK_HIT_CHANCE: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            unarmed_attack_factor: Self::DEFAULT_UNARMED_ATTACK_FACTOR,
            intellect_divisor: Self::DEFAULT_INTELLECT_DIVISOR,
            spell_bonus: Self::DEFAULT_SPELL_BONUS,
            fallback_spell_power: Self::DEFAULT_FALLBACK_SPELL_POWER,
            fallback_hit_chance: Self::DEFAULT_FALLBACK_HIT_CHANCE,
        }
    }

    /// Multiplier applied to spell power for a caster with the given intellect.
    pub fn intellect_multiplier(&self, intellect: f64) -> f64 {
        1.0 + intellect / self.intellect_divisor
    }

    /// Checks the values for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.intellect_divisor.is_finite() && self.intellect_divisor > 0.0) {
            return Err(ConfigError::NonPositive("intellect_divisor"));
        }
        if !(self.unarmed_attack_factor.is_finite() && self.unarmed_attack_factor >= 0.0) {
            return Err(ConfigError::Negative("unarmed_attack_factor"));
        }
        if !(self.spell_bonus.is_finite() && self.spell_bonus >= 0.0) {
            return Err(ConfigError::Negative("spell_bonus"));
        }
        if !(self.fallback_spell_power.is_finite() && self.fallback_spell_power >= 0.0) {
            return Err(ConfigError::Negative("fallback_spell_power"));
        }
        if !(0.0..=1.0).contains(&self.fallback_hit_chance) {
            return Err(ConfigError::NotAProbability("fallback_hit_chance"));
        }
        Ok(())
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid [`CombatConfig`] values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be a positive finite number")]
    NonPositive(&'static str),

    #[error("{0} must be a non-negative finite number")]
    Negative(&'static str),

    #[error("{0} must lie in [0, 1]")]
    NotAProbability(&'static str),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositive(_) => "CONFIG_NON_POSITIVE",
            Self::Negative(_) => "CONFIG_NEGATIVE",
            Self::NotAProbability(_) => "CONFIG_NOT_A_PROBABILITY",
        }
    }
}
