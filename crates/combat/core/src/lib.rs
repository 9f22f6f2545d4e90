//! Combat resolution rules shared by every embedding of the encounter system.
//!
//! `combat-core` turns an attack declaration (attacker, ordered target list,
//! optional weapon-or-spell source) into a fully resolved [`CombatOutcome`]:
//! hit/dodge/block rolls, weapon or spell damage, critical hits, status
//! multipliers, resistance metadata and death detection. All randomness flows
//! through an injected [`RngOracle`], so a seeded engine replays identically.
//!
//! Characters, numeric tuning and spell data live outside this crate and are
//! reached through the [`Combatant`] trait and the oracles bundled in
//! [`CombatEnv`]. All state mutation flows through [`CombatEngine`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod env;
pub mod error;

pub use combat::{
    ATTACK_HIT_EVENT, AffinityReport, AttackSource, CombatCapabilities, CombatEngine, CombatError,
    CombatEvent, CombatEventKind, CombatOutcome, CombatStats, CombatantRef, DamageModifier,
    DamagePacket, DamagePath, DamageSource, DamageType, Rejection,
};
pub use combatant::{
    Affinities, CastingState, CombatActor, CombatActorBuilder, Combatant, CombatantId, DamageDirection,
    Offhand, ResourcePool, Role, Roster, StatBlock, StatKind, StatusEffectKind, StatusEffects,
    Weapon,
};
pub use config::{CombatConfig, ConfigError};
pub use env::{
    CombatEnv, FixedScaling, OracleError, PcgRng, RngOracle, ScalingOracle, ScriptedRng,
    SpellDefinition, SpellId, SpellOracle, TelemetryContext, TelemetrySink, TracingTelemetry,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
