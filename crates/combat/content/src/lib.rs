//! Data-driven combat content and loaders.
//!
//! This crate provides the collaborator data `combat-core` consumes through
//! its oracles:
//! - Spell catalog ([`SpellBook`], a `SpellOracle`)
//! - Scaling tables ([`TableScaling`], a `ScalingOracle`)
//! - Combat constants (`CombatConfig`, via TOML)
//! - Sample combatants (`CombatActor`, via RON)
//!
//! Content is handed to the engine through `CombatEnv` and never mutated by it.

pub mod spells;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spells::SpellBook;
pub use tables::{DamageTable, HitTable, ScalingTables, TableScaling};

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatContent, ConfigLoader, ContentFactory, RosterLoader, SpellLoader, TablesLoader,
};
