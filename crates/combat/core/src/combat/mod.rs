//! Combat resolution system.
//!
//! Turns an attack declaration into a resolved [`CombatOutcome`].
//!
//! # Architecture
//!
//! - **CombatEngine**: orchestrates validation, target selection, the
//!   per-target roll sequence and healing
//! - **CombatCapabilities**: answers single rolls (dodge, block, crit) for one
//!   combatant against the engine's RNG
//! - **DamagePacket**: one pending damage instance, folded into a number by the
//!   scaling oracle
//! - **CombatEvent / CombatOutcome**: ordered, mergeable result model
//!
//! # Roll order
//!
//! hit → dodge → block → crit, each `draw < chance`, one draw each.

mod capabilities;
mod damage;
mod engine;
mod error;
mod event;
mod healing;
mod outcome;
mod path;

pub use capabilities::{CombatCapabilities, CombatStats};
pub use damage::{DamageModifier, DamagePacket, DamageSource, DamageType};
pub use engine::{ATTACK_HIT_EVENT, CombatEngine};
pub use error::{CombatError, Rejection};
pub use event::{AffinityReport, CombatEvent, CombatEventKind, CombatantRef};
pub use outcome::CombatOutcome;
pub use path::{AttackSource, DamagePath};
