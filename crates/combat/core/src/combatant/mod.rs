//! Combatant capability surface.
//!
//! The engine never sees a concrete character type. It reads and mutates
//! combatants only through the [`Combatant`] trait and finds them through a
//! [`Roster`]. Lifecycle (creation, leveling, inventory) is owned by the
//! embedding game; [`CombatActor`] is a ready-made implementation for content
//! files, tools and tests.

mod actor;
mod equipment;
mod roster;
mod stats;
mod status;

use std::fmt;

pub use actor::{CombatActor, CombatActorBuilder, ResourcePool};
pub use equipment::{Affinities, Offhand, Weapon};
pub use roster::Roster;
pub use stats::{StatBlock, StatKind};
pub use status::{DamageDirection, StatusEffectKind, StatusEffects};

use crate::combat::DamageType;
use crate::env::SpellId;

/// Unique identifier of a combatant within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Reserved id that never denotes a real combatant.
    pub const NONE: Self = Self(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Job marker consulted by damage-path selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Martial,
    Caster,
}

/// Explicit spell-casting state.
///
/// Replaces probing the character for ad-hoc "is casting" attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastingState {
    /// The combatant is in the middle of casting.
    #[cfg_attr(feature = "serde", serde(default))]
    pub casting: bool,

    /// Spell queued by the scheduler for the next attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_spell: Option<SpellId>,
}

impl CastingState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn casting(spell: Option<SpellId>) -> Self {
        Self {
            casting: true,
            pending_spell: spell,
        }
    }
}

/// Read/write contract the combat core needs from a character-like entity.
pub trait Combatant {
    fn id(&self) -> CombatantId;

    fn name(&self) -> &str;

    fn is_alive(&self) -> bool {
        self.current_health() > 0.0
    }

    /// Current value of a combat stat.
    fn stat(&self, stat: StatKind) -> f64;

    /// Stat lookup by its snake_case name (`"crit_chance"`); `None` if the
    /// name is not a known stat.
    fn stat_by_name(&self, name: &str) -> Option<f64> {
        name.parse::<StatKind>().ok().map(|kind| self.stat(kind))
    }

    fn current_health(&self) -> f64;

    /// Maximum health; zero or less means the combatant has no health pool.
    fn max_health(&self) -> f64;

    fn set_current_health(&mut self, value: f64);

    fn current_mana(&self) -> f64;

    fn max_mana(&self) -> f64;

    fn current_stamina(&self) -> f64;

    fn weapon(&self) -> Option<&Weapon>;

    fn offhand(&self) -> Option<&Offhand>;

    fn status(&self) -> &StatusEffects;

    fn affinities(&self) -> &Affinities;

    fn casting(&self) -> &CastingState;

    fn role(&self) -> Role;

    /// Applies `amount` damage and returns the remaining health, clamped at zero.
    fn take_damage(
        &mut self,
        amount: f64,
        _source: CombatantId,
        _damage_type: DamageType,
    ) -> f64 {
        let remaining = (self.current_health() - amount.max(0.0)).max(0.0);
        self.set_current_health(remaining);
        remaining
    }

    /// Restores up to `amount` health without exceeding the maximum and
    /// returns how much was actually restored.
    fn restore_health(&mut self, amount: f64) -> f64 {
        let current = self.current_health();
        let healed = amount.max(0.0).min((self.max_health() - current).max(0.0));
        self.set_current_health(current + healed);
        healed
    }
}
