//! Per-combatant combat queries and rolls.
//!
//! [`CombatCapabilities`] answers "does this roll succeed" for one combatant.
//! What a success does is the engine's concern, which keeps the roll order
//! (hit, dodge, block, crit) in one place.

use crate::combatant::{Combatant, StatKind};
use crate::env::RngOracle;

/// Snapshot of the numbers a combatant brings to a fight.
///
/// Computed on demand from the combatant's stats; never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: f64,
    pub defense: f64,
    pub max_health: f64,
    pub current_health: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub block_chance: f64,
    pub dodge_chance: f64,
    pub accuracy: f64,
    /// Floor of the stat, always at least 1.
    pub max_targets: usize,
    pub attack_cooldown: f64,
}

impl CombatStats {
    pub fn from_combatant(combatant: &dyn Combatant) -> Self {
        Self {
            attack: combatant.stat(StatKind::Attack),
            defense: combatant.stat(StatKind::Defense),
            max_health: combatant.max_health(),
            current_health: combatant.current_health(),
            crit_chance: combatant.stat(StatKind::CritChance),
            crit_multiplier: combatant.stat(StatKind::CritMultiplier),
            block_chance: combatant.stat(StatKind::BlockChance),
            dodge_chance: combatant.stat(StatKind::DodgeChance),
            accuracy: combatant.stat(StatKind::Accuracy),
            max_targets: max_targets(combatant.stat(StatKind::MaxTargets)),
            attack_cooldown: combatant.stat(StatKind::AttackCooldown),
        }
    }
}

fn max_targets(raw: f64) -> usize {
    if raw.is_finite() && raw >= 1.0 {
        raw.floor() as usize
    } else {
        1
    }
}

/// Combat queries for one combatant, drawing from a borrowed RNG.
///
/// Never mutates the combatant. Every roll consumes exactly one draw, except
/// a block chance of 1.0 or more, which blocks without drawing.
pub struct CombatCapabilities<'c, R: RngOracle + ?Sized> {
    combatant: &'c dyn Combatant,
    opponent: Option<&'c dyn Combatant>,
    rng: &'c mut R,
}

impl<'c, R: RngOracle + ?Sized> CombatCapabilities<'c, R> {
    pub fn new(combatant: &'c dyn Combatant, rng: &'c mut R) -> Self {
        Self {
            combatant,
            opponent: None,
            rng,
        }
    }

    /// Attaches the combatant on the other side of the exchange.
    #[must_use]
    pub fn with_opponent(mut self, opponent: &'c dyn Combatant) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn combatant(&self) -> &'c dyn Combatant {
        self.combatant
    }

    pub fn opponent(&self) -> Option<&'c dyn Combatant> {
        self.opponent
    }

    /// Alive, holding a usable weapon, with stamina left.
    ///
    /// Weaponless casters are handled by the engine's spell path, not here.
    pub fn can_attack(&self) -> bool {
        self.combatant.is_alive()
            && self.combatant.weapon().is_some_and(|weapon| weapon.is_usable())
            && self.combatant.current_stamina() > 0.0
    }

    /// Effective block chance: a nonzero offhand chance wins over the stat.
    pub fn block_chance(&self) -> f64 {
        match self.combatant.offhand() {
            Some(offhand) if offhand.block_chance > 0.0 => offhand.block_chance,
            _ => self.combatant.stat(StatKind::BlockChance),
        }
    }

    pub fn can_block(&mut self) -> bool {
        let chance = self.block_chance();
        if chance >= 1.0 {
            tracing::trace!(combatant = %self.combatant.id(), chance, "guaranteed block");
            return true;
        }
        let blocked = self.rng.chance(chance);
        tracing::trace!(combatant = %self.combatant.id(), chance, blocked, "block roll");
        blocked
    }

    pub fn can_dodge(&mut self) -> bool {
        let chance = self.combatant.stat(StatKind::DodgeChance);
        let dodged = self.rng.chance(chance);
        tracing::trace!(combatant = %self.combatant.id(), chance, dodged, "dodge roll");
        dodged
    }

    pub fn is_critical_hit(&mut self) -> bool {
        let chance = self.combatant.stat(StatKind::CritChance);
        let critical = self.rng.chance(chance);
        tracing::trace!(combatant = %self.combatant.id(), chance, critical, "crit roll");
        critical
    }

    pub fn apply_critical_damage(&self, base: f64) -> f64 {
        base * self.combatant.stat(StatKind::CritMultiplier)
    }

    /// Pure snapshot; consumes no draws.
    pub fn combat_stats(&self) -> CombatStats {
        CombatStats::from_combatant(self.combatant)
    }
}
