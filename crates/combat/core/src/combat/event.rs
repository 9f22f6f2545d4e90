//! Structured facts recorded while resolving attacks and heals.

use std::fmt;

use strum::EnumDiscriminants;

use super::DamageType;
use crate::combatant::{Affinities, Combatant, CombatantId};

/// Id and display name of a combatant at the time of the event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRef {
    pub id: CombatantId,
    pub name: String,
}

impl CombatantRef {
    pub fn of(combatant: &dyn Combatant) -> Self {
        Self {
            id: combatant.id(),
            name: combatant.name().to_owned(),
        }
    }
}

impl fmt::Display for CombatantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Defender resistance and weakness against the damage type of a hit.
///
/// Informational only: the scaling service has already accounted for them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffinityReport {
    pub resistance: Option<f64>,
    pub weakness: Option<f64>,
}

impl AffinityReport {
    pub fn lookup(affinities: &Affinities, damage_type: DamageType) -> Self {
        let positive = |value: f64| (value > 0.0).then_some(value);
        Self {
            resistance: positive(affinities.resistance(damage_type)),
            weakness: positive(affinities.weakness(damage_type)),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.resistance.is_none() && self.weakness.is_none()
    }
}

/// One atomic fact about a resolution, in narrative order.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(CombatEventKind), derive(Hash, strum::Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum CombatEvent {
    AttackStarted {
        attacker: CombatantRef,
        defender: CombatantRef,
        hit_chance: f64,
    },
    AttackMissed {
        attacker: CombatantRef,
        defender: CombatantRef,
        hit_chance: f64,
    },
    AttackDodged {
        attacker: CombatantRef,
        defender: CombatantRef,
    },
    AttackBlocked {
        attacker: CombatantRef,
        defender: CombatantRef,
    },
    CriticalHit {
        attacker: CombatantRef,
        defender: CombatantRef,
        multiplier: f64,
    },
    DamageDealt {
        attacker: CombatantRef,
        defender: CombatantRef,
        damage: f64,
        damage_type: DamageType,
        critical: bool,
        affinity: AffinityReport,
    },
    HealingApplied {
        healer: CombatantRef,
        target: CombatantRef,
        amount: f64,
    },
    Death {
        attacker: CombatantRef,
        defender: CombatantRef,
    },
}

impl CombatEvent {
    pub fn kind(&self) -> CombatEventKind {
        self.into()
    }

    /// The combatant on the receiving end (defender, or heal target).
    pub fn subject(&self) -> &CombatantRef {
        use CombatEvent::*;
        match self {
            AttackStarted { defender, .. }
            | AttackMissed { defender, .. }
            | AttackDodged { defender, .. }
            | AttackBlocked { defender, .. }
            | CriticalHit { defender, .. }
            | DamageDealt { defender, .. }
            | Death { defender, .. } => defender,
            HealingApplied { target, .. } => target,
        }
    }

    /// The attack connected.
    pub fn hit(&self) -> bool {
        matches!(self, Self::CriticalHit { .. } | Self::DamageDealt { .. })
    }

    pub fn critical(&self) -> bool {
        matches!(
            self,
            Self::CriticalHit { .. } | Self::DamageDealt { critical: true, .. }
        )
    }

    pub fn blocked(&self) -> bool {
        matches!(self, Self::AttackBlocked { .. })
    }

    pub fn dodged(&self) -> bool {
        matches!(self, Self::AttackDodged { .. })
    }

    pub fn damage(&self) -> f64 {
        match self {
            Self::DamageDealt { damage, .. } => *damage,
            _ => 0.0,
        }
    }

    pub fn healing(&self) -> f64 {
        match self {
            Self::HealingApplied { amount, .. } => *amount,
            _ => 0.0,
        }
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        match self {
            Self::DamageDealt { damage_type, .. } => Some(*damage_type),
            _ => None,
        }
    }
}

/// Short narrative clause, e.g. `"Aria deals 12.0 fire damage to Brute"`.
impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CombatEvent::*;
        match self {
            AttackStarted {
                attacker,
                defender,
                hit_chance,
            } => write!(
                f,
                "{attacker} attacks {defender} ({:.0}% to hit)",
                hit_chance * 100.0
            ),
            AttackMissed {
                attacker, defender, ..
            } => write!(f, "{attacker} misses {defender}"),
            AttackDodged { attacker, defender } => {
                write!(f, "{defender} dodges {attacker}'s attack")
            }
            AttackBlocked { attacker, defender } => {
                write!(f, "{defender} blocks {attacker}'s attack")
            }
            CriticalHit {
                defender,
                multiplier,
                ..
            } => write!(f, "critical hit on {defender} (x{multiplier:.2})"),
            DamageDealt {
                attacker,
                defender,
                damage,
                damage_type,
                affinity,
                ..
            } => {
                write!(f, "{attacker} deals {damage:.1} {damage_type} damage to {defender}")?;
                if let Some(resistance) = affinity.resistance {
                    write!(f, " (resists {:.0}%)", resistance * 100.0)?;
                }
                if let Some(weakness) = affinity.weakness {
                    write!(f, " (weak {:.0}%)", weakness * 100.0)?;
                }
                Ok(())
            }
            HealingApplied {
                healer,
                target,
                amount,
            } => write!(f, "{healer} heals {target} for {amount:.1}"),
            Death { defender, .. } => write!(f, "{defender} is defeated"),
        }
    }
}
