//! Weapon-or-spell decision for an attack.

use crate::combatant::{Combatant, Role, Weapon};
use crate::env::SpellId;

/// What the caller says the attack is made with.
///
/// Supplying a source skips the attacker-state based selection in
/// [`DamagePath::select`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackSource {
    Weapon(Weapon),
    /// Spell with caller-supplied, unscaled power. The spell oracle is only
    /// consulted for the element.
    Spell { spell_id: SpellId, base_power: f64 },
}

/// How damage for one attack will be produced.
#[derive(Clone, Debug, PartialEq)]
pub enum DamagePath {
    Weapon(Weapon),
    /// `base_power` is `None` when the definition must come from the spell
    /// oracle.
    Spell {
        spell_id: SpellId,
        base_power: Option<f64>,
    },
    /// No weapon and no identifiable spell: intellect-scaled constant.
    Fallback,
}

impl DamagePath {
    /// Picks the damage path, or `None` if the attacker has neither a usable
    /// weapon nor a spell to cast.
    ///
    /// Without an explicit source the priority is: casting flag, pending
    /// spell, weaponless caster, weapon.
    pub fn select(attacker: &dyn Combatant, source: Option<&AttackSource>) -> Option<Self> {
        match source {
            Some(AttackSource::Weapon(weapon)) => {
                usable(attacker, weapon).then(|| Self::Weapon(weapon.clone()))
            }
            Some(AttackSource::Spell {
                spell_id,
                base_power,
            }) => Some(Self::Spell {
                spell_id: spell_id.clone(),
                base_power: Some(*base_power),
            }),
            None => Self::from_state(attacker),
        }
    }

    fn from_state(attacker: &dyn Combatant) -> Option<Self> {
        let casting = attacker.casting();
        let pending = casting.pending_spell.as_ref().map(|spell_id| Self::Spell {
            spell_id: spell_id.clone(),
            base_power: None,
        });

        if casting.casting {
            return Some(pending.unwrap_or(Self::Fallback));
        }
        if pending.is_some() {
            return pending;
        }

        match attacker.weapon() {
            None if attacker.role() == Role::Caster => Some(Self::Fallback),
            Some(weapon) if usable(attacker, weapon) => Some(Self::Weapon(weapon.clone())),
            _ => None,
        }
    }

    pub fn is_spell(&self) -> bool {
        !matches!(self, Self::Weapon(_))
    }
}

fn usable(attacker: &dyn Combatant, weapon: &Weapon) -> bool {
    weapon.is_usable() && attacker.current_stamina() > 0.0
}
