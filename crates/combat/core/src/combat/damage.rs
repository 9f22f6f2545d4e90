//! Damage types and the packet describing one pending damage instance.

use strum::{Display, EnumIter, EnumString};

use super::CombatError;
use crate::combatant::{Combatant, CombatantId, StatKind, Weapon};
use crate::config::CombatConfig;
use crate::env::SpellId;
use crate::error::ErrorContext;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage calculation.
///
/// Different damage types may have different resistance values on combatants.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Physical damage (melee, projectiles).
    Physical,
    /// Fire damage (burns, explosions).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
    /// Arcane damage (pure magic).
    Arcane,
    /// True damage (ignores all resistances).
    True,
}

impl DamageType {
    /// Guesses an element from keywords in a spell id.
    ///
    /// Compatibility shim for legacy spell data without an explicit type.
    /// Anything unrecognised is arcane.
    pub fn from_keyword(spell_id: &str) -> Self {
        const KEYWORDS: [(&[&str], DamageType); 4] = [
            (&["fire", "flame"], DamageType::Fire),
            (&["ice", "frost", "cold"], DamageType::Cold),
            (&["lightning", "shock", "thunder"], DamageType::Lightning),
            (&["poison", "venom"], DamageType::Poison),
        ];

        let lowered = spell_id.to_ascii_lowercase();
        KEYWORDS
            .iter()
            .find(|(words, _)| words.iter().any(|word| lowered.contains(*word)))
            .map_or(DamageType::Arcane, |(_, damage_type)| *damage_type)
    }
}

// ============================================================================
// Damage Packet
// ============================================================================

/// Named multiplicative factor applied to a packet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifier {
    pub name: String,
    pub factor: f64,
}

/// Where a packet's base damage came from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Weapon attack; `None` when the attacker is unarmed.
    Weapon(Option<Weapon>),
    /// Spell cast; `spell_id` is `None` for the fallback path.
    Spell {
        spell_id: Option<SpellId>,
        base_power: f64,
    },
}

/// One pending damage application from `attacker` to `defender`.
///
/// Built fresh for every attack-vs-target pair and only mutated through
/// [`apply_modifier`](Self::apply_modifier) before the scaling service folds
/// it into a number. [`effective_damage`](Self::effective_damage) may be
/// negative; clamping happens when health is mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamagePacket {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub base_damage: f64,
    pub source: DamageSource,
    pub damage_type: DamageType,
    modifiers: Vec<DamageModifier>,
}

impl DamagePacket {
    /// Packet for a weapon swing.
    ///
    /// Unarmed attacks deal `attack × unarmed_attack_factor` physical damage.
    ///
    /// # Errors
    ///
    /// [`CombatError::InvalidCombatant`] if either party is
    /// [`CombatantId::NONE`].
    pub fn from_weapon_attack(
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
        weapon: Option<&Weapon>,
        config: &CombatConfig,
    ) -> Result<Self, CombatError> {
        check_parties(attacker.id(), defender.id())?;

        let (base_damage, damage_type) = match weapon {
            Some(weapon) => (weapon.base_damage, weapon.damage_type),
            None => (
                attacker.stat(StatKind::Attack) * config.unarmed_attack_factor,
                DamageType::Physical,
            ),
        };

        Ok(Self {
            attacker: attacker.id(),
            defender: defender.id(),
            base_damage,
            source: DamageSource::Weapon(weapon.cloned()),
            damage_type,
            modifiers: Vec::new(),
        })
    }

    /// Packet for a spell.
    ///
    /// `power` must already include the caster's intellect scaling; the packet
    /// knows nothing about caster stats.
    ///
    /// # Errors
    ///
    /// [`CombatError::InvalidCombatant`] if either party is
    /// [`CombatantId::NONE`].
    pub fn from_spell_cast(
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
        power: f64,
        spell_id: Option<SpellId>,
        damage_type: DamageType,
    ) -> Result<Self, CombatError> {
        check_parties(attacker.id(), defender.id())?;

        Ok(Self {
            attacker: attacker.id(),
            defender: defender.id(),
            base_damage: power,
            source: DamageSource::Spell {
                spell_id,
                base_power: power,
            },
            damage_type,
            modifiers: Vec::new(),
        })
    }

    /// Appends a multiplicative modifier. Modifiers apply in insertion order.
    pub fn apply_modifier(&mut self, name: impl Into<String>, factor: f64) {
        self.modifiers.push(DamageModifier {
            name: name.into(),
            factor,
        });
    }

    pub fn modifiers(&self) -> &[DamageModifier] {
        &self.modifiers
    }

    /// Base damage times the product of every modifier factor.
    pub fn effective_damage(&self) -> f64 {
        self.modifiers
            .iter()
            .fold(self.base_damage, |damage, modifier| damage * modifier.factor)
    }

    pub fn is_spell(&self) -> bool {
        matches!(self.source, DamageSource::Spell { .. })
    }
}

fn check_parties(attacker: CombatantId, defender: CombatantId) -> Result<(), CombatError> {
    if attacker.is_none() {
        return Err(CombatError::InvalidCombatant {
            role: "attacker",
            context: ErrorContext::new()
                .with_target(defender)
                .with_message("damage packet without attacker"),
        });
    }
    if defender.is_none() {
        return Err(CombatError::InvalidCombatant {
            role: "defender",
            context: ErrorContext::new()
                .with_actor(attacker)
                .with_message("damage packet without defender"),
        });
    }
    Ok(())
}
