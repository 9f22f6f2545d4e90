use std::fmt;

use crate::combat::DamageType;

/// Identifier of a spell definition, e.g. `"fireball"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub String);

impl SpellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpellId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Spell data the engine needs to build a spell damage packet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,

    /// Unscaled power; the engine applies the caster's intellect multiplier.
    pub base_power: f64,

    /// Element of the spell.
    ///
    /// Every new definition should set this. `None` is only tolerated for
    /// legacy data, where the engine infers the type from the spell id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: Option<DamageType>,
}

impl SpellDefinition {
    pub fn new(id: impl Into<SpellId>, base_power: f64, damage_type: DamageType) -> Self {
        Self {
            id: id.into(),
            base_power,
            damage_type: Some(damage_type),
        }
    }

    /// Definition without an explicit element.
    pub fn untyped(id: impl Into<SpellId>, base_power: f64) -> Self {
        Self {
            id: id.into(),
            base_power,
            damage_type: None,
        }
    }
}

/// Oracle providing spell definitions.
pub trait SpellOracle: Send + Sync {
    fn load_spell(&self, id: &SpellId) -> Option<SpellDefinition>;
}
