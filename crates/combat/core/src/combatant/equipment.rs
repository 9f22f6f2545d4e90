//! Equipment and elemental affinities read during resolution.

use std::collections::BTreeMap;

use crate::combat::DamageType;

/// Main-hand weapon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub base_damage: f64,
    pub damage_type: DamageType,

    /// Remaining uses; `None` for weapons that never wear out.
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: Option<u32>,
}

impl Weapon {
    pub fn new(name: impl Into<String>, base_damage: f64, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            base_damage,
            damage_type,
            durability: None,
        }
    }

    #[must_use]
    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = Some(durability);
        self
    }

    /// A broken weapon (durability exhausted) cannot be used to attack.
    pub fn is_usable(&self) -> bool {
        self.durability != Some(0)
    }
}

/// Off-hand item (shield, parrying dagger) granting a block chance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offhand {
    pub name: String,
    pub block_chance: f64,
}

impl Offhand {
    pub fn new(name: impl Into<String>, block_chance: f64) -> Self {
        Self {
            name: name.into(),
            block_chance,
        }
    }
}

/// Per-damage-type resistances and weaknesses, as fractions.
///
/// A resistance of `0.25` against fire means a 25% reduction; a weakness of
/// `0.5` means a 50% increase. Applying them is the scaling service's job.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affinities {
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: BTreeMap<DamageType, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weaknesses: BTreeMap<DamageType, f64>,
}

impl Affinities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resistance(&self, damage_type: DamageType) -> f64 {
        self.resistances.get(&damage_type).copied().unwrap_or(0.0)
    }

    pub fn weakness(&self, damage_type: DamageType) -> f64 {
        self.weaknesses.get(&damage_type).copied().unwrap_or(0.0)
    }

    pub fn resists(&self, damage_type: DamageType) -> bool {
        self.resistance(damage_type) > 0.0
    }

    pub fn is_weak_to(&self, damage_type: DamageType) -> bool {
        self.weakness(damage_type) > 0.0
    }
}
