//! Named combat stats.

use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// Stats the combat core reads from a combatant.
///
/// Names are snake_case (`"block_chance"`), so stats can be addressed by the
/// string keys used in content files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Strength,
    Intellect,
    Attack,
    Defense,
    Accuracy,
    CritChance,
    CritMultiplier,
    BlockChance,
    DodgeChance,
    MaxTargets,
    AttackCooldown,
}

impl StatKind {
    /// Value assumed when a stat block does not set the stat.
    pub const fn default_value(self) -> f64 {
        match self {
            StatKind::CritMultiplier => 1.5,
            StatKind::MaxTargets => 1.0,
            StatKind::AttackCooldown => 1.0,
            _ => 0.0,
        }
    }
}

/// Sparse stat storage; unset stats fall back to [`StatKind::default_value`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatBlock(BTreeMap<StatKind, f64>);

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatKind) -> f64 {
        self.0
            .get(&stat)
            .copied()
            .unwrap_or_else(|| stat.default_value())
    }

    pub fn set(&mut self, stat: StatKind, value: f64) {
        self.0.insert(stat, value);
    }

    #[must_use]
    pub fn with(mut self, stat: StatKind, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    /// Explicitly set stats, in stat order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        self.0.iter().map(|(kind, value)| (*kind, *value))
    }
}

impl FromIterator<(StatKind, f64)> for StatBlock {
    fn from_iter<T: IntoIterator<Item = (StatKind, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
