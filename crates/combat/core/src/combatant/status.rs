//! Status effect system for combatants.
//!
//! Status effects are conditions that restrict actions or scale damage.
//! Expiry is the scheduler's concern; the combat core only reads which
//! effects are active when an attack resolves.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Whether a multiplier applies to damage a combatant deals or receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageDirection {
    Outgoing,
    Incoming,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Crowd Control (restricts actions)
    // ========================================================================
    /// Cannot act at all.
    Stunned,

    /// Cannot attack.
    Disarmed,

    /// Encased in ice; cannot attack.
    Frozen,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Outgoing damage increased.
    Empowered,

    /// Incoming damage halved.
    Shielded,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Outgoing damage reduced.
    Weakened,

    /// Incoming damage increased.
    Vulnerable,

    // ========================================================================
    // Special States
    // ========================================================================
    /// Hits harder, but is hit harder too.
    Berserk,
}

impl StatusEffectKind {
    /// Returns true if this effect prevents attacking.
    pub const fn prevents_attack(self) -> bool {
        matches!(self, Self::Stunned | Self::Disarmed | Self::Frozen)
    }

    /// Damage multiplier contributed by this effect.
    pub const fn damage_multiplier(self, direction: DamageDirection) -> f64 {
        use DamageDirection::*;
        match (self, direction) {
            (Self::Empowered, Outgoing) => 1.25,
            (Self::Weakened, Outgoing) => 0.75,
            (Self::Berserk, Outgoing) => 1.5,
            (Self::Berserk, Incoming) => 1.25,
            (Self::Shielded, Incoming) => 0.5,
            (Self::Vulnerable, Incoming) => 1.5,
            _ => 1.0,
        }
    }
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffectKind, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.contains(&kind)
    }

    /// Adds a status effect.
    ///
    /// Returns false when the effect could not be added because the set is
    /// full. Adding an effect that is already active is a no-op.
    pub fn add(&mut self, kind: StatusEffectKind) -> bool {
        if self.has(kind) {
            return true;
        }
        self.effects.try_push(kind).is_ok()
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| *e != kind);
    }

    /// Returns true unless an active effect prevents attacking.
    pub fn can_attack(&self) -> bool {
        !self.effects.iter().any(|e| e.prevents_attack())
    }

    /// Combined damage multiplier of all active effects for one direction.
    pub fn damage_multiplier(&self, direction: DamageDirection) -> f64 {
        self.effects
            .iter()
            .map(|e| e.damage_multiplier(direction))
            .product()
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectKind> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}

impl FromIterator<StatusEffectKind> for StatusEffects {
    fn from_iter<T: IntoIterator<Item = StatusEffectKind>>(iter: T) -> Self {
        let mut effects = Self::empty();
        for kind in iter {
            effects.add(kind);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crowd_control_blocks_attacks() {
        let mut effects = StatusEffects::empty();
        assert!(effects.can_attack());
        effects.add(StatusEffectKind::Stunned);
        assert!(!effects.can_attack());
        effects.remove(StatusEffectKind::Stunned);
        assert!(effects.can_attack());
    }

    #[test]
    fn multipliers_stack_multiplicatively() {
        let effects: StatusEffects = [StatusEffectKind::Berserk, StatusEffectKind::Shielded]
            .into_iter()
            .collect();
        assert!((effects.damage_multiplier(DamageDirection::Outgoing) - 1.5).abs() < 1e-12);
        assert!((effects.damage_multiplier(DamageDirection::Incoming) - 0.625).abs() < 1e-12);
    }

    #[test]
    fn empty_set_is_neutral() {
        let effects = StatusEffects::empty();
        assert_eq!(effects.damage_multiplier(DamageDirection::Outgoing), 1.0);
        assert_eq!(effects.damage_multiplier(DamageDirection::Incoming), 1.0);
    }

    #[test]
    fn duplicates_are_ignored_and_capacity_is_bounded() {
        let mut effects = StatusEffects::empty();
        assert!(effects.add(StatusEffectKind::Weakened));
        assert!(effects.add(StatusEffectKind::Weakened));
        assert_eq!(effects.len(), 1);

        let all = [
            StatusEffectKind::Stunned,
            StatusEffectKind::Disarmed,
            StatusEffectKind::Frozen,
            StatusEffectKind::Empowered,
            StatusEffectKind::Shielded,
            StatusEffectKind::Vulnerable,
            StatusEffectKind::Berserk,
        ];
        for kind in all {
            assert!(effects.add(kind));
        }
        assert_eq!(effects.len(), CombatConfig::MAX_STATUS_EFFECTS);
    }
}
