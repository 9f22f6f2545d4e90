use crate::combat::DamagePacket;
use crate::combatant::{Combatant, StatKind};
use crate::env::OracleError;

/// Oracle providing the numeric combat formulas.
///
/// This oracle owns balance: how accuracy converts to a hit chance and how a
/// [`DamagePacket`] (base damage, modifiers, damage type) folds into a scalar
/// against a defender. The engine treats both calls as pure functions and
/// never inspects how they are computed.
pub trait ScalingOracle: Send + Sync {
    /// Probability in `[0, 1]` that `attacker` connects with `defender`.
    fn calculate_hit_chance(
        &self,
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
    ) -> Result<f64, OracleError>;

    /// Damage produced by `packet` before crits and status multipliers.
    fn compute_damage(
        &self,
        packet: &DamagePacket,
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
    ) -> Result<f64, OracleError>;
}

/// Minimal scaling service: a fixed hit chance and packet damage as-is.
///
/// Useful for scripted encounters and for embeddings that apply their own
/// mitigation elsewhere. Accuracy stats add to the base chance when
/// `use_accuracy` is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedScaling {
    pub hit_chance: f64,
    pub use_accuracy: bool,
}

impl FixedScaling {
    pub const fn new(hit_chance: f64) -> Self {
        Self {
            hit_chance,
            use_accuracy: false,
        }
    }

    /// Always hits; damage equals the packet's effective damage.
    pub const fn always_hit() -> Self {
        Self::new(1.0)
    }

    #[must_use]
    pub const fn with_accuracy(mut self) -> Self {
        self.use_accuracy = true;
        self
    }
}

impl ScalingOracle for FixedScaling {
    fn calculate_hit_chance(
        &self,
        attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        let bonus = if self.use_accuracy {
            attacker.stat(StatKind::Accuracy)
        } else {
            0.0
        };
        Ok((self.hit_chance + bonus).clamp(0.0, 1.0))
    }

    fn compute_damage(
        &self,
        packet: &DamagePacket,
        _attacker: &dyn Combatant,
        _defender: &dyn Combatant,
    ) -> Result<f64, OracleError> {
        let damage = packet.effective_damage();
        if damage.is_finite() {
            Ok(damage)
        } else {
            Err(OracleError::InvalidData(format!(
                "packet damage is not finite: {damage}"
            )))
        }
    }
}
