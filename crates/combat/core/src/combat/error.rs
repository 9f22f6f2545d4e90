//! Combat error types.

use crate::combatant::CombatantId;
use crate::env::{OracleError, SpellId};
use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Errors raised while resolving one attacker-vs-target exchange.
///
/// The engine never returns these from its entry points; they are caught at
/// the per-target boundary and turned into a failed outcome naming the target.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    /// A damage packet was built for a combatant that does not exist.
    #[error("invalid {role}: not a real combatant")]
    InvalidCombatant {
        role: &'static str,
        context: ErrorContext,
    },

    /// A combatant disappeared from the roster mid-resolution.
    #[error("combatant {0} not found")]
    CombatantMissing(CombatantId),

    #[error("spell '{0}' not found")]
    SpellNotFound(SpellId),

    #[error("spell '{spell}' has invalid power {power}")]
    MalformedSpell { spell: SpellId, power: f64 },

    #[error("weapon '{weapon}' has invalid base damage {damage}")]
    MalformedWeapon { weapon: String, damage: f64 },

    #[error("damage formula produced a non-finite value ({0})")]
    NonFiniteDamage(f64),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InvalidCombatant { .. } => ErrorSeverity::Internal,
            CombatantMissing(_) => ErrorSeverity::Recoverable,
            SpellNotFound(_) | MalformedSpell { .. } | MalformedWeapon { .. } => {
                ErrorSeverity::Validation
            }
            NonFiniteDamage(_) => ErrorSeverity::Validation,
            Oracle(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            CombatError::InvalidCombatant { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            InvalidCombatant { .. } => "COMBAT_INVALID_COMBATANT",
            CombatantMissing(_) => "COMBAT_COMBATANT_MISSING",
            SpellNotFound(_) => "COMBAT_SPELL_NOT_FOUND",
            MalformedSpell { .. } => "COMBAT_MALFORMED_SPELL",
            MalformedWeapon { .. } => "COMBAT_MALFORMED_WEAPON",
            NonFiniteDamage(_) => "COMBAT_NON_FINITE_DAMAGE",
            Oracle(err) => err.error_code(),
        }
    }
}

/// Precondition failures reported as an unsuccessful outcome.
///
/// The `Display` text becomes the outcome description.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("attacker {0} not found")]
    AttackerMissing(CombatantId),

    #[error("{name} is dead and cannot attack")]
    AttackerDead { name: String },

    #[error("{name} is incapacitated and cannot attack")]
    AttackerIncapacitated { name: String },

    #[error("no valid weapon or spell available")]
    NoWeaponOrSpell,

    #[error("no valid targets available")]
    NoValidTargets,

    #[error("healer {0} not found")]
    HealerMissing(CombatantId),

    #[error("heal target {0} not found")]
    HealTargetMissing(CombatantId),

    #[error("healing amount must be positive, got {0}")]
    NonPositiveHealing(f64),

    #[error("{name} is dead and cannot be healed")]
    TargetDead { name: String },

    #[error("{name} has no health pool")]
    NoHealthPool { name: String },
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Rejection::NonPositiveHealing(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use Rejection::*;
        match self {
            AttackerMissing(_) => "REJECT_ATTACKER_MISSING",
            AttackerDead { .. } => "REJECT_ATTACKER_DEAD",
            AttackerIncapacitated { .. } => "REJECT_ATTACKER_INCAPACITATED",
            NoWeaponOrSpell => "REJECT_NO_WEAPON_OR_SPELL",
            NoValidTargets => "REJECT_NO_VALID_TARGETS",
            HealerMissing(_) => "REJECT_HEALER_MISSING",
            HealTargetMissing(_) => "REJECT_HEAL_TARGET_MISSING",
            NonPositiveHealing(_) => "REJECT_NON_POSITIVE_HEALING",
            TargetDead { .. } => "REJECT_TARGET_DEAD",
            NoHealthPool { .. } => "REJECT_NO_HEALTH_POOL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_errors_keep_their_classification() {
        let err = CombatError::from(OracleError::SpellsNotAvailable);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "ORACLE_SPELLS_NOT_AVAILABLE");
        assert_eq!(err.to_string(), "SpellOracle not available");
    }

    #[test]
    fn unknown_spell_is_a_combat_validation_error() {
        let err = CombatError::SpellNotFound("meteor".into());
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "COMBAT_SPELL_NOT_FOUND");
        assert_eq!(err.to_string(), "spell 'meteor' not found");
    }

    #[test]
    fn invalid_combatant_is_internal_with_context() {
        let err = CombatError::InvalidCombatant {
            role: "defender",
            context: ErrorContext::new().with_actor(CombatantId(4)),
        };
        assert!(err.severity().is_internal());
        assert_eq!(err.context().and_then(|c| c.actor), Some(CombatantId(4)));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            Rejection::NoWeaponOrSpell.to_string(),
            "no valid weapon or spell available"
        );
        assert_eq!(
            Rejection::TargetDead {
                name: "Brute".into()
            }
            .to_string(),
            "Brute is dead and cannot be healed"
        );
        assert_eq!(
            Rejection::AttackerMissing(CombatantId(3)).to_string(),
            "attacker #3 not found"
        );
    }
}
