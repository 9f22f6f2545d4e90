//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised by, or about, the collaborators bundled in `CombatEnv`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// SpellOracle is not available in the environment.
    #[error("SpellOracle not available")]
    SpellsNotAvailable,

    /// The scaling service could not evaluate its formula.
    #[error("scaling formula failed: {0}")]
    ScalingFailed(String),

    /// Collaborator data is malformed (NaN stats, negative powers, ...).
    #[error("invalid collaborator data: {0}")]
    InvalidData(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            SpellsNotAvailable => ErrorSeverity::Fatal,
            InvalidData(_) => ErrorSeverity::Validation,
            ScalingFailed(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SpellsNotAvailable => "ORACLE_SPELLS_NOT_AVAILABLE",
            ScalingFailed(_) => "ORACLE_SCALING_FAILED",
            InvalidData(_) => "ORACLE_INVALID_DATA",
        }
    }
}
