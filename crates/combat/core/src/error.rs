//! Common error infrastructure for combat-core.
//!
//! Domain errors (`CombatError`, `OracleError`, `Rejection`) live next to the
//! code that raises them; this module holds the classification shared by all
//! of them.
//!
//! # Design Principles
//!
//! - **Never thrown at the caller**: attack and healing entry points convert
//!   every error into a failed `CombatOutcome`
//! - **Severity Classification**: errors are categorized for logging and
//!   recovery strategies
//! - **Rich Context**: errors can name the combatants involved

use crate::combatant::CombatantId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the game loop can simply continue (target died mid-volley)
/// - **Validation**: bad data supplied by a collaborator (unknown spell id)
/// - **Internal**: a programmer error inside the embedding (invalid packet parties)
/// - **Fatal**: a required collaborator is missing entirely
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error: retrying later or with other inputs may succeed.
    Recoverable,

    /// Validation error: collaborator data is malformed or unknown.
    Validation,

    /// Internal error: an invariant the engine relies on was violated.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error: the engine cannot proceed without the missing collaborator.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Combatant performing the attack or heal (if applicable).
    pub actor: Option<CombatantId>,

    /// Combatant on the receiving end (if applicable).
    pub target: Option<CombatantId>,

    /// Optional static message providing additional context.
    #[cfg_attr(feature = "serde", serde(skip_deserializing))]
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actor: None,
            target: None,
            message: None,
        }
    }

    /// Attaches the acting combatant (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: CombatantId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches the receiving combatant (builder pattern).
    #[must_use]
    pub const fn with_target(mut self, target: CombatantId) -> Self {
        self.target = Some(target);
        self
    }

    /// Attaches a static message (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give every variant a stable `error_code` for log filtering and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn context_builder_records_parties() {
        let ctx = ErrorContext::new()
            .with_actor(CombatantId(1))
            .with_target(CombatantId(2))
            .with_message("spell lookup");
        assert_eq!(ctx.actor, Some(CombatantId(1)));
        assert_eq!(ctx.target, Some(CombatantId(2)));
        assert_eq!(ctx.message, Some("spell lookup"));
    }
}
