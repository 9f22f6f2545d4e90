//! Traits describing the collaborators the engine consumes.
//!
//! Oracles expose the scaling formulas, spell definitions, telemetry hooks and
//! randomness. The [`CombatEnv`] aggregate bundles the read-only ones so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations. The RNG is not part of the bundle: it is stateful and
//! owned by the engine.
mod error;
mod rng;
mod scaling;
mod spells;
mod telemetry;

pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use scaling::{FixedScaling, ScalingOracle};
pub use spells::{SpellDefinition, SpellId, SpellOracle};
pub use telemetry::{TelemetryContext, TelemetrySink, TracingTelemetry};

/// Aggregates the read-only oracles required by the combat engine.
///
/// The scaling service is mandatory. Spells and telemetry are optional: an
/// environment without spells resolves weapon attacks only, and one without
/// telemetry simply emits nothing.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    scaling: &'a dyn ScalingOracle,
    spells: Option<&'a dyn SpellOracle>,
    telemetry: Option<&'a dyn TelemetrySink>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(scaling: &'a dyn ScalingOracle) -> Self {
        Self {
            scaling,
            spells: None,
            telemetry: None,
        }
    }

    pub fn with_all(
        scaling: &'a dyn ScalingOracle,
        spells: &'a dyn SpellOracle,
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        Self {
            scaling,
            spells: Some(spells),
            telemetry: Some(telemetry),
        }
    }

    #[must_use]
    pub fn with_spells(mut self, spells: &'a dyn SpellOracle) -> Self {
        self.spells = Some(spells);
        self
    }

    #[must_use]
    pub fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Returns the scaling service.
    pub fn scaling(&self) -> &'a dyn ScalingOracle {
        self.scaling
    }

    /// Returns the SpellOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpellsNotAvailable` if no spell oracle was provided.
    pub fn spells(&self) -> Result<&'a dyn SpellOracle, OracleError> {
        self.spells.ok_or(OracleError::SpellsNotAvailable)
    }

    /// Looks up a spell if a spell oracle is present.
    pub fn find_spell(&self, id: &SpellId) -> Option<SpellDefinition> {
        self.spells.and_then(|spells| spells.load_spell(id))
    }

    /// Returns the telemetry sink, if any.
    pub fn telemetry(&self) -> Option<&'a dyn TelemetrySink> {
        self.telemetry
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("spells", &self.spells.is_some())
            .field("telemetry", &self.telemetry.is_some())
            .finish_non_exhaustive()
    }
}
