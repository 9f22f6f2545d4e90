//! Fire-and-forget hooks for cross-cutting listeners (achievements, analytics).

use crate::combat::DamageType;
use crate::combatant::CombatantId;

/// Facts about one successful hit, passed to [`TelemetrySink::emit`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryContext {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub damage: f64,
    pub damage_type: DamageType,
    pub critical: bool,
    pub lethal: bool,
}

/// Receiver of combat telemetry.
///
/// The engine calls [`emit`](Self::emit) once per successful hit and never
/// looks at what the sink does with it. Implementations must not panic.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: &str, context: &TelemetryContext);
}

/// Sink that forwards every event to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn emit(&self, event: &str, context: &TelemetryContext) {
        tracing::debug!(
            target: "combat::telemetry",
            event,
            attacker = %context.attacker,
            defender = %context.defender,
            damage = context.damage,
            damage_type = %context.damage_type,
            critical = context.critical,
            lethal = context.lethal,
            "combat telemetry"
        );
    }
}
