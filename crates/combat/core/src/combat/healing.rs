//! Healing resolution.

use tracing::{debug, debug_span};

use super::{CombatEngine, CombatEvent, CombatOutcome, CombatantRef, Rejection};
use crate::combatant::{CombatantId, Roster};
use crate::env::RngOracle;
use crate::error::GameError;

impl<R: RngOracle> CombatEngine<'_, R> {
    /// Heals `target` by up to `amount` on behalf of `healer`.
    ///
    /// Never overheals: the amount applied is capped at the target's missing
    /// health. Failures are reported as an unsuccessful outcome and leave the
    /// target untouched. When `into` is given, the result is merged into it
    /// (healing as one effect of a larger spell).
    pub fn apply_healing<S: Roster + ?Sized>(
        &self,
        roster: &mut S,
        healer: CombatantId,
        target: CombatantId,
        amount: f64,
        into: Option<CombatOutcome>,
    ) -> CombatOutcome {
        let _span = debug_span!("apply_healing", healer = %healer, target = %target).entered();

        let result = match heal(roster, healer, target, amount) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                debug!(%rejection, code = rejection.error_code(), "healing rejected");
                CombatOutcome::rejected(rejection)
            }
        };

        match into {
            Some(mut existing) => {
                existing.merge(result);
                existing
            }
            None => result,
        }
    }
}

fn heal<S: Roster + ?Sized>(
    roster: &mut S,
    healer_id: CombatantId,
    target_id: CombatantId,
    amount: f64,
) -> Result<CombatOutcome, Rejection> {
    let healer = roster
        .get(healer_id)
        .map(CombatantRef::of)
        .ok_or(Rejection::HealerMissing(healer_id))?;
    let target = roster
        .get_mut(target_id)
        .ok_or(Rejection::HealTargetMissing(target_id))?;

    if !(amount.is_finite() && amount > 0.0) {
        return Err(Rejection::NonPositiveHealing(amount));
    }
    if !target.is_alive() {
        return Err(Rejection::TargetDead {
            name: target.name().to_owned(),
        });
    }
    if target.max_health() <= 0.0 {
        return Err(Rejection::NoHealthPool {
            name: target.name().to_owned(),
        });
    }

    let healed = target.restore_health(amount);
    debug!(requested = amount, healed, health = target.current_health(), "healing applied");

    let event = CombatEvent::HealingApplied {
        healer,
        target: CombatantRef::of(&*target),
        amount: healed,
    };
    let mut outcome = CombatOutcome::new();
    outcome.append_description(&event.to_string());
    outcome.push(event);
    Ok(outcome)
}
