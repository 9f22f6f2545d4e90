//! Attack resolution pipeline.
//!
//! The [`CombatEngine`] is the only place combatant health is changed. It
//! validates the attacker, picks targets, resolves each exchange in a fixed
//! roll order and folds the per-target results into one [`CombatOutcome`].

use tracing::{debug, debug_span, info_span, warn};

use super::{
    AffinityReport, AttackSource, CombatCapabilities, CombatError, CombatEvent, CombatOutcome,
    CombatantRef, DamagePacket, DamagePath, DamageType, Rejection,
};
use crate::combatant::{Combatant, CombatantId, DamageDirection, Roster, StatKind};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, RngOracle, TelemetryContext};
use crate::error::GameError;

/// Telemetry event name emitted once per successful hit.
pub const ATTACK_HIT_EVENT: &str = "attack_hit";

/// Combat resolver owning the encounter's random number generator.
///
/// Resolution is synchronous. Callers sharing one engine across threads must
/// serialize access themselves (e.g. wrap it in a `Mutex`); `&mut self` on
/// every entry point enforces this within one thread. Nothing is retained
/// between calls except the RNG state.
pub struct CombatEngine<'a, R: RngOracle> {
    env: CombatEnv<'a>,
    config: CombatConfig,
    rng: R,
}

/// Numbers settled before the defender's health is touched.
struct ResolvedHit {
    attacker: CombatantRef,
    defender: CombatantRef,
    damage: f64,
    damage_type: DamageType,
    critical: bool,
    affinity: AffinityReport,
}

impl<'a, R: RngOracle> CombatEngine<'a, R> {
    pub fn new(env: CombatEnv<'a>, config: CombatConfig, rng: R) -> Self {
        Self { env, config, rng }
    }

    pub fn env(&self) -> CombatEnv<'a> {
        self.env
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Resolves `attacker` striking `targets` and mutates defender health.
    ///
    /// Never fails: precondition failures and per-target errors come back as
    /// an unsuccessful outcome with a descriptive message. The first
    /// per-target error aborts the remaining targets; events of targets
    /// already resolved are kept.
    pub fn execute_attack<S: Roster + ?Sized>(
        &mut self,
        roster: &mut S,
        attacker: CombatantId,
        targets: &[CombatantId],
        source: Option<AttackSource>,
    ) -> CombatOutcome {
        let _span = info_span!("execute_attack", attacker = %attacker, candidates = targets.len())
            .entered();

        let (path, selected) = match self.prepare(&*roster, attacker, targets, source.as_ref()) {
            Ok(prepared) => prepared,
            Err(rejection) => {
                debug!(%rejection, code = rejection.error_code(), "attack rejected");
                return CombatOutcome::rejected(rejection);
            }
        };
        debug!(?path, targets = selected.len(), "attack prepared");

        let mut outcome = CombatOutcome::new();
        for (index, &target) in selected.iter().enumerate() {
            match self.attack_vs_single(roster, attacker, target, &path) {
                Ok(sub) => outcome.merge(sub),
                Err(error) => {
                    let name = roster
                        .get(target)
                        .map_or_else(|| target.to_string(), |t| t.name().to_owned());
                    warn!(
                        defender = %target,
                        code = error.error_code(),
                        severity = error.severity().as_str(),
                        skipped = selected.len() - index - 1,
                        %error,
                        "per-target resolution failed; aborting attack"
                    );
                    outcome.merge(CombatOutcome::failed(format!(
                        "attack on {name} failed: {error}"
                    )));
                    break;
                }
            }
        }

        outcome
    }

    /// Validates the attacker and picks the damage path and target list.
    fn prepare<S: Roster + ?Sized>(
        &mut self,
        roster: &S,
        attacker_id: CombatantId,
        targets: &[CombatantId],
        source: Option<&AttackSource>,
    ) -> Result<(DamagePath, Vec<CombatantId>), Rejection> {
        let attacker = roster
            .get(attacker_id)
            .ok_or(Rejection::AttackerMissing(attacker_id))?;

        if !attacker.is_alive() {
            return Err(Rejection::AttackerDead {
                name: attacker.name().to_owned(),
            });
        }
        if !attacker.status().can_attack() {
            return Err(Rejection::AttackerIncapacitated {
                name: attacker.name().to_owned(),
            });
        }

        let path = DamagePath::select(attacker, source).ok_or(Rejection::NoWeaponOrSpell)?;

        let max_targets = CombatCapabilities::new(attacker, &mut self.rng)
            .combat_stats()
            .max_targets;

        let mut selected = Vec::with_capacity(max_targets.min(targets.len()));
        for &id in targets {
            if selected.len() == max_targets {
                break;
            }
            if id == attacker_id || selected.contains(&id) {
                continue;
            }
            if roster.get(id).is_some_and(|target| target.is_alive()) {
                selected.push(id);
            }
        }

        if selected.is_empty() {
            return Err(Rejection::NoValidTargets);
        }
        Ok((path, selected))
    }

    /// Resolves one attacker-vs-defender exchange.
    ///
    /// Roll order is hit, dodge, block, crit; a miss, dodge or block ends the
    /// exchange without further draws. A full hit consumes four draws (three
    /// when the block is guaranteed).
    ///
    /// # Errors
    ///
    /// Malformed weapon or spell data, unknown spells, scaling failures and
    /// combatants vanishing from the roster.
    pub fn attack_vs_single<S: Roster + ?Sized>(
        &mut self,
        roster: &mut S,
        attacker_id: CombatantId,
        defender_id: CombatantId,
        path: &DamagePath,
    ) -> Result<CombatOutcome, CombatError> {
        let _span =
            debug_span!("attack_vs_single", attacker = %attacker_id, defender = %defender_id)
                .entered();

        let mut outcome = CombatOutcome::new();
        let Some(hit) = self.roll_exchange(&*roster, attacker_id, defender_id, path, &mut outcome)?
        else {
            outcome.description = outcome.narrate();
            return Ok(outcome);
        };

        let defender = roster
            .get_mut(defender_id)
            .ok_or(CombatError::CombatantMissing(defender_id))?;
        let remaining = defender.take_damage(hit.damage, attacker_id, hit.damage_type);
        let lethal = remaining <= 0.0;
        debug!(damage = hit.damage, remaining, lethal, "damage applied");

        outcome.push(CombatEvent::DamageDealt {
            attacker: hit.attacker.clone(),
            defender: hit.defender.clone(),
            damage: hit.damage,
            damage_type: hit.damage_type,
            critical: hit.critical,
            affinity: hit.affinity,
        });
        if lethal {
            outcome.push(CombatEvent::Death {
                attacker: hit.attacker,
                defender: hit.defender,
            });
        }

        if let Some(telemetry) = self.env.telemetry() {
            telemetry.emit(
                ATTACK_HIT_EVENT,
                &TelemetryContext {
                    attacker: attacker_id,
                    defender: defender_id,
                    damage: hit.damage,
                    damage_type: hit.damage_type,
                    critical: hit.critical,
                    lethal,
                },
            );
        }

        outcome.description = outcome.narrate();
        Ok(outcome)
    }

    /// Runs the rolls and damage math for one exchange without mutating
    /// anyone. Returns `None` when the attack did not connect.
    fn roll_exchange<S: Roster + ?Sized>(
        &mut self,
        roster: &S,
        attacker_id: CombatantId,
        defender_id: CombatantId,
        path: &DamagePath,
        outcome: &mut CombatOutcome,
    ) -> Result<Option<ResolvedHit>, CombatError> {
        let attacker = roster
            .get(attacker_id)
            .ok_or(CombatError::CombatantMissing(attacker_id))?;
        let defender = roster
            .get(defender_id)
            .ok_or(CombatError::CombatantMissing(defender_id))?;
        let attacker_ref = CombatantRef::of(attacker);
        let defender_ref = CombatantRef::of(defender);

        let hit_chance = self.hit_chance(attacker, defender);
        outcome.push(CombatEvent::AttackStarted {
            attacker: attacker_ref.clone(),
            defender: defender_ref.clone(),
            hit_chance,
        });

        if !self.rng.chance(hit_chance) {
            debug!(hit_chance, "attack missed");
            outcome.push(CombatEvent::AttackMissed {
                attacker: attacker_ref,
                defender: defender_ref,
                hit_chance,
            });
            return Ok(None);
        }

        let mut defense = CombatCapabilities::new(defender, &mut self.rng).with_opponent(attacker);
        if defense.can_dodge() {
            outcome.push(CombatEvent::AttackDodged {
                attacker: attacker_ref,
                defender: defender_ref,
            });
            return Ok(None);
        }
        if defense.can_block() {
            outcome.push(CombatEvent::AttackBlocked {
                attacker: attacker_ref,
                defender: defender_ref,
            });
            return Ok(None);
        }

        let packet = self.build_packet(attacker, defender, path)?;
        let mut damage = self
            .env
            .scaling()
            .compute_damage(&packet, attacker, defender)?;
        if !damage.is_finite() {
            return Err(CombatError::NonFiniteDamage(damage));
        }

        let mut offense = CombatCapabilities::new(attacker, &mut self.rng).with_opponent(defender);
        let critical = offense.is_critical_hit();
        if critical {
            damage = offense.apply_critical_damage(damage);
            outcome.push(CombatEvent::CriticalHit {
                attacker: attacker_ref.clone(),
                defender: defender_ref.clone(),
                multiplier: attacker.stat(StatKind::CritMultiplier),
            });
        }

        damage *= attacker.status().damage_multiplier(DamageDirection::Outgoing);
        damage *= defender.status().damage_multiplier(DamageDirection::Incoming);

        let damage_type = packet.damage_type;
        Ok(Some(ResolvedHit {
            attacker: attacker_ref,
            defender: defender_ref,
            damage: damage.max(0.0),
            damage_type,
            critical,
            affinity: AffinityReport::lookup(defender.affinities(), damage_type),
        }))
    }

    /// Hit chance from the scaling service, degrading to the configured
    /// fallback when the service fails.
    fn hit_chance(&self, attacker: &dyn Combatant, defender: &dyn Combatant) -> f64 {
        let fallback = self.config.fallback_hit_chance;
        match self
            .env
            .scaling()
            .calculate_hit_chance(attacker, defender)
        {
            Ok(chance) if chance.is_finite() => chance.clamp(0.0, 1.0),
            Ok(chance) => {
                warn!(chance, fallback, "non-finite hit chance; using fallback");
                fallback
            }
            Err(error) => {
                warn!(%error, code = error.error_code(), fallback, "hit chance unavailable; using fallback");
                fallback
            }
        }
    }

    fn build_packet(
        &self,
        attacker: &dyn Combatant,
        defender: &dyn Combatant,
        path: &DamagePath,
    ) -> Result<DamagePacket, CombatError> {
        match path {
            DamagePath::Weapon(weapon) => {
                if !(weapon.base_damage.is_finite() && weapon.base_damage >= 0.0) {
                    return Err(CombatError::MalformedWeapon {
                        weapon: weapon.name.clone(),
                        damage: weapon.base_damage,
                    });
                }
                DamagePacket::from_weapon_attack(attacker, defender, Some(weapon), &self.config)
            }
            DamagePath::Spell {
                spell_id,
                base_power,
            } => {
                let (power, declared_type) = match base_power {
                    Some(power) => (
                        *power,
                        self.env.find_spell(spell_id).and_then(|def| def.damage_type),
                    ),
                    None => {
                        let definition = self
                            .env
                            .spells()?
                            .load_spell(spell_id)
                            .ok_or_else(|| CombatError::SpellNotFound(spell_id.clone()))?;
                        (definition.base_power, definition.damage_type)
                    }
                };
                if !(power.is_finite() && power >= 0.0) {
                    return Err(CombatError::MalformedSpell {
                        spell: spell_id.clone(),
                        power,
                    });
                }

                let damage_type = declared_type.unwrap_or_else(|| {
                    let inferred = DamageType::from_keyword(spell_id.as_str());
                    warn!(spell = %spell_id, %inferred, "spell has no damage type; inferred from its id");
                    inferred
                });

                let scaled = power * self.intellect_multiplier(attacker);
                let mut packet = DamagePacket::from_spell_cast(
                    attacker,
                    defender,
                    scaled,
                    Some(spell_id.clone()),
                    damage_type,
                )?;
                packet.apply_modifier("spell_bonus", self.config.spell_bonus);
                Ok(packet)
            }
            DamagePath::Fallback => {
                let scaled = self.config.fallback_spell_power * self.intellect_multiplier(attacker);
                DamagePacket::from_spell_cast(attacker, defender, scaled, None, DamageType::Arcane)
            }
        }
    }

    fn intellect_multiplier(&self, attacker: &dyn Combatant) -> f64 {
        self.config
            .intellect_multiplier(attacker.stat(StatKind::Intellect))
    }
}
