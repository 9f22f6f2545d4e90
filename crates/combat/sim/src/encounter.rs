//! Round-based encounter between one attacker and a group of defenders.

use combat_core::{
    CombatActor, CombatEngine, CombatOutcome, Combatant, CombatantId, RngOracle, Roster,
};
use serde::Serialize;

/// One attacker against a list of defenders.
///
/// Each round the attacker strikes every living defender, then every
/// surviving defender strikes back. The encounter ends when either side has
/// nobody left standing.
pub struct Encounter<'a, R: RngOracle> {
    engine: CombatEngine<'a, R>,
    roster: Vec<CombatActor>,
    attacker: CombatantId,
    defenders: Vec<CombatantId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub outcomes: Vec<CombatOutcome>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EncounterReport {
    pub rounds: Vec<RoundReport>,
    pub survivors: Vec<String>,
}

impl EncounterReport {
    pub fn total_damage(&self) -> f64 {
        self.rounds
            .iter()
            .flat_map(|round| &round.outcomes)
            .map(|outcome| outcome.total_damage)
            .sum()
    }
}

impl<'a, R: RngOracle> Encounter<'a, R> {
    pub fn new(
        engine: CombatEngine<'a, R>,
        roster: Vec<CombatActor>,
        attacker: CombatantId,
        defenders: Vec<CombatantId>,
    ) -> Self {
        Self {
            engine,
            roster,
            attacker,
            defenders,
        }
    }

    /// Plays up to `rounds` rounds, stopping early once a side is defeated.
    pub fn run(&mut self, rounds: u32) -> EncounterReport {
        let mut report = Vec::new();
        for round in 1..=rounds {
            if self.is_over() {
                break;
            }
            report.push(self.play_round(round));
        }

        let survivors = self
            .roster
            .iter()
            .filter(|actor| self.is_participant(actor.id) && actor.is_alive())
            .map(|actor| actor.name.clone())
            .collect();
        EncounterReport {
            rounds: report,
            survivors,
        }
    }

    pub fn play_round(&mut self, round: u32) -> RoundReport {
        let _span = tracing::info_span!("round", round).entered();
        let mut outcomes = Vec::new();

        let living = self.living_defenders();
        outcomes.push(
            self.engine
                .execute_attack(&mut self.roster, self.attacker, &living, None),
        );

        for defender in self.living_defenders() {
            if !self.is_alive(self.attacker) {
                break;
            }
            outcomes.push(self.engine.execute_attack(
                &mut self.roster,
                defender,
                &[self.attacker],
                None,
            ));
        }

        RoundReport { round, outcomes }
    }

    pub fn is_over(&self) -> bool {
        !self.is_alive(self.attacker) || self.living_defenders().is_empty()
    }

    fn living_defenders(&self) -> Vec<CombatantId> {
        self.defenders
            .iter()
            .copied()
            .filter(|&id| self.is_alive(id))
            .collect()
    }

    fn is_alive(&self, id: CombatantId) -> bool {
        Roster::get(self.roster.as_slice(), id).is_some_and(|actor| actor.is_alive())
    }

    fn is_participant(&self, id: CombatantId) -> bool {
        id == self.attacker || self.defenders.contains(&id)
    }
}
