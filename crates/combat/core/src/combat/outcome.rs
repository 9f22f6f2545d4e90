//! Aggregate result of one attack or heal.

use super::{CombatEvent, CombatEventKind, Rejection};
use crate::combatant::CombatantId;

/// Ordered events plus running totals and a combat-log description.
///
/// Created fresh per call and handed to the caller; the engine keeps nothing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub success: bool,
    pub events: Vec<CombatEvent>,
    pub total_damage: f64,
    pub total_healing: f64,
    pub description: String,
}

impl CombatOutcome {
    /// Successful outcome with nothing recorded yet.
    pub fn new() -> Self {
        Self {
            success: true,
            events: Vec::new(),
            total_damage: 0.0,
            total_healing: 0.0,
            description: String::new(),
        }
    }

    /// Precondition failure: no events, description from the rejection.
    pub fn rejected(rejection: Rejection) -> Self {
        Self::failed(rejection.to_string())
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            success: false,
            description: description.into(),
            ..Self::new()
        }
    }

    /// Appends an event and folds its damage and healing into the totals.
    pub fn push(&mut self, event: CombatEvent) {
        self.total_damage += event.damage();
        self.total_healing += event.healing();
        self.events.push(event);
    }

    pub fn append_description(&mut self, clause: &str) {
        if clause.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push_str("; ");
        }
        self.description.push_str(clause);
    }

    /// Folds `other` into `self`: events concatenate, totals add, success is
    /// the conjunction, descriptions join with `"; "`.
    pub fn merge(&mut self, other: CombatOutcome) {
        self.success &= other.success;
        self.total_damage += other.total_damage;
        self.total_healing += other.total_healing;
        self.events.extend(other.events);
        self.append_description(&other.description);
    }

    /// One clause per event, in order, joined with `"; "`.
    pub fn narrate(&self) -> String {
        self.events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn events_of(&self, kind: CombatEventKind) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter().filter(move |event| event.kind() == kind)
    }

    pub fn count(&self, kind: CombatEventKind) -> usize {
        self.events_of(kind).count()
    }

    /// Total damage dealt to one combatant.
    pub fn damage_to(&self, id: CombatantId) -> f64 {
        self.events
            .iter()
            .filter(|event| event.subject().id == id)
            .map(CombatEvent::damage)
            .sum()
    }
}

impl Default for CombatOutcome {
    fn default() -> Self {
        Self::new()
    }
}
