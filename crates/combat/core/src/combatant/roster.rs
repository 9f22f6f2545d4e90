//! Lookup of combatants by id.
//!
//! An id that does not resolve plays the role of an absent combatant: the
//! engine rejects it instead of dereferencing anything.

use std::collections::BTreeMap;

use super::{Combatant, CombatantId};

/// Storage the engine resolves attackers, defenders and healers from.
pub trait Roster {
    fn get(&self, id: CombatantId) -> Option<&dyn Combatant>;

    fn get_mut(&mut self, id: CombatantId) -> Option<&mut dyn Combatant>;

    fn has(&self, id: CombatantId) -> bool {
        self.get(id).is_some()
    }
}

impl<C: Combatant> Roster for [C] {
    fn get(&self, id: CombatantId) -> Option<&dyn Combatant> {
        if id.is_none() {
            return None;
        }
        self.iter()
            .find(|c| c.id() == id)
            .map(|c| c as &dyn Combatant)
    }

    fn get_mut(&mut self, id: CombatantId) -> Option<&mut dyn Combatant> {
        if id.is_none() {
            return None;
        }
        self.iter_mut()
            .find(|c| c.id() == id)
            .map(|c| c as &mut dyn Combatant)
    }
}

impl<C: Combatant> Roster for Vec<C> {
    fn get(&self, id: CombatantId) -> Option<&dyn Combatant> {
        Roster::get(self.as_slice(), id)
    }

    fn get_mut(&mut self, id: CombatantId) -> Option<&mut dyn Combatant> {
        Roster::get_mut(self.as_mut_slice(), id)
    }
}

impl<C: Combatant> Roster for BTreeMap<CombatantId, C> {
    fn get(&self, id: CombatantId) -> Option<&dyn Combatant> {
        BTreeMap::get(self, &id).map(|c| c as &dyn Combatant)
    }

    fn get_mut(&mut self, id: CombatantId) -> Option<&mut dyn Combatant> {
        BTreeMap::get_mut(self, &id).map(|c| c as &mut dyn Combatant)
    }
}
