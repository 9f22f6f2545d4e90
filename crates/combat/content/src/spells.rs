//! In-memory spell catalog.

use std::collections::BTreeMap;

use combat_core::{SpellDefinition, SpellId, SpellOracle};

/// [`SpellOracle`] backed by a map of definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellBook {
    spells: BTreeMap<SpellId, SpellDefinition>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any previous one with the same id.
    pub fn insert(&mut self, definition: SpellDefinition) -> Option<SpellDefinition> {
        self.spells.insert(definition.id.clone(), definition)
    }

    pub fn get(&self, id: &SpellId) -> Option<&SpellDefinition> {
        self.spells.get(id)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.values()
    }

    /// Definitions that still rely on the keyword damage-type shim.
    pub fn untyped(&self) -> impl Iterator<Item = &SpellId> {
        self.spells
            .values()
            .filter(|spell| spell.damage_type.is_none())
            .map(|spell| &spell.id)
    }
}

impl FromIterator<SpellDefinition> for SpellBook {
    fn from_iter<T: IntoIterator<Item = SpellDefinition>>(iter: T) -> Self {
        let mut book = Self::new();
        for definition in iter {
            book.insert(definition);
        }
        book
    }
}

impl SpellOracle for SpellBook {
    fn load_spell(&self, id: &SpellId) -> Option<SpellDefinition> {
        self.spells.get(id).cloned()
    }
}
