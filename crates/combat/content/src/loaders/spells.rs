//! Spell catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::SpellDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::spells::SpellBook;

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for spell catalogs from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a [`SpellBook`] from a RON file.
    ///
    /// Duplicate ids and non-finite or negative powers are rejected. Spells
    /// without a damage type are accepted with a warning.
    pub fn load(path: &Path) -> LoadResult<SpellBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellBook> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for spell in &catalog.spells {
            if !seen.insert(spell.id.clone()) {
                anyhow::bail!("Duplicate spell id '{}'", spell.id);
            }
            if !(spell.base_power.is_finite() && spell.base_power >= 0.0) {
                anyhow::bail!("Spell '{}' has invalid base_power {}", spell.id, spell.base_power);
            }
            if spell.damage_type.is_none() {
                tracing::warn!(spell = %spell.id, "spell has no damage_type; element will be inferred from its id");
            }
        }

        Ok(catalog.spells.into_iter().collect())
    }
}
