//! Combatant roster loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::CombatActor;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub combatants: Vec<CombatActor>,
}

/// Loader for sample combatants from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load combatants from a RON file, in file order.
    ///
    /// Ids must be unique and may not be the reserved `CombatantId::NONE`.
    pub fn load(path: &Path) -> LoadResult<Vec<CombatActor>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CombatActor>> {
        let catalog: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for actor in &catalog.combatants {
            if actor.id.is_none() {
                anyhow::bail!("Combatant '{}' uses the reserved id", actor.name);
            }
            if !seen.insert(actor.id) {
                anyhow::bail!("Duplicate combatant id {}", actor.id);
            }
        }

        Ok(catalog.combatants)
    }
}
