//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatActor, CombatConfig};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader, SpellLoader, TablesLoader};
use crate::spells::SpellBook;
use crate::tables::{ScalingTables, TableScaling};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── spells.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load scaling tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<ScalingTables> {
        TablesLoader::load(&self.data_dir.join("tables.toml"))
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellBook> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load sample combatants from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<CombatActor>> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load every file in the directory.
    pub fn load_all(&self) -> LoadResult<CombatContent> {
        let content = CombatContent {
            config: self.load_config()?,
            tables: self.load_tables()?,
            spells: self.load_spells()?,
            roster: self.load_roster()?,
        };
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            spells = content.spells.len(),
            combatants = content.roster.len(),
            "loaded combat content"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Everything an encounter needs, loaded from one data directory.
#[derive(Clone, Debug)]
pub struct CombatContent {
    pub config: CombatConfig,
    pub tables: ScalingTables,
    pub spells: SpellBook,
    pub roster: Vec<CombatActor>,
}

impl CombatContent {
    /// Scaling oracle over the loaded tables.
    pub fn scaling(&self) -> TableScaling {
        TableScaling::new(self.tables)
    }
}
