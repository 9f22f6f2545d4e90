//! Scaling tables loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::ScalingTables;

/// Loader for scaling tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load and validate [`ScalingTables`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ScalingTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScalingTables> {
        let tables: ScalingTables = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))?;
        tables
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid scaling tables: {}", e))?;

        Ok(tables)
    }
}
