//! Simulation settings read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulation run.
///
/// Command-line flags override whatever is read here.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub rounds: u32,
}

impl SimConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/combat/content/data";
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_ROUNDS: u32 = 10;

    /// Construct configuration from process environment variables.
    ///
    /// - `COMBAT_DATA_DIR`
    /// - `COMBAT_SEED`
    /// - `COMBAT_ROUNDS`
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("COMBAT_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = parse(&lookup, "COMBAT_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = parse::<u32>(&lookup, "COMBAT_ROUNDS") {
            config.rounds = rounds.max(1);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            seed: Self::DEFAULT_SEED,
            rounds: Self::DEFAULT_ROUNDS,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
