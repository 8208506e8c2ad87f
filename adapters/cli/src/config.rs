//! Optional TOML configuration with `[world]` and `[waves]` tables.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use deadhold_system_waves::Config as WaveConfig;
use deadhold_world::WorldConfig;
use serde::Deserialize;

/// Settings for a session. Missing tables and fields keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) world: WorldConfig,
    pub(crate) waves: WaveConfig,
}

impl AppConfig {
    /// Reads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid config toml")
    }

    /// Reseeds both map generation and wave placement.
    pub(crate) fn reseed(&mut self, seed: u64) {
        self.world.seed = seed;
        self.waves.seed = seed.rotate_left(17);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(AppConfig::parse("").expect("parses"), AppConfig::default());
    }

    #[test]
    fn tables_override_only_named_fields() {
        let config = AppConfig::parse(
            r#"
            [world]
            columns = 40
            rows = 30
            starting_wood = 25

            [waves]
            base_zombies = 2
            "#,
        )
        .expect("parses");

        assert_eq!(config.world.columns, 40);
        assert_eq!(config.world.rows, 30);
        assert_eq!(config.world.starting_wood, 25);
        assert_eq!(config.world.minutes_per_step, 15);
        assert_eq!(config.waves.base_zombies, 2);
        assert_eq!(config.waves.interval_ticks(), 600);
    }

    #[test]
    fn unknown_types_are_reported() {
        assert!(AppConfig::parse("[world]\ncolumns = \"wide\"").is_err());
    }

    #[test]
    fn reseed_touches_both_generators() {
        let mut config = AppConfig::default();
        config.reseed(42);
        assert_eq!(config.world.seed, 42);
        assert_ne!(config.waves.seed, WaveConfig::default().seed);
    }
}
