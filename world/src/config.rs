//! Tunable parameters used to construct a world.

use serde::Deserialize;

/// Configuration parameters required to construct a [`crate::World`].
///
/// Every field falls back to its default when omitted from a config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// In-game minutes covered by one clock step.
    pub minutes_per_step: u32,
    /// Ticks making up one clock step.
    pub ticks_per_step: u32,
    /// Wood granted to a new colony.
    pub starting_wood: u32,
    /// Seed for map generation.
    pub seed: u64,
    /// Number of buildings generated on a new map.
    pub building_count: u32,
    /// Number of tree placement attempts on a new map.
    pub tree_count: u32,
    /// Number of rock placement attempts on a new map.
    pub rock_count: u32,
}

impl WorldConfig {
    /// Configuration for an empty map of the provided size, without any
    /// generated buildings or resources.
    #[must_use]
    pub fn bare(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            building_count: 0,
            tree_count: 0,
            rock_count: 0,
            ..Self::default()
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            columns: 200,
            rows: 150,
            minutes_per_step: 15,
            ticks_per_step: 10,
            starting_wood: 10,
            seed: 0x5eed_dead_0001,
            building_count: 10,
            tree_count: 300,
            rock_count: 150,
        }
    }
}
