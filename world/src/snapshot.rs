//! Persistent representation of the full world state.
//!
//! Every optional field falls back to the baseline a fresh colony starts
//! with, so older or hand-edited saves still load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use deadhold_core::{
    Blueprint, Direction, Health, Progress, ResourceKind, Stockpile, StructureKind,
    StructureState, TilePosition, CAMPFIRE_MAX_FUEL, COLONIST_MAX_HEALTH, ZOMBIE_MAX_HEALTH,
};

use crate::clock::Clock;
use crate::ledger::Economy;
use crate::World;

/// Complete persistent state of a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// The colonist.
    pub colonist: ColonistRecord,
    /// Every living zombie.
    #[serde(default)]
    pub zombies: Vec<ZombieRecord>,
    /// Every standing structure.
    #[serde(default)]
    pub structures: Vec<StructureRecord>,
    /// Every tree and rock, depleted or not.
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    /// Floor tiles.
    #[serde(default)]
    pub floors: Vec<TilePosition>,
    /// Wood on hand. Defaults to the configured starting stipend.
    #[serde(default)]
    pub wood: Option<u32>,
    /// Stone on hand.
    #[serde(default)]
    pub stone: u32,
    /// Experience and leveling state.
    #[serde(default)]
    pub progress: Progress,
    /// Unlocked blueprints. Defaults to the starting set.
    #[serde(default)]
    pub unlocked: Option<Vec<Blueprint>>,
    /// Catalog index of the selected blueprint.
    #[serde(default)]
    pub selected_blueprint: usize,
    /// Clock counters. Defaults to 06:00 on day 1.
    #[serde(default)]
    pub clock: Option<ClockRecord>,
    /// Tiles and blueprints that already paid out build experience.
    #[serde(default)]
    pub build_credits: Vec<BuildCreditRecord>,
}

/// Persisted colonist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonistRecord {
    /// Tile the colonist stands on.
    pub tile: TilePosition,
    /// Health, defaulting to full.
    #[serde(default)]
    pub health: Option<Health>,
    /// Facing.
    #[serde(default)]
    pub facing: Direction,
}

/// Persisted zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZombieRecord {
    /// Tile the zombie stands on.
    pub tile: TilePosition,
    /// Health, defaulting to full.
    #[serde(default)]
    pub health: Option<Health>,
    /// Facing.
    #[serde(default)]
    pub facing: Direction,
}

/// Persisted structure with its per-kind fields flattened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecord {
    /// Tile the structure stands on.
    pub tile: TilePosition,
    /// Kind of structure.
    pub kind: StructureKind,
    /// Health, defaulting to the kind's maximum.
    #[serde(default)]
    pub health: Option<Health>,
    /// Door open flag.
    #[serde(default)]
    pub open: bool,
    /// Turret cooldown.
    #[serde(default)]
    pub cooldown: u32,
    /// Workbench in-use flag.
    #[serde(default)]
    pub in_use: bool,
    /// Workbench craft timer.
    #[serde(default)]
    pub craft_timer: u32,
    /// Campfire lit flag.
    #[serde(default)]
    pub lit: bool,
    /// Campfire fuel, defaulting to a full load.
    #[serde(default)]
    pub fuel: Option<u32>,
}

impl StructureRecord {
    fn from_state(tile: TilePosition, health: Health, state: StructureState) -> Self {
        let mut record = Self {
            tile,
            kind: state.kind(),
            health: Some(health),
            open: false,
            cooldown: 0,
            in_use: false,
            craft_timer: 0,
            lit: false,
            fuel: None,
        };
        match state {
            StructureState::Door { open } => record.open = open,
            StructureState::Turret { cooldown } => record.cooldown = cooldown,
            StructureState::Workbench {
                in_use,
                craft_timer,
            } => {
                record.in_use = in_use;
                record.craft_timer = craft_timer;
            }
            StructureState::Campfire { lit, fuel } => {
                record.lit = lit;
                record.fuel = Some(fuel);
            }
            StructureState::Wall { .. } | StructureState::Spike | StructureState::TrapPit => {}
        }
        record
    }

    fn state(&self) -> StructureState {
        match self.kind.initial_state() {
            StructureState::Door { .. } => StructureState::Door { open: self.open },
            StructureState::Turret { .. } => StructureState::Turret {
                cooldown: self.cooldown,
            },
            StructureState::Workbench { .. } => StructureState::Workbench {
                in_use: self.in_use,
                craft_timer: if self.in_use { self.craft_timer } else { 0 },
            },
            StructureState::Campfire { .. } => {
                let fuel = self.fuel.unwrap_or(CAMPFIRE_MAX_FUEL).min(CAMPFIRE_MAX_FUEL);
                StructureState::Campfire {
                    lit: self.lit && fuel > 0,
                    fuel,
                }
            }
            state => state,
        }
    }
}

/// Persisted tree or rock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Tile the node stands on.
    pub tile: TilePosition,
    /// Kind of node.
    pub kind: ResourceKind,
    /// Whether the node was cut down or mined.
    #[serde(default)]
    pub depleted: bool,
}

/// Persisted clock counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRecord {
    /// Ticks elapsed since the colony was founded.
    pub ticks: u64,
    /// Current step within the day.
    pub step: u32,
    /// Day counter.
    pub day: u32,
}

/// Persisted build experience credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCreditRecord {
    /// Tile the blueprint was built on.
    pub tile: TilePosition,
    /// Blueprint that was built.
    pub blueprint: Blueprint,
}

/// Reasons a snapshot cannot be turned back into a world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// An entity lies outside the configured grid.
    #[error("{entity} at ({}, {}) lies outside the grid", .tile.x(), .tile.y())]
    OutOfBounds {
        /// Kind of entity that was misplaced.
        entity: &'static str,
        /// Offending tile.
        tile: TilePosition,
    },
    /// Two structures, or two undepleted resource nodes, claim one tile.
    #[error("{entity} at ({}, {}) overlaps another entity", .tile.x(), .tile.y())]
    TileConflict {
        /// Kind of entity that could not be placed.
        entity: &'static str,
        /// Contested tile.
        tile: TilePosition,
    },
    /// The selected blueprint index does not name a catalog entry.
    #[error("blueprint index {0} is not in the catalog")]
    UnknownBlueprint(usize),
}

pub(crate) fn capture(world: &World) -> WorldSnapshot {
    let stockpile = world.economy.stockpile();
    WorldSnapshot {
        colonist: ColonistRecord {
            tile: world.colonist.tile,
            health: Some(world.colonist.health),
            facing: world.colonist.facing,
        },
        zombies: world
            .store
            .zombies()
            .map(|zombie| ZombieRecord {
                tile: zombie.tile,
                health: Some(zombie.health),
                facing: zombie.facing,
            })
            .collect(),
        structures: world
            .store
            .structures()
            .map(|structure| {
                StructureRecord::from_state(structure.tile, structure.health, structure.state)
            })
            .collect(),
        resources: world
            .store
            .resources()
            .map(|node| ResourceRecord {
                tile: node.tile,
                kind: node.kind,
                depleted: node.depleted,
            })
            .collect(),
        floors: world.store.floors().collect(),
        wood: Some(stockpile.wood()),
        stone: stockpile.stone(),
        progress: world.progress,
        unlocked: Some(world.economy.unlocked().collect()),
        selected_blueprint: world.economy.selected().index(),
        clock: Some(ClockRecord {
            ticks: world.clock.ticks(),
            step: world.clock.step(),
            day: world.clock.day(),
        }),
        build_credits: world
            .credits
            .builds()
            .map(|(tile, blueprint)| BuildCreditRecord { tile, blueprint })
            .collect(),
    }
}

/// Loads `snapshot` into a freshly emptied world.
pub(crate) fn restore_into(
    world: &mut World,
    snapshot: &WorldSnapshot,
) -> Result<(), RestoreError> {
    let selected = Blueprint::from_index(snapshot.selected_blueprint)
        .ok_or(RestoreError::UnknownBlueprint(snapshot.selected_blueprint))?;

    let colonist = &snapshot.colonist;
    check_bounds(world, "colonist", colonist.tile)?;
    world.colonist.tile = colonist.tile;
    world.colonist.health = colonist.health.unwrap_or(COLONIST_MAX_HEALTH);
    world.colonist.facing = colonist.facing;
    world.death_reported = !world.colonist.health.is_alive();

    for zombie in &snapshot.zombies {
        check_bounds(world, "zombie", zombie.tile)?;
        let _ = world.store.spawn_zombie(
            zombie.tile,
            zombie.health.unwrap_or(ZOMBIE_MAX_HEALTH),
            zombie.facing,
        );
    }

    for structure in &snapshot.structures {
        check_bounds(world, "structure", structure.tile)?;
        let health = structure.health.unwrap_or(structure.kind.max_health());
        let _ = world
            .store
            .insert_structure(structure.tile, health, structure.state())
            .ok_or(RestoreError::TileConflict {
                entity: "structure",
                tile: structure.tile,
            })?;
    }

    for node in &snapshot.resources {
        check_bounds(world, "resource", node.tile)?;
        let _ = world
            .store
            .insert_resource(node.tile, node.kind, node.depleted)
            .ok_or(RestoreError::TileConflict {
                entity: "resource",
                tile: node.tile,
            })?;
    }

    for &tile in &snapshot.floors {
        check_bounds(world, "floor", tile)?;
        world.store.add_floor(tile);
    }

    let stockpile = Stockpile::new(
        snapshot.wood.unwrap_or(world.config.starting_wood),
        snapshot.stone,
    );
    world.economy = match &snapshot.unlocked {
        Some(unlocked) => Economy::restore(stockpile, unlocked.iter().copied(), selected),
        None => {
            let defaults = Economy::new(0);
            Economy::restore(stockpile, defaults.unlocked(), selected)
        }
    };
    world.progress = snapshot.progress;

    if let Some(clock) = snapshot.clock {
        world.clock = Clock::resume(
            world.config.minutes_per_step,
            world.config.ticks_per_step,
            clock.ticks,
            clock.step,
            clock.day,
        );
    }

    for credit in &snapshot.build_credits {
        let _ = world.credits.record_build(credit.tile, credit.blueprint);
    }
    Ok(())
}

fn check_bounds(
    world: &World,
    entity: &'static str,
    tile: TilePosition,
) -> Result<(), RestoreError> {
    if world.in_bounds(tile) {
        Ok(())
    } else {
        Err(RestoreError::OutOfBounds { entity, tile })
    }
}
