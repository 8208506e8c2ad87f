#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Deadhold.

mod actions;
mod clock;
mod combat;
mod config;
mod generation;
mod ledger;
mod occupancy;
pub mod snapshot;
mod store;

use deadhold_core::{
    Command, Direction, Event, Progress, StructureState, TilePosition, COLONIST_MAX_HEALTH,
    ZOMBIE_MAX_HEALTH,
};

pub use clock::{Clock, ClockAdvance};
pub use combat::ZOMBIE_ACTION_PERIOD;
pub use config::WorldConfig;
pub use snapshot::{RestoreError, WorldSnapshot};

use ledger::{CreditLedger, Economy};
use store::{Colonist, EntityStore};

/// Represents the authoritative Deadhold world state.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    clock: Clock,
    colonist: Colonist,
    store: EntityStore,
    economy: Economy,
    progress: Progress,
    credits: CreditLedger,
    death_reported: bool,
}

impl World {
    /// Creates a new world with a generated map, the colonist standing on
    /// the map center.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let mut world = Self::empty(config);
        generation::populate(&mut world);
        world
    }

    fn empty(config: WorldConfig) -> Self {
        let clock = Clock::new(config.minutes_per_step, config.ticks_per_step);
        let colonist = Colonist {
            tile: TilePosition::new(config.columns / 2, config.rows / 2),
            health: COLONIST_MAX_HEALTH,
            facing: Direction::default(),
        };
        let economy = Economy::new(config.starting_wood);
        Self {
            config,
            clock,
            colonist,
            store: EntityStore::default(),
            economy,
            progress: Progress::STARTING,
            credits: CreditLedger::default(),
            death_reported: false,
        }
    }

    /// Rebuilds a world from a persisted snapshot.
    ///
    /// The snapshot is validated in full before a world is returned, so a
    /// failed restore never yields partially loaded state.
    pub fn restore(config: WorldConfig, snapshot: &WorldSnapshot) -> Result<Self, RestoreError> {
        let mut world = Self::empty(config);
        snapshot::restore_into(&mut world, snapshot)?;
        Ok(world)
    }

    fn in_bounds(&self, tile: TilePosition) -> bool {
        tile.x() < self.config.columns && tile.y() < self.config.rows
    }

    fn colonist_alive(&self) -> bool {
        self.colonist.health.is_alive()
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        let advance = self.clock.advance();
        out_events.push(Event::TimeAdvanced {
            tick: self.clock.ticks(),
        });

        for structure in self.store.structures_mut() {
            if let StructureState::Workbench {
                in_use: true,
                craft_timer,
            } = &mut structure.state
            {
                *craft_timer = craft_timer.saturating_add(1);
            }
        }

        if advance.stepped {
            self.burn_campfires(out_events);
        }

        if advance.new_day {
            out_events.push(Event::DayStarted {
                day: self.clock.day(),
            });
        }
    }

    fn burn_campfires(&mut self, out_events: &mut Vec<Event>) {
        for structure in self.store.structures_mut() {
            if let StructureState::Campfire { lit, fuel } = &mut structure.state {
                if !*lit {
                    continue;
                }
                *fuel = fuel.saturating_sub(1);
                if *fuel == 0 {
                    *lit = false;
                    out_events.push(Event::CampfireBurnedOut {
                        structure: structure.id,
                    });
                }
            }
        }
    }

    fn spawn_zombie(&mut self, tile: TilePosition, out_events: &mut Vec<Event>) {
        if !self.in_bounds(tile) {
            return;
        }
        let zombie = self
            .store
            .spawn_zombie(tile, ZOMBIE_MAX_HEALTH, Direction::default());
        out_events.push(Event::ZombieSpawned { zombie, tile });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Requests the world cannot honour leave the state untouched. Player-facing
/// rejections are reported through events rather than errors.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.tick(out_events),
        Command::SpawnZombie { tile } => world.spawn_zombie(tile, out_events),
        Command::FaceColonist { direction } => world.face_colonist(direction, out_events),
        Command::StepColonist { direction } => world.step_colonist(direction, out_events),
        Command::Attack => world.attack(out_events),
        Command::Interact => world.interact(out_events),
        Command::SelectBlueprint { blueprint } => world.select_blueprint(blueprint, out_events),
        Command::Build { blueprint } => world.build(blueprint, out_events),
        Command::UnlockBlueprint { blueprint } => world.unlock_blueprint(blueprint, out_events),
        Command::FireTurret { turret, direction } => {
            world.fire_turret(turret, direction, out_events);
        }
        Command::StepZombie { zombie, direction } => {
            world.step_zombie(zombie, direction, out_events);
        }
        Command::ResolveCombatPhase { phase } => world.resolve_phase(phase, out_events),
        Command::ApplyProgress { progress } => world.apply_progress(progress, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use deadhold_core::{
        Blocker, Blueprint, BulletSnapshot, ColonistSnapshot, EconomySnapshot, Progress,
        ResourceSnapshot, Stockpile, StructureSnapshot, StructureView, TilePosition, TimeOfDay,
        ZombieSnapshot, ZombieView,
    };

    use super::{combat, snapshot, Clock, World, WorldConfig, WorldSnapshot};

    /// Provides read-only access to the configuration the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.config.columns, world.config.rows)
    }

    /// Reports whether the tile lies on the grid.
    #[must_use]
    pub fn in_bounds(world: &World, tile: TilePosition) -> bool {
        world.in_bounds(tile)
    }

    /// Reports whether any entity of the provided categories occupies `tile`.
    #[must_use]
    pub fn is_blocked(world: &World, tile: TilePosition, blockers: &[Blocker]) -> bool {
        world.store.is_blocked(tile, blockers)
    }

    /// Provides read-only access to the clock.
    #[must_use]
    pub fn clock(world: &World) -> &Clock {
        &world.clock
    }

    /// Current in-game time.
    #[must_use]
    pub fn time_of_day(world: &World) -> TimeOfDay {
        world.clock.time_of_day()
    }

    /// Captures the colonist's state.
    #[must_use]
    pub fn colonist(world: &World) -> ColonistSnapshot {
        ColonistSnapshot {
            tile: world.colonist.tile,
            health: world.colonist.health,
            facing: world.colonist.facing,
        }
    }

    /// Reports whether the colonist is still alive.
    #[must_use]
    pub fn colonist_alive(world: &World) -> bool {
        world.colonist_alive()
    }

    /// Captures a read-only view of the zombies.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        ZombieView::from_snapshots(
            world
                .store
                .zombies()
                .map(|zombie| ZombieSnapshot {
                    id: zombie.id,
                    tile: zombie.tile,
                    health: zombie.health,
                    facing: zombie.facing,
                    ready_to_act: combat::ready_to_act(zombie.action_counter),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the structures.
    #[must_use]
    pub fn structure_view(world: &World) -> StructureView {
        StructureView::from_snapshots(
            world
                .store
                .structures()
                .map(|structure| StructureSnapshot {
                    id: structure.id,
                    tile: structure.tile,
                    health: structure.health,
                    state: structure.state,
                })
                .collect(),
        )
    }

    /// Captures every tree and rock, depleted or not, in identifier order.
    #[must_use]
    pub fn resources(world: &World) -> Vec<ResourceSnapshot> {
        world
            .store
            .resources()
            .map(|node| ResourceSnapshot {
                id: node.id,
                tile: node.tile,
                kind: node.kind,
                depleted: node.depleted,
            })
            .collect()
    }

    /// Captures every bullet in flight.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world
            .store
            .bullets()
            .iter()
            .map(|bullet| BulletSnapshot {
                tile: bullet.tile,
                direction: bullet.direction,
                age: bullet.age,
            })
            .collect()
    }

    /// Floor tiles in row-major order.
    #[must_use]
    pub fn floors(world: &World) -> Vec<TilePosition> {
        world.store.floors().collect()
    }

    /// Resources on hand.
    #[must_use]
    pub fn stockpile(world: &World) -> Stockpile {
        world.economy.stockpile()
    }

    /// Experience and leveling state.
    #[must_use]
    pub fn progress(world: &World) -> Progress {
        world.progress
    }

    /// Blueprint currently selected for construction.
    #[must_use]
    pub fn selected_blueprint(world: &World) -> Blueprint {
        world.economy.selected()
    }

    /// Captures the economy state consumed by the builder system.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            stockpile: world.economy.stockpile(),
            unlocked: world.economy.unlocked().collect(),
            selected: world.economy.selected(),
            skill_points: world.progress.skill_points,
        }
    }

    /// Captures the full persistent state of the world.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        snapshot::capture(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_core::{Blueprint, Stockpile, TimeOfDay};

    #[test]
    fn new_world_places_colonist_at_center() {
        let world = World::new(WorldConfig::bare(20, 15));
        let colonist = query::colonist(&world);
        assert_eq!(colonist.tile, TilePosition::new(10, 7));
        assert_eq!(colonist.health, COLONIST_MAX_HEALTH);
        assert_eq!(query::stockpile(&world), Stockpile::new(10, 0));
        assert_eq!(query::progress(&world), Progress::STARTING);
        assert_eq!(query::selected_blueprint(&world), Blueprint::WoodWall);
        assert_eq!(
            query::economy(&world).unlocked,
            vec![Blueprint::WoodWall, Blueprint::Door]
        );
    }

    #[test]
    fn tick_reports_time_and_day_edges() {
        let mut config = WorldConfig::bare(10, 10);
        config.ticks_per_step = 1;
        let mut world = World::new(config);
        let mut events = Vec::new();

        for _ in 0..96 {
            apply(&mut world, Command::Tick, &mut events);
        }

        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();
        assert_eq!(ticks, 96);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::DayStarted { day: 2 }))
                .count(),
            1
        );
        assert_eq!(query::time_of_day(&world), TimeOfDay { hour: 6, minute: 0 });
        assert_eq!(query::clock(&world).day(), 2);
    }

    #[test]
    fn zombies_spawn_only_inside_grid() {
        let mut world = World::new(WorldConfig::bare(5, 5));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnZombie {
                tile: TilePosition::new(4, 4),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnZombie {
                tile: TilePosition::new(5, 0),
            },
            &mut events,
        );

        assert_eq!(query::zombie_view(&world).len(), 1);
        assert_eq!(events.len(), 1);
        let zombie = query::zombie_view(&world).iter().copied().next();
        assert_eq!(zombie.map(|z| z.health), Some(ZOMBIE_MAX_HEALTH));
    }
}
