//! Per-tick orchestration of the world and its systems.

use deadhold_core::{CombatPhase, Command, Direction, Event};
use deadhold_system_builder::{buildable, Builder, BuilderInput};
use deadhold_system_movement::{ColonistControl, ZombieChase};
use deadhold_system_progression::{check_level_up, Progression};
use deadhold_system_turret_targeting::TurretTargeting;
use deadhold_system_waves::{Config as WaveConfig, WaveDirector};
use deadhold_world::{self as world, query, RestoreError, World, WorldSnapshot};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Player intents gathered for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TickInput {
    pub(crate) direction: Option<Direction>,
    pub(crate) attack: bool,
    pub(crate) interact: bool,
    pub(crate) builder: BuilderInput,
}

/// Owns the world and drives every system once per tick.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    wave_config: WaveConfig,
    waves: WaveDirector,
    colonist: ColonistControl,
    chase: ZombieChase,
    targeting: TurretTargeting,
    builder: Builder,
    progression: Progression,
    paused: bool,
    over: bool,
}

impl Simulation {
    /// Generates a fresh map and starts on day one.
    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            world: World::new(config.world.clone()),
            wave_config: config.waves,
            waves: WaveDirector::new(config.waves),
            colonist: ColonistControl::new(),
            chase: ZombieChase,
            targeting: TurretTargeting::new(),
            builder: Builder::new(),
            progression: Progression,
            paused: false,
            over: false,
        }
    }

    /// Advances the simulation by one tick and returns every event it raised.
    ///
    /// Nothing happens while paused or after the colonist died.
    pub(crate) fn step(&mut self, input: TickInput) -> Vec<Event> {
        let mut events = Vec::new();
        if self.paused || self.over {
            return events;
        }

        let mut commands = Vec::new();
        world::apply(&mut self.world, Command::Tick, &mut events);

        self.waves.handle(&events, query::dimensions(&self.world), &mut commands);
        execute(&mut self.world, &mut commands, &mut events);

        self.colonist.handle(&events, input.direction, &mut commands);
        if input.attack {
            commands.push(Command::Attack);
        }
        if input.interact {
            commands.push(Command::Interact);
        }
        execute(&mut self.world, &mut commands, &mut events);

        let economy = query::economy(&self.world);
        self.builder.handle(&events, &economy, input.builder, &mut commands);
        execute(&mut self.world, &mut commands, &mut events);

        let structures = query::structure_view(&self.world);
        let zombies = query::zombie_view(&self.world);
        self.targeting.handle(&structures, &zombies, &mut commands);
        resolve(&mut self.world, CombatPhase::TurretCooldowns, &mut events);
        execute(&mut self.world, &mut commands, &mut events);

        resolve(&mut self.world, CombatPhase::Projectiles, &mut events);
        resolve(&mut self.world, CombatPhase::Hazards, &mut events);
        resolve(&mut self.world, CombatPhase::ZombiePhases, &mut events);

        let zombies = query::zombie_view(&self.world);
        let colonist = query::colonist(&self.world);
        self.chase.handle(&zombies, &colonist, &mut commands);
        execute(&mut self.world, &mut commands, &mut events);

        resolve(&mut self.world, CombatPhase::Contact, &mut events);
        resolve(&mut self.world, CombatPhase::Casualties, &mut events);

        self.progression.handle(&events, query::progress(&self.world), &mut commands);
        execute(&mut self.world, &mut commands, &mut events);

        if events.iter().any(|event| matches!(event, Event::ColonistDied)) {
            self.over = true;
        }
        log_events(&events);
        events
    }

    /// Flips the pause gate and reports the new state.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    /// The colonist died and the session accepts no further ticks.
    pub(crate) fn is_over(&self) -> bool {
        self.over
    }

    /// Captures the state a save file holds.
    pub(crate) fn snapshot(&self) -> WorldSnapshot {
        query::snapshot(&self.world)
    }

    /// Replaces the live world with a restored one.
    ///
    /// On error the running session is left exactly as it was.
    pub(crate) fn restore(&mut self, snapshot: &WorldSnapshot) -> Result<(), RestoreError> {
        let mut restored = World::restore(query::config(&self.world).clone(), snapshot)?;

        let (progress, leveled_up) = check_level_up(query::progress(&restored));
        if leveled_up {
            let mut events = Vec::new();
            world::apply(&mut restored, Command::ApplyProgress { progress }, &mut events);
            log_events(&events);
        }

        self.waves = WaveDirector::resume(self.wave_config, query::clock(&restored).day());
        self.colonist = ColonistControl::new();
        self.targeting = TurretTargeting::new();
        self.builder = Builder::new();
        self.over = !query::colonist_alive(&restored);
        self.world = restored;
        Ok(())
    }

    /// One-line summary of the session for the terminal.
    pub(crate) fn status(&self) -> String {
        let world = &self.world;
        let time = query::time_of_day(world);
        let colonist = query::colonist(world);
        let stockpile = query::stockpile(world);
        let progress = query::progress(world);
        let economy = query::economy(world);
        let selected = economy.selected;

        let readiness = if buildable(&economy).contains(&selected) {
            "ready"
        } else if economy.is_unlocked(selected) {
            "short"
        } else {
            "locked"
        };
        let phase = if time.is_night() { "night" } else { "day" };
        let gate = if self.over {
            " | DEAD"
        } else if self.paused {
            " | paused"
        } else {
            ""
        };

        format!(
            "{:02}:{:02} day {} ({phase}) | hp {} | wood {} stone {} | \
             lvl {} xp {}/{} sp {} | zombies {} | {} [{readiness}]{gate}",
            time.hour,
            time.minute,
            query::clock(world).day(),
            colonist.health.get(),
            stockpile.wood(),
            stockpile.stone(),
            progress.level,
            progress.xp,
            progress.xp_to_next,
            progress.skill_points,
            query::zombie_view(world).len(),
            selected.name(),
        )
    }
}

fn execute(world: &mut World, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
    for command in commands.drain(..) {
        world::apply(world, command, events);
    }
}

fn resolve(world: &mut World, phase: CombatPhase, events: &mut Vec<Event>) {
    world::apply(world, Command::ResolveCombatPhase { phase }, events);
}

fn log_events(events: &[Event]) {
    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::ZombieSpawned { .. }))
        .count();
    if spawned > 0 {
        info!(zombies = spawned, "wave spawned");
    }

    for event in events {
        match event {
            Event::DayStarted { day } => info!(day, "a new day begins"),
            Event::LeveledUp { level } => info!(level, "colonist leveled up"),
            Event::ColonistDied => info!("the colonist has died"),
            Event::BuildRejected { blueprint, reason } => {
                debug!(blueprint = blueprint.name(), ?reason, "build rejected");
            }
            Event::UnlockRejected { blueprint, reason } => {
                debug!(blueprint = blueprint.name(), ?reason, "unlock rejected");
            }
            _ => {}
        }
    }
}
