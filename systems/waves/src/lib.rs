#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that decides when zombies enter the world and how many.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use deadhold_core::{Command, Event, TilePosition};

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per real-time second.
    pub fps: u32,
    /// Real-time minutes between two timed waves.
    pub interval_minutes: u32,
    /// Zombies in a wave on day one.
    pub base_zombies: u32,
    /// Seed for spawn tile selection.
    pub seed: u64,
}

impl Config {
    /// Ticks between two timed waves.
    #[must_use]
    pub const fn interval_ticks(&self) -> u64 {
        self.fps as u64 * 60 * self.interval_minutes as u64
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 5,
            interval_minutes: 2,
            base_zombies: 5,
            seed: 0x5eed_dead_0002,
        }
    }
}

/// Pure system spawning a wave whenever its timer elapses and whenever a new
/// day begins. Both triggers may fire in the same tick.
#[derive(Debug)]
pub struct WaveDirector {
    interval_ticks: u64,
    timer: u64,
    base_zombies: u32,
    day: u32,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a director for the first day with an empty timer.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval_ticks: config.interval_ticks(),
            timer: 0,
            base_zombies: config.base_zombies,
            day: 1,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Creates a director resuming on the provided day, e.g. after a load.
    #[must_use]
    pub fn resume(config: Config, day: u32) -> Self {
        Self {
            day: day.max(1),
            ..Self::new(config)
        }
    }

    /// Consumes world events and emits [`Command::SpawnZombie`] commands on
    /// uniformly random tiles of a `columns` by `rows` grid.
    pub fn handle(&mut self, events: &[Event], dimensions: (u32, u32), out: &mut Vec<Command>) {
        let mut waves = 0;
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => {
                    self.timer = self.timer.saturating_add(1);
                    if self.interval_ticks > 0 && self.timer >= self.interval_ticks {
                        self.timer = 0;
                        waves += 1;
                    }
                }
                Event::DayStarted { day } => {
                    self.day = *day;
                    waves += 1;
                }
                _ => {}
            }
        }

        let (columns, rows) = dimensions;
        if columns == 0 || rows == 0 {
            return;
        }
        for _ in 0..waves * self.wave_size() {
            let x = self.rng.gen_range(0..columns);
            let y = self.rng.gen_range(0..rows);
            out.push(Command::SpawnZombie {
                tile: TilePosition::new(x, y),
            });
        }
    }

    /// Zombies in a wave spawned today.
    #[must_use]
    pub fn wave_size(&self) -> u32 {
        self.base_zombies.saturating_add(self.day).saturating_sub(1)
    }

    /// Day the director last heard of.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Ticks elapsed since the last timed wave.
    #[must_use]
    pub const fn timer(&self) -> u64 {
        self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick() -> Event {
        Event::TimeAdvanced { tick: 0 }
    }

    #[test]
    fn default_interval_is_two_minutes_at_five_fps() {
        assert_eq!(Config::default().interval_ticks(), 600);
    }

    #[test]
    fn timer_wave_fires_and_resets() {
        let config = Config {
            fps: 1,
            interval_minutes: 1,
            ..Config::default()
        };
        let mut director = WaveDirector::new(config);
        let mut commands = Vec::new();

        for _ in 0..59 {
            director.handle(&[tick()], (10, 10), &mut commands);
        }
        assert!(commands.is_empty());

        director.handle(&[tick()], (10, 10), &mut commands);
        assert_eq!(commands.len(), 5);
        assert_eq!(director.timer(), 0);
    }

    #[test]
    fn new_day_wave_grows_with_the_day() {
        let mut director = WaveDirector::new(Config::default());
        let mut commands = Vec::new();
        director.handle(&[tick(), Event::DayStarted { day: 3 }], (10, 10), &mut commands);
        assert_eq!(director.day(), 3);
        assert_eq!(commands.len(), 7);
    }

    #[test]
    fn both_triggers_fire_in_one_tick() {
        let config = Config {
            fps: 1,
            interval_minutes: 1,
            ..Config::default()
        };
        let mut director = WaveDirector::resume(config, 1);
        let mut commands = Vec::new();
        for _ in 0..59 {
            director.handle(&[tick()], (10, 10), &mut commands);
        }
        director.handle(&[tick(), Event::DayStarted { day: 2 }], (10, 10), &mut commands);
        assert_eq!(commands.len(), 12);
    }

    #[test]
    fn spawn_tiles_stay_on_the_grid_and_are_seeded() {
        let run = || {
            let mut director = WaveDirector::new(Config::default());
            let mut commands = Vec::new();
            director.handle(&[Event::DayStarted { day: 40 }], (7, 3), &mut commands);
            commands
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(first.len(), 44);
        for command in first {
            let Command::SpawnZombie { tile } = command else {
                panic!("unexpected command {command:?}");
            };
            assert!(tile.x() < 7 && tile.y() < 3);
        }
    }
}
