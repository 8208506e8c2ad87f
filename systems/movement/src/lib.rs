#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement decisions for the colonist and the zombie horde.
//!
//! Neither system touches the world: the colonist controller turns held
//! directions into facing and step commands, and the chase planner turns
//! the zombie view into greedy single-tile steps toward the colonist.

use deadhold_core::{ColonistSnapshot, Command, Direction, Event, ZombieView};

/// Number of consecutive held ticks that only turn the colonist.
pub const TAP_TICKS: u32 = 1;

/// Debounces held directions so a tap reorients and a hold walks.
#[derive(Clone, Debug, Default)]
pub struct ColonistControl {
    held: Option<Direction>,
    hold_ticks: u32,
    halted: bool,
}

impl ColonistControl {
    /// Creates a controller with no direction held.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: None,
            hold_ticks: 0,
            halted: false,
        }
    }

    /// Consumes world events and the direction held this tick to emit
    /// colonist commands.
    ///
    /// A freshly pressed direction emits [`Command::FaceColonist`]; once the
    /// same direction has been held for more than [`TAP_TICKS`] ticks every
    /// further tick emits [`Command::StepColonist`].
    pub fn handle(&mut self, events: &[Event], held: Option<Direction>, out: &mut Vec<Command>) {
        if events
            .iter()
            .any(|event| matches!(event, Event::ColonistDied))
        {
            self.halted = true;
        }
        if self.halted {
            return;
        }

        let Some(direction) = held else {
            self.held = None;
            self.hold_ticks = 0;
            return;
        };

        if self.held == Some(direction) {
            self.hold_ticks = self.hold_ticks.saturating_add(1);
        } else {
            self.held = Some(direction);
            self.hold_ticks = 1;
        }

        if self.hold_ticks > TAP_TICKS {
            out.push(Command::StepColonist { direction });
        } else {
            out.push(Command::FaceColonist { direction });
        }
    }

    /// Ticks the current direction has been held for.
    #[must_use]
    pub const fn hold_ticks(&self) -> u32 {
        self.hold_ticks
    }
}

/// Greedy Manhattan chase: every ready zombie steps one tile toward the
/// colonist along the axis with the larger distance, preferring the
/// vertical axis on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZombieChase;

impl ZombieChase {
    /// Emits one [`Command::StepZombie`] for every living zombie whose
    /// action counter permits acting and that does not already share the
    /// colonist's tile.
    pub fn handle(
        &self,
        zombies: &ZombieView,
        colonist: &ColonistSnapshot,
        out: &mut Vec<Command>,
    ) {
        for zombie in zombies.iter() {
            if !zombie.health.is_alive() || !zombie.ready_to_act {
                continue;
            }
            let (dx, dy) = zombie.tile.delta_to(colonist.tile);
            if dx == 0 && dy == 0 {
                continue;
            }
            out.push(Command::StepZombie {
                zombie: zombie.id,
                direction: Direction::toward(dx, dy),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_core::{Health, TilePosition, ZombieId, ZombieSnapshot};

    fn colonist_at(x: u32, y: u32) -> ColonistSnapshot {
        ColonistSnapshot {
            tile: TilePosition::new(x, y),
            health: Health::new(100),
            facing: Direction::South,
        }
    }

    fn zombie(id: u32, x: u32, y: u32, ready_to_act: bool) -> ZombieSnapshot {
        ZombieSnapshot {
            id: ZombieId::new(id),
            tile: TilePosition::new(x, y),
            health: Health::new(100),
            facing: Direction::South,
            ready_to_act,
        }
    }

    #[test]
    fn tap_turns_and_hold_walks() {
        let mut control = ColonistControl::new();
        let mut commands = Vec::new();
        for _ in 0..3 {
            control.handle(&[], Some(Direction::East), &mut commands);
        }
        assert_eq!(
            commands,
            vec![
                Command::FaceColonist {
                    direction: Direction::East
                },
                Command::StepColonist {
                    direction: Direction::East
                },
                Command::StepColonist {
                    direction: Direction::East
                },
            ]
        );
    }

    #[test]
    fn release_and_new_direction_restart_the_hold() {
        let mut control = ColonistControl::new();
        let mut commands = Vec::new();
        control.handle(&[], Some(Direction::North), &mut commands);
        control.handle(&[], None, &mut commands);
        control.handle(&[], Some(Direction::North), &mut commands);
        control.handle(&[], Some(Direction::West), &mut commands);

        assert_eq!(control.hold_ticks(), 1);
        assert!(commands
            .iter()
            .all(|command| matches!(command, Command::FaceColonist { .. })));
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn dead_colonist_ignores_input() {
        let mut control = ColonistControl::new();
        let mut commands = Vec::new();
        control.handle(&[Event::ColonistDied], Some(Direction::East), &mut commands);
        control.handle(&[], Some(Direction::East), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn chase_prefers_larger_axis_and_vertical_ties() {
        let view = ZombieView::from_snapshots(vec![
            zombie(0, 0, 4, true),
            zombie(1, 8, 8, true),
            zombie(2, 5, 1, true),
        ]);
        let mut commands = Vec::new();
        ZombieChase.handle(&view, &colonist_at(5, 5), &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::StepZombie {
                    zombie: ZombieId::new(0),
                    direction: Direction::East
                },
                Command::StepZombie {
                    zombie: ZombieId::new(1),
                    direction: Direction::North
                },
                Command::StepZombie {
                    zombie: ZombieId::new(2),
                    direction: Direction::South
                },
            ]
        );
    }

    #[test]
    fn chase_skips_waiting_and_arrived_zombies() {
        let view = ZombieView::from_snapshots(vec![zombie(0, 0, 0, false), zombie(1, 5, 5, true)]);
        let mut commands = Vec::new();
        ZombieChase.handle(&view, &colonist_at(5, 5), &mut commands);
        assert!(commands.is_empty());
    }
}
