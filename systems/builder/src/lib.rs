#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure construction system translating player intents into blueprint
//! selection, build, and unlock commands.

use deadhold_core::{Blueprint, Command, EconomySnapshot, Event};

/// Construction intents captured from the adapter for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// The player asked to cycle to the next blueprint.
    pub cycle_blueprint: bool,
    /// The player asked to build the selected blueprint on the colonist's tile.
    pub build: bool,
    /// The player asked to spend a skill point on the selected blueprint.
    pub unlock: bool,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(cycle_blueprint: bool, build: bool, unlock: bool) -> Self {
        Self {
            cycle_blueprint,
            build,
            unlock,
        }
    }
}

/// Construction system that turns input into economy commands.
///
/// Affordability and placement are judged by the world, which reports
/// refusals as `BuildRejected` and `UnlockRejected` events.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    halted: bool,
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { halted: false }
    }

    /// Consumes world events, the economy snapshot, and input to emit
    /// construction commands. Cycling happens first, so a build or unlock
    /// requested on the same tick targets the newly selected blueprint.
    pub fn handle(
        &mut self,
        events: &[Event],
        economy: &EconomySnapshot,
        input: BuilderInput,
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::ColonistDied))
        {
            self.halted = true;
        }
        if self.halted {
            return;
        }

        let mut selected = economy.selected;
        if input.cycle_blueprint {
            selected = selected.next();
            out.push(Command::SelectBlueprint {
                blueprint: selected,
            });
        }

        if input.unlock {
            out.push(Command::UnlockBlueprint {
                blueprint: selected,
            });
        }

        if input.build {
            out.push(Command::Build {
                blueprint: selected,
            });
        }
    }
}

/// Blueprints the player can currently afford and has unlocked, in catalog
/// order.
#[must_use]
pub fn buildable(economy: &EconomySnapshot) -> Vec<Blueprint> {
    Blueprint::ALL
        .into_iter()
        .filter(|blueprint| {
            economy.is_unlocked(*blueprint) && economy.stockpile.can_afford(blueprint.cost())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_core::Stockpile;

    fn economy(selected: Blueprint) -> EconomySnapshot {
        EconomySnapshot {
            stockpile: Stockpile::new(10, 0),
            unlocked: vec![Blueprint::WoodWall, Blueprint::Door],
            selected,
            skill_points: 0,
        }
    }

    #[test]
    fn cycle_then_build_targets_the_new_selection() {
        let mut builder = Builder::new();
        let mut commands = Vec::new();
        builder.handle(
            &[],
            &economy(Blueprint::WoodWall),
            BuilderInput::new(true, true, false),
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![
                Command::SelectBlueprint {
                    blueprint: Blueprint::StoneWall
                },
                Command::Build {
                    blueprint: Blueprint::StoneWall
                },
            ]
        );
    }

    #[test]
    fn idle_input_emits_nothing() {
        let mut builder = Builder::default();
        let mut commands = Vec::new();
        builder.handle(
            &[],
            &economy(Blueprint::Door),
            BuilderInput::default(),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn buildable_filters_locked_and_unaffordable() {
        let mut snapshot = economy(Blueprint::WoodWall);
        assert_eq!(buildable(&snapshot), vec![Blueprint::WoodWall, Blueprint::Door]);
        snapshot.stockpile = Stockpile::new(2, 0);
        assert_eq!(buildable(&snapshot), vec![Blueprint::WoodWall]);
    }
}
