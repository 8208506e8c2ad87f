use deadhold_core::{Blueprint, BuildError, Event, Stockpile, UnlockError};
use deadhold_system_builder::{Builder, BuilderInput};
use deadhold_world::{self as world, query, World, WorldConfig};

fn step(world: &mut World, builder: &mut Builder, input: BuilderInput) -> Vec<Event> {
    let mut commands = Vec::new();
    builder.handle(&[], &query::economy(world), input, &mut commands);
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn builds_the_selected_blueprint_under_the_colonist() {
    let mut world = World::new(WorldConfig::bare(10, 10));
    let mut builder = Builder::new();

    let events = step(
        &mut world,
        &mut builder,
        BuilderInput {
            build: true,
            ..BuilderInput::default()
        },
    );

    let colonist = query::colonist(&world).tile;
    assert!(events.contains(&Event::StructureBuilt {
        structure: query::structure_view(&world)
            .iter()
            .map(|structure| structure.id)
            .next()
            .expect("wall built"),
        blueprint: Blueprint::WoodWall,
        tile: colonist,
    }));
    assert_eq!(query::stockpile(&world), Stockpile::new(8, 0));

    let again = step(
        &mut world,
        &mut builder,
        BuilderInput {
            build: true,
            ..BuilderInput::default()
        },
    );
    assert_eq!(
        again,
        vec![Event::BuildRejected {
            blueprint: Blueprint::WoodWall,
            reason: BuildError::Occupied,
        }],
        "a second build on the same tile must be refused",
    );
    assert_eq!(query::stockpile(&world), Stockpile::new(8, 0));
}

#[test]
fn cycling_onto_a_locked_blueprint_refuses_build_and_unlock() {
    let mut world = World::new(WorldConfig::bare(10, 10));
    let mut builder = Builder::new();

    let events = step(
        &mut world,
        &mut builder,
        BuilderInput::new(true, true, true),
    );

    assert_eq!(query::selected_blueprint(&world), Blueprint::StoneWall);
    assert_eq!(
        events,
        vec![
            Event::BlueprintSelected {
                blueprint: Blueprint::StoneWall
            },
            Event::UnlockRejected {
                blueprint: Blueprint::StoneWall,
                reason: UnlockError::NoSkillPoints,
            },
            Event::BuildRejected {
                blueprint: Blueprint::StoneWall,
                reason: BuildError::Locked,
            },
        ]
    );
}

#[test]
fn dead_colonist_stops_construction() {
    let mut builder = Builder::new();
    let world = World::new(WorldConfig::bare(10, 10));
    let mut commands = Vec::new();
    builder.handle(
        &[Event::ColonistDied],
        &query::economy(&world),
        BuilderInput::new(true, true, true),
        &mut commands,
    );
    assert!(commands.is_empty());
}
