//! Seeded map generation: buildings with floors, walls and doors, then
//! scattered trees and rocks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use deadhold_core::{ResourceKind, StructureKind, TilePosition, WallMaterial};

use crate::World;

const BUILDING_MARGIN: u32 = 5;
const BUILDING_FAR_MARGIN: u32 = 10;
const BUILDING_MIN_SIZE: u32 = 3;
const BUILDING_MAX_SIZE: u32 = 7;
const DOOR_CHANCE: f64 = 0.08;

pub(crate) fn populate(world: &mut World) {
    let mut rng = ChaCha8Rng::seed_from_u64(world.config.seed);
    let center = world.colonist.tile;
    generate_buildings(world, &mut rng, center);
    generate_resources(world, &mut rng, center);
}

fn generate_buildings(world: &mut World, rng: &mut ChaCha8Rng, center: TilePosition) {
    let (columns, rows) = (world.config.columns, world.config.rows);
    let minimum = BUILDING_MARGIN + BUILDING_FAR_MARGIN;
    if columns < minimum || rows < minimum {
        return;
    }

    for _ in 0..world.config.building_count {
        let bx = rng.gen_range(BUILDING_MARGIN..=columns - BUILDING_FAR_MARGIN);
        let by = rng.gen_range(BUILDING_MARGIN..=rows - BUILDING_FAR_MARGIN);
        let width = rng.gen_range(BUILDING_MIN_SIZE..=BUILDING_MAX_SIZE);
        let height = rng.gen_range(BUILDING_MIN_SIZE..=BUILDING_MAX_SIZE);
        let material = if rng.gen::<f64>() < 0.5 {
            WallMaterial::Stone
        } else {
            WallMaterial::Wood
        };

        for x in bx + 1..bx + width - 1 {
            for y in by..by + height - 1 {
                world.store.add_floor(TilePosition::new(x, y));
            }
        }

        for x in bx..bx + width {
            for y in by..by + height {
                let on_perimeter =
                    x == bx || x == bx + width - 1 || y == by || y == by + height - 1;
                if !on_perimeter {
                    continue;
                }
                let kind = if rng.gen::<f64>() < DOOR_CHANCE {
                    StructureKind::Door
                } else {
                    StructureKind::Wall(material)
                };
                let tile = TilePosition::new(x, y);
                if tile == center {
                    continue;
                }
                let _ = world
                    .store
                    .insert_structure(tile, kind.max_health(), kind.initial_state());
            }
        }
    }
}

fn generate_resources(world: &mut World, rng: &mut ChaCha8Rng, center: TilePosition) {
    let (columns, rows) = (world.config.columns, world.config.rows);
    if columns < 3 || rows < 3 {
        return;
    }

    let attempts = [
        (ResourceKind::Tree, world.config.tree_count),
        (ResourceKind::Rock, world.config.rock_count),
    ];
    for (kind, count) in attempts {
        for _ in 0..count {
            let x = rng.gen_range(1..=columns - 2);
            let y = rng.gen_range(1..=rows - 2);
            let tile = TilePosition::new(x, y);
            if tile == center
                || world.store.structure_at(tile).is_some()
                || world.store.has_floor(tile)
            {
                continue;
            }
            // A tile already holding a tree or rock rejects the node.
            let _ = world.store.insert_resource(tile, kind, false);
        }
    }
}
