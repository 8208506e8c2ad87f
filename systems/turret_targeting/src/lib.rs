#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks turret targets and emits fire commands.

use deadhold_core::{
    Command, Direction, StructureId, StructureState, StructureView, TilePosition, ZombieId,
    ZombieView, TURRET_RANGE,
};

/// Target chosen for a ready turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurretTarget {
    /// Turret that fires.
    pub turret: StructureId,
    /// Zombie the turret aims at.
    pub zombie: ZombieId,
    /// Axis-snapped direction from the turret toward the zombie.
    pub direction: Direction,
}

/// Turret targeting system reusing a scratch buffer of living zombies.
#[derive(Debug, Default)]
pub struct TurretTargeting {
    candidates: Vec<Candidate>,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: ZombieId,
    tile: TilePosition,
}

impl TurretTargeting {
    /// Creates a targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a [`Command::FireTurret`] for every living turret whose
    /// cooldown has elapsed and that has a zombie in range.
    pub fn handle(
        &mut self,
        structures: &StructureView,
        zombies: &ZombieView,
        out: &mut Vec<Command>,
    ) {
        let mut targets = Vec::new();
        self.targets(structures, zombies, &mut targets);
        out.extend(targets.into_iter().map(|target| Command::FireTurret {
            turret: target.turret,
            direction: target.direction,
        }));
    }

    /// Computes one target per ready turret.
    ///
    /// Zombies farther than [`TURRET_RANGE`] tiles (Manhattan) are ignored.
    /// The nearest zombie wins and equal distances go to the lowest zombie
    /// identifier. The output buffer is cleared first.
    pub fn targets(
        &mut self,
        structures: &StructureView,
        zombies: &ZombieView,
        out: &mut Vec<TurretTarget>,
    ) {
        out.clear();
        self.candidates.clear();
        self.candidates.extend(
            zombies
                .iter()
                .filter(|zombie| zombie.health.is_alive())
                .map(|zombie| Candidate {
                    id: zombie.id,
                    tile: zombie.tile,
                }),
        );
        if self.candidates.is_empty() {
            return;
        }

        for structure in structures.iter() {
            if !structure.health.is_alive() {
                continue;
            }
            if !matches!(structure.state, StructureState::Turret { cooldown: 0 }) {
                continue;
            }

            let mut best: Option<(u32, Candidate)> = None;
            for candidate in &self.candidates {
                let distance = structure.tile.manhattan_distance(candidate.tile);
                if distance > TURRET_RANGE {
                    continue;
                }
                if best.map_or(true, |(nearest, _)| distance < nearest) {
                    best = Some((distance, *candidate));
                }
            }

            if let Some((_, candidate)) = best {
                let (dx, dy) = structure.tile.delta_to(candidate.tile);
                out.push(TurretTarget {
                    turret: structure.id,
                    zombie: candidate.id,
                    direction: Direction::toward(dx, dy),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_core::{Health, StructureSnapshot, ZombieSnapshot};

    fn turret(id: u32, x: u32, y: u32, cooldown: u32) -> StructureSnapshot {
        StructureSnapshot {
            id: StructureId::new(id),
            tile: TilePosition::new(x, y),
            health: Health::new(100),
            state: StructureState::Turret { cooldown },
        }
    }

    fn zombie(id: u32, x: u32, y: u32) -> ZombieSnapshot {
        ZombieSnapshot {
            id: ZombieId::new(id),
            tile: TilePosition::new(x, y),
            health: Health::new(100),
            facing: Direction::South,
            ready_to_act: false,
        }
    }

    fn targets(
        structures: Vec<StructureSnapshot>,
        zombies: Vec<ZombieSnapshot>,
    ) -> Vec<TurretTarget> {
        let mut out = Vec::new();
        TurretTargeting::new().targets(
            &StructureView::from_snapshots(structures),
            &ZombieView::from_snapshots(zombies),
            &mut out,
        );
        out
    }

    #[test]
    fn nearest_zombie_in_range_is_chosen() {
        let chosen = targets(
            vec![turret(0, 10, 10, 0)],
            vec![zombie(0, 15, 10), zombie(1, 10, 7)],
        );
        assert_eq!(
            chosen,
            vec![TurretTarget {
                turret: StructureId::new(0),
                zombie: ZombieId::new(1),
                direction: Direction::North,
            }]
        );
    }

    #[test]
    fn zombies_beyond_range_are_ignored() {
        assert!(targets(vec![turret(0, 10, 10, 0)], vec![zombie(0, 16, 10)]).is_empty());
        assert!(targets(vec![turret(0, 10, 10, 0)], vec![zombie(0, 13, 13)]).is_empty());
    }

    #[test]
    fn ties_go_to_the_lowest_identifier() {
        let chosen = targets(
            vec![turret(0, 10, 10, 0)],
            vec![zombie(4, 12, 10), zombie(2, 8, 10)],
        );
        assert_eq!(chosen[0].zombie, ZombieId::new(2));
        assert_eq!(chosen[0].direction, Direction::West);
    }

    #[test]
    fn cooling_turrets_and_dead_zombies_are_skipped() {
        let mut dead = zombie(1, 10, 11);
        dead.health = Health::new(0);
        assert!(targets(vec![turret(0, 10, 10, 3)], vec![zombie(0, 10, 11)]).is_empty());
        assert!(targets(vec![turret(0, 10, 10, 0)], vec![dead]).is_empty());
    }

    #[test]
    fn zombie_on_the_turret_tile_is_fired_at_northward() {
        let chosen = targets(vec![turret(0, 3, 3, 0)], vec![zombie(0, 3, 3)]);
        assert_eq!(chosen[0].direction, Direction::North);
    }

    #[test]
    fn handle_emits_fire_commands() {
        let mut commands = Vec::new();
        TurretTargeting::new().handle(
            &StructureView::from_snapshots(vec![turret(5, 0, 0, 0)]),
            &ZombieView::from_snapshots(vec![zombie(0, 0, 2)]),
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::FireTurret {
                turret: StructureId::new(5),
                direction: Direction::South,
            }]
        );
    }
}
