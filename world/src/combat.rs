//! Turrets, bullets, hazards, zombie pacing, and casualty pruning.

use deadhold_core::{
    Blocker, CombatPhase, DamageSource, Direction, Event, StructureId, StructureState,
    TilePosition, ZombieId, TURRET_COOLDOWN_TICKS,
};

use crate::store::Bullet;
use crate::World;

/// Number of ticks between two actions of the same zombie.
pub const ZOMBIE_ACTION_PERIOD: u32 = 4;

const BUMP_DAMAGE: u32 = 25;
const BULLET_DAMAGE: u32 = 50;
const BULLET_MAX_AGE: u32 = 20;
const SPIKE_DAMAGE: u32 = 10;
const TRAP_PIT_DAMAGE: u32 = 20;
const CONTACT_DAMAGE: u32 = 1;
const KILL_EXPERIENCE: u32 = 5;

/// Structures a zombie batters instead of walking through.
const ZOMBIE_BLOCKERS: [Blocker; 2] = [Blocker::Wall, Blocker::ClosedDoor];

pub(crate) fn ready_to_act(action_counter: u32) -> bool {
    action_counter % ZOMBIE_ACTION_PERIOD == 0
}

impl World {
    pub(crate) fn fire_turret(
        &mut self,
        turret: StructureId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let Some(structure) = self.store.structure_mut(turret) else {
            return;
        };
        if !structure.health.is_alive() {
            return;
        }
        let StructureState::Turret { cooldown } = &mut structure.state else {
            return;
        };
        if *cooldown > 0 {
            return;
        }
        *cooldown = TURRET_COOLDOWN_TICKS;
        let tile = structure.tile;
        self.store.push_bullet(Bullet {
            tile,
            direction,
            age: 0,
        });
        out_events.push(Event::TurretFired { turret, direction });
    }

    /// Moves a ready zombie one tile. A wall or closed door in the way takes
    /// damage instead and the zombie stays put.
    pub(crate) fn step_zombie(
        &mut self,
        zombie: ZombieId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let Some(entry) = self.store.zombie(zombie) else {
            return;
        };
        if !entry.health.is_alive() || !ready_to_act(entry.action_counter) {
            return;
        }
        let from = entry.tile;
        if let Some(entry) = self.store.zombie_mut(zombie) {
            entry.facing = direction;
        }

        let Some(to) = from.step(direction).filter(|tile| self.in_bounds(*tile)) else {
            return;
        };

        if self.store.is_blocked(to, &ZOMBIE_BLOCKERS) {
            if let Some(structure) = self.store.structure_at_mut(to) {
                structure.health = structure.health.damaged(BUMP_DAMAGE);
                out_events.push(Event::StructureDamaged {
                    structure: structure.id,
                    amount: BUMP_DAMAGE,
                });
            }
            return;
        }

        self.store.move_zombie(zombie, to);
        out_events.push(Event::ZombieAdvanced { zombie, from, to });
    }

    pub(crate) fn resolve_phase(&mut self, phase: CombatPhase, out_events: &mut Vec<Event>) {
        match phase {
            CombatPhase::TurretCooldowns => self.cool_turrets(),
            CombatPhase::Projectiles => self.advance_bullets(out_events),
            CombatPhase::Hazards => self.apply_hazards(out_events),
            CombatPhase::ZombiePhases => self.advance_zombie_phases(),
            CombatPhase::Contact => self.resolve_contact(out_events),
            CombatPhase::Casualties => self.prune_casualties(out_events),
        }
    }

    fn cool_turrets(&mut self) {
        for structure in self.store.structures_mut() {
            if let StructureState::Turret { cooldown } = &mut structure.state {
                *cooldown = cooldown.saturating_sub(1);
            }
        }
    }

    fn advance_bullets(&mut self, out_events: &mut Vec<Event>) {
        for mut bullet in self.store.take_bullets() {
            bullet.age += 1;
            let Some(tile) = bullet.tile.step(bullet.direction) else {
                continue;
            };
            if !self.in_bounds(tile) || bullet.age > BULLET_MAX_AGE {
                continue;
            }
            bullet.tile = tile;

            match self.store.living_zombie_at(tile) {
                Some(zombie) => {
                    self.wound_zombie(zombie, BULLET_DAMAGE, DamageSource::Bullet, out_events);
                }
                None => self.store.push_bullet(bullet),
            }
        }
    }

    fn apply_hazards(&mut self, out_events: &mut Vec<Event>) {
        let hazards: Vec<(TilePosition, DamageSource)> = self
            .store
            .structures()
            .filter(|structure| structure.health.is_alive())
            .filter_map(|structure| match structure.state {
                StructureState::Spike => Some((structure.tile, DamageSource::Spike)),
                StructureState::TrapPit => Some((structure.tile, DamageSource::TrapPit)),
                _ => None,
            })
            .collect();

        for (tile, source) in hazards {
            for zombie in self.store.living_zombies_at(tile) {
                let amount = match source {
                    DamageSource::TrapPit => {
                        if let Some(entry) = self.store.zombie_mut(zombie) {
                            entry.action_counter = 0;
                        }
                        TRAP_PIT_DAMAGE
                    }
                    _ => SPIKE_DAMAGE,
                };
                self.wound_zombie(zombie, amount, source, out_events);
            }
        }
    }

    fn advance_zombie_phases(&mut self) {
        for zombie in self.store.zombies_mut() {
            if zombie.health.is_alive() {
                zombie.action_counter = zombie.action_counter.wrapping_add(1);
            }
        }
    }

    fn resolve_contact(&mut self, out_events: &mut Vec<Event>) {
        for zombie in self.store.living_zombies_at(self.colonist.tile) {
            if !self.colonist_alive() {
                return;
            }
            self.colonist.health = self.colonist.health.damaged(CONTACT_DAMAGE);
            out_events.push(Event::ColonistWounded {
                zombie,
                health: self.colonist.health,
            });
        }
    }

    fn prune_casualties(&mut self, out_events: &mut Vec<Event>) {
        for zombie in self.store.remove_dead_zombies() {
            out_events.push(Event::ZombieKilled {
                zombie: zombie.id,
                tile: zombie.tile,
            });
            if self.credits.record_kill(zombie.id) {
                self.award_experience(KILL_EXPERIENCE, out_events);
            }
        }

        for structure in self.store.remove_dead_structures() {
            out_events.push(Event::StructureDestroyed {
                structure: structure.id,
                kind: structure.state.kind(),
                tile: structure.tile,
            });
        }

        if !self.colonist_alive() && !self.death_reported {
            self.death_reported = true;
            out_events.push(Event::ColonistDied);
        }
    }

    fn wound_zombie(
        &mut self,
        zombie: ZombieId,
        amount: u32,
        source: DamageSource,
        out_events: &mut Vec<Event>,
    ) {
        if let Some(entry) = self.store.zombie_mut(zombie) {
            entry.health = entry.health.damaged(amount);
            out_events.push(Event::ZombieDamaged {
                zombie,
                amount,
                source,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{apply, query, WorldConfig};
    use deadhold_core::{Command, Health, StructureKind, WallMaterial};

    fn world() -> World {
        World::new(WorldConfig::bare(20, 20))
    }

    fn place(world: &mut World, tile: TilePosition, kind: StructureKind) -> StructureId {
        world
            .store
            .insert_structure(tile, kind.max_health(), kind.initial_state())
            .expect("free tile")
    }

    fn phase(world: &mut World, phase: CombatPhase, events: &mut Vec<Event>) {
        apply(world, Command::ResolveCombatPhase { phase }, events);
    }

    #[test]
    fn zombies_act_every_fourth_counter_value() {
        assert!(ready_to_act(0));
        assert!(!ready_to_act(1));
        assert!(!ready_to_act(3));
        assert!(ready_to_act(4));
        assert!(ready_to_act(8));
    }

    #[test]
    fn turret_fires_once_then_cools_down() {
        let mut world = world();
        let turret = place(&mut world, TilePosition::new(3, 3), StructureKind::Turret);
        let mut events = Vec::new();

        world.fire_turret(turret, Direction::East, &mut events);
        world.fire_turret(turret, Direction::East, &mut events);

        assert_eq!(
            events,
            vec![Event::TurretFired {
                turret,
                direction: Direction::East
            }]
        );
        assert_eq!(query::bullets(&world).len(), 1);

        for _ in 0..TURRET_COOLDOWN_TICKS {
            phase(&mut world, CombatPhase::TurretCooldowns, &mut events);
        }
        world.fire_turret(turret, Direction::North, &mut events);
        assert_eq!(query::bullets(&world).len(), 2);
    }

    #[test]
    fn bullets_expire_after_max_age() {
        let mut world = World::new(WorldConfig::bare(60, 5));
        let turret = place(&mut world, TilePosition::new(0, 2), StructureKind::Turret);
        let mut events = Vec::new();
        world.fire_turret(turret, Direction::East, &mut events);

        for _ in 0..BULLET_MAX_AGE {
            phase(&mut world, CombatPhase::Projectiles, &mut events);
        }
        let bullets = query::bullets(&world);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].tile, TilePosition::new(20, 2));

        phase(&mut world, CombatPhase::Projectiles, &mut events);
        assert!(query::bullets(&world).is_empty());
    }

    #[test]
    fn bullet_leaving_grid_is_removed() {
        let mut world = world();
        let turret = place(&mut world, TilePosition::new(0, 5), StructureKind::Turret);
        let mut events = Vec::new();
        world.fire_turret(turret, Direction::West, &mut events);
        phase(&mut world, CombatPhase::Projectiles, &mut events);
        assert!(query::bullets(&world).is_empty());
    }

    #[test]
    fn bullet_hits_lowest_zombie_once_and_is_consumed() {
        let mut world = world();
        let turret = place(&mut world, TilePosition::new(3, 3), StructureKind::Turret);
        let tile = TilePosition::new(4, 3);
        let first = world
            .store
            .spawn_zombie(tile, Health::new(100), Direction::South);
        let second = world
            .store
            .spawn_zombie(tile, Health::new(100), Direction::South);
        let mut events = Vec::new();

        world.fire_turret(turret, Direction::East, &mut events);
        events.clear();
        phase(&mut world, CombatPhase::Projectiles, &mut events);

        assert_eq!(
            events,
            vec![Event::ZombieDamaged {
                zombie: first,
                amount: BULLET_DAMAGE,
                source: DamageSource::Bullet
            }]
        );
        assert!(query::bullets(&world).is_empty());
        let view = query::zombie_view(&world);
        let health = |id| view.iter().find(|z| z.id == id).map(|z| z.health);
        assert_eq!(health(first), Some(Health::new(50)));
        assert_eq!(health(second), Some(Health::new(100)));
    }

    #[test]
    fn zombie_bumps_closed_door_but_walks_through_open_one() {
        let mut world = world();
        let door_tile = TilePosition::new(5, 4);
        let door = place(&mut world, door_tile, StructureKind::Door);
        let zombie = world
            .store
            .spawn_zombie(TilePosition::new(5, 5), Health::new(100), Direction::South);
        let mut events = Vec::new();

        world.step_zombie(zombie, Direction::North, &mut events);
        assert_eq!(
            events,
            vec![Event::StructureDamaged {
                structure: door,
                amount: BUMP_DAMAGE
            }]
        );

        if let Some(StructureState::Door { open }) = world
            .store
            .structure_at_mut(door_tile)
            .map(|structure| &mut structure.state)
        {
            *open = true;
        }
        events.clear();
        world.step_zombie(zombie, Direction::North, &mut events);
        assert_eq!(
            events,
            vec![Event::ZombieAdvanced {
                zombie,
                from: TilePosition::new(5, 5),
                to: door_tile
            }]
        );
    }

    #[test]
    fn zombies_walk_over_hazards_and_turrets() {
        let mut world = world();
        let _ = place(&mut world, TilePosition::new(2, 1), StructureKind::Spike);
        let zombie = world
            .store
            .spawn_zombie(TilePosition::new(2, 2), Health::new(100), Direction::South);
        let mut events = Vec::new();
        world.step_zombie(zombie, Direction::North, &mut events);
        assert!(matches!(events[..], [Event::ZombieAdvanced { .. }]));
    }

    #[test]
    fn unready_zombie_does_not_step() {
        let mut world = world();
        let zombie = world
            .store
            .spawn_zombie(TilePosition::new(2, 2), Health::new(100), Direction::South);
        let mut events = Vec::new();
        phase(&mut world, CombatPhase::ZombiePhases, &mut events);
        world.step_zombie(zombie, Direction::East, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn destroyed_wall_is_pruned() {
        let mut world = world();
        let tile = TilePosition::new(6, 6);
        let wall = place(&mut world, tile, StructureKind::Wall(WallMaterial::Wood));
        let zombie = world
            .store
            .spawn_zombie(TilePosition::new(6, 7), Health::new(100), Direction::South);
        let mut events = Vec::new();
        for _ in 0..4 {
            world.step_zombie(zombie, Direction::North, &mut events);
        }
        events.clear();
        phase(&mut world, CombatPhase::Casualties, &mut events);
        assert_eq!(
            events,
            vec![Event::StructureDestroyed {
                structure: wall,
                kind: StructureKind::Wall(WallMaterial::Wood),
                tile
            }]
        );
        assert!(query::structure_view(&world).iter().next().is_none());
    }

    #[test]
    fn colonist_death_is_reported_once() {
        let mut world = world();
        let tile = query::colonist(&world).tile;
        world.colonist.health = Health::new(1);
        let _ = world
            .store
            .spawn_zombie(tile, Health::new(100), Direction::South);
        let _ = world
            .store
            .spawn_zombie(tile, Health::new(100), Direction::South);
        let mut events = Vec::new();

        phase(&mut world, CombatPhase::Contact, &mut events);
        phase(&mut world, CombatPhase::Casualties, &mut events);
        phase(&mut world, CombatPhase::Contact, &mut events);
        phase(&mut world, CombatPhase::Casualties, &mut events);

        let wounds = events
            .iter()
            .filter(|event| matches!(event, Event::ColonistWounded { .. }))
            .count();
        let deaths = events
            .iter()
            .filter(|event| matches!(event, Event::ColonistDied))
            .count();
        assert_eq!(wounds, 1);
        assert_eq!(deaths, 1);
        assert!(!query::colonist_alive(&world));
    }
}
