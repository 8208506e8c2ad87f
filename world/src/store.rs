//! Registries owning every mutable simulation entity.

use std::collections::{BTreeMap, BTreeSet};

use deadhold_core::{
    Blocker, Direction, Health, ResourceId, ResourceKind, StructureId, StructureState,
    TilePosition, ZombieId,
};

use crate::occupancy::Occupancy;

/// The player-controlled colonist.
#[derive(Clone, Debug)]
pub(crate) struct Colonist {
    pub(crate) tile: TilePosition,
    pub(crate) health: Health,
    pub(crate) facing: Direction,
}

#[derive(Clone, Debug)]
pub(crate) struct Zombie {
    pub(crate) id: ZombieId,
    pub(crate) tile: TilePosition,
    pub(crate) health: Health,
    pub(crate) facing: Direction,
    /// Incremented once per tick; the zombie acts when it is a multiple of
    /// the action period.
    pub(crate) action_counter: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Structure {
    pub(crate) id: StructureId,
    pub(crate) tile: TilePosition,
    pub(crate) health: Health,
    pub(crate) state: StructureState,
}

#[derive(Clone, Debug)]
pub(crate) struct ResourceNode {
    pub(crate) id: ResourceId,
    pub(crate) tile: TilePosition,
    pub(crate) kind: ResourceKind,
    pub(crate) depleted: bool,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Bullet {
    pub(crate) tile: TilePosition,
    pub(crate) direction: Direction,
    pub(crate) age: u32,
}

/// Owns zombies, structures, resource nodes, bullets, and floor tiles, and
/// keeps the position index in step with every insertion, move, and removal.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntityStore {
    zombies: BTreeMap<ZombieId, Zombie>,
    structures: BTreeMap<StructureId, Structure>,
    resources: BTreeMap<ResourceId, ResourceNode>,
    bullets: Vec<Bullet>,
    floors: BTreeSet<TilePosition>,
    occupancy: Occupancy,
    next_zombie: u32,
    next_structure: u32,
    next_resource: u32,
}

impl EntityStore {
    pub(crate) fn spawn_zombie(
        &mut self,
        tile: TilePosition,
        health: Health,
        facing: Direction,
    ) -> ZombieId {
        let id = ZombieId::new(self.next_zombie);
        self.next_zombie = self.next_zombie.saturating_add(1);
        self.occupancy.add_zombie(tile, id);
        let _ = self.zombies.insert(
            id,
            Zombie {
                id,
                tile,
                health,
                facing,
                action_counter: 0,
            },
        );
        id
    }

    pub(crate) fn zombies(&self) -> impl Iterator<Item = &Zombie> {
        self.zombies.values()
    }

    pub(crate) fn zombies_mut(&mut self) -> impl Iterator<Item = &mut Zombie> {
        self.zombies.values_mut()
    }

    pub(crate) fn zombie(&self, id: ZombieId) -> Option<&Zombie> {
        self.zombies.get(&id)
    }

    pub(crate) fn zombie_mut(&mut self, id: ZombieId) -> Option<&mut Zombie> {
        self.zombies.get_mut(&id)
    }

    /// Relocates a zombie, keeping the position index consistent.
    pub(crate) fn move_zombie(&mut self, id: ZombieId, to: TilePosition) {
        let Some(zombie) = self.zombies.get_mut(&id) else {
            return;
        };
        self.occupancy.move_zombie(zombie.tile, to, id);
        zombie.tile = to;
    }

    /// Living zombies standing on `tile`, in identifier order.
    pub(crate) fn living_zombies_at(&self, tile: TilePosition) -> Vec<ZombieId> {
        self.occupancy
            .zombies(tile)
            .iter()
            .copied()
            .filter(|id| {
                self.zombies
                    .get(id)
                    .is_some_and(|zombie| zombie.health.is_alive())
            })
            .collect()
    }

    /// First living zombie standing on `tile`.
    pub(crate) fn living_zombie_at(&self, tile: TilePosition) -> Option<ZombieId> {
        self.occupancy.zombies(tile).iter().copied().find(|id| {
            self.zombies
                .get(id)
                .is_some_and(|zombie| zombie.health.is_alive())
        })
    }

    /// Removes every zombie whose health dropped to zero or below.
    pub(crate) fn remove_dead_zombies(&mut self) -> Vec<Zombie> {
        let dead: Vec<ZombieId> = self
            .zombies
            .values()
            .filter(|zombie| !zombie.health.is_alive())
            .map(|zombie| zombie.id)
            .collect();

        let mut removed = Vec::with_capacity(dead.len());
        for id in dead {
            if let Some(zombie) = self.zombies.remove(&id) {
                self.occupancy.remove_zombie(zombie.tile, id);
                removed.push(zombie);
            }
        }
        removed
    }

    /// Places a structure, failing when another structure claims the tile.
    pub(crate) fn insert_structure(
        &mut self,
        tile: TilePosition,
        health: Health,
        state: StructureState,
    ) -> Option<StructureId> {
        let id = StructureId::new(self.next_structure);
        if !self.occupancy.claim_structure(tile, id) {
            return None;
        }
        self.next_structure = self.next_structure.saturating_add(1);
        let _ = self.structures.insert(
            id,
            Structure {
                id,
                tile,
                health,
                state,
            },
        );
        Some(id)
    }

    pub(crate) fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.structures.values()
    }

    pub(crate) fn structures_mut(&mut self) -> impl Iterator<Item = &mut Structure> {
        self.structures.values_mut()
    }

    pub(crate) fn structure_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.structures.get_mut(&id)
    }

    pub(crate) fn structure_at(&self, tile: TilePosition) -> Option<&Structure> {
        self.occupancy
            .structure(tile)
            .and_then(|id| self.structures.get(&id))
    }

    pub(crate) fn structure_at_mut(&mut self, tile: TilePosition) -> Option<&mut Structure> {
        let id = self.occupancy.structure(tile)?;
        self.structures.get_mut(&id)
    }

    /// Removes every structure whose health dropped to zero or below.
    pub(crate) fn remove_dead_structures(&mut self) -> Vec<Structure> {
        let dead: Vec<StructureId> = self
            .structures
            .values()
            .filter(|structure| !structure.health.is_alive())
            .map(|structure| structure.id)
            .collect();

        let mut removed = Vec::with_capacity(dead.len());
        for id in dead {
            if let Some(structure) = self.structures.remove(&id) {
                self.occupancy.release_structure(structure.tile);
                removed.push(structure);
            }
        }
        removed
    }

    /// Adds a resource node. Undepleted nodes claim their tile exclusively;
    /// depleted ones are kept for persistence only.
    pub(crate) fn insert_resource(
        &mut self,
        tile: TilePosition,
        kind: ResourceKind,
        depleted: bool,
    ) -> Option<ResourceId> {
        let id = ResourceId::new(self.next_resource);
        if !depleted && !self.occupancy.claim_resource(tile, id) {
            return None;
        }
        self.next_resource = self.next_resource.saturating_add(1);
        let _ = self.resources.insert(
            id,
            ResourceNode {
                id,
                tile,
                kind,
                depleted,
            },
        );
        Some(id)
    }

    pub(crate) fn resources(&self) -> impl Iterator<Item = &ResourceNode> {
        self.resources.values()
    }

    /// Undepleted resource node standing on `tile`.
    pub(crate) fn resource_at(&self, tile: TilePosition) -> Option<&ResourceNode> {
        self.occupancy
            .resource(tile)
            .and_then(|id| self.resources.get(&id))
    }

    /// Marks the node on `tile` depleted and drops it from the blocking set.
    pub(crate) fn deplete_resource_at(
        &mut self,
        tile: TilePosition,
    ) -> Option<(ResourceId, ResourceKind)> {
        let id = self.occupancy.resource(tile)?;
        let node = self.resources.get_mut(&id)?;
        node.depleted = true;
        self.occupancy.release_resource(tile);
        Some((node.id, node.kind))
    }

    /// Reports whether any entity of the provided categories occupies `tile`.
    ///
    /// Structures at zero health stop blocking immediately, before the
    /// casualty pass removes them.
    pub(crate) fn is_blocked(&self, tile: TilePosition, blockers: &[Blocker]) -> bool {
        let structure = self
            .structure_at(tile)
            .filter(|structure| structure.health.is_alive());
        let resource = self.resource_at(tile);
        blockers.iter().any(|blocker| match blocker {
            Blocker::Wall => {
                structure.is_some_and(|s| matches!(s.state, StructureState::Wall { .. }))
            }
            Blocker::ClosedDoor => structure
                .is_some_and(|s| matches!(s.state, StructureState::Door { open: false })),
            Blocker::AnyStructure => structure.is_some(),
            Blocker::Tree => resource.is_some_and(|r| r.kind == ResourceKind::Tree),
            Blocker::Rock => resource.is_some_and(|r| r.kind == ResourceKind::Rock),
        })
    }

    pub(crate) fn push_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub(crate) fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Removes all bullets so the caller can advance them and put back the
    /// survivors through [`EntityStore::push_bullet`].
    pub(crate) fn take_bullets(&mut self) -> Vec<Bullet> {
        std::mem::take(&mut self.bullets)
    }

    pub(crate) fn add_floor(&mut self, tile: TilePosition) {
        let _ = self.floors.insert(tile);
    }

    pub(crate) fn floors(&self) -> impl Iterator<Item = TilePosition> + '_ {
        self.floors.iter().copied()
    }

    pub(crate) fn has_floor(&self, tile: TilePosition) -> bool {
        self.floors.contains(&tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadhold_core::{StructureKind, WallMaterial};

    fn wall() -> StructureState {
        StructureKind::Wall(WallMaterial::Wood).initial_state()
    }

    #[test]
    fn depleted_resources_stop_blocking() {
        let mut store = EntityStore::default();
        let tile = TilePosition::new(4, 4);
        let _ = store.insert_resource(tile, ResourceKind::Tree, false);
        assert!(store.is_blocked(tile, &[Blocker::Tree]));
        assert!(!store.is_blocked(tile, &[Blocker::Rock]));

        let harvested = store.deplete_resource_at(tile);
        assert_eq!(harvested.map(|(_, kind)| kind), Some(ResourceKind::Tree));
        assert!(!store.is_blocked(tile, &[Blocker::Tree]));
        assert!(store.deplete_resource_at(tile).is_none());
        assert!(store.resources().all(|node| node.depleted));
    }

    #[test]
    fn open_doors_do_not_block() {
        let mut store = EntityStore::default();
        let tile = TilePosition::new(1, 2);
        let _ = store.insert_structure(
            tile,
            Health::new(100),
            StructureState::Door { open: true },
        );
        assert!(!store.is_blocked(tile, &[Blocker::Wall, Blocker::ClosedDoor]));
        assert!(store.is_blocked(tile, &[Blocker::AnyStructure]));
    }

    #[test]
    fn second_structure_on_tile_is_rejected() {
        let mut store = EntityStore::default();
        let tile = TilePosition::new(0, 0);
        assert!(store.insert_structure(tile, Health::new(100), wall()).is_some());
        assert!(store.insert_structure(tile, Health::new(100), wall()).is_none());
        assert_eq!(store.structures().count(), 1);
    }

    #[test]
    fn dead_entities_are_removed_from_index() {
        let mut store = EntityStore::default();
        let tile = TilePosition::new(2, 2);
        let zombie = store.spawn_zombie(tile, Health::new(100), Direction::South);
        let wall_id = store
            .insert_structure(TilePosition::new(3, 3), Health::new(100), wall())
            .expect("free tile");

        if let Some(entry) = store.zombie_mut(zombie) {
            entry.health = Health::new(-10);
        }
        if let Some(entry) = store.structure_mut(wall_id) {
            entry.health = Health::new(0);
        }
        assert_eq!(store.living_zombie_at(tile), None);

        assert_eq!(store.remove_dead_zombies().len(), 1);
        assert_eq!(store.remove_dead_structures().len(), 1);
        assert!(store.zombie(zombie).is_none());
        assert!(store.structure_at(TilePosition::new(3, 3)).is_none());
    }
}
