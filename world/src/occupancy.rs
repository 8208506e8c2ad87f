//! Position index mapping tiles to the entities standing on them.

use std::collections::HashMap;

use deadhold_core::{ResourceId, StructureId, TilePosition, ZombieId};

/// Tile-keyed lookup tables for every entity category.
///
/// Structures and undepleted resources claim a tile exclusively. Zombies
/// share tiles freely, so each tile maps to a list kept in identifier order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Occupancy {
    structures: HashMap<TilePosition, StructureId>,
    resources: HashMap<TilePosition, ResourceId>,
    zombies: HashMap<TilePosition, Vec<ZombieId>>,
}

impl Occupancy {
    /// Claims `tile` for a structure. Fails when another structure holds it.
    pub(crate) fn claim_structure(&mut self, tile: TilePosition, id: StructureId) -> bool {
        if self.structures.contains_key(&tile) {
            return false;
        }
        let _ = self.structures.insert(tile, id);
        true
    }

    pub(crate) fn release_structure(&mut self, tile: TilePosition) {
        let _ = self.structures.remove(&tile);
    }

    pub(crate) fn structure(&self, tile: TilePosition) -> Option<StructureId> {
        self.structures.get(&tile).copied()
    }

    /// Claims `tile` for an undepleted resource node.
    pub(crate) fn claim_resource(&mut self, tile: TilePosition, id: ResourceId) -> bool {
        if self.resources.contains_key(&tile) {
            return false;
        }
        let _ = self.resources.insert(tile, id);
        true
    }

    pub(crate) fn release_resource(&mut self, tile: TilePosition) {
        let _ = self.resources.remove(&tile);
    }

    pub(crate) fn resource(&self, tile: TilePosition) -> Option<ResourceId> {
        self.resources.get(&tile).copied()
    }

    pub(crate) fn add_zombie(&mut self, tile: TilePosition, id: ZombieId) {
        let entries = self.zombies.entry(tile).or_default();
        let index = entries.partition_point(|existing| *existing < id);
        entries.insert(index, id);
    }

    pub(crate) fn remove_zombie(&mut self, tile: TilePosition, id: ZombieId) {
        let Some(entries) = self.zombies.get_mut(&tile) else {
            return;
        };
        entries.retain(|existing| *existing != id);
        if entries.is_empty() {
            let _ = self.zombies.remove(&tile);
        }
    }

    pub(crate) fn move_zombie(&mut self, from: TilePosition, to: TilePosition, id: ZombieId) {
        self.remove_zombie(from, id);
        self.add_zombie(to, id);
    }

    /// Zombies standing on `tile`, in identifier order.
    pub(crate) fn zombies(&self, tile: TilePosition) -> &[ZombieId] {
        match self.zombies.get(&tile) {
            Some(entries) => entries,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_claims_are_exclusive() {
        let mut occupancy = Occupancy::default();
        let tile = TilePosition::new(3, 4);
        assert!(occupancy.claim_structure(tile, StructureId::new(1)));
        assert!(!occupancy.claim_structure(tile, StructureId::new(2)));
        assert_eq!(occupancy.structure(tile), Some(StructureId::new(1)));

        occupancy.release_structure(tile);
        assert_eq!(occupancy.structure(tile), None);
        assert!(occupancy.claim_structure(tile, StructureId::new(2)));
    }

    #[test]
    fn resources_and_structures_are_indexed_separately() {
        let mut occupancy = Occupancy::default();
        let tile = TilePosition::new(1, 1);
        assert!(occupancy.claim_resource(tile, ResourceId::new(9)));
        assert!(occupancy.claim_structure(tile, StructureId::new(1)));
        assert_eq!(occupancy.resource(tile), Some(ResourceId::new(9)));

        occupancy.release_resource(tile);
        assert_eq!(occupancy.resource(tile), None);
        assert_eq!(occupancy.structure(tile), Some(StructureId::new(1)));
    }

    #[test]
    fn zombies_share_tiles_in_identifier_order() {
        let mut occupancy = Occupancy::default();
        let tile = TilePosition::new(2, 2);
        occupancy.add_zombie(tile, ZombieId::new(7));
        occupancy.add_zombie(tile, ZombieId::new(3));
        occupancy.add_zombie(tile, ZombieId::new(5));
        assert_eq!(
            occupancy.zombies(tile),
            &[ZombieId::new(3), ZombieId::new(5), ZombieId::new(7)]
        );

        let next = TilePosition::new(2, 3);
        occupancy.move_zombie(tile, next, ZombieId::new(5));
        assert_eq!(occupancy.zombies(tile), &[ZombieId::new(3), ZombieId::new(7)]);
        assert_eq!(occupancy.zombies(next), &[ZombieId::new(5)]);

        occupancy.remove_zombie(next, ZombieId::new(5));
        assert!(occupancy.zombies(next).is_empty());
    }
}
